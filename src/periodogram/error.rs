// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PeriodSearchError {
    #[error("Periods must be greater than 0 (got a minimum period of {0})")]
    NonPositiveMinPeriod(f64),

    #[error("The maximum period ({max}) must be larger than the minimum period ({min})")]
    MaxNotAboveMin { min: f64, max: f64 },

    #[error("At least one trial period is needed")]
    NoTrialPeriods,

    #[error("Got {time} times but {flux} fluxes")]
    LengthMismatch { time: usize, flux: usize },

    #[error("Got {periods} periods but {power} power values")]
    SpectrumLengthMismatch { periods: usize, power: usize },

    #[error("A period search needs at least 2 finite samples, but only {0} are available")]
    TooFewSamples(usize),
}
