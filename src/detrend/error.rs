// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use thiserror::Error;

use crate::lightcurve::LightCurveError;

#[derive(Error, Debug)]
pub enum DetrendError {
    #[error("Cannot detrend: got {flux} fluxes, {flux_err} flux uncertainties and {airmass} airmass values")]
    LengthMismatch {
        flux: usize,
        flux_err: usize,
        airmass: usize,
    },

    #[error("Cannot detrend an empty light curve")]
    Empty,

    #[error("Flux at index {index} is {flux}; magnitudes need positive fluxes")]
    NonPositiveFlux { index: usize, flux: f64 },

    #[error("Flux uncertainty at index {index} is {flux_err}; fit weights need positive uncertainties")]
    NonPositiveUncertainty { index: usize, flux_err: f64 },

    #[error("Airmass at index {index} is {airmass}")]
    NonFiniteAirmass { index: usize, airmass: f64 },

    #[error("The airmass fit weights sum to zero or overflow")]
    DegenerateWeights,

    #[error("This light curve is already in magnitudes and has been detrended")]
    AlreadyMagnitudes,

    #[error(transparent)]
    LightCurve(#[from] LightCurveError),
}
