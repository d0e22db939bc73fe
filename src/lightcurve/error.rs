// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LightCurveError {
    #[error("Light curve has {expected} times but {got} {what} values")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("Cannot fold on a period of {0}; periods must be positive and finite")]
    InvalidPeriod(f64),

    #[error("Cannot fold with a non-finite epoch ({0})")]
    InvalidEpoch(f64),
}
