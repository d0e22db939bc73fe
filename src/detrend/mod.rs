// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Removal of the linear dependence of instrumental magnitude on airmass.
//!
//! Flux and flux uncertainties are converted to instrumental magnitudes, a
//! straight line of magnitude against airmass is fitted with each residual
//! weighted by `1 / σ_mag²` (numpy's `polyfit` convention for `w`), and the
//! line is subtracted.

mod error;

pub use error::DetrendError;

use log::{debug, warn};

use crate::{
    constants::{MAG_ERR_FACTOR, POGSON},
    lightcurve::{FluxUnits, LightCurve},
    math::{weighted_linear_fit, LinearFit},
};

/// Magnitudes with the airmass trend removed, and the fit that was removed.
#[derive(Debug, Clone, PartialEq)]
pub struct AirmassCorrection {
    pub magnitudes: Vec<f64>,
    pub magnitude_errors: Vec<f64>,
    pub fit: LinearFit,
}

/// Detrend raw fluxes against airmass.
///
/// Every flux must be positive and every flux uncertainty positive, otherwise
/// the magnitudes (or their weights) are undefined and an error is returned.
/// If all airmass values are identical, there is no trend to fit; the weighted
/// mean magnitude is removed instead (and a warning is logged).
pub fn correct_for_airmass(
    flux: &[f64],
    flux_err: &[f64],
    airmass: &[f64],
) -> Result<AirmassCorrection, DetrendError> {
    let n = flux.len();
    if flux_err.len() != n || airmass.len() != n {
        return Err(DetrendError::LengthMismatch {
            flux: n,
            flux_err: flux_err.len(),
            airmass: airmass.len(),
        });
    }
    if n == 0 {
        return Err(DetrendError::Empty);
    }

    for (i, ((&f, &e), &a)) in flux.iter().zip(flux_err).zip(airmass).enumerate() {
        if !(f.is_finite() && f > 0.0) {
            return Err(DetrendError::NonPositiveFlux { index: i, flux: f });
        }
        if !(e.is_finite() && e > 0.0) {
            return Err(DetrendError::NonPositiveUncertainty {
                index: i,
                flux_err: e,
            });
        }
        if !a.is_finite() {
            return Err(DetrendError::NonFiniteAirmass { index: i, airmass: a });
        }
    }

    let magnitude_errors: Vec<f64> = flux
        .iter()
        .zip(flux_err)
        .map(|(f, e)| MAG_ERR_FACTOR * e / f)
        .collect();
    let magnitudes: Vec<f64> = flux.iter().map(|f| POGSON * f.log10()).collect();
    // Each residual is scaled by 1 / σ² before squaring.
    let weights: Vec<f64> = magnitude_errors.iter().map(|e| e.powi(-4)).collect();

    let fit = weighted_linear_fit(airmass, &magnitudes, &weights)
        .ok_or(DetrendError::DegenerateWeights)?;
    if fit.degenerate {
        warn!("All airmass values are identical; removing the weighted mean magnitude instead of an airmass trend");
    } else {
        debug!(
            "Airmass fit: mag = {:.6} * airmass + {:.6}",
            fit.slope, fit.intercept
        );
    }

    let magnitudes = magnitudes
        .into_iter()
        .zip(airmass)
        .map(|(m, &a)| m - fit.eval(a))
        .collect();

    Ok(AirmassCorrection {
        magnitudes,
        magnitude_errors,
        fit,
    })
}

/// Detrend a light curve. The result has the same times and airmass, with the
/// flux replaced by detrended magnitudes and the flux uncertainty by magnitude
/// uncertainties.
pub fn detrend(light_curve: &LightCurve) -> Result<LightCurve, DetrendError> {
    if light_curve.units() == FluxUnits::Magnitude {
        return Err(DetrendError::AlreadyMagnitudes);
    }

    let AirmassCorrection {
        magnitudes,
        magnitude_errors,
        fit: _,
    } = correct_for_airmass(
        light_curve.flux(),
        light_curve.flux_err(),
        light_curve.airmass(),
    )?;

    Ok(LightCurve::new(
        light_curve.time().to_vec(),
        magnitudes,
        magnitude_errors,
        light_curve.airmass().to_vec(),
        FluxUnits::Magnitude,
    )?)
}
