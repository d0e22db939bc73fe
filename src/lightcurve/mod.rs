// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Light curves: parallel time, flux, flux-uncertainty and airmass sequences
//! for a single object, and phase folding of them.

mod error;

pub use error::LightCurveError;

use log::trace;

use crate::{
    constants::MJD_OFFSET,
    math::{argsort, permute},
};

/// What the `flux` column of a light curve holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FluxUnits {
    /// Instrumental flux [e⁻ s⁻¹].
    Flux,

    /// Instrumental magnitudes, e.g. after detrending.
    Magnitude,
}

impl FluxUnits {
    /// The y-axis label to use when plotting.
    pub fn axis_label(self) -> &'static str {
        match self {
            FluxUnits::Flux => "Instrumental flux / e- s^-1",
            FluxUnits::Magnitude => "Magnitudes",
        }
    }
}

/// A single object's observations. All sequences have the same length; when
/// read from a data file, they are sorted by time.
#[derive(Debug, Clone, PartialEq)]
pub struct LightCurve {
    /// Modified Julian Dates of the mid-exposure times.
    time: Vec<f64>,
    flux: Vec<f64>,
    flux_err: Vec<f64>,
    airmass: Vec<f64>,
    units: FluxUnits,
}

impl LightCurve {
    pub fn new(
        time: Vec<f64>,
        flux: Vec<f64>,
        flux_err: Vec<f64>,
        airmass: Vec<f64>,
        units: FluxUnits,
    ) -> Result<LightCurve, LightCurveError> {
        let n = time.len();
        for (what, len) in [
            ("flux", flux.len()),
            ("flux uncertainty", flux_err.len()),
            ("airmass", airmass.len()),
        ] {
            if len != n {
                return Err(LightCurveError::LengthMismatch {
                    what,
                    expected: n,
                    got: len,
                });
            }
        }

        Ok(LightCurve {
            time,
            flux,
            flux_err,
            airmass,
            units,
        })
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    pub fn time(&self) -> &[f64] {
        &self.time
    }

    pub fn flux(&self) -> &[f64] {
        &self.flux
    }

    pub fn flux_err(&self) -> &[f64] {
        &self.flux_err
    }

    pub fn airmass(&self) -> &[f64] {
        &self.airmass
    }

    pub fn units(&self) -> FluxUnits {
        self.units
    }

    /// Sort all sequences by ascending time. Every sequence is permuted by the
    /// same (stable) permutation.
    pub fn sort_by_time(&mut self) {
        let order = argsort(&self.time);
        self.time = permute(&self.time, &order);
        self.flux = permute(&self.flux, &order);
        self.flux_err = permute(&self.flux_err, &order);
        self.airmass = permute(&self.airmass, &order);
    }

    /// The integer part of the earliest finite time. Plots are drawn relative
    /// to this so the x-axis labels stay readable.
    pub fn reference_mjd(&self) -> Option<i64> {
        self.time
            .iter()
            .copied()
            .filter(|t| t.is_finite())
            .min_by(f64::total_cmp)
            .map(|t| t.floor() as i64)
    }

    /// Fold this light curve on `period` [days], with phase zero at `epoch`.
    /// If `epoch_is_mjd` is false, `epoch` is a Julian Date and is converted
    /// first. With `double`, a copy shifted by one in phase is appended so the
    /// wrap point can be seen.
    pub fn fold(
        &self,
        period: f64,
        epoch: f64,
        epoch_is_mjd: bool,
        double: bool,
    ) -> Result<FoldedLightCurve, LightCurveError> {
        if !(period.is_finite() && period > 0.0) {
            return Err(LightCurveError::InvalidPeriod(period));
        }
        if !epoch.is_finite() {
            return Err(LightCurveError::InvalidEpoch(epoch));
        }
        let epoch = if epoch_is_mjd {
            epoch
        } else {
            epoch - MJD_OFFSET
        };
        trace!(
            "Folding {} points on period {period} d, epoch MJD {epoch}",
            self.len()
        );

        let phase: Vec<f64> = self
            .time
            .iter()
            .map(|&t| phase_of(t, period, epoch))
            .collect();
        let order = argsort(&phase);
        let mut folded = FoldedLightCurve {
            phase: permute(&phase, &order),
            flux: permute(&self.flux, &order),
            flux_err: permute(&self.flux_err, &order),
            airmass: permute(&self.airmass, &order),
            units: self.units,
        };

        if double {
            let n = folded.phase.len();
            folded.phase.extend_from_within(..);
            folded.phase[n..].iter_mut().for_each(|p| *p += 1.0);
            folded.flux.extend_from_within(..);
            folded.flux_err.extend_from_within(..);
            folded.airmass.extend_from_within(..);
        }

        Ok(folded)
    }
}

/// `((time - epoch) / period) mod 1`, always in [0, 1).
pub fn phase_of(time: f64, period: f64, epoch: f64) -> f64 {
    let phase = ((time - epoch) / period).rem_euclid(1.0);
    // rem_euclid can round up to exactly 1 for tiny negative inputs.
    if phase >= 1.0 {
        0.0
    } else {
        phase
    }
}

/// A light curve folded on a period. Sequences are sorted by ascending phase.
#[derive(Debug, Clone, PartialEq)]
pub struct FoldedLightCurve {
    phase: Vec<f64>,
    flux: Vec<f64>,
    flux_err: Vec<f64>,
    airmass: Vec<f64>,
    units: FluxUnits,
}

impl FoldedLightCurve {
    pub fn len(&self) -> usize {
        self.phase.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phase.is_empty()
    }

    pub fn phase(&self) -> &[f64] {
        &self.phase
    }

    pub fn flux(&self) -> &[f64] {
        &self.flux
    }

    pub fn flux_err(&self) -> &[f64] {
        &self.flux_err
    }

    pub fn airmass(&self) -> &[f64] {
        &self.airmass
    }

    pub fn units(&self) -> FluxUnits {
        self.units
    }
}
