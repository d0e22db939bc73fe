// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Lomb-Scargle period searches of unevenly sampled light curves.

mod error;

pub use error::PeriodSearchError;

use log::{debug, trace};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};
use vec1::Vec1;

use crate::{
    constants::{DEFAULT_MAX_PERIOD, DEFAULT_MIN_PERIOD, DEFAULT_NUM_PERIODS, TAU},
    math::{linspace, median},
};

lazy_static::lazy_static! {
    pub static ref PERIODOGRAM_METHODS_COMMA_SEPARATED: String = {
        use itertools::Itertools;
        use strum::IntoEnumIterator;
        PeriodogramMethod::iter().join(", ")
    };
}

/// Which flavour of Lomb-Scargle periodogram to compute.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumIter, EnumString)]
#[derive(Serialize, Deserialize)]
pub enum PeriodogramMethod {
    /// Floating-mean periodogram (Zechmeister & Kürster 2009). Power is in
    /// [0, 1].
    #[default]
    #[strum(serialize = "generalised")]
    #[serde(rename = "generalised")]
    Generalised,

    /// The classic Lomb (1976) / Scargle (1982) periodogram, normalised by
    /// `2 / Σy²`.
    #[strum(serialize = "classic")]
    #[serde(rename = "classic")]
    Classic,
}

/// The trial periods of a search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeriodSearch {
    /// [days]
    pub min_period: f64,

    /// [days]
    pub max_period: f64,

    /// The number of linearly spaced trial periods.
    pub num_periods: usize,

    pub method: PeriodogramMethod,
}

impl Default for PeriodSearch {
    fn default() -> Self {
        PeriodSearch {
            min_period: DEFAULT_MIN_PERIOD,
            max_period: DEFAULT_MAX_PERIOD,
            num_periods: DEFAULT_NUM_PERIODS,
            method: PeriodogramMethod::default(),
        }
    }
}

impl PeriodSearch {
    pub fn new(min_period: f64, max_period: f64, num_periods: usize) -> PeriodSearch {
        PeriodSearch {
            min_period,
            max_period,
            num_periods,
            method: PeriodogramMethod::default(),
        }
    }

    pub fn with_method(self, method: PeriodogramMethod) -> PeriodSearch {
        PeriodSearch { method, ..self }
    }

    fn validate(&self) -> Result<(), PeriodSearchError> {
        let PeriodSearch {
            min_period,
            max_period,
            num_periods,
            ..
        } = *self;
        if !(min_period.is_finite() && min_period > 0.0) {
            return Err(PeriodSearchError::NonPositiveMinPeriod(min_period));
        }
        if !(max_period.is_finite() && max_period > min_period) {
            return Err(PeriodSearchError::MaxNotAboveMin {
                min: min_period,
                max: max_period,
            });
        }
        if num_periods == 0 {
            return Err(PeriodSearchError::NoTrialPeriods);
        }
        Ok(())
    }

    /// Compute the periodogram of `(time, flux)` over this search's trial
    /// periods. The flux is centred on its median first. `time` and `flux`
    /// must be the same length; non-finite samples are ignored.
    pub fn run(&self, time: &[f64], flux: &[f64]) -> Result<PowerSpectrum, PeriodSearchError> {
        self.validate()?;
        if time.len() != flux.len() {
            return Err(PeriodSearchError::LengthMismatch {
                time: time.len(),
                flux: flux.len(),
            });
        }

        let (t, y): (Vec<f64>, Vec<f64>) = time
            .iter()
            .zip(flux)
            .filter(|(t, y)| t.is_finite() && y.is_finite())
            .map(|(&t, &y)| (t, y))
            .unzip();
        if t.len() < 2 {
            return Err(PeriodSearchError::TooFewSamples(t.len()));
        }
        if t.len() != time.len() {
            debug!(
                "Ignoring {} non-finite samples in the period search",
                time.len() - t.len()
            );
        }

        // Not-NaN, as the non-finite values were filtered out above.
        let med = median(&y).unwrap_or_default();
        let y: Vec<f64> = y.into_iter().map(|y| y - med).collect();

        let periods = linspace(self.min_period, self.max_period, self.num_periods);
        trace!(
            "{} periodogram over {} periods in [{}, {}] d",
            self.method,
            periods.len(),
            self.min_period,
            self.max_period
        );
        let power = periods
            .iter()
            .map(|p| {
                let omega = TAU / p;
                match self.method {
                    PeriodogramMethod::Generalised => generalised_power(&t, &y, omega),
                    PeriodogramMethod::Classic => classic_power(&t, &y, omega),
                }
            })
            .collect();

        PowerSpectrum::new(periods, power)
    }
}

/// Trial periods and the periodogram power at each of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerSpectrum {
    periods: Vec1<f64>,
    power: Vec1<f64>,
}

impl PowerSpectrum {
    pub fn new(periods: Vec<f64>, power: Vec<f64>) -> Result<PowerSpectrum, PeriodSearchError> {
        if periods.len() != power.len() {
            return Err(PeriodSearchError::SpectrumLengthMismatch {
                periods: periods.len(),
                power: power.len(),
            });
        }
        let periods = Vec1::try_from_vec(periods).map_err(|_| PeriodSearchError::NoTrialPeriods)?;
        let power = Vec1::try_from_vec(power).map_err(|_| PeriodSearchError::NoTrialPeriods)?;
        Ok(PowerSpectrum { periods, power })
    }

    pub fn periods(&self) -> &[f64] {
        &self.periods
    }

    pub fn power(&self) -> &[f64] {
        &self.power
    }

    /// The index of the largest power. Ties go to the first (shortest) period;
    /// NaN powers never win unless everything is NaN.
    pub fn peak_index(&self) -> usize {
        let mut best = 0;
        for (i, &p) in self.power.iter().enumerate().skip(1) {
            let current = self.power[best];
            if p > current || (current.is_nan() && !p.is_nan()) {
                best = i;
            }
        }
        best
    }

    /// The period with the most power [days].
    pub fn peak_period(&self) -> f64 {
        self.periods[self.peak_index()]
    }

    pub fn peak_power(&self) -> f64 {
        self.power[self.peak_index()]
    }
}

/// Floating-mean Lomb-Scargle power at angular frequency `omega` with uniform
/// weights. Returns 0 if the data can't constrain a sinusoid at this frequency.
fn generalised_power(t: &[f64], y: &[f64], omega: f64) -> f64 {
    let w = 1.0 / t.len() as f64;
    let (mut sum_y, mut sum_c, mut sum_s) = (0.0, 0.0, 0.0);
    let (mut sum_yy, mut sum_yc, mut sum_ys) = (0.0, 0.0, 0.0);
    let (mut sum_cc, mut sum_ss, mut sum_cs) = (0.0, 0.0, 0.0);
    for (&t, &y) in t.iter().zip(y) {
        let (s, c) = (omega * t).sin_cos();
        sum_y += w * y;
        sum_c += w * c;
        sum_s += w * s;
        sum_yy += w * y * y;
        sum_yc += w * y * c;
        sum_ys += w * y * s;
        sum_cc += w * c * c;
        sum_ss += w * s * s;
        sum_cs += w * c * s;
    }

    let yy = sum_yy - sum_y * sum_y;
    let yc = sum_yc - sum_y * sum_c;
    let ys = sum_ys - sum_y * sum_s;
    let cc = sum_cc - sum_c * sum_c;
    let ss = sum_ss - sum_s * sum_s;
    let cs = sum_cs - sum_c * sum_s;
    let d = cc * ss - cs * cs;

    let denominator = yy * d;
    if denominator.abs() <= f64::EPSILON * f64::EPSILON || !denominator.is_finite() {
        return 0.0;
    }
    (ss * yc * yc + cc * ys * ys - 2.0 * cs * yc * ys) / denominator
}

/// Classic Lomb-Scargle power at angular frequency `omega`, normalised by
/// `2 / Σy²`.
fn classic_power(t: &[f64], y: &[f64], omega: f64) -> f64 {
    let (sum_sin2, sum_cos2) = t.iter().fold((0.0, 0.0), |(s, c), &t| {
        let (sin, cos) = (2.0 * omega * t).sin_cos();
        (s + sin, c + cos)
    });
    let tau = sum_sin2.atan2(sum_cos2) / (2.0 * omega);

    let (mut yc, mut ys, mut cc, mut ss, mut yy) = (0.0, 0.0, 0.0, 0.0, 0.0);
    for (&t, &y) in t.iter().zip(y) {
        let (s, c) = (omega * (t - tau)).sin_cos();
        yc += y * c;
        ys += y * s;
        cc += c * c;
        ss += s * s;
        yy += y * y;
    }
    if yy <= 0.0 {
        return 0.0;
    }

    let cos_term = if cc > 0.0 { yc * yc / cc } else { 0.0 };
    let sin_term = if ss > 0.0 { ys * ys / ss } else { 0.0 };
    (cos_term + sin_term) / yy
}
