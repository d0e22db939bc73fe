// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Some helper mathematics.


use std::cmp::Ordering;

/// The median of the finite values in `data`. `None` if there aren't any.
///
/// # Examples
///
/// `assert_eq!(median(&[3.0, 1.0, 2.0, 10.0]), Some(2.5));`
pub fn median(data: &[f64]) -> Option<f64> {
    let mut v: Vec<f64> = data.iter().copied().filter(|x| x.is_finite()).collect();
    if v.is_empty() {
        return None;
    }
    v.sort_unstable_by(f64::total_cmp);
    let mid = v.len() / 2;

    if v.len() % 2 == 0 {
        Some((v[mid - 1] + v[mid]) * 0.5)
    } else {
        Some(v[mid])
    }
}

/// `n` evenly spaced values from `start` to `stop` inclusive, like numpy's
/// `linspace`. With `n == 1` only `start` is returned.
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => vec![],
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            (0..n)
                .map(|i| {
                    // Hit the end point exactly.
                    if i == n - 1 {
                        stop
                    } else {
                        start + step * i as f64
                    }
                })
                .collect()
        }
    }
}

/// The indices that would sort `values` in ascending order. The sort is stable
/// and NaNs are placed last.
pub fn argsort(values: &[f64]) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..values.len()).collect();
    indices.sort_by(|&a, &b| nan_last_cmp(values[a], values[b]));
    indices
}

fn nan_last_cmp(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.total_cmp(&b),
    }
}

/// Gather `values` in the order given by `indices` (usually from [`argsort`]).
pub fn permute<T: Copy>(values: &[T], indices: &[usize]) -> Vec<T> {
    indices.iter().map(|&i| values[i]).collect()
}

/// The result of a weighted straight-line fit, `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,

    /// Was the abscissa degenerate (zero weighted variance)? If so, `slope` is
    /// zero and `intercept` is the weighted mean of the ordinate.
    pub degenerate: bool,
}

impl LinearFit {
    pub fn eval(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Weighted least-squares fit of a straight line. `weights` multiply the
/// squared residuals; numpy's `polyfit` weight `w` corresponds to `w²` here.
///
/// The three slices must be the same length; this is the caller's job. Returns
/// `None` if there's nothing to fit (no points, or weights that sum to zero).
pub fn weighted_linear_fit(x: &[f64], y: &[f64], weights: &[f64]) -> Option<LinearFit> {
    debug_assert_eq!(x.len(), y.len());
    debug_assert_eq!(x.len(), weights.len());

    let sum_w: f64 = weights.iter().sum();
    if x.is_empty() || !sum_w.is_normal() {
        return None;
    }

    // Centred on the weighted means.
    let x_mean = x.iter().zip(weights).map(|(x, w)| w * x).sum::<f64>() / sum_w;
    let y_mean = y.iter().zip(weights).map(|(y, w)| w * y).sum::<f64>() / sum_w;
    let (s_xx, s_xy) = x
        .iter()
        .zip(y)
        .zip(weights)
        .fold((0.0, 0.0), |(s_xx, s_xy), ((x, y), w)| {
            let dx = x - x_mean;
            (s_xx + w * dx * dx, s_xy + w * dx * (y - y_mean))
        });

    // A relative spread below 1e-12 is indistinguishable from rounding noise.
    let tolerance = sum_w * (1e-12 * x_mean.abs().max(1.0)).powi(2);
    if s_xx <= tolerance {
        return Some(LinearFit {
            slope: 0.0,
            intercept: y_mean,
            degenerate: true,
        });
    }

    let slope = s_xy / s_xx;
    Some(LinearFit {
        slope,
        intercept: y_mean - slope * x_mean,
        degenerate: false,
    })
}
