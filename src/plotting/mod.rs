// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Figures of light curves and periodograms.
//!
//! A [`Figure`] is plain data; it can be inspected without drawing anything.
//! Rendering to PNG needs the "plotting" feature.

mod error;
#[cfg(test)]
mod tests;

pub use error::PlotError;

use std::path::Path;

use crate::{
    lightcurve::{FluxUnits, FoldedLightCurve, LightCurve},
    periodogram::PowerSpectrum,
};

/// The number of X pixels on rendered figures.
pub const X_PIXELS: u32 = 1600;
/// The number of Y pixels on rendered figures.
pub const Y_PIXELS: u32 = 1000;

/// Points with error bars.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPlot {
    pub title: Option<String>,
    pub x_label: String,
    pub y_label: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub y_err: Vec<f64>,

    /// Larger values towards the bottom; for magnitudes.
    pub invert_y: bool,
}

/// Something that can be drawn.
#[derive(Debug, Clone, PartialEq)]
pub enum Figure {
    /// Flux or magnitude against time.
    LightCurve(SeriesPlot),

    /// Flux or magnitude against phase.
    Phase(SeriesPlot),

    /// Power against trial period.
    Periodogram(PowerSpectrum),
}

/// "name (class, V=9.00)", or without the magnitude if it isn't known.
pub fn object_title(name: &str, class: &str, vmag: Option<f64>) -> String {
    match vmag {
        Some(v) => format!("{name} ({class}, V={v:.2})"),
        None => format!("{name} ({class})"),
    }
}

/// The x-axis label for times drawn relative to `mjd0`.
pub fn mjd_label(mjd0: i64) -> String {
    format!("MJD - {mjd0}")
}

impl Figure {
    /// Plot a light curve against time, relative to the integer part of its
    /// earliest time.
    pub fn light_curve(lc: &LightCurve, title: Option<String>) -> Figure {
        let mjd0 = lc.reference_mjd().unwrap_or(0);
        let x = lc.time().iter().map(|t| t - mjd0 as f64).collect();
        Figure::LightCurve(SeriesPlot {
            title,
            x_label: mjd_label(mjd0),
            y_label: lc.units().axis_label().to_string(),
            x,
            y: lc.flux().to_vec(),
            y_err: lc.flux_err().to_vec(),
            invert_y: lc.units() == FluxUnits::Magnitude,
        })
    }

    pub fn phase(folded: &FoldedLightCurve, title: Option<String>) -> Figure {
        Figure::Phase(SeriesPlot {
            title,
            x_label: "Orbital phase".to_string(),
            y_label: folded.units().axis_label().to_string(),
            x: folded.phase().to_vec(),
            y: folded.flux().to_vec(),
            y_err: folded.flux_err().to_vec(),
            invert_y: folded.units() == FluxUnits::Magnitude,
        })
    }

    pub fn periodogram(spectrum: &PowerSpectrum) -> Figure {
        Figure::Periodogram(spectrum.clone())
    }

    pub fn title(&self) -> Option<&str> {
        match self {
            Figure::LightCurve(p) | Figure::Phase(p) => p.title.as_deref(),
            Figure::Periodogram(_) => None,
        }
    }

    pub fn x_label(&self) -> &str {
        match self {
            Figure::LightCurve(p) | Figure::Phase(p) => &p.x_label,
            Figure::Periodogram(_) => "Period / d",
        }
    }

    pub fn y_label(&self) -> &str {
        match self {
            Figure::LightCurve(p) | Figure::Phase(p) => &p.y_label,
            Figure::Periodogram(_) => "Power",
        }
    }

    /// A short name for log messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Figure::LightCurve(_) => "light curve",
            Figure::Phase(_) => "phase plot",
            Figure::Periodogram(_) => "periodogram",
        }
    }

    /// Draw this figure into a PNG file. Only available if compiled with the
    /// "plotting" feature.
    #[cfg(not(feature = "plotting"))]
    pub fn render<P: AsRef<Path>>(&self, path: P) -> Result<(), PlotError> {
        let _ = path;
        Err(PlotError::NoPlottingFeature)
    }

    /// Draw this figure into a PNG file.
    #[cfg(feature = "plotting")]
    pub fn render<P: AsRef<Path>>(&self, path: P) -> Result<(), PlotError> {
        let path = path.as_ref();
        log::debug!("Drawing {} to {}", self.kind(), path.display());
        match self {
            Figure::LightCurve(p) | Figure::Phase(p) => drawing::draw_series(p, path),
            Figure::Periodogram(s) => drawing::draw_periodogram(s, path),
        }
    }
}

/// The finite extent of `values`, padded by 5% on each side. A single value is
/// padded by 0.5.
#[cfg_attr(not(feature = "plotting"), allow(dead_code))]
fn padded_range(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    let (min, max) = values
        .filter(|v| v.is_finite())
        .fold(None, |acc: Option<(f64, f64)>, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })?;
    let pad = if max > min { 0.05 * (max - min) } else { 0.5 };
    Some((min - pad, max + pad))
}

#[cfg(feature = "plotting")]
mod drawing {
    use std::path::Path;

    use plotters::prelude::*;

    use super::*;

    fn plotters_err<E: std::error::Error + 'static>(e: E) -> PlotError {
        PlotError::Plotters(Box::new(e))
    }

    pub(super) fn draw_series(plot: &SeriesPlot, path: &Path) -> Result<(), PlotError> {
        // Inverted axes are drawn by negating y and un-negating the labels.
        let sign = if plot.invert_y { -1.0 } else { 1.0 };
        let points: Vec<(f64, f64, f64)> = plot
            .x
            .iter()
            .zip(plot.y.iter())
            .zip(plot.y_err.iter())
            .map(|((&x, &y), &e)| (x, sign * y, if e.is_finite() { e.abs() } else { 0.0 }))
            .filter(|(x, y, _)| x.is_finite() && y.is_finite())
            .collect();
        let (x_min, x_max) =
            padded_range(points.iter().map(|p| p.0)).ok_or(PlotError::NothingToPlot)?;
        let (y_min, y_max) = padded_range(
            points
                .iter()
                .flat_map(|&(_, y, e)| [y - e, y + e]),
        )
        .ok_or(PlotError::NothingToPlot)?;

        let root = BitMapBackend::new(path, (X_PIXELS, Y_PIXELS)).into_drawing_area();
        root.fill(&WHITE).map_err(plotters_err)?;
        let mut builder = ChartBuilder::on(&root);
        builder
            .margin(20)
            .x_label_area_size(60)
            .y_label_area_size(90);
        if let Some(title) = plot.title.as_deref() {
            builder.caption(title, ("sans-serif", 36));
        }
        let mut chart = builder
            .build_cartesian_2d(x_min..x_max, y_min..y_max)
            .map_err(plotters_err)?;

        let y_formatter = |y: &f64| format!("{:.3}", sign * y);
        chart
            .configure_mesh()
            .light_line_style(WHITE)
            .x_desc(plot.x_label.as_str())
            .y_desc(plot.y_label.as_str())
            .y_label_formatter(&y_formatter)
            .axis_desc_style(("sans-serif", 24))
            .draw()
            .map_err(plotters_err)?;

        chart
            .draw_series(points.iter().map(|&(x, y, e)| {
                ErrorBar::new_vertical(x, y - e, y, y + e, BLUE.mix(0.4).stroke_width(1), 0)
            }))
            .map_err(plotters_err)?;
        chart
            .draw_series(
                points
                    .iter()
                    .map(|&(x, y, _)| Circle::new((x, y), 2, BLUE.filled())),
            )
            .map_err(plotters_err)?;

        root.present().map_err(plotters_err)?;
        Ok(())
    }

    pub(super) fn draw_periodogram(
        spectrum: &PowerSpectrum,
        path: &Path,
    ) -> Result<(), PlotError> {
        let points: Vec<(f64, f64)> = spectrum
            .periods()
            .iter()
            .copied()
            .zip(spectrum.power().iter().copied())
            .filter(|(p, w)| p.is_finite() && w.is_finite())
            .collect();
        let (x_min, x_max) =
            padded_range(points.iter().map(|p| p.0)).ok_or(PlotError::NothingToPlot)?;
        let (y_min, y_max) = padded_range(points.iter().map(|p| p.1).chain([0.0]))
            .ok_or(PlotError::NothingToPlot)?;

        let root = BitMapBackend::new(path, (X_PIXELS, Y_PIXELS)).into_drawing_area();
        root.fill(&WHITE).map_err(plotters_err)?;
        let mut chart = ChartBuilder::on(&root)
            .margin(20)
            .x_label_area_size(60)
            .y_label_area_size(90)
            .build_cartesian_2d(x_min..x_max, y_min..y_max)
            .map_err(plotters_err)?;
        chart
            .configure_mesh()
            .light_line_style(WHITE)
            .x_desc("Period / d")
            .y_desc("Power")
            .axis_desc_style(("sans-serif", 24))
            .draw()
            .map_err(plotters_err)?;
        chart
            .draw_series(LineSeries::new(points, &BLUE))
            .map_err(plotters_err)?;

        root.present().map_err(plotters_err)?;
        Ok(())
    }
}
