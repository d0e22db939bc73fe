// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use approx::assert_abs_diff_eq;

use super::*;

fn curve(units: FluxUnits) -> LightCurve {
    LightCurve::new(
        vec![57000.75, 57001.25, 57002.5],
        vec![10.0, 11.0, 12.0],
        vec![0.1, 0.2, 0.3],
        vec![1.0, 1.1, 1.2],
        units,
    )
    .unwrap()
}

#[test]
fn test_object_title() {
    assert_eq!(
        object_title("V* AB Dor", "RotV*", Some(9.0)),
        "V* AB Dor (RotV*, V=9.00)"
    );
    assert_eq!(
        object_title("V* AB Dor", "RotV*", Some(11.456)),
        "V* AB Dor (RotV*, V=11.46)"
    );
    assert_eq!(object_title("HD 12345", "EB*", None), "HD 12345 (EB*)");
}

#[test]
fn test_light_curve_is_relative_to_first_night() {
    let fig = Figure::light_curve(&curve(FluxUnits::Flux), Some("title".to_string()));
    assert_eq!(fig.title(), Some("title"));
    assert_eq!(fig.x_label(), "MJD - 57000");
    assert_eq!(fig.y_label(), "Instrumental flux / e- s^-1");
    assert_eq!(fig.kind(), "light curve");
    match fig {
        Figure::LightCurve(p) => {
            assert_abs_diff_eq!(p.x[0], 0.75);
            assert_abs_diff_eq!(p.x[2], 2.5);
            assert_eq!(p.y, vec![10.0, 11.0, 12.0]);
            assert_eq!(p.y_err, vec![0.1, 0.2, 0.3]);
            assert!(!p.invert_y);
        }
        _ => panic!("Expected a light curve"),
    }
}

#[test]
fn test_magnitudes_are_inverted() {
    let fig = Figure::light_curve(&curve(FluxUnits::Magnitude), None);
    assert_eq!(fig.y_label(), "Magnitudes");
    assert!(fig.title().is_none());
    assert!(matches!(fig, Figure::LightCurve(SeriesPlot { invert_y: true, .. })));
}

#[test]
fn test_phase_figure() {
    let folded = curve(FluxUnits::Flux).fold(1.0, 0.0, true, true).unwrap();
    let fig = Figure::phase(&folded, None);
    assert_eq!(fig.x_label(), "Orbital phase");
    assert_eq!(fig.kind(), "phase plot");
    match fig {
        Figure::Phase(p) => {
            assert_eq!(p.x.len(), 6);
            assert!(p.x.iter().all(|&x| (0.0..2.0).contains(&x)));
        }
        _ => panic!("Expected a phase plot"),
    }
}

#[test]
fn test_periodogram_figure() {
    let spectrum = PowerSpectrum::new(vec![0.1, 0.2], vec![0.5, 0.25]).unwrap();
    let fig = Figure::periodogram(&spectrum);
    assert_eq!(fig.x_label(), "Period / d");
    assert_eq!(fig.y_label(), "Power");
    assert!(fig.title().is_none());
    assert_eq!(fig, Figure::Periodogram(spectrum));
}

#[test]
fn test_padded_range() {
    let (lo, hi) = padded_range([1.0, f64::NAN, 3.0].into_iter()).unwrap();
    assert_abs_diff_eq!(lo, 0.9, epsilon = 1e-12);
    assert_abs_diff_eq!(hi, 3.1, epsilon = 1e-12);

    let (lo, hi) = padded_range([2.0].into_iter()).unwrap();
    assert_abs_diff_eq!(lo, 1.5);
    assert_abs_diff_eq!(hi, 2.5);

    assert!(padded_range([f64::NAN].into_iter()).is_none());
}

#[test]
#[cfg(not(feature = "plotting"))]
fn test_render_needs_feature() {
    let fig = Figure::light_curve(&curve(FluxUnits::Flux), None);
    let dir = tempfile::tempdir().unwrap();
    let result = fig.render(dir.path().join("fig.png"));
    assert!(matches!(result, Err(PlotError::NoPlottingFeature)));
}
