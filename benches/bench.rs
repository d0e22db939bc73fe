// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use criterion::*;

use ngts_explorer::{detrend, FluxUnits, LightCurve, PeriodSearch, PeriodogramMethod};

/// A night-by-night NGTS-like light curve with `n` points.
fn light_curve(n: usize) -> LightCurve {
    let time: Vec<f64> = (0..n)
        .map(|k| 57000.0 + (k / 200) as f64 + 0.0014 * (k % 200) as f64)
        .collect();
    let airmass: Vec<f64> = (0..n).map(|k| 1.0 + 0.003 * (k % 200) as f64).collect();
    let flux: Vec<f64> = time
        .iter()
        .zip(&airmass)
        .map(|(t, x)| {
            1e4 * (1.0 + 0.05 * (std::f64::consts::TAU * t / 0.37).sin())
                * 10_f64.powf(-0.04 * x)
        })
        .collect();
    let flux_err = flux.iter().map(|f| 0.01 * f).collect();
    LightCurve::new(time, flux, flux_err, airmass, FluxUnits::Flux).unwrap()
}

fn periodograms(c: &mut Criterion) {
    let lc = light_curve(2000);
    let mut group = c.benchmark_group("periodogram");
    for method in [PeriodogramMethod::Generalised, PeriodogramMethod::Classic] {
        let search = PeriodSearch::new(0.1, 1.0, 1000).with_method(method);
        group.bench_function(method.to_string(), |b| {
            b.iter(|| search.run(black_box(lc.time()), black_box(lc.flux())))
        });
    }
    group.finish();
}

fn detrending(c: &mut Criterion) {
    let lc = light_curve(20000);
    c.bench_function("detrend 20000 points", |b| {
        b.iter(|| detrend(black_box(&lc)))
    });
}

fn folding(c: &mut Criterion) {
    let lc = light_curve(20000);
    c.bench_function("fold 20000 points", |b| {
        b.iter(|| lc.fold(black_box(0.37), 0.0, true, true))
    });
}

criterion_group!(benches, periodograms, detrending, folding);
criterion_main!(benches);
