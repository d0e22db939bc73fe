// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Helpful functions for tests. Small catalogue and data files are written on
//! the fly into temporary directories.

use std::path::{Path, PathBuf};

use fitsio::{
    images::{ImageDescription, ImageType},
    tables::{ColumnDataType, ColumnDescription},
    FitsFile,
};
use tempfile::TempDir;

use crate::constants::TAU;

/// The number of images in the synthetic data file.
pub(crate) const NUM_IMAGES: usize = 120;

/// The first image's `tmid`.
pub(crate) const FIRST_MJD: f64 = 57000.0;

/// The period of object 1 [days].
pub(crate) const OBJECT_1_PERIOD: f64 = 0.5;

/// The period of object 3 [days].
pub(crate) const OBJECT_3_PERIOD: f64 = 0.8;

/// Extinction applied to objects 1 and 3 [mag per airmass].
pub(crate) const EXTINCTION: f64 = 0.1;

/// (MAIN_ID, OTYPE, V, Sequence_number)
pub(crate) const CATALOGUE_ROWS: [(&str, &str, f64, i32); 3] = [
    ("V* AB Dor", "RotV*", 9.0, 1),
    ("HD 12345", "EB*", f64::NAN, 2),
    ("TYC 1-2-3", "RotV*", 11.5, 3),
];

/// Observation times, in time order. The gaps are uneven.
pub(crate) fn sorted_times() -> Vec<f64> {
    (0..NUM_IMAGES)
        .map(|k| FIRST_MJD + 0.0731 * k as f64 + 0.013 * ((k * k) % 5) as f64)
        .collect()
}

/// Airmass of the `k`th image in time order. Not periodic.
pub(crate) fn airmass_at(k: usize) -> f64 {
    1.1 + 0.6 * ((k * 37) % 11) as f64 / 10.0
}

/// The `k`th image's identifier.
pub(crate) fn image_id_at(k: usize) -> i64 {
    1000 + k as i64
}

/// The time-order index stored at position `p` of the image list. The file is
/// deliberately not in time order.
pub(crate) fn file_order(p: usize) -> usize {
    (p * 7) % NUM_IMAGES
}

/// The flux of object `seq` (1-based) at time `t` with airmass `x`.
pub(crate) fn model_flux(seq: usize, t: f64, x: f64) -> f64 {
    let extinction = 10_f64.powf(-0.4 * EXTINCTION * x);
    match seq {
        1 => 1000.0 * (1.0 + 0.1 * (TAU * t / OBJECT_1_PERIOD).sin()) * extinction,
        2 => 500.0,
        3 => 2000.0 * (1.0 + 0.2 * (TAU * t / OBJECT_3_PERIOD).sin()) * extinction,
        _ => unreachable!(),
    }
}

/// Write a catalogue. If `lowercase`, the identifier column is spelled
/// `main_id`.
pub(crate) fn write_catalogue(path: &Path, lowercase: bool, with_v: bool) {
    let mut fptr = FitsFile::create(path).open().unwrap();
    let mut cols = vec![
        ColumnDescription::new(if lowercase { "main_id" } else { "MAIN_ID" })
            .with_type(ColumnDataType::String)
            .that_repeats(24)
            .create()
            .unwrap(),
        ColumnDescription::new("OTYPE")
            .with_type(ColumnDataType::String)
            .that_repeats(12)
            .create()
            .unwrap(),
        ColumnDescription::new("Sequence_number")
            .with_type(ColumnDataType::Int)
            .create()
            .unwrap(),
    ];
    if with_v {
        cols.push(
            ColumnDescription::new("V")
                .with_type(ColumnDataType::Double)
                .create()
                .unwrap(),
        );
    }
    let hdu = fptr.create_table("CATALOGUE", &cols).unwrap();

    let names: Vec<String> = CATALOGUE_ROWS.iter().map(|r| r.0.to_string()).collect();
    let types: Vec<String> = CATALOGUE_ROWS.iter().map(|r| r.1.to_string()).collect();
    let vmags: Vec<f64> = CATALOGUE_ROWS.iter().map(|r| r.2).collect();
    let seqs: Vec<i32> = CATALOGUE_ROWS.iter().map(|r| r.3).collect();
    hdu.write_col(
        &mut fptr,
        if lowercase { "main_id" } else { "MAIN_ID" },
        &names,
    )
    .unwrap();
    hdu.write_col(&mut fptr, "OTYPE", &types).unwrap();
    hdu.write_col(&mut fptr, "Sequence_number", &seqs).unwrap();
    if with_v {
        hdu.write_col(&mut fptr, "V", &vmags).unwrap();
    }
}

/// Write a data file holding three objects. If `with_airmass`, the image list
/// carries an `AIRMASS` column.
pub(crate) fn write_data_file(path: &Path, with_airmass: bool) {
    let times = sorted_times();
    let mut fptr = FitsFile::create(path).open().unwrap();

    let mut cols = vec![
        ColumnDescription::new("image_id")
            .with_type(ColumnDataType::Int)
            .create()
            .unwrap(),
        ColumnDescription::new("tmid")
            .with_type(ColumnDataType::Double)
            .create()
            .unwrap(),
    ];
    if with_airmass {
        cols.push(
            ColumnDescription::new("AIRMASS")
                .with_type(ColumnDataType::Double)
                .create()
                .unwrap(),
        );
    }
    let hdu = fptr.create_table("IMAGELIST", &cols).unwrap();
    let order: Vec<usize> = (0..NUM_IMAGES).map(file_order).collect();
    let image_ids: Vec<i32> = order.iter().map(|&k| image_id_at(k) as i32).collect();
    let tmid: Vec<f64> = order.iter().map(|&k| times[k]).collect();
    let airmass: Vec<f64> = order.iter().map(|&k| airmass_at(k)).collect();
    hdu.write_col(&mut fptr, "image_id", &image_ids).unwrap();
    hdu.write_col(&mut fptr, "tmid", &tmid).unwrap();
    if with_airmass {
        hdu.write_col(&mut fptr, "AIRMASS", &airmass).unwrap();
    }

    let num_objects = CATALOGUE_ROWS.len();
    let mut flux = Vec::with_capacity(num_objects * NUM_IMAGES);
    let mut flux_err = Vec::with_capacity(num_objects * NUM_IMAGES);
    for seq in 1..=num_objects {
        for &k in &order {
            let f = model_flux(seq, times[k], airmass_at(k));
            flux.push(f);
            flux_err.push(0.01 * f);
        }
    }
    let dim = [num_objects, NUM_IMAGES];
    let image_description = ImageDescription {
        data_type: ImageType::Double,
        dimensions: &dim,
    };
    let hdu = fptr.create_image("FLUX", &image_description).unwrap();
    hdu.write_image(&mut fptr, &flux).unwrap();
    let hdu = fptr.create_image("FLUXERR", &image_description).unwrap();
    hdu.write_image(&mut fptr, &flux_err).unwrap();
}

/// A temporary directory with a catalogue and a data file (with airmass) in
/// it. Keep the [`TempDir`] alive for as long as the files are needed.
pub(crate) fn fixture_files() -> (TempDir, PathBuf, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let catalogue = dir.path().join("match.fits");
    let data = dir.path().join("data.fits");
    write_catalogue(&catalogue, false, true);
    write_data_file(&data, true);
    (dir, catalogue, data)
}
