// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Integration tests.
//!
//! Some help for laying out these tests was taken from:
//! https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html

mod arg_files;
mod errors;
mod no_stderr;
mod shell;

use std::{
    f64::consts::TAU,
    path::{Path, PathBuf},
    process::Output,
    str::from_utf8,
};

use assert_cmd::{output::OutputError, Command};
use fitsio::{
    images::{ImageDescription, ImageType},
    tables::{ColumnDataType, ColumnDescription},
    FitsFile,
};
use tempfile::TempDir;

const NUM_IMAGES: usize = 90;
const PERIOD: f64 = 0.4;

fn ngts_explorer() -> Command {
    Command::cargo_bin("ngts-explorer").unwrap()
}

fn get_cmd_output(result: Result<Output, OutputError>) -> (String, String) {
    let output = match result {
        Ok(o) => o,
        Err(o) => o.as_output().unwrap().clone(),
    };
    (
        from_utf8(&output.stdout).unwrap().to_string(),
        from_utf8(&output.stderr).unwrap().to_string(),
    )
}

/// Write a three-object catalogue and its data file into a new temporary
/// directory. Object 1 (the first "RotV*") varies with a period of
/// [`PERIOD`]; the others are constant.
fn write_files() -> (TempDir, PathBuf, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let catalogue = dir.path().join("match.fits");
    let data = dir.path().join("data.fits");
    write_catalogue(&catalogue);
    write_data(&data);
    (dir, catalogue, data)
}

fn write_catalogue(path: &Path) {
    let mut fptr = FitsFile::create(path).open().unwrap();
    let cols = [
        ColumnDescription::new("MAIN_ID")
            .with_type(ColumnDataType::String)
            .that_repeats(16)
            .create()
            .unwrap(),
        ColumnDescription::new("OTYPE")
            .with_type(ColumnDataType::String)
            .that_repeats(8)
            .create()
            .unwrap(),
        ColumnDescription::new("Sequence_number")
            .with_type(ColumnDataType::Int)
            .create()
            .unwrap(),
        ColumnDescription::new("V")
            .with_type(ColumnDataType::Double)
            .create()
            .unwrap(),
    ];
    let hdu = fptr.create_table("CATALOGUE", &cols).unwrap();
    let names = vec!["V* XX Cru".to_string(), "HD 1".to_string(), "HD 2".to_string()];
    let types = vec!["RotV*".to_string(), "EB*".to_string(), "RotV*".to_string()];
    hdu.write_col(&mut fptr, "MAIN_ID", &names).unwrap();
    hdu.write_col(&mut fptr, "OTYPE", &types).unwrap();
    hdu.write_col(&mut fptr, "Sequence_number", &[1_i32, 2, 3]).unwrap();
    hdu.write_col(&mut fptr, "V", &[10.0_f64, 12.0, 13.5]).unwrap();
}

fn write_data(path: &Path) {
    let times: Vec<f64> = (0..NUM_IMAGES)
        .map(|k| 58000.0 + 0.05 * k as f64 + 0.011 * (k % 3) as f64)
        .collect();
    let airmass: Vec<f64> = (0..NUM_IMAGES)
        .map(|k| 1.0 + 0.05 * ((k * 13) % 9) as f64)
        .collect();
    let image_ids: Vec<i32> = (0..NUM_IMAGES).map(|k| 500 + k as i32).collect();

    let mut fptr = FitsFile::create(path).open().unwrap();
    let cols = [
        ColumnDescription::new("image_id")
            .with_type(ColumnDataType::Int)
            .create()
            .unwrap(),
        ColumnDescription::new("tmid")
            .with_type(ColumnDataType::Double)
            .create()
            .unwrap(),
        ColumnDescription::new("AIRMASS")
            .with_type(ColumnDataType::Double)
            .create()
            .unwrap(),
    ];
    let hdu = fptr.create_table("IMAGELIST", &cols).unwrap();
    hdu.write_col(&mut fptr, "image_id", &image_ids).unwrap();
    hdu.write_col(&mut fptr, "tmid", &times).unwrap();
    hdu.write_col(&mut fptr, "AIRMASS", &airmass).unwrap();

    let mut flux = Vec::with_capacity(3 * NUM_IMAGES);
    for seq in 1..=3 {
        for &t in &times {
            flux.push(match seq {
                1 => 800.0 * (1.0 + 0.15 * (TAU * t / PERIOD).sin()),
                2 => 300.0,
                _ => 150.0,
            });
        }
    }
    let flux_err: Vec<f64> = flux.iter().map(|f| 0.02 * f).collect();
    let dim = [3, NUM_IMAGES];
    let image_description = ImageDescription {
        data_type: ImageType::Double,
        dimensions: &dim,
    };
    let hdu = fptr.create_image("FLUX", &image_description).unwrap();
    hdu.write_image(&mut fptr, &flux).unwrap();
    let hdu = fptr.create_image("FLUXERR", &image_description).unwrap();
    hdu.write_image(&mut fptr, &flux_err).unwrap();
}
