// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use super::*;
use crate::tests::{write_catalogue, write_data_file, NUM_IMAGES};

#[test]
fn test_open_missing_file() {
    match fits_open("/does/not/exist.fits") {
        Err(e @ FitsError::Open { .. }) => {
            let msg = e.to_string();
            assert!(msg.contains("/does/not/exist.fits"), "{msg}");
        }
        Err(e) => panic!("Unexpected error: {e}"),
        Ok(_) => panic!("Expected an error"),
    }
}

#[test]
fn test_find_column_ignores_case() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("cat.fits");
    write_catalogue(&file, true, true);

    let mut fptr = fits_open(&file).unwrap();
    let hdu = fits_open_hdu(&mut fptr, 1_usize).unwrap();
    assert_eq!(
        fits_find_column(&fptr, &hdu, "MAIN_ID").unwrap().as_deref(),
        Some("main_id")
    );
    assert_eq!(
        fits_find_column(&fptr, &hdu, "otype").unwrap().as_deref(),
        Some("OTYPE")
    );
    assert!(fits_find_column(&fptr, &hdu, "RA").unwrap().is_none());
}

#[test]
fn test_required_and_optional_columns() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("cat.fits");
    write_catalogue(&file, false, false);

    let mut fptr = fits_open(&file).unwrap();
    let hdu = fits_open_hdu(&mut fptr, 1_usize).unwrap();
    let seqs: Vec<i64> = fits_get_required_col(&mut fptr, &hdu, &["sequence_number"]).unwrap();
    assert_eq!(seqs, vec![1, 2, 3]);

    let v: Option<Vec<f64>> = fits_get_optional_col(&mut fptr, &hdu, "V").unwrap();
    assert!(v.is_none());

    let result: Result<Vec<f64>, _> = fits_get_required_col(&mut fptr, &hdu, &["RA", "RAJ2000"]);
    match result {
        Err(FitsError::MissingColumn { column, .. }) => assert_eq!(&*column, "RA/RAJ2000"),
        Err(e) => panic!("Unexpected error: {e}"),
        Ok(_) => panic!("Expected an error"),
    }
}

#[test]
fn test_image_helpers() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("data.fits");
    write_data_file(&file, false);

    let mut fptr = fits_open(&file).unwrap();
    let flux = fits_open_hdu(&mut fptr, "FLUX").unwrap();
    assert_eq!(fits_get_image_size(&fptr, &flux).unwrap(), &vec![3, NUM_IMAGES]);

    // Object 2 is constant.
    let row = fits_get_image_rows(&mut fptr, &flux, 1, 1).unwrap();
    assert_eq!(row.len(), NUM_IMAGES);
    assert!(row.iter().all(|&f| f == 500.0));

    // Image helpers refuse tables, and vice versa.
    let imagelist = fits_open_hdu(&mut fptr, "IMAGELIST").unwrap();
    assert!(matches!(
        fits_get_image_size(&fptr, &imagelist),
        Err(FitsError::NotImage { .. })
    ));
    assert!(matches!(
        fits_get_column_names(&fptr, &flux),
        Err(FitsError::NotTable { .. })
    ));
}

#[test]
fn test_missing_hdu() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("cat.fits");
    write_catalogue(&file, false, true);

    let mut fptr = fits_open(&file).unwrap();
    let result = fits_open_hdu(&mut fptr, "FLUX");
    match result {
        Err(FitsError::Fitsio {
            hdu_description, ..
        }) => assert_eq!(&*hdu_description, "FLUX"),
        Err(e) => panic!("Unexpected error: {e}"),
        Ok(_) => panic!("Expected an error"),
    }
}
