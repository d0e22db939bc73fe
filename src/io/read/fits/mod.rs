// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Helper functions for reading FITS files. Errors carry the location of the
//! caller, as cfitsio's own messages rarely say what was being attempted.

mod error;
#[cfg(test)]
mod tests;

pub use error::FitsError;

use std::fmt::Display;

use fitsio::{hdu::*, FitsFile};

/// Open a fits file.
#[track_caller]
pub(crate) fn fits_open<P: AsRef<std::path::Path>>(file: P) -> Result<FitsFile, FitsError> {
    FitsFile::open(file.as_ref()).map_err(|e| {
        let caller = std::panic::Location::caller();
        FitsError::Open {
            fits_error: Box::new(e),
            fits_filename: file.as_ref().to_path_buf().into_boxed_path(),
            source_file: caller.file(),
            source_line: caller.line(),
            source_column: caller.column(),
        }
    })
}

/// Open a fits file's HDU.
#[track_caller]
pub(crate) fn fits_open_hdu<T: DescribesHdu + Display + Copy>(
    fits_fptr: &mut FitsFile,
    hdu_description: T,
) -> Result<FitsHdu, FitsError> {
    fits_fptr.hdu(hdu_description).map_err(|e| {
        let caller = std::panic::Location::caller();
        FitsError::Fitsio {
            fits_error: Box::new(e),
            fits_filename: fits_fptr.file_path().to_path_buf().into_boxed_path(),
            hdu_description: format!("{hdu_description}").into_boxed_str(),
            source_file: caller.file(),
            source_line: caller.line(),
            source_column: caller.column(),
        }
    })
}

/// The names of the columns in a table HDU, in file order.
#[track_caller]
pub(crate) fn fits_get_column_names(
    fits_fptr: &FitsFile,
    hdu: &FitsHdu,
) -> Result<Vec<String>, FitsError> {
    match &hdu.info {
        HduInfo::TableInfo {
            column_descriptions,
            ..
        } => Ok(column_descriptions.iter().map(|c| c.name.clone()).collect()),
        _ => {
            let caller = std::panic::Location::caller();
            Err(FitsError::NotTable {
                fits_filename: fits_fptr.file_path().to_path_buf().into_boxed_path(),
                hdu_num: hdu.number + 1,
                source_file: caller.file(),
                source_line: caller.line(),
                source_column: caller.column(),
            })
        }
    }
}

/// Find the actual name of a column, ignoring case. Catalogues in the wild
/// spell the same column as both `MAIN_ID` and `main_id`. An exact match wins
/// over a case-insensitive one.
#[track_caller]
pub(crate) fn fits_find_column(
    fits_fptr: &FitsFile,
    hdu: &FitsHdu,
    name: &str,
) -> Result<Option<String>, FitsError> {
    let names = fits_get_column_names(fits_fptr, hdu)?;
    if names.iter().any(|n| n == name) {
        return Ok(Some(name.to_string()));
    }
    Ok(names.into_iter().find(|n| n.eq_ignore_ascii_case(name)))
}

/// Get a column from a fits file's HDU.
#[track_caller]
pub(crate) fn fits_get_col<T: fitsio::tables::ReadsCol>(
    fits_fptr: &mut FitsFile,
    hdu: &FitsHdu,
    keyword: &str,
) -> Result<Vec<T>, FitsError> {
    hdu.read_col(fits_fptr, keyword).map_err(|e| {
        let caller = std::panic::Location::caller();
        FitsError::Fitsio {
            fits_error: Box::new(e),
            fits_filename: fits_fptr.file_path().to_path_buf().into_boxed_path(),
            hdu_description: format!("{}", hdu.number + 1).into_boxed_str(),
            source_file: caller.file(),
            source_line: caller.line(),
            source_column: caller.column(),
        }
    })
}

/// Get a column whose name may be in any case. `None` if there's no such
/// column.
#[track_caller]
pub(crate) fn fits_get_optional_col<T: fitsio::tables::ReadsCol>(
    fits_fptr: &mut FitsFile,
    hdu: &FitsHdu,
    name: &str,
) -> Result<Option<Vec<T>>, FitsError> {
    match fits_find_column(fits_fptr, hdu, name)? {
        Some(actual) => fits_get_col(fits_fptr, hdu, &actual).map(Some),
        None => Ok(None),
    }
}

/// Get a column whose name may be in any case. Any of `names` will do; the
/// first one present is read.
#[track_caller]
pub(crate) fn fits_get_required_col<T: fitsio::tables::ReadsCol>(
    fits_fptr: &mut FitsFile,
    hdu: &FitsHdu,
    names: &[&str],
) -> Result<Vec<T>, FitsError> {
    for name in names {
        if let Some(actual) = fits_find_column(fits_fptr, hdu, name)? {
            return fits_get_col(fits_fptr, hdu, &actual);
        }
    }

    let caller = std::panic::Location::caller();
    Err(FitsError::MissingColumn {
        column: names.join("/").into_boxed_str(),
        fits_filename: fits_fptr.file_path().to_path_buf().into_boxed_path(),
        hdu_num: hdu.number + 1,
        source_file: caller.file(),
        source_line: caller.line(),
        source_column: caller.column(),
    })
}

/// Get the shape of the image on the supplied FITS file pointer and HDU, in
/// row-major order (slowest-varying axis first).
#[track_caller]
pub(crate) fn fits_get_image_size<'a>(
    fits_fptr: &FitsFile,
    hdu: &'a FitsHdu,
) -> Result<&'a Vec<usize>, FitsError> {
    match &hdu.info {
        HduInfo::ImageInfo { shape, .. } => Ok(shape),
        _ => {
            let caller = std::panic::Location::caller();
            Err(FitsError::NotImage {
                fits_filename: fits_fptr.file_path().to_path_buf().into_boxed_path(),
                hdu_num: hdu.number + 1,
                source_file: caller.file(),
                source_line: caller.line(),
                source_column: caller.column(),
            })
        }
    }
}

/// Read `num_rows` rows of a 2D image, starting at the 0-indexed `start_row`.
#[track_caller]
pub(crate) fn fits_get_image_rows(
    fits_fptr: &mut FitsFile,
    hdu: &FitsHdu,
    start_row: usize,
    num_rows: usize,
) -> Result<Vec<f64>, FitsError> {
    match &hdu.info {
        HduInfo::ImageInfo { .. } => hdu
            .read_rows(fits_fptr, start_row, num_rows)
            .map_err(|e| {
                let caller = std::panic::Location::caller();
                FitsError::Fitsio {
                    fits_error: Box::new(e),
                    fits_filename: fits_fptr.file_path().to_path_buf().into_boxed_path(),
                    hdu_description: format!("{}", hdu.number + 1).into_boxed_str(),
                    source_file: caller.file(),
                    source_line: caller.line(),
                    source_column: caller.column(),
                }
            }),
        _ => {
            let caller = std::panic::Location::caller();
            Err(FitsError::NotImage {
                fits_filename: fits_fptr.file_path().to_path_buf().into_boxed_path(),
                hdu_num: hdu.number + 1,
                source_file: caller.file(),
                source_line: caller.line(),
                source_column: caller.column(),
            })
        }
    }
}
