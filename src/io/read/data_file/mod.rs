// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Light-curve data files.
//!
//! These are FITS files with a table HDU `IMAGELIST` describing every image
//! (at least `image_id` and the mid-exposure time `tmid` [MJD]), and two image
//! HDUs, `FLUX` and `FLUXERR`, each with one row per object and one column per
//! image.

mod error;

pub use error::DataFileError;

use std::path::Path;

use log::{debug, trace};

use super::fits::{
    fits_get_image_rows, fits_get_image_size, fits_get_optional_col, fits_get_required_col,
    fits_open, fits_open_hdu,
};
use crate::{
    airmass::{AirmassLookup, AirmassTable},
    lightcurve::{FluxUnits, LightCurve},
    math::{argsort, permute},
};

const IMAGELIST_HDU: &str = "IMAGELIST";
const FLUX_HDU: &str = "FLUX";
const FLUXERR_HDU: &str = "FLUXERR";

/// One object's photometry before airmass is attached. Sorted by time.
#[derive(Debug, Clone, PartialEq)]
pub struct RawLightCurve {
    pub image_ids: Vec<i64>,

    /// [MJD]
    pub time: Vec<f64>,
    pub flux: Vec<f64>,
    pub flux_err: Vec<f64>,
}

/// Read the photometry of the object in (1-based) row `sequence_number` of
/// `data_file`.
pub fn read_raw_light_curve<P: AsRef<Path>>(
    data_file: P,
    sequence_number: usize,
) -> Result<RawLightCurve, DataFileError> {
    let data_file = data_file.as_ref();
    debug!(
        "Reading object {sequence_number} from {}",
        data_file.display()
    );
    let mut fptr = fits_open(data_file)?;

    let imagelist = fits_open_hdu(&mut fptr, IMAGELIST_HDU)?;
    let image_ids: Vec<i64> = fits_get_required_col(&mut fptr, &imagelist, &["image_id"])?;
    let tmid: Vec<f64> = fits_get_required_col(&mut fptr, &imagelist, &["tmid"])?;
    let num_images = image_ids.len();

    let flux_hdu = fits_open_hdu(&mut fptr, FLUX_HDU)?;
    let num_objects = image_rows(&fptr, &flux_hdu, FLUX_HDU, num_images)?;
    let fluxerr_hdu = fits_open_hdu(&mut fptr, FLUXERR_HDU)?;
    let num_err_objects = image_rows(&fptr, &fluxerr_hdu, FLUXERR_HDU, num_images)?;
    if num_err_objects != num_objects {
        return Err(DataFileError::ObjectCountMismatch {
            flux: num_objects,
            fluxerr: num_err_objects,
        });
    }

    if sequence_number == 0 || sequence_number > num_objects {
        return Err(DataFileError::SequenceOutOfRange {
            sequence_number,
            num_objects,
        });
    }
    let row = sequence_number - 1;
    let flux = fits_get_image_rows(&mut fptr, &flux_hdu, row, 1)?;
    let flux_err = fits_get_image_rows(&mut fptr, &fluxerr_hdu, row, 1)?;
    trace!("Read {} images for object {sequence_number}", flux.len());

    let order = argsort(&tmid);
    Ok(RawLightCurve {
        image_ids: permute(&image_ids, &order),
        time: permute(&tmid, &order),
        flux: permute(&flux, &order),
        flux_err: permute(&flux_err, &order),
    })
}

/// Check that an image HDU is (objects × images) and return the number of
/// objects.
fn image_rows(
    fptr: &fitsio::FitsFile,
    hdu: &fitsio::hdu::FitsHdu,
    hdu_name: &'static str,
    num_images: usize,
) -> Result<usize, DataFileError> {
    let shape = fits_get_image_size(fptr, hdu)?;
    match shape.as_slice() {
        [rows, cols] if *cols == num_images => Ok(*rows),
        _ => Err(DataFileError::BadImageShape {
            hdu: hdu_name,
            shape: shape.clone(),
            num_images,
        }),
    }
}

/// Read an object's light curve and attach airmass from `airmass`.
pub fn read_light_curve<P: AsRef<Path>>(
    data_file: P,
    sequence_number: usize,
    airmass: &mut dyn AirmassLookup,
) -> Result<LightCurve, DataFileError> {
    let RawLightCurve {
        image_ids,
        time,
        flux,
        flux_err,
    } = read_raw_light_curve(data_file, sequence_number)?;
    trace!("Fetching airmass from {}", airmass.describe());
    let airmass = airmass.airmass(&image_ids)?;

    Ok(LightCurve::new(
        time,
        flux,
        flux_err,
        airmass,
        FluxUnits::Flux,
    )?)
}

/// Build an airmass table from the `AIRMASS` column of a data file's image
/// list.
pub fn read_imagelist_airmass<P: AsRef<Path>>(data_file: P) -> Result<AirmassTable, DataFileError> {
    let data_file = data_file.as_ref();
    let mut fptr = fits_open(data_file)?;
    let imagelist = fits_open_hdu(&mut fptr, IMAGELIST_HDU)?;
    let image_ids: Vec<i64> = fits_get_required_col(&mut fptr, &imagelist, &["image_id"])?;
    let airmass: Vec<f64> = fits_get_optional_col(&mut fptr, &imagelist, "AIRMASS")?.ok_or_else(
        || DataFileError::NoAirmassColumn(data_file.to_path_buf().into_boxed_path()),
    )?;

    let table: AirmassTable = image_ids.into_iter().zip(airmass).collect();
    debug!(
        "Read airmass for {} images from {}",
        table.len(),
        data_file.display()
    );
    Ok(table)
}
