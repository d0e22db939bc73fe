// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::path::Path;

use thiserror::Error;

use crate::{airmass::AirmassError, io::read::fits::FitsError, lightcurve::LightCurveError};

#[derive(Error, Debug)]
pub enum DataFileError {
    #[error("The data file has {num_objects} objects; sequence number {sequence_number} doesn't exist (sequence numbers start at 1)")]
    SequenceOutOfRange {
        sequence_number: usize,
        num_objects: usize,
    },

    #[error("HDU {hdu} has shape {shape:?}, but expected (objects, {num_images}) to match the image list")]
    BadImageShape {
        hdu: &'static str,
        shape: Vec<usize>,
        num_images: usize,
    },

    #[error("FLUX has {flux} objects but FLUXERR has {fluxerr}")]
    ObjectCountMismatch { flux: usize, fluxerr: usize },

    #[error("{0} has no AIRMASS column in its image list; airmass must come from the database instead")]
    NoAirmassColumn(Box<Path>),

    #[error(transparent)]
    Fits(#[from] FitsError),

    #[error(transparent)]
    Airmass(#[from] AirmassError),

    #[error(transparent)]
    LightCurve(#[from] LightCurveError),
}
