// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Code to read catalogue and light-curve FITS files.

pub mod catalogue;
pub mod data_file;
pub(crate) mod fits;

pub use catalogue::{Catalogue, CatalogueEntry, CatalogueError};
pub use data_file::{
    read_imagelist_airmass, read_light_curve, read_raw_light_curve, DataFileError, RawLightCurve,
};
pub use fits::FitsError;
