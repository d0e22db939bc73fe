// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Cross-match catalogues: which objects in a data file are which type of
//! object (SIMBAD `OTYPE`).

mod error;

pub use error::CatalogueError;

use std::path::Path;

use indexmap::IndexMap;
use log::{debug, trace};

use super::fits::{fits_get_optional_col, fits_get_required_col, fits_open, fits_open_hdu};

/// One catalogue row.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogueEntry {
    /// The object's main identifier, e.g. "V* AB Dor".
    pub name: String,

    /// 1-based row of this object in the light-curve data file.
    pub sequence_number: usize,

    /// V-band magnitude, if known.
    pub vmag: Option<f64>,
}

/// Catalogue entries grouped by object type. Types and the objects within them
/// keep the order they appear in the file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalogue {
    classes: IndexMap<String, Vec<CatalogueEntry>>,
}

impl Catalogue {
    /// Read HDU 1 of a FITS cross-match table. Column names are matched
    /// without regard to case; `V` is optional.
    pub fn read<P: AsRef<Path>>(file: P) -> Result<Catalogue, CatalogueError> {
        let file = file.as_ref();
        debug!("Reading catalogue {}", file.display());
        let mut fptr = fits_open(file)?;
        let hdu = fits_open_hdu(&mut fptr, 1_usize)?;

        let names: Vec<String> = fits_get_required_col(&mut fptr, &hdu, &["MAIN_ID"])?;
        let types: Vec<String> = fits_get_required_col(&mut fptr, &hdu, &["OTYPE"])?;
        let seq: Vec<i64> = fits_get_required_col(&mut fptr, &hdu, &["Sequence_number"])?;
        let vmags: Option<Vec<f64>> = fits_get_optional_col(&mut fptr, &hdu, "V")?;
        if vmags.is_none() {
            debug!("Catalogue has no V column; magnitudes won't be shown");
        }

        let mut catalogue = Catalogue::default();
        for (i, ((name, otype), seq)) in names.into_iter().zip(types).zip(seq).enumerate() {
            let sequence_number = usize::try_from(seq)
                .ok()
                .filter(|&s| s > 0)
                .ok_or(CatalogueError::BadSequenceNumber { row: i + 1, seq })?;
            let vmag = vmags
                .as_ref()
                .and_then(|v| v.get(i).copied())
                .filter(|v| !v.is_nan());
            catalogue.push(
                otype.trim(),
                CatalogueEntry {
                    name: name.trim().to_string(),
                    sequence_number,
                    vmag,
                },
            );
        }
        trace!(
            "Catalogue has {} objects in {} classes",
            catalogue.len(),
            catalogue.classes.len()
        );

        Ok(catalogue)
    }

    /// Add an entry to the end of a class, creating the class if needed.
    pub fn push(&mut self, class: &str, entry: CatalogueEntry) {
        match self.classes.get_mut(class) {
            Some(entries) => entries.push(entry),
            None => {
                self.classes.insert(class.to_string(), vec![entry]);
            }
        }
    }

    /// The object classes, in file order.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.classes.keys().map(|k| k.as_str())
    }

    pub fn objects(&self, class: &str) -> Option<&[CatalogueEntry]> {
        self.classes.get(class).map(|v| v.as_slice())
    }

    /// The `index`th (0-based) object of `class`.
    pub fn get(&self, class: &str, index: usize) -> Result<&CatalogueEntry, CatalogueError> {
        let objects = self
            .objects(class)
            .ok_or_else(|| CatalogueError::UnknownClass(class.to_string()))?;
        objects.get(index).ok_or(CatalogueError::IndexOutOfRange {
            class: class.to_string(),
            index,
            num_objects: objects.len(),
        })
    }

    pub fn num_objects(&self, class: &str) -> Result<usize, CatalogueError> {
        self.objects(class)
            .map(|o| o.len())
            .ok_or_else(|| CatalogueError::UnknownClass(class.to_string()))
    }

    /// The total number of objects.
    pub fn len(&self) -> usize {
        self.classes.values().map(|v| v.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}
