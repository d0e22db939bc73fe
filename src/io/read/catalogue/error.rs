// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use thiserror::Error;

use crate::io::read::fits::FitsError;

#[derive(Error, Debug)]
pub enum CatalogueError {
    #[error("Object class '{0}' isn't in the catalogue")]
    UnknownClass(String),

    #[error("Object class '{class}' has {num_objects} objects; index {index} is out of range")]
    IndexOutOfRange {
        class: String,
        index: usize,
        num_objects: usize,
    },

    #[error("Catalogue row {row} has sequence number {seq}; sequence numbers start at 1")]
    BadSequenceNumber { row: usize, seq: i64 },

    #[error(transparent)]
    Fits(#[from] FitsError),
}
