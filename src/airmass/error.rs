// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AirmassError {
    #[error("No airmass is recorded for image {image_id}")]
    Missing { image_id: i64 },

    #[cfg(not(feature = "mysql"))]
    #[error("ngts-explorer was not compiled with the \"mysql\" feature, so airmass can't be read from a database.\nEither compile with this feature or read airmass from the data file's image list")]
    NoMysqlFeature,

    #[cfg(feature = "mysql")]
    #[error("Couldn't connect to the airmass database on '{host}': {err}")]
    Connection { host: String, err: String },

    #[cfg(feature = "mysql")]
    #[error("Airmass database query failed: {0}")]
    Query(String),
}
