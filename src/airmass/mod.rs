// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Airmass metadata: given the identifiers of the images making up a light
//! curve, find the airmass each image was taken at.
//!
//! Light curves are parallel-indexed, so every lookup returns airmass values in
//! exactly the order the image identifiers were given. There is no default
//! airmass; an image without a record is an error.

#[cfg(feature = "mysql")]
mod database;
mod error;

#[cfg(feature = "mysql")]
pub use database::DatabaseAirmass;
pub use error::AirmassError;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use crate::constants::{DEFAULT_DB_HOST, DEFAULT_DB_NAME, DEFAULT_DB_USER};

lazy_static::lazy_static! {
    pub static ref AIRMASS_SOURCES_COMMA_SEPARATED: String = {
        use itertools::Itertools;
        use strum::IntoEnumIterator;
        AirmassSourceType::iter().join(", ")
    };
}

/// Something that knows the airmass of images.
pub trait AirmassLookup {
    /// The airmass of each of `image_ids`, in the same order.
    fn airmass(&mut self, image_ids: &[i64]) -> Result<Vec<f64>, AirmassError>;

    /// A short description for log messages.
    fn describe(&self) -> String;
}

/// Where airmass values come from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumIter, EnumString)]
#[derive(Serialize, Deserialize)]
pub enum AirmassSourceType {
    /// An `AIRMASS` column in the data file's image list.
    #[default]
    #[strum(serialize = "imagelist")]
    #[serde(rename = "imagelist")]
    Imagelist,

    /// The `headers` table of the observatory database.
    #[strum(serialize = "database")]
    #[serde(rename = "database")]
    Database,
}

/// Connection details for the airmass database. The host is always given
/// explicitly; nothing is inferred from the machine we're running on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub host: String,
    pub user: String,
    pub database: String,
    pub password: Option<String>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        DatabaseConfig {
            host: DEFAULT_DB_HOST.to_string(),
            user: DEFAULT_DB_USER.to_string(),
            database: DEFAULT_DB_NAME.to_string(),
            password: None,
        }
    }
}

impl DatabaseConfig {
    /// A MySQL connection URL. The user and password are percent-encoded.
    pub fn url(&self) -> String {
        let user = urlencoding::encode(&self.user);
        match &self.password {
            Some(p) => format!(
                "mysql://{user}:{}@{}/{}",
                urlencoding::encode(p),
                self.host,
                self.database
            ),
            None => format!("mysql://{user}@{}/{}", self.host, self.database),
        }
    }
}

/// Connect to the airmass database described by `config`. Only possible if
/// the crate was compiled with the "mysql" feature.
pub fn database_lookup(config: DatabaseConfig) -> Result<Box<dyn AirmassLookup>, AirmassError> {
    #[cfg(feature = "mysql")]
    {
        Ok(Box::new(DatabaseAirmass::new(config)))
    }

    #[cfg(not(feature = "mysql"))]
    {
        let _ = config;
        Err(AirmassError::NoMysqlFeature)
    }
}

/// Airmass values held in memory, keyed by image identifier.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AirmassTable {
    airmass: HashMap<i64, f64>,
}

impl AirmassTable {
    pub fn len(&self) -> usize {
        self.airmass.len()
    }

    pub fn is_empty(&self) -> bool {
        self.airmass.is_empty()
    }
}

impl FromIterator<(i64, f64)> for AirmassTable {
    fn from_iter<I: IntoIterator<Item = (i64, f64)>>(iter: I) -> Self {
        AirmassTable {
            airmass: iter.into_iter().collect(),
        }
    }
}

impl AirmassLookup for AirmassTable {
    fn airmass(&mut self, image_ids: &[i64]) -> Result<Vec<f64>, AirmassError> {
        ordered_lookup(&self.airmass, image_ids)
    }

    fn describe(&self) -> String {
        format!("in-memory table of {} images", self.airmass.len())
    }
}

/// Pull `image_ids` out of `map`, preserving order.
fn ordered_lookup(map: &HashMap<i64, f64>, image_ids: &[i64]) -> Result<Vec<f64>, AirmassError> {
    image_ids
        .iter()
        .map(|id| {
            map.get(id)
                .copied()
                .ok_or(AirmassError::Missing { image_id: *id })
        })
        .collect()
}
