// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Airmass from the `headers` table of the observatory MySQL database.

use std::collections::HashMap;

use diesel::{
    mysql::MysqlConnection,
    prelude::*,
    sql_query,
    sql_types::{BigInt, Double},
};
use itertools::Itertools;
use log::{debug, trace};

use super::{ordered_lookup, AirmassError, AirmassLookup, DatabaseConfig};

/// Image ids per `in (...)` clause.
const QUERY_CHUNK_SIZE: usize = 1000;

#[derive(QueryableByName)]
struct HeaderRow {
    #[diesel(sql_type = BigInt)]
    image_id: i64,
    #[diesel(sql_type = Double)]
    airmass: f64,
}

pub struct DatabaseAirmass {
    config: DatabaseConfig,
}

impl DatabaseAirmass {
    pub fn new(config: DatabaseConfig) -> DatabaseAirmass {
        DatabaseAirmass { config }
    }

    fn connect(&self) -> Result<MysqlConnection, AirmassError> {
        debug!(
            "Connecting to database '{}' on '{}' as '{}'",
            self.config.database, self.config.host, self.config.user
        );
        MysqlConnection::establish(&self.config.url()).map_err(|e| AirmassError::Connection {
            host: self.config.host.clone(),
            err: e.to_string(),
        })
    }
}

impl AirmassLookup for DatabaseAirmass {
    fn airmass(&mut self, image_ids: &[i64]) -> Result<Vec<f64>, AirmassError> {
        if image_ids.is_empty() {
            return Ok(vec![]);
        }

        // The connection is dropped (and closed) when this function returns,
        // error or not.
        let mut conn = self.connect()?;
        let mut found = HashMap::with_capacity(image_ids.len());
        for chunk in image_ids.chunks(QUERY_CHUNK_SIZE) {
            // Image ids are integers, so formatting them into the query is
            // safe.
            let query = format!(
                "select image_id, airmass from headers where image_id in ({})",
                chunk.iter().join(",")
            );
            trace!("Querying airmass for {} images", chunk.len());
            let rows: Vec<HeaderRow> = sql_query(query)
                .load(&mut conn)
                .map_err(|e| AirmassError::Query(e.to_string()))?;
            found.extend(rows.into_iter().map(|r| (r.image_id, r.airmass)));
        }

        ordered_lookup(&found, image_ids)
    }

    fn describe(&self) -> String {
        format!("database '{}' on '{}'", self.config.database, self.config.host)
    }
}
