// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Useful constants.

All constants *must* be double precision. Light curves are read as `f64` and
stay that way through detrending and period searching.
 */

pub use std::f64::consts::{PI, TAU};

/// Propagates a flux uncertainty into a magnitude uncertainty: 2.5 / ln(10)
/// rounded to the value used by the NGTS pipeline.
pub const MAG_ERR_FACTOR: f64 = 1.08;

/// Multiplier in the definition of an instrumental magnitude,
/// `-2.5 * log10(flux)`.
pub const POGSON: f64 = -2.5;

/// Julian Date minus Modified Julian Date [days].
pub const MJD_OFFSET: f64 = 2400000.5;

/// The default shortest period searched by `find-period` [days].
pub const DEFAULT_MIN_PERIOD: f64 = 0.1;

/// The default longest period searched by `find-period` [days].
pub const DEFAULT_MAX_PERIOD: f64 = 1.0;

/// The default number of trial periods.
pub const DEFAULT_NUM_PERIODS: usize = 250;

/// The directory figures are saved into if none is given.
pub const DEFAULT_OUTPUT_DIR: &str = "objects";

/// Name of the figure written every time a plot is drawn in the shell.
pub const DEFAULT_PREVIEW_FILENAME: &str = "ngts_explorer_preview.png";

/// The default host of the airmass database.
pub const DEFAULT_DB_HOST: &str = "ngtsdb";

/// The default user to connect to the airmass database as.
pub const DEFAULT_DB_USER: &str = "sw";

/// The default name of the airmass database.
pub const DEFAULT_DB_NAME: &str = "swdb";
