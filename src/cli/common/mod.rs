// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Common arguments for command-line interfaces. Here, we abstract many aspects
//! of `ngts-explorer`, e.g. the `plot` and `find-period` subcommands both
//! select an object out of a catalogue, so the same session and object
//! arguments are shared between them.

mod printers;
mod session;

pub(super) use printers::InfoPrinter;
pub(crate) use printers::{display_warnings, Warn};
pub(super) use session::{SessionArgs, SessionArgsError, SessionParams};

use std::str::FromStr;

use clap::Parser;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

use crate::{
    airmass::AIRMASS_SOURCES_COMMA_SEPARATED,
    constants::{DEFAULT_MAX_PERIOD, DEFAULT_MIN_PERIOD, DEFAULT_NUM_PERIODS},
    periodogram::{PeriodSearch, PeriodogramMethod, PERIODOGRAM_METHODS_COMMA_SEPARATED},
};

lazy_static::lazy_static! {
    pub(super) static ref ARG_FILE_TYPES_COMMA_SEPARATED: String = ArgFileTypes::iter().join(", ");

    pub(super) static ref ARG_FILE_HELP: String =
        format!("All arguments may be specified in a file. Any CLI arguments override arguments set in the file. Supported formats: {}", *ARG_FILE_TYPES_COMMA_SEPARATED);

    pub(super) static ref AIRMASS_SOURCE_HELP: String =
        format!("Where to get airmass values from. Valid sources are: {}. Default: imagelist", *AIRMASS_SOURCES_COMMA_SEPARATED);

    pub(super) static ref MIN_PERIOD_HELP: String =
        format!("The shortest trial period of the search [days]. Default: {DEFAULT_MIN_PERIOD}");

    pub(super) static ref MAX_PERIOD_HELP: String =
        format!("The longest trial period of the search [days]. Default: {DEFAULT_MAX_PERIOD}");

    pub(super) static ref NUM_PERIODS_HELP: String =
        format!("The number of linearly spaced trial periods. Default: {DEFAULT_NUM_PERIODS}");

    pub(super) static ref PERIODOGRAM_METHOD_HELP: String =
        format!("The flavour of Lomb-Scargle periodogram. Valid methods are: {}. Default: {}", *PERIODOGRAM_METHODS_COMMA_SEPARATED, PeriodogramMethod::default());
}

#[derive(Debug, Display, EnumIter, EnumString)]
pub(super) enum ArgFileTypes {
    #[strum(serialize = "toml")]
    Toml,
    #[strum(serialize = "json")]
    Json,
}

macro_rules! unpack_arg_file {
    ($arg_file:expr) => ({
        use std::{fs::File, io::Read, str::FromStr};

        use crate::cli::common::{ArgFileTypes, ARG_FILE_TYPES_COMMA_SEPARATED};

        log::debug!("Attempting to parse argument file {}", $arg_file.display());

        let mut contents = String::new();
        let arg_file_type = $arg_file
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .and_then(|e| ArgFileTypes::from_str(&e).ok());

        match arg_file_type {
            Some(ArgFileTypes::Toml) => {
                log::debug!("Parsing toml file...");
                let mut fh = File::open(&$arg_file)?;
                fh.read_to_string(&mut contents)?;
                match toml::from_str(&contents) {
                    Ok(p) => p,
                    Err(err) => {
                        return Err(ExplorerError::ArgFile(format!(
                            "Couldn't decode toml structure from {:?}:\n{err}",
                            $arg_file
                        )))
                    }
                }
            }
            Some(ArgFileTypes::Json) => {
                log::debug!("Parsing json file...");
                let mut fh = File::open(&$arg_file)?;
                fh.read_to_string(&mut contents)?;
                match serde_json::from_str(&contents) {
                    Ok(p) => p,
                    Err(err) => {
                        return Err(ExplorerError::ArgFile(format!(
                            "Couldn't decode json structure from {:?}:\n{err}",
                            $arg_file
                        )))
                    }
                }
            }

            _ => {
                return Err(ExplorerError::ArgFile(format!(
                    "Argument file '{:?}' doesn't have a recognised file extension! Valid extensions are: {}", $arg_file, *ARG_FILE_TYPES_COMMA_SEPARATED)
                ))
            }
        }
    });
}

/// Which object of the catalogue to work on.
#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct ObjectArgs {
    /// The object class (catalogue OTYPE), e.g. "RotV*".
    #[clap(short, long, help_heading = "OBJECT")]
    pub(super) class: Option<String>,

    /// The 0-based position of the object within its class.
    #[clap(short, long, help_heading = "OBJECT")]
    pub(super) index: Option<usize>,
}

impl ObjectArgs {
    pub(super) fn merge(self, other: Self) -> Self {
        ObjectArgs {
            class: self.class.or(other.class),
            index: self.index.or(other.index),
        }
    }

    pub(super) fn parse(self) -> Result<(String, usize), SessionArgsError> {
        let class = self.class.ok_or(SessionArgsError::NoClass)?;
        let index = self.index.ok_or(SessionArgsError::NoIndex)?;
        Ok((class, index))
    }
}

/// The trial periods of a period search.
#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct PeriodSearchArgs {
    #[clap(long, help = MIN_PERIOD_HELP.as_str(), help_heading = "PERIOD SEARCH")]
    pub(super) min_period: Option<f64>,

    #[clap(long, help = MAX_PERIOD_HELP.as_str(), help_heading = "PERIOD SEARCH")]
    pub(super) max_period: Option<f64>,

    #[clap(long, help = NUM_PERIODS_HELP.as_str(), help_heading = "PERIOD SEARCH")]
    pub(super) num_periods: Option<usize>,

    #[clap(long, help = PERIODOGRAM_METHOD_HELP.as_str(), help_heading = "PERIOD SEARCH")]
    pub(super) method: Option<String>,
}

impl PeriodSearchArgs {
    pub(super) fn merge(self, other: Self) -> Self {
        PeriodSearchArgs {
            min_period: self.min_period.or(other.min_period),
            max_period: self.max_period.or(other.max_period),
            num_periods: self.num_periods.or(other.num_periods),
            method: self.method.or(other.method),
        }
    }

    /// Only the method is checked here; the period range is checked when the
    /// search runs.
    pub(super) fn parse(self) -> Result<PeriodSearch, SessionArgsError> {
        let PeriodSearchArgs {
            min_period,
            max_period,
            num_periods,
            method,
        } = self;

        let method = match method {
            None => PeriodogramMethod::default(),
            Some(m) => PeriodogramMethod::from_str(&m.to_lowercase())
                .map_err(|_| SessionArgsError::InvalidPeriodogramMethod(m))?,
        };

        Ok(PeriodSearch::new(
            min_period.unwrap_or(DEFAULT_MIN_PERIOD),
            max_period.unwrap_or(DEFAULT_MAX_PERIOD),
            num_periods.unwrap_or(DEFAULT_NUM_PERIODS),
        )
        .with_method(method))
    }
}
