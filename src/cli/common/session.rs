// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Arguments describing an exploration session: the input files, where
//! airmass comes from, and where figures go.

use std::{
    path::{Path, PathBuf},
    str::FromStr,
};

use clap::Parser;
use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{InfoPrinter, Warn, AIRMASS_SOURCE_HELP};
use crate::{
    airmass::{database_lookup, AirmassLookup, AirmassSourceType, DatabaseConfig},
    constants::{DEFAULT_OUTPUT_DIR, DEFAULT_PREVIEW_FILENAME},
    explorer::Explorer,
    io::read::read_imagelist_airmass,
    ExplorerError,
};

#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct SessionArgs {
    /// Path to the catalogue cross-match file. This is a FITS table with
    /// MAIN_ID, OTYPE and Sequence_number columns (and optionally V).
    #[clap(short = 'm', long = "match", help_heading = "INPUT FILES")]
    #[serde(rename = "match")]
    pub(crate) match_file: Option<PathBuf>,

    /// Path to the light-curve data file, with IMAGELIST, FLUX and FLUXERR
    /// HDUs.
    #[clap(short = 'd', long = "data", help_heading = "INPUT FILES")]
    #[serde(rename = "data")]
    pub(crate) data_file: Option<PathBuf>,

    #[clap(long, help = AIRMASS_SOURCE_HELP.as_str(), help_heading = "AIRMASS")]
    pub(crate) airmass_source: Option<String>,

    /// The host of the airmass database. Only used when airmass comes from
    /// the database.
    #[clap(long, help_heading = "AIRMASS")]
    pub(crate) db_host: Option<String>,

    /// The user to connect to the airmass database as.
    #[clap(long, help_heading = "AIRMASS")]
    pub(crate) db_user: Option<String>,

    /// The name of the airmass database.
    #[clap(long, help_heading = "AIRMASS")]
    pub(crate) db_name: Option<String>,

    /// The password for the airmass database user. This is never written
    /// into saved argument files.
    #[clap(long, help_heading = "AIRMASS")]
    #[serde(skip_serializing)]
    pub(crate) db_password: Option<String>,

    /// The directory that figures are saved into, as <class>/<name>.png.
    #[clap(short = 'o', long, help_heading = "OUTPUT")]
    pub(crate) outdir: Option<PathBuf>,

    /// Draw every figure into this PNG file as soon as it is made. The
    /// interactive shell does this by default.
    #[clap(long, help_heading = "OUTPUT")]
    pub(crate) preview: Option<PathBuf>,

    /// Don't draw a preview of each figure.
    #[clap(long, conflicts_with("preview"), help_heading = "OUTPUT")]
    #[serde(default)]
    pub(crate) no_preview: bool,

    /// Overwrite existing figures without asking.
    #[clap(long, help_heading = "OUTPUT")]
    #[serde(default)]
    pub(crate) force: bool,
}

impl SessionArgs {
    pub(crate) fn merge(self, other: Self) -> Self {
        SessionArgs {
            match_file: self.match_file.or(other.match_file),
            data_file: self.data_file.or(other.data_file),
            airmass_source: self.airmass_source.or(other.airmass_source),
            db_host: self.db_host.or(other.db_host),
            db_user: self.db_user.or(other.db_user),
            db_name: self.db_name.or(other.db_name),
            db_password: self.db_password.or(other.db_password),
            outdir: self.outdir.or(other.outdir),
            preview: self.preview.or(other.preview),
            no_preview: self.no_preview || other.no_preview,
            force: self.force || other.force,
        }
    }

    /// Check the arguments and resolve defaults. If `default_preview` is true
    /// and no preview was asked for (or against), figures are previewed in
    /// [`DEFAULT_PREVIEW_FILENAME`].
    pub(crate) fn parse(self, default_preview: bool) -> Result<SessionParams, SessionArgsError> {
        let SessionArgs {
            match_file,
            data_file,
            airmass_source,
            db_host,
            db_user,
            db_name,
            db_password,
            outdir,
            preview,
            no_preview,
            force,
        } = self;

        for (what, file) in [("catalogue", &match_file), ("data", &data_file)] {
            if let Some(file) = file {
                if !file.exists() {
                    return Err(SessionArgsError::FileDoesntExist {
                        what,
                        file: file.clone(),
                    });
                }
            }
        }

        let airmass_source = match airmass_source {
            None => AirmassSourceType::default(),
            Some(s) => AirmassSourceType::from_str(&s.to_lowercase())
                .map_err(|_| SessionArgsError::InvalidAirmassSource(s))?,
        };

        let db_args_given =
            db_host.is_some() || db_user.is_some() || db_name.is_some() || db_password.is_some();
        let defaults = DatabaseConfig::default();
        let db_config = DatabaseConfig {
            host: db_host.unwrap_or(defaults.host),
            user: db_user.unwrap_or(defaults.user),
            database: db_name.unwrap_or(defaults.database),
            password: db_password,
        };
        if db_args_given && airmass_source == AirmassSourceType::Imagelist {
            vec![
                "Database arguments were given, but airmass is read from the image list".into(),
                "Use --airmass-source database to query the database".into(),
            ]
            .warn();
        }

        let preview = if no_preview {
            None
        } else {
            preview.or_else(|| {
                (default_preview && cfg!(feature = "plotting"))
                    .then(|| PathBuf::from(DEFAULT_PREVIEW_FILENAME))
            })
        };
        if preview.is_some() && !cfg!(feature = "plotting") {
            "ngts-explorer was not compiled with the \"plotting\" feature; figures can't be previewed"
                .warn();
        }

        let params = SessionParams {
            match_file,
            data_file,
            airmass_source,
            db_config,
            outdir: outdir.unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
            preview,
            force,
        };
        params.print_info();
        Ok(params)
    }
}

/// Everything needed to start an [`Explorer`]. The input files may be absent
/// for the interactive shell, which can load them later.
#[derive(Debug, Clone)]
pub(crate) struct SessionParams {
    pub(crate) match_file: Option<PathBuf>,
    pub(crate) data_file: Option<PathBuf>,
    pub(crate) airmass_source: AirmassSourceType,
    pub(crate) db_config: DatabaseConfig,
    pub(crate) outdir: PathBuf,
    pub(crate) preview: Option<PathBuf>,
    pub(crate) force: bool,
}

impl SessionParams {
    fn print_info(&self) {
        let mut printer = InfoPrinter::new("Session".into());
        let mut files_block = vec![];
        match &self.match_file {
            Some(f) => files_block.push(format!("Catalogue: {}", f.display()).into()),
            None => files_block.push("Catalogue: <none>".into()),
        }
        match &self.data_file {
            Some(f) => files_block.push(format!("Data:      {}", f.display()).into()),
            None => files_block.push("Data:      <none>".into()),
        }
        printer.push_block(files_block);

        match self.airmass_source {
            AirmassSourceType::Imagelist => {
                printer.push_line("Airmass from the data file's image list".into())
            }
            AirmassSourceType::Database => printer.push_line(
                format!(
                    "Airmass from database '{}' on '{}' as '{}'",
                    self.db_config.database, self.db_config.host, self.db_config.user
                )
                .into(),
            ),
        }

        let mut output_block = vec![format!("Saving figures under {}", self.outdir.display()).into()];
        if let Some(p) = &self.preview {
            output_block.push(format!("Previewing figures in {}", p.display()).into());
        }
        if self.force {
            output_block.push("Existing figures will be overwritten".into());
        }
        printer.push_block(output_block);
        printer.display();
    }

    /// Start a session on the catalogue and data files given as arguments.
    pub(crate) fn open(&self) -> Result<Explorer, ExplorerError> {
        let match_file = self
            .match_file
            .as_deref()
            .ok_or(SessionArgsError::NoMatchFile)?;
        let data_file = self
            .data_file
            .as_deref()
            .ok_or(SessionArgsError::NoDataFile)?;
        self.open_files(match_file, data_file)
    }

    /// Start a session on the given files, with everything else from these
    /// parameters.
    pub(crate) fn open_files(
        &self,
        match_file: &Path,
        data_file: &Path,
    ) -> Result<Explorer, ExplorerError> {
        let airmass: Box<dyn AirmassLookup> = match self.airmass_source {
            AirmassSourceType::Imagelist => Box::new(read_imagelist_airmass(data_file)?),
            AirmassSourceType::Database => database_lookup(self.db_config.clone())?,
        };
        debug!(
            "Opening {} with data {}",
            match_file.display(),
            data_file.display()
        );
        let explorer = Explorer::new(match_file, data_file, airmass)?
            .with_preview(self.preview.clone())
            .with_force_overwrite(self.force);
        Ok(explorer)
    }
}

#[derive(Error, Debug)]
pub(crate) enum SessionArgsError {
    #[error("No catalogue cross-match file was given (-m/--match)")]
    NoMatchFile,

    #[error("No light-curve data file was given (-d/--data)")]
    NoDataFile,

    #[error("The {what} file '{}' doesn't exist", file.display())]
    FileDoesntExist { what: &'static str, file: PathBuf },

    #[error("'{0}' isn't a valid airmass source; valid sources are: {}", *crate::airmass::AIRMASS_SOURCES_COMMA_SEPARATED)]
    InvalidAirmassSource(String),

    #[error("'{0}' isn't a valid periodogram method; valid methods are: {}", *crate::periodogram::PERIODOGRAM_METHODS_COMMA_SEPARATED)]
    InvalidPeriodogramMethod(String),

    #[error("No object class was given (-c/--class)")]
    NoClass,

    #[error("No object index was given (-i/--index)")]
    NoIndex,
}
