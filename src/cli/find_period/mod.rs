// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Search one object's light curve for a period.


use std::{
    fs::File,
    io::{BufWriter, Write},
    path::PathBuf,
};

use clap::Parser;
use log::{debug, info, trace};
use serde::{Deserialize, Serialize};

use super::common::{
    display_warnings, InfoPrinter, ObjectArgs, PeriodSearchArgs, SessionArgs, SessionParams,
    ARG_FILE_HELP,
};
use crate::{explorer::LinePrompt, periodogram::PeriodSearch, ExplorerError};

#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct FindPeriodArgs {
    #[clap(name = "ARGUMENTS_FILE", help = ARG_FILE_HELP.as_str(), parse(from_os_str))]
    pub(super) args_file: Option<PathBuf>,

    #[clap(flatten)]
    #[serde(rename = "session")]
    #[serde(default)]
    pub(super) session_args: SessionArgs,

    #[clap(flatten)]
    #[serde(rename = "object")]
    #[serde(default)]
    pub(super) object_args: ObjectArgs,

    #[clap(flatten)]
    #[serde(rename = "search")]
    #[serde(default)]
    pub(super) search_args: PeriodSearchArgs,

    /// Write the power spectrum (trial periods and their power) to this JSON
    /// file.
    #[clap(long, help_heading = "OUTPUT")]
    pub(super) spectrum_json: Option<PathBuf>,

    /// Fold the light curve on the peak period and save the phase plot into
    /// the output directory.
    #[clap(long, help_heading = "OUTPUT")]
    #[serde(default)]
    pub(super) save_phase: bool,

    /// Correct for airmass before drawing the phase plot. The period search
    /// itself always uses the undetrended fluxes.
    #[clap(long, help_heading = "OUTPUT")]
    #[serde(default)]
    pub(super) detrend: bool,
}

impl FindPeriodArgs {
    pub(super) fn merge(self) -> Result<FindPeriodArgs, ExplorerError> {
        debug!("Merging command-line arguments with the argument file");

        let cli_args = self;

        if let Some(arg_file) = cli_args.args_file {
            let FindPeriodArgs {
                args_file: _,
                session_args,
                object_args,
                search_args,
                spectrum_json,
                save_phase,
                detrend,
            } = unpack_arg_file!(arg_file);

            Ok(FindPeriodArgs {
                args_file: None,
                session_args: cli_args.session_args.merge(session_args),
                object_args: cli_args.object_args.merge(object_args),
                search_args: cli_args.search_args.merge(search_args),
                spectrum_json: cli_args.spectrum_json.or(spectrum_json),
                save_phase: cli_args.save_phase || save_phase,
                detrend: cli_args.detrend || detrend,
            })
        } else {
            Ok(cli_args)
        }
    }

    fn parse(self) -> Result<FindPeriodParams, ExplorerError> {
        debug!("{:#?}", self);

        let FindPeriodArgs {
            args_file: _,
            session_args,
            object_args,
            search_args,
            spectrum_json,
            save_phase,
            detrend,
        } = self;

        let session = session_args.parse(false)?;
        let (class, index) = object_args.parse()?;
        let search = search_args.parse()?;

        let mut printer = InfoPrinter::new("Period search".into());
        printer.push_line(format!("Object {index} of class {class}").into());
        printer.push_block(vec![
            format!(
                "{} trial periods from {} to {} d",
                search.num_periods, search.min_period, search.max_period
            )
            .into(),
            format!("{} periodogram", search.method).into(),
        ]);
        if let Some(j) = &spectrum_json {
            printer.push_line(format!("Writing the power spectrum to {}", j.display()).into());
        }
        if save_phase {
            printer.push_line(
                format!(
                    "Saving a {}phase plot under {}",
                    if detrend { "detrended " } else { "" },
                    session.outdir.display()
                )
                .into(),
            );
        }
        printer.display();
        display_warnings();

        Ok(FindPeriodParams {
            session,
            class,
            index,
            search,
            spectrum_json,
            save_phase,
            detrend,
        })
    }

    pub(super) fn run(self, dry_run: bool) -> Result<(), ExplorerError> {
        debug!("Converting arguments into parameters");
        trace!("{:#?}", self);
        let params = self.parse()?;

        if dry_run {
            info!("Dry run -- exiting now.");
            return Ok(());
        }

        params.run()?;
        Ok(())
    }
}

struct FindPeriodParams {
    session: SessionParams,
    class: String,
    index: usize,
    search: PeriodSearch,
    spectrum_json: Option<PathBuf>,
    save_phase: bool,
    detrend: bool,
}

impl FindPeriodParams {
    /// Returns the peak period.
    fn run(self) -> Result<f64, ExplorerError> {
        let mut explorer = self.session.open()?;
        explorer.set_object(&self.class, self.index)?;
        let spectrum = explorer.find_period(&self.search, false)?;
        let peak = spectrum.peak_period();

        if let Some(json) = &self.spectrum_json {
            let mut f = BufWriter::new(File::create(json)?);
            serde_json::to_writer_pretty(&mut f, spectrum)?;
            f.flush()?;
            info!("Wrote the power spectrum to {}", json.display());
        }

        if self.save_phase {
            explorer.plot_phase(peak, 0.0, true, self.detrend, true)?;
            let mut prompt = LinePrompt::stdio();
            explorer.save_figure(&self.session.outdir, &mut prompt)?;
        }

        Ok(peak)
    }
}
