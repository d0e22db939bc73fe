// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Plot one object's light curve (or phase plot) and save it.

use std::path::PathBuf;

use clap::Parser;
use log::{debug, info, trace};
use serde::{Deserialize, Serialize};

use super::common::{
    display_warnings, InfoPrinter, ObjectArgs, SessionArgs, SessionParams, Warn,
    ARG_FILE_HELP,
};
use crate::{explorer::LinePrompt, ExplorerError};

#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct PlotArgs {
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

    /// Correct for airmass before plotting; fluxes become magnitudes.
    #[clap(long, help_heading = "PLOTTING")]
    #[serde(default)]
    pub(super) detrend: bool,

    /// Fold the light curve on this period [days] and draw a phase plot
    /// instead.
    #[clap(long, help_heading = "PHASE")]
    pub(super) period: Option<f64>,

    /// The epoch of phase 0 [MJD]. Default: 0
    #[clap(long, allow_hyphen_values = true, help_heading = "PHASE")]
    pub(super) epoch: Option<f64>,

    /// The epoch is a Julian Date rather than an MJD.
    #[clap(long, help_heading = "PHASE")]
    #[serde(default)]
    pub(super) jd: bool,

    /// Draw only one cycle of phase.
    #[clap(long, help_heading = "PHASE")]
    #[serde(default)]
    pub(super) no_double: bool,
}

impl PlotArgs {
    pub(super) fn merge(self) -> Result<PlotArgs, ExplorerError> {
        debug!("Merging command-line arguments with the argument file");

        let cli_args = self;

        if let Some(arg_file) = cli_args.args_file {
            let PlotArgs {
                args_file: _,
                session_args,
                object_args,
                detrend,
                period,
                epoch,
                jd,
                no_double,
            } = unpack_arg_file!(arg_file);

            Ok(PlotArgs {
                args_file: None,
                session_args: cli_args.session_args.merge(session_args),
                object_args: cli_args.object_args.merge(object_args),
                detrend: cli_args.detrend || detrend,
                period: cli_args.period.or(period),
                epoch: cli_args.epoch.or(epoch),
                jd: cli_args.jd || jd,
                no_double: cli_args.no_double || no_double,
            })
        } else {
            Ok(cli_args)
        }
    }

    fn parse(self) -> Result<PlotParams, ExplorerError> {
        debug!("{:#?}", self);

        let PlotArgs {
            args_file: _,
            session_args,
            object_args,
            detrend,
            period,
            epoch,
            jd,
            no_double,
        } = self;

        let session = session_args.parse(false)?;
        let (class, index) = object_args.parse()?;
        if period.is_none() && (epoch.is_some() || jd || no_double) {
            "Phase arguments were given without --period; drawing a light curve".warn();
        }
        let phase = period.map(|period| PhaseParams {
            period,
            epoch: epoch.unwrap_or(0.0),
            epoch_is_mjd: !jd,
            double: !no_double,
        });

        let mut printer = InfoPrinter::new("Plotting".into());
        printer.push_line(format!("Object {index} of class {class}").into());
        match &phase {
            Some(p) => printer.push_line(
                format!(
                    "Phase plot at period {} d, epoch {} {}",
                    p.period,
                    p.epoch,
                    if p.epoch_is_mjd { "MJD" } else { "JD" }
                )
                .into(),
            ),
            None => printer.push_line("Light curve".into()),
        }
        if detrend {
            printer.push_line("Detrending against airmass".into());
        }
        printer.display();
        display_warnings();

        Ok(PlotParams {
            session,
            class,
            index,
            detrend,
            phase,
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

        params.run()
    }
}

struct PhaseParams {
    period: f64,
    epoch: f64,
    epoch_is_mjd: bool,
    double: bool,
}

struct PlotParams {
    session: SessionParams,
    class: String,
    index: usize,
    detrend: bool,
    phase: Option<PhaseParams>,
}

impl PlotParams {
    fn run(self) -> Result<(), ExplorerError> {
        let mut explorer = self.session.open()?;
        explorer.set_object(&self.class, self.index)?;
        match self.phase {
            Some(p) => {
                explorer.plot_phase(p.period, p.epoch, p.epoch_is_mjd, self.detrend, p.double)?;
            }
            None => {
                explorer.plot(self.detrend)?;
            }
        }

        let mut prompt = LinePrompt::stdio();
        if explorer
            .save_figure(&self.session.outdir, &mut prompt)?
            .is_none()
        {
            info!("Nothing was saved");
        }
        Ok(())
    }
}
