// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Plot every object of a class in turn.

use std::path::PathBuf;

use clap::Parser;
use log::{debug, info, trace};
use serde::{Deserialize, Serialize};

use super::common::{
    display_warnings, InfoPrinter, SessionArgs, SessionArgsError, SessionParams, Warn,
    ARG_FILE_HELP,
};
use crate::{explorer::LinePrompt, ExplorerError};

#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct PlotAllArgs {
    #[clap(name = "ARGUMENTS_FILE", help = ARG_FILE_HELP.as_str(), parse(from_os_str))]
    pub(super) args_file: Option<PathBuf>,

    #[clap(flatten)]
    #[serde(rename = "session")]
    #[serde(default)]
    pub(super) session_args: SessionArgs,

    /// The object class (catalogue OTYPE) to plot, e.g. "EB*".
    #[clap(short, long, help_heading = "OBJECT")]
    pub(super) class: Option<String>,

    /// Correct for airmass before plotting; fluxes become magnitudes.
    #[clap(long, help_heading = "PLOTTING")]
    #[serde(default)]
    pub(super) detrend: bool,

    /// Save each figure into the output directory.
    #[clap(long, help_heading = "PLOTTING")]
    #[serde(default)]
    pub(super) save: bool,

    /// Don't wait for enter to be pressed after each object. Existing figures
    /// are then only overwritten with --force.
    #[clap(long, help_heading = "PLOTTING")]
    #[serde(default)]
    pub(super) no_pause: bool,
}

impl PlotAllArgs {
    pub(super) fn merge(self) -> Result<PlotAllArgs, ExplorerError> {
        debug!("Merging command-line arguments with the argument file");

        let cli_args = self;

        if let Some(arg_file) = cli_args.args_file {
            let PlotAllArgs {
                args_file: _,
                session_args,
                class,
                detrend,
                save,
                no_pause,
            } = unpack_arg_file!(arg_file);

            Ok(PlotAllArgs {
                args_file: None,
                session_args: cli_args.session_args.merge(session_args),
                class: cli_args.class.or(class),
                detrend: cli_args.detrend || detrend,
                save: cli_args.save || save,
                no_pause: cli_args.no_pause || no_pause,
            })
        } else {
            Ok(cli_args)
        }
    }

    fn parse(self) -> Result<PlotAllParams, ExplorerError> {
        debug!("{:#?}", self);

        let PlotAllArgs {
            args_file: _,
            session_args,
            class,
            detrend,
            save,
            no_pause,
        } = self;

        let session = session_args.parse(true)?;
        let class = class.ok_or(SessionArgsError::NoClass)?;
        if !save && session.preview.is_none() {
            "Figures are neither saved nor previewed; nothing will be drawn".warn();
        }

        let mut printer = InfoPrinter::new(format!("Plotting all objects of class {class}").into());
        if detrend {
            printer.push_line("Detrending against airmass".into());
        }
        if save {
            printer.push_line(format!("Saving figures under {}", session.outdir.display()).into());
        }
        if no_pause {
            printer.push_line("Not pausing between objects".into());
        }
        printer.display();
        display_warnings();

        Ok(PlotAllParams {
            session,
            class,
            detrend,
            save,
            pause: !no_pause,
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

struct PlotAllParams {
    session: SessionParams,
    class: String,
    detrend: bool,
    save: bool,
    pause: bool,
}

impl PlotAllParams {
    fn run(self) -> Result<(), ExplorerError> {
        let mut explorer = self.session.open()?;
        let save_dir = self.save.then_some(self.session.outdir.as_path());
        let num_plotted = if self.pause {
            let mut prompt = LinePrompt::stdio();
            explorer.plot_all(&self.class, self.detrend, Some(&mut prompt), save_dir)?
        } else {
            explorer.plot_all(&self.class, self.detrend, None, save_dir)?
        };
        info!("Plotted {num_plotted} objects of class {}", self.class);
        Ok(())
    }
}
