// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! List the object classes of a catalogue.

use std::path::PathBuf;

use clap::Parser;
use log::{debug, info, trace};
use serde::{Deserialize, Serialize};

use super::common::{display_warnings, InfoPrinter, SessionArgs, ARG_FILE_HELP};
use crate::ExplorerError;

#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct ClassesArgs {
    #[clap(name = "ARGUMENTS_FILE", help = ARG_FILE_HELP.as_str(), parse(from_os_str))]
    pub(super) args_file: Option<PathBuf>,

    #[clap(flatten)]
    #[serde(rename = "session")]
    #[serde(default)]
    pub(super) session_args: SessionArgs,
}

impl ClassesArgs {
    pub(super) fn merge(self) -> Result<ClassesArgs, ExplorerError> {
        debug!("Merging command-line arguments with the argument file");

        let cli_args = self;

        if let Some(arg_file) = cli_args.args_file {
            let ClassesArgs {
                args_file: _,
                session_args,
            } = unpack_arg_file!(arg_file);

            Ok(ClassesArgs {
                args_file: None,
                session_args: cli_args.session_args.merge(session_args),
            })
        } else {
            Ok(cli_args)
        }
    }

    pub(super) fn run(self, dry_run: bool) -> Result<(), ExplorerError> {
        trace!("{:#?}", self);
        let params = self.session_args.parse(false)?;
        display_warnings();

        if dry_run {
            info!("Dry run -- exiting now.");
            return Ok(());
        }

        let explorer = params.open()?;
        let classes = explorer.classes();
        let mut printer = InfoPrinter::new(
            format!(
                "{} objects in {} classes",
                explorer.catalogue().len(),
                classes.len()
            )
            .into(),
        );
        let mut block = Vec::with_capacity(classes.len());
        for class in classes {
            block.push(format!("{class}: {}", explorer.num_objects(Some(class))?).into());
        }
        printer.push_block(block);
        printer.display();
        Ok(())
    }
}
