// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! An interactive shell around an [`Explorer`]. Each line is a command, parsed
//! with the same machinery as the rest of the command line. A command that
//! fails prints its error and the shell carries on.


use std::{
    io::{BufRead, Write},
    ops::ControlFlow,
    path::PathBuf,
};

use clap::{Parser, Subcommand};
use log::{debug, info, trace};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::common::{
    display_warnings, InfoPrinter, PeriodSearchArgs, SessionArgs, SessionParams, ARG_FILE_HELP,
};
use crate::{
    explorer::{Explorer, LinePrompt},
    ExplorerError,
};

const PROMPT: &str = "ngts> ";

#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct ShellArgs {
    #[clap(name = "ARGUMENTS_FILE", help = ARG_FILE_HELP.as_str(), parse(from_os_str))]
    pub(super) args_file: Option<PathBuf>,

    #[clap(flatten)]
    #[serde(rename = "session")]
    #[serde(default)]
    pub(super) session_args: SessionArgs,
}

impl ShellArgs {
    /// Both command-line and file arguments overlap in terms of what is
    /// available; this function consolidates everything that was specified into
    /// a single struct. Where applicable, it will prefer CLI parameters over
    /// those in the file.
    pub(super) fn merge(self) -> Result<ShellArgs, ExplorerError> {
        debug!("Merging command-line arguments with the argument file");

        let cli_args = self;

        if let Some(arg_file) = cli_args.args_file {
            let ShellArgs {
                args_file: _,
                session_args,
            } = unpack_arg_file!(arg_file);

            Ok(ShellArgs {
                args_file: None,
                session_args: cli_args.session_args.merge(session_args),
            })
        } else {
            Ok(cli_args)
        }
    }

    pub(super) fn run(self, dry_run: bool) -> Result<(), ExplorerError> {
        debug!("Converting arguments into parameters");
        trace!("{:#?}", self);
        let params = self.session_args.parse(true)?;
        display_warnings();

        if dry_run {
            info!("Dry run -- exiting now.");
            return Ok(());
        }

        let explorer = match (&params.match_file, &params.data_file) {
            (Some(_), Some(_)) => Some(params.open()?),
            _ => None,
        };
        let stdin = std::io::stdin();
        Shell::new(stdin.lock(), std::io::stdout(), params, explorer).run()
    }
}

/// One line of shell input.
#[derive(Parser, Debug)]
#[clap(name = "ngts", no_binary_name = true, disable_version_flag = true)]
struct ShellLine {
    #[clap(subcommand)]
    command: ShellCommand,
}

#[derive(Subcommand, Debug)]
enum ShellCommand {
    /// Load a catalogue cross-match file and a light-curve data file,
    /// replacing any loaded before.
    Load {
        #[clap(parse(from_os_str))]
        match_file: PathBuf,

        #[clap(parse(from_os_str))]
        data_file: PathBuf,
    },

    /// List the object classes and how many objects each has.
    Classes,

    /// Count the objects of a class. The default is the selected object's
    /// class.
    Count { class: Option<String> },

    /// Select an object by class and 0-based index.
    Select { class: String, index: usize },

    /// Describe the session and the selected object.
    Info,

    /// Plot the selected object's light curve.
    Plot {
        /// Correct for airmass first; fluxes become magnitudes.
        #[clap(short, long)]
        detrend: bool,
    },

    /// Plot the selected object's light curve folded on a period. The
    /// default period is the peak of the last period search.
    Phase {
        /// [days]
        period: Option<f64>,

        /// The epoch of phase 0 [MJD].
        #[clap(short, long, default_value = "0", allow_hyphen_values = true)]
        epoch: f64,

        /// The epoch is a Julian Date rather than an MJD.
        #[clap(long)]
        jd: bool,

        /// Correct for airmass first; fluxes become magnitudes.
        #[clap(short, long)]
        detrend: bool,

        /// Draw only one cycle of phase.
        #[clap(long)]
        no_double: bool,
    },

    /// Search for the selected object's period.
    Period {
        #[clap(flatten)]
        search_args: PeriodSearchArgs,

        /// Don't draw the periodogram.
        #[clap(long)]
        no_plot: bool,
    },

    /// Save the current figure as <outdir>/<class>/<name>.png, named after
    /// the selected object.
    Save {
        #[clap(short, long, parse(from_os_str))]
        outdir: Option<PathBuf>,
    },

    /// Save the current figure as <outdir>/<class>/<name>.png.
    SaveAs {
        name: String,
        class: String,

        #[clap(short, long, parse(from_os_str))]
        outdir: Option<PathBuf>,
    },

    /// Plot every object of a class in turn, waiting after each one.
    PlotAll {
        class: String,

        /// Correct for airmass first; fluxes become magnitudes.
        #[clap(short, long)]
        detrend: bool,

        /// Save each figure into the output directory.
        #[clap(short, long)]
        save: bool,

        /// Don't wait after each object.
        #[clap(long)]
        no_pause: bool,
    },

    /// Leave the shell.
    #[clap(alias = "exit")]
    Quit,
}

pub(super) struct Shell<R, W> {
    input: R,
    output: W,
    params: SessionParams,
    explorer: Option<Explorer>,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub(super) fn new(
        input: R,
        output: W,
        params: SessionParams,
        explorer: Option<Explorer>,
    ) -> Shell<R, W> {
        Shell {
            input,
            output,
            params,
            explorer,
        }
    }

    /// Read and run commands until "quit" or the end of the input.
    pub(super) fn run(mut self) -> Result<(), ExplorerError> {
        write!(
            self.output,
            "{}",
            indoc::formatdoc! {"
                ngts-explorer {}
                Type 'help' for a list of commands, or 'help <command>' for details.
            ", env!("CARGO_PKG_VERSION")}
        )?;

        loop {
            write!(self.output, "{PROMPT}")?;
            self.output.flush()?;
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.output)?;
                break;
            }

            let words = match split_words(&line) {
                Ok(w) => w,
                Err(e) => {
                    writeln!(self.output, "Error: {e}")?;
                    continue;
                }
            };
            if words.is_empty() || words[0].starts_with('#') {
                continue;
            }
            trace!("Shell command: {words:?}");

            let command = match ShellLine::try_parse_from(&words) {
                Ok(l) => l.command,
                Err(e) => {
                    // Also how help is displayed.
                    write!(self.output, "{e}")?;
                    continue;
                }
            };
            match self.execute(command) {
                Ok(ControlFlow::Break(())) => break,
                Ok(ControlFlow::Continue(())) => (),
                Err(e) => writeln!(self.output, "Error: {e}")?,
            }
        }

        Ok(())
    }

    fn execute(&mut self, command: ShellCommand) -> Result<ControlFlow<()>, ExplorerError> {
        match command {
            ShellCommand::Load {
                match_file,
                data_file,
            } => {
                let explorer = self.params.open_files(&match_file, &data_file)?;
                writeln!(
                    self.output,
                    "Loaded {} objects in {} classes",
                    explorer.catalogue().len(),
                    explorer.classes().len()
                )?;
                self.explorer = Some(explorer);
            }

            ShellCommand::Classes => {
                let explorer = loaded(&mut self.explorer)?;
                for class in explorer.classes() {
                    writeln!(self.output, "{class}: {}", explorer.num_objects(Some(class))?)?;
                }
            }

            ShellCommand::Count { class } => {
                let explorer = loaded(&mut self.explorer)?;
                writeln!(self.output, "{}", explorer.num_objects(class.as_deref())?)?;
            }

            ShellCommand::Select { class, index } => {
                let explorer = loaded(&mut self.explorer)?;
                let selection = explorer.set_object(&class, index)?;
                writeln!(
                    self.output,
                    "Selected {} ({} points)",
                    selection.title(),
                    selection.light_curve.len()
                )?;
            }

            ShellCommand::Info => {
                let explorer = loaded(&mut self.explorer)?;
                for line in describe(explorer) {
                    writeln!(self.output, "{line}")?;
                }
            }

            ShellCommand::Plot { detrend } => {
                let explorer = loaded(&mut self.explorer)?;
                let figure = explorer.plot(detrend)?;
                writeln!(
                    self.output,
                    "Drew {} of {}",
                    figure.kind(),
                    figure.title().unwrap_or("")
                )?;
            }

            ShellCommand::Phase {
                period,
                epoch,
                jd,
                detrend,
                no_double,
            } => {
                let explorer = loaded(&mut self.explorer)?;
                let period = match period {
                    Some(p) => p,
                    None => explorer.peak_period()?,
                };
                explorer.plot_phase(period, epoch, !jd, detrend, !no_double)?;
                writeln!(self.output, "Drew phase plot at a period of {period} d")?;
            }

            ShellCommand::Period {
                search_args,
                no_plot,
            } => {
                let search = search_args.parse()?;
                let explorer = loaded(&mut self.explorer)?;
                let spectrum = explorer.find_period(&search, !no_plot)?;
                writeln!(
                    self.output,
                    "Peak period: {:.6} d (power {:.4})",
                    spectrum.peak_period(),
                    spectrum.peak_power()
                )?;
            }

            ShellCommand::Save { outdir } => {
                let outdir = outdir.unwrap_or_else(|| self.params.outdir.clone());
                let explorer = loaded(&mut self.explorer)?;
                let mut prompt = LinePrompt::new(&mut self.input, &mut self.output);
                let saved = explorer.save_figure(&outdir, &mut prompt)?;
                report_save(&mut self.output, saved)?;
            }

            ShellCommand::SaveAs {
                name,
                class,
                outdir,
            } => {
                let outdir = outdir.unwrap_or_else(|| self.params.outdir.clone());
                let explorer = loaded(&mut self.explorer)?;
                let mut prompt = LinePrompt::new(&mut self.input, &mut self.output);
                let saved = explorer.save_figure_as(&name, &class, &outdir, &mut prompt)?;
                report_save(&mut self.output, saved)?;
            }

            ShellCommand::PlotAll {
                class,
                detrend,
                save,
                no_pause,
            } => {
                let save_dir = save.then(|| self.params.outdir.clone());
                let explorer = loaded(&mut self.explorer)?;
                let num_plotted = if no_pause {
                    explorer.plot_all(&class, detrend, None, save_dir.as_deref())?
                } else {
                    let mut prompt = LinePrompt::new(&mut self.input, &mut self.output);
                    explorer.plot_all(&class, detrend, Some(&mut prompt), save_dir.as_deref())?
                };
                writeln!(self.output, "Plotted {num_plotted} objects")?;
            }

            ShellCommand::Quit => return Ok(ControlFlow::Break(())),
        }

        Ok(ControlFlow::Continue(()))
    }
}

fn loaded(explorer: &mut Option<Explorer>) -> Result<&mut Explorer, ExplorerError> {
    explorer.as_mut().ok_or_else(|| {
        ExplorerError::Session(
            "No files are loaded; use 'load <catalogue> <data>' first".to_string(),
        )
    })
}

fn report_save<W: Write>(output: &mut W, saved: Option<PathBuf>) -> Result<(), std::io::Error> {
    match saved {
        Some(path) => writeln!(output, "Saved {}", path.display()),
        None => writeln!(output, "Not saved"),
    }
}

/// The state of a session, for the "info" command.
fn describe(explorer: &Explorer) -> Vec<String> {
    let mut printer = InfoPrinter::new("Session".into());
    printer.push_block(vec![
        format!("Catalogue: {}", explorer.catalogue_file().display()).into(),
        format!("Data:      {}", explorer.data_file().display()).into(),
    ]);
    if let Some(preview) = explorer.preview() {
        printer.push_line(format!("Previewing figures in {}", preview.display()).into());
    }

    match explorer.selection() {
        Some(s) => {
            let mut block = vec![
                format!("Selected {}", s.title()).into(),
                format!(
                    "object {} of class {}, sequence number {}",
                    s.index, s.class, s.entry.sequence_number
                )
                .into(),
                format!("{} points", s.light_curve.len()).into(),
            ];
            if let Ok(label) = explorer.mjd_label() {
                block.push(format!("times relative to {label}").into());
            }
            printer.push_block(block);
        }
        None => printer.push_line("No object selected".into()),
    }

    if let Some(figure) = explorer.current_figure() {
        printer.push_line(format!("Current figure: {}", figure.kind()).into());
    }
    if let Some(spectrum) = explorer.last_spectrum() {
        printer.push_line(format!("Last peak period: {} d", spectrum.peak_period()).into());
    }
    printer.lines()
}

#[derive(Error, Debug, PartialEq, Eq)]
enum SplitError {
    #[error("Unterminated {0} quote")]
    UnterminatedQuote(char),
}

/// Split a line into words on whitespace. Single or double quotes group words
/// (e.g. object names with spaces); quotes are not nested or escaped.
fn split_words(line: &str) -> Result<Vec<String>, SplitError> {
    let mut words = vec![];
    let mut word = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;

    for c in line.chars() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), c) => word.push(c),
            (None, '"' | '\'') => {
                quote = Some(c);
                in_word = true;
            }
            (None, c) if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut word));
                    in_word = false;
                }
            }
            (None, c) => {
                word.push(c);
                in_word = true;
            }
        }
    }

    if let Some(q) = quote {
        return Err(SplitError::UnterminatedQuote(q));
    }
    if in_word {
        words.push(word);
    }
    Ok(words)
}
