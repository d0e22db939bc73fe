// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Questions for whoever is driving a session.

use std::io::{BufRead, Stdin, StdinLock, Stdout, Write};

/// Asks the operator things.
pub trait Prompt {
    /// Ask a yes/no question. Anything other than a "yes" is a no, including
    /// running out of input.
    fn confirm(&mut self, question: &str) -> Result<bool, std::io::Error>;

    /// Wait until the operator is ready to continue.
    fn pause(&mut self, message: &str) -> Result<(), std::io::Error>;
}

/// Only "y", "ye" and "yes" (in any case) are a yes.
pub fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "ye" | "yes")
}

/// Prompts written to `output`, answers read a line at a time from `input`.
pub struct LinePrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    pub fn new(input: R, output: W) -> LinePrompt<R, W> {
        LinePrompt { input, output }
    }

    fn ask(&mut self, text: &str) -> Result<Option<String>, std::io::Error> {
        write!(self.output, "{} ", console::style(text).bold())?;
        self.output.flush()?;
        let mut line = String::new();
        match self.input.read_line(&mut line)? {
            0 => Ok(None),
            _ => Ok(Some(line)),
        }
    }
}

impl LinePrompt<StdinLock<'static>, Stdout> {
    /// Prompt on the terminal.
    pub fn stdio() -> Self {
        let stdin: Stdin = std::io::stdin();
        LinePrompt::new(stdin.lock(), std::io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompt for LinePrompt<R, W> {
    fn confirm(&mut self, question: &str) -> Result<bool, std::io::Error> {
        Ok(self.ask(question)?.map(|a| is_yes(&a)).unwrap_or(false))
    }

    fn pause(&mut self, message: &str) -> Result<(), std::io::Error> {
        self.ask(message)?;
        Ok(())
    }
}
