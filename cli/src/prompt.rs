//! Change confirmation

use crate::error::{Error, Result};
use dialoguer::theme::ColorfulTheme;
use std::io::{BufRead, IsTerminal, Write};

/// Asks the operator to approve a change
pub trait Confirm {
    fn confirm(&mut self, question: &str) -> Result<bool>;
}

/// Terminal yes/no prompt backed by dialoguer. Enter alone declines.
pub struct TerminalConfirm;

impl Confirm for TerminalConfirm {
    fn confirm(&mut self, question: &str) -> Result<bool> {
        dialoguer::Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(question)
            .default(false)
            .interact()
            .map_err(dialog_error)
    }
}

/// Line-based yes/no prompt over any reader/writer pair, for piped input
pub struct LinePrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl LinePrompt<std::io::StdinLock<'static>, std::io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stdout())
    }
}

impl<R: BufRead, W: Write> Confirm for LinePrompt<R, W> {
    /// Accepts only `y`/`yes` or `n`/`no` (any case) and asks again on
    /// anything else. EOF counts as no.
    fn confirm(&mut self, question: &str) -> Result<bool> {
        writeln!(self.output, "{} (Y/N)?", question)?;
        loop {
            write!(self.output, "Enter yes or no: ")?;
            self.output.flush()?;

            let mut answer = String::new();
            if self.input.read_line(&mut answer)? == 0 {
                writeln!(self.output)?;
                return Ok(false);
            }

            match answer.trim().to_lowercase().as_str() {
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => writeln!(self.output, "Please enter yes or no to verify changes")?,
            }
        }
    }
}

/// Fixed answer, for non-interactive callers
pub struct Preset(pub bool);

impl Confirm for Preset {
    fn confirm(&mut self, _question: &str) -> Result<bool> {
        Ok(self.0)
    }
}

/// dialoguer when stdin is a terminal, plain line input otherwise
pub fn for_stdin() -> Box<dyn Confirm> {
    if std::io::stdin().is_terminal() {
        Box::new(TerminalConfirm)
    } else {
        Box::new(LinePrompt::stdio())
    }
}

pub(crate) fn dialog_error(e: dialoguer::Error) -> Error {
    Error::Prompt(e.to_string())
}
