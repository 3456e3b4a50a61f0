//! Line-based operator channel.
//!
//! The editor never touches stdin/stdout directly. It reads whole lines from a
//! [`BufRead`] and writes prompts to a [`Write`], so sessions can be scripted
//! in tests with a `Cursor` and a `Vec<u8>`.
//!
//! Indentation is purely cosmetic: nested records and collection entries are
//! shifted right by two spaces per level.

use std::io::{BufRead, Write};

use colored::Colorize;

use crate::codec::InputError;
use crate::error::PromptfigError;

/// How a piece of output is styled when color is enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    /// Field names and section labels.
    Label,
    /// Current values, menus and other prompt text.
    Hint,
    /// Rejected input.
    Error,
    /// Session headline.
    Banner,
    /// Session progress.
    Info,
    /// Completion messages.
    Success,
}

pub struct Terminal<R, W> {
    input: R,
    output: W,
    indent: usize,
    color: bool,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            indent: 0,
            color: true,
        }
    }

    /// Enable or disable ANSI styling (default: enabled).
    pub fn color(mut self, enabled: bool) -> Self {
        self.color = enabled;
        self
    }

    pub fn paint(&self, style: Style, text: &str) -> String {
        if !self.color {
            return text.to_string();
        }
        match style {
            Style::Label => text.yellow().bold().to_string(),
            Style::Hint => text.yellow().to_string(),
            Style::Error => text.red().to_string(),
            Style::Banner => text.blue().bold().to_string(),
            Style::Info => text.blue().to_string(),
            Style::Success => text.green().bold().to_string(),
        }
    }

    /// Read one line of operator input, without its line terminator.
    ///
    /// A line that is not valid UTF-8 is an operator mistake and comes back as
    /// an [`InputError`]. End of input is a fatal error: a closed channel can
    /// never satisfy the prompt that is waiting on it.
    pub fn read_line(&mut self) -> Result<Result<String, InputError>, PromptfigError> {
        self.output.flush().map_err(PromptfigError::Input)?;

        let mut bytes = Vec::new();
        let read = self
            .input
            .read_until(b'\n', &mut bytes)
            .map_err(PromptfigError::Input)?;
        if read == 0 {
            return Err(PromptfigError::Input(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "input closed while waiting for an answer",
            )));
        }

        if bytes.ends_with(b"\n") {
            bytes.pop();
            if bytes.ends_with(b"\r") {
                bytes.pop();
            }
        }
        Ok(String::from_utf8(bytes).map_err(|_| InputError::Encoding))
    }

    /// Write indented prompt text without a trailing newline.
    pub fn prompt(&mut self, text: &str) -> Result<(), PromptfigError> {
        let pad = self.pad();
        write!(self.output, "{pad}{text}").map_err(PromptfigError::Input)
    }

    /// Write one indented line.
    pub fn line(&mut self, text: &str) -> Result<(), PromptfigError> {
        let pad = self.pad();
        writeln!(self.output, "{pad}{text}").map_err(PromptfigError::Input)
    }

    /// Write a styled, indented line.
    pub fn styled(&mut self, style: Style, text: &str) -> Result<(), PromptfigError> {
        let painted = self.paint(style, text);
        self.line(&painted)
    }

    /// Report a rejected answer. The caller re-asks the same question.
    pub fn reject(&mut self, err: &InputError) -> Result<(), PromptfigError> {
        log::debug!("rejected input: {err}");
        self.styled(Style::Error, &err.to_string())
    }

    /// Run `f` one indentation level deeper.
    pub fn indented<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, PromptfigError>,
    ) -> Result<T, PromptfigError> {
        self.indent += 1;
        let result = f(self);
        self.indent -= 1;
        result
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn pad(&self) -> String {
        "  ".repeat(self.indent)
    }
}
