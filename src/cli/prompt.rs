use dialoguer::{theme::ColorfulTheme, Input};
use std::io::{self, BufRead, Write};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PromptError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Terminal error: {0}")]
    Terminal(#[from] dialoguer::Error),
}

/// Source of operator answers.
pub trait Prompter {
    /// Shows `message` and reads a single answer line. `Ok(None)` means the
    /// input is exhausted.
    fn ask(&mut self, out: &mut dyn Write, message: &str) -> Result<Option<String>, PromptError>;
}

/// Line-oriented prompter for piped input and tests. The prompt is
/// written to `out` so a transcript reads like a terminal session.
pub struct StreamPrompter<R> {
    reader: R,
}

impl<R: BufRead> StreamPrompter<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> Prompter for StreamPrompter<R> {
    fn ask(&mut self, out: &mut dyn Write, message: &str) -> Result<Option<String>, PromptError> {
        write!(out, "{}: ", message)?;
        out.flush()?;

        // Raw bytes: an undecodable answer is still an answer, not an I/O failure
        let mut raw = Vec::new();
        if self.reader.read_until(b'\n', &mut raw)? == 0 {
            return Ok(None);
        }

        let line = String::from_utf8_lossy(&raw);
        Ok(Some(line.trim_end_matches(&['\r', '\n'][..]).to_string()))
    }
}

/// Interactive prompter with line editing, used when stdin is a terminal.
pub struct TerminalPrompter {
    theme: ColorfulTheme,
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Prompter for TerminalPrompter {
    fn ask(&mut self, out: &mut dyn Write, message: &str) -> Result<Option<String>, PromptError> {
        // dialoguer draws on the terminal directly; pending output goes first
        out.flush()?;

        let answer = Input::<String>::with_theme(&self.theme)
            .with_prompt(message)
            .allow_empty(true)
            .interact_text();

        match answer {
            Ok(answer) => Ok(Some(answer)),
            Err(dialoguer::Error::IO(e)) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
