//! Line-based terminal primitives used by the fallback renderers

use colored::Colorize;
use std::io::{self, BufRead, IsTerminal, Write};

/// The print-a-line / read-a-line surface the fallback renderers are built on.
///
/// `Ok(None)` from a read means the input stream reached EOF; renderers treat
/// it as an empty answer.
pub trait LineIo {
    /// Print one line of prompt text
    fn write_line(&mut self, line: &str) -> io::Result<()>;

    /// Print one error line
    fn write_error(&mut self, message: &str) -> io::Result<()>;

    /// Read one line without its trailing newline
    fn read_line(&mut self) -> io::Result<Option<String>>;

    /// Read one line without echoing it
    fn read_secret(&mut self) -> io::Result<Option<String>> {
        self.read_line()
    }

    /// Read one line, offering `candidates` as completions where supported
    fn read_line_with_completions(&mut self, _candidates: &[String]) -> io::Result<Option<String>> {
        self.read_line()
    }
}

/// [`LineIo`] over the process's standard streams.
///
/// End of input is reported on every read as `Ok(None)`. The prompter decides
/// when a prompt has to give up.
pub struct TerminalIo {
    echo_warning_shown: bool,
}

impl TerminalIo {
    pub fn new() -> Self {
        Self {
            echo_warning_shown: false,
        }
    }
}

impl Default for TerminalIo {
    fn default() -> Self {
        Self::new()
    }
}

impl LineIo for TerminalIo {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", line)?;
        stdout.flush()
    }

    fn write_error(&mut self, message: &str) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", message.white().on_red())?;
        stdout.flush()
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut buf = String::new();
        let read = io::stdin().lock().read_line(&mut buf)?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(buf.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn read_secret(&mut self) -> io::Result<Option<String>> {
        if io::stdin().is_terminal() {
            return console::Term::stdout().read_secure_line().map(Some);
        }

        if !self.echo_warning_shown {
            self.echo_warning_shown = true;
            eprintln!(
                "{} input is not a terminal, typed characters will be visible",
                "Warning:".yellow()
            );
        }
        self.read_line()
    }

    fn read_line_with_completions(&mut self, candidates: &[String]) -> io::Result<Option<String>> {
        if candidates.is_empty() || !io::stdin().is_terminal() {
            return self.read_line();
        }

        let completion = PrefixCompletion { candidates };
        dialoguer::Input::<String>::new()
            .allow_empty(true)
            .completion_with(&completion)
            .interact_text()
            .map(Some)
            .map_err(io::Error::other)
    }
}

/// Tab completes to the first candidate extending the typed text
struct PrefixCompletion<'a> {
    candidates: &'a [String],
}

impl dialoguer::Completion for PrefixCompletion<'_> {
    fn get(&self, input: &str) -> Option<String> {
        complete(self.candidates, input)
    }
}

fn complete(candidates: &[String], input: &str) -> Option<String> {
    candidates
        .iter()
        .find(|candidate| candidate.starts_with(input) && candidate.as_str() != input)
        .cloned()
}

/// Wraps the line I/O for the span of one prompt and remembers whether the
/// input ended while it was asked.
///
/// An EOF answer goes through the usual default and required rules. If that
/// answer is rejected there is nothing left to re-read, so the prompt fails.
pub(crate) struct EofGuard<'a, I: LineIo> {
    inner: &'a mut I,
    reached_eof: bool,
}

impl<'a, I: LineIo> EofGuard<'a, I> {
    pub(crate) fn new(inner: &'a mut I) -> Self {
        Self {
            inner,
            reached_eof: false,
        }
    }

    fn track(&mut self, line: io::Result<Option<String>>) -> io::Result<Option<String>> {
        let line = line?;
        if line.is_none() {
            self.reached_eof = true;
        }
        Ok(line)
    }

    /// Report a rejected answer, failing when no further input can follow
    pub(crate) fn reject(&mut self, message: &str) -> io::Result<()> {
        self.inner.write_error(message)?;
        if self.reached_eof {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input ended before an answer was accepted",
            ));
        }
        Ok(())
    }
}

impl<I: LineIo> LineIo for EofGuard<'_, I> {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.inner.write_line(line)
    }

    fn write_error(&mut self, message: &str) -> io::Result<()> {
        self.inner.write_error(message)
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let line = self.inner.read_line();
        self.track(line)
    }

    fn read_secret(&mut self) -> io::Result<Option<String>> {
        let line = self.inner.read_secret();
        self.track(line)
    }

    fn read_line_with_completions(&mut self, candidates: &[String]) -> io::Result<Option<String>> {
        let line = self.inner.read_line_with_completions(candidates);
        self.track(line)
    }
}
