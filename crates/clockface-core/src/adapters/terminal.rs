use std::fmt;
use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

use clockface_proto::ports::{DisplayError, DisplaySurface};

/// How a [`TerminalSurface`] presents consecutive writes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TerminalMode {
    /// Rewrite the current line in place.
    #[default]
    Inline,
    /// One line per write.
    Lines,
}

const CLEAR_LINE: &str = "\r\x1b[2K";

/// A display surface exposing a single element on a terminal stream.
pub struct TerminalSurface {
    id: String,
    mode: TerminalMode,
    out: Mutex<Box<dyn Write + Send>>,
}

impl TerminalSurface {
    pub fn new(id: impl Into<String>, mode: TerminalMode, out: impl Write + Send + 'static) -> Self {
        let out: Box<dyn Write + Send> = Box::new(out);

        Self {
            id: id.into(),
            mode,
            out: Mutex::new(out),
        }
    }

    pub fn stdout(id: impl Into<String>, mode: TerminalMode) -> Self {
        Self::new(id, mode, io::stdout())
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Terminate an inline line so following output starts on a fresh row.
    pub fn finish(&self) -> io::Result<()> {
        if self.mode == TerminalMode::Lines {
            return Ok(());
        }

        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        writeln!(out)?;
        out.flush()
    }
}

impl fmt::Debug for TerminalSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TerminalSurface")
            .field("id", &self.id)
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

impl DisplaySurface for TerminalSurface {
    fn set_text(&self, id: &str, text: &str) -> Result<(), DisplayError> {
        if id != self.id {
            return Err(DisplayError::not_found(id));
        }

        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        let written = match self.mode {
            TerminalMode::Inline => write!(out, "{CLEAR_LINE}{text}"),
            TerminalMode::Lines => writeln!(out, "{text}"),
        };

        written
            .and_then(|()| out.flush())
            .map_err(|source| DisplayError::Write {
                id: id.to_owned(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{BrokenPipe, SharedBuffer};

    #[test]
    fn lines_mode_writes_one_line_per_update() {
        let buffer = SharedBuffer::default();
        let surface = TerminalSurface::new("current-time", TerminalMode::Lines, buffer.clone());

        surface.set_text("current-time", "one").expect("write");
        surface.set_text("current-time", "two").expect("write");
        surface.finish().expect("finish");

        assert_eq!(buffer.contents(), "one\ntwo\n");
    }

    #[test]
    fn inline_mode_rewrites_the_line() {
        let buffer = SharedBuffer::default();
        let surface = TerminalSurface::new("current-time", TerminalMode::Inline, buffer.clone());

        surface.set_text("current-time", "one").expect("write");
        surface.set_text("current-time", "two").expect("write");
        surface.finish().expect("finish");

        assert_eq!(
            buffer.contents(),
            format!("{CLEAR_LINE}one{CLEAR_LINE}two\n")
        );
    }

    #[test]
    fn other_identifiers_are_missing() {
        let buffer = SharedBuffer::default();
        let surface = TerminalSurface::new("current-time", TerminalMode::Lines, buffer.clone());

        let error = surface.set_text("other", "text").expect_err("unknown id");

        assert!(error.is_not_found());
        assert!(buffer.contents().is_empty());
    }

    #[test]
    fn io_failures_surface_as_write_errors() {
        let surface = TerminalSurface::new("current-time", TerminalMode::Lines, BrokenPipe);

        let error = surface.set_text("current-time", "text").expect_err("broken pipe");

        assert!(matches!(error, DisplayError::Write { ref id, .. } if id == "current-time"));
    }
}
