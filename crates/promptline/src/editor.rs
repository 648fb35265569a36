//! The line-editing engine boundary.
//!
//! promptline does not implement line editing. It consumes an engine that
//! turns raw keystrokes into an editable line, exposed here as the
//! [`LineEditor`] trait. The engine owns the terminal's raw-mode
//! negotiation and escape-sequence handling; promptline only asks it to
//! show, blank, and restore its visual footprint, and to consume pending
//! input one unit at a time.
//!
//! A deterministic in-memory engine for testing lives in
//! [`crate::test_utils::FakeEditor`].

use std::io;

/// Outcome of consuming one unit of pending input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    /// The unit completed a line; the engine has already cleared its buffer.
    Line(String),
    /// The unit was consumed and the live buffer or cursor may have changed.
    Consumed,
    /// No input is currently available.
    Empty,
}

impl ReadOutcome {
    /// Check whether this outcome carries a completed line.
    #[must_use]
    pub const fn is_line(&self) -> bool {
        matches!(self, Self::Line(_))
    }
}

/// An opaque line-editing engine bound to a terminal.
///
/// The session holds exactly one boxed editor for its whole lifetime.
/// Every method is non-blocking; `read_char` must return [`ReadOutcome::Empty`]
/// rather than wait for input.
pub trait LineEditor: Send {
    /// Bind the editor to its terminal, display `prompt`, and enter
    /// callback-driven input mode (raw line discipline).
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be put into the required
    /// mode, e.g. the handle is not a terminal.
    fn attach(&mut self, prompt: &str) -> io::Result<()>;

    /// Leave callback-driven input mode and restore the terminal's
    /// line-discipline settings to their pre-attach state.
    ///
    /// Must be idempotent; the session calls it during teardown no matter
    /// what state the editor is in.
    fn detach(&mut self);

    /// Replace the visible prompt text. Takes effect on the next redisplay.
    fn set_prompt(&mut self, prompt: &str);

    /// The current live edit buffer.
    fn buffer(&self) -> String;

    /// Replace the live edit buffer. Clamps the cursor into range.
    fn set_buffer(&mut self, text: &str);

    /// The current cursor position within the live buffer.
    fn cursor(&self) -> usize;

    /// Move the cursor within the live buffer.
    fn set_cursor(&mut self, pos: usize);

    /// Redraw the prompt and live buffer at the current cursor position.
    ///
    /// # Errors
    ///
    /// Returns an error if the redraw could not be written to the terminal.
    fn redisplay(&mut self) -> io::Result<()>;

    /// Consume one unit of pending input without blocking.
    ///
    /// # Errors
    ///
    /// Returns an error if reading from the input handle failed.
    fn read_char(&mut self) -> io::Result<ReadOutcome>;
}
