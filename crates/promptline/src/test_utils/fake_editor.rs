//! Deterministic line editor for unit testing.
//!
//! Simulates a minimal engine: queued raw input bytes become the live
//! buffer one byte at a time, `\n` completes a line, and every redisplay is
//! recorded as a [`Frame`] (and optionally rendered into a shared output
//! sink so tests can assert on a full terminal transcript).

use std::collections::VecDeque;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

use crate::editor::{LineEditor, ReadOutcome};

use super::CaptureOutput;

/// One recorded redisplay: what the terminal would show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Prompt text at redisplay time.
    pub prompt: String,
    /// Live buffer at redisplay time.
    pub buffer: String,
    /// Cursor position at redisplay time.
    pub cursor: usize,
}

impl Frame {
    /// Whether this frame shows nothing (prompt and buffer both blank).
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.prompt.is_empty() && self.buffer.is_empty()
    }
}

#[derive(Default)]
struct FakeEditorState {
    prompt: String,
    buffer: String,
    cursor: usize,
    pending: VecDeque<u8>,
    frames: Vec<Frame>,
    attached: bool,
    attach_count: usize,
    detach_count: usize,
    fail_attach: bool,
    fail_redisplay: bool,
    output: Option<CaptureOutput>,
}

impl FakeEditorState {
    fn record_frame(&mut self) -> io::Result<()> {
        let frame = Frame {
            prompt: self.prompt.clone(),
            buffer: self.buffer.clone(),
            cursor: self.cursor,
        };
        if let Some(output) = &self.output {
            // Carriage return + erase-line, the way a real engine repaints.
            let rendered = format!("\r\x1b[2K{}{}", frame.prompt, frame.buffer);
            output.clone().write_all(rendered.as_bytes())?;
        }
        self.frames.push(frame);
        Ok(())
    }
}

/// A deterministic in-memory [`LineEditor`].
///
/// Clones share state: keep one clone for assertions and hand a boxed clone
/// to the session.
#[derive(Clone, Default)]
pub struct FakeEditor {
    state: Arc<Mutex<FakeEditorState>>,
}

impl FakeEditor {
    /// Create a fake editor.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a fake editor that renders every redisplay into `output`, so
    /// editor repaints and asynchronous writes land in one transcript.
    #[must_use]
    pub fn with_output(output: CaptureOutput) -> Self {
        let editor = Self::new();
        editor.lock().output = Some(output);
        editor
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeEditorState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queue raw input bytes for `read_char` to consume.
    pub fn queue_input(&self, input: &str) {
        self.lock().pending.extend(input.as_bytes());
    }

    /// Pre-load the live buffer and cursor, as if the user had typed.
    pub fn set_live(&self, buffer: &str, cursor: usize) {
        let mut state = self.lock();
        state.buffer = buffer.to_string();
        state.cursor = cursor.min(buffer.len());
    }

    /// All recorded redisplays, oldest first.
    #[must_use]
    pub fn frames(&self) -> Vec<Frame> {
        self.lock().frames.clone()
    }

    /// The most recent redisplay, if any.
    #[must_use]
    pub fn last_frame(&self) -> Option<Frame> {
        self.lock().frames.last().cloned()
    }

    /// Number of redisplays recorded so far.
    #[must_use]
    pub fn redisplay_count(&self) -> usize {
        self.lock().frames.len()
    }

    /// Whether the editor is currently attached to its "terminal".
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.lock().attached
    }

    /// How many times `attach` ran.
    #[must_use]
    pub fn attach_count(&self) -> usize {
        self.lock().attach_count
    }

    /// How many times `detach` ran.
    #[must_use]
    pub fn detach_count(&self) -> usize {
        self.lock().detach_count
    }

    /// The current live buffer.
    #[must_use]
    pub fn live_buffer(&self) -> String {
        self.lock().buffer.clone()
    }

    /// The current cursor position.
    #[must_use]
    pub fn live_cursor(&self) -> usize {
        self.lock().cursor
    }

    /// The current prompt text.
    #[must_use]
    pub fn current_prompt(&self) -> String {
        self.lock().prompt.clone()
    }

    /// Make the next `attach` fail, simulating a non-terminal handle.
    pub fn set_fail_attach(&self, fail: bool) {
        self.lock().fail_attach = fail;
    }

    /// Make every redisplay fail, simulating a vanished terminal.
    pub fn set_fail_redisplay(&self, fail: bool) {
        self.lock().fail_redisplay = fail;
    }
}

impl LineEditor for FakeEditor {
    fn attach(&mut self, prompt: &str) -> io::Result<()> {
        let mut state = self.lock();
        if state.fail_attach {
            return Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "handle is not a terminal",
            ));
        }
        state.attached = true;
        state.attach_count += 1;
        state.prompt = prompt.to_string();
        state.record_frame()
    }

    fn detach(&mut self) {
        let mut state = self.lock();
        if state.attached {
            state.attached = false;
            state.detach_count += 1;
        }
    }

    fn set_prompt(&mut self, prompt: &str) {
        self.lock().prompt = prompt.to_string();
    }

    fn buffer(&self) -> String {
        self.lock().buffer.clone()
    }

    fn set_buffer(&mut self, text: &str) {
        let mut state = self.lock();
        state.buffer = text.to_string();
        state.cursor = state.cursor.min(state.buffer.len());
    }

    fn cursor(&self) -> usize {
        self.lock().cursor
    }

    fn set_cursor(&mut self, pos: usize) {
        let mut state = self.lock();
        state.cursor = pos.min(state.buffer.len());
    }

    fn redisplay(&mut self) -> io::Result<()> {
        let mut state = self.lock();
        if state.fail_redisplay {
            return Err(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "terminal went away",
            ));
        }
        state.record_frame()
    }

    fn read_char(&mut self) -> io::Result<ReadOutcome> {
        let mut state = self.lock();
        match state.pending.pop_front() {
            Some(b'\n') => {
                let line = std::mem::take(&mut state.buffer);
                state.cursor = 0;
                Ok(ReadOutcome::Line(line))
            }
            Some(byte) => {
                let cursor = state.cursor;
                state.buffer.insert(cursor, char::from(byte));
                state.cursor += 1;
                Ok(ReadOutcome::Consumed)
            }
            None => Ok(ReadOutcome::Empty),
        }
    }
}
