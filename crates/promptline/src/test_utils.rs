//! Test utilities for promptline.
//!
//! Deterministic stand-ins for the two opaque capabilities the crate
//! consumes (the line editor and the event loop), plus a shared in-memory
//! output sink. Everything here is observable from the outside so tests can
//! assert on the exact sequence of display operations.

mod fake_editor;
mod fake_events;

pub use fake_editor::{FakeEditor, Frame};
pub use fake_events::FakeEvents;

use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

/// Shared in-memory writer with a switchable failure mode.
///
/// Clones share one buffer, so a clone handed to the session and a clone
/// kept by the test observe the same bytes.
#[derive(Debug, Clone, Default)]
pub struct CaptureOutput {
    inner: Arc<Mutex<CaptureState>>,
}

#[derive(Debug, Default)]
struct CaptureState {
    data: Vec<u8>,
    fail_writes: bool,
}

impl CaptureOutput {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, CaptureState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Everything written so far.
    #[must_use]
    pub fn contents(&self) -> Vec<u8> {
        self.lock().data.clone()
    }

    /// Everything written so far, lossily decoded.
    #[must_use]
    pub fn contents_str(&self) -> String {
        String::from_utf8_lossy(&self.lock().data).into_owned()
    }

    /// Discard captured bytes.
    pub fn clear(&self) {
        self.lock().data.clear();
    }

    /// Make every subsequent write fail like a closed pipe.
    pub fn set_fail_writes(&self, fail: bool) {
        self.lock().fail_writes = fail;
    }
}

impl Write for CaptureOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut state = self.lock();
        if state.fail_writes {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"));
        }
        state.data.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if self.lock().fail_writes {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"));
        }
        Ok(())
    }
}
