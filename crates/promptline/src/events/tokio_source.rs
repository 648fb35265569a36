//! Tokio-backed input-readiness watching.

use std::io;
use std::os::fd::{AsRawFd, RawFd};

use tokio::io::{Interest, unix::AsyncFd};
use tokio::runtime::Handle;

use crate::error::{InitError, Result};

use super::{EventSource, ReadyCallback, Subscription};

/// Wraps a raw descriptor so Tokio can poll it. The descriptor is borrowed,
/// never closed.
#[derive(Debug, Clone, Copy)]
struct BorrowedDescriptor(RawFd);

impl AsRawFd for BorrowedDescriptor {
    fn as_raw_fd(&self) -> RawFd {
        self.0
    }
}

/// An [`EventSource`] that watches descriptors on a Tokio runtime.
///
/// Each registration spawns one watcher task; cancelling the subscription
/// aborts it. Readiness is edge-driven, so the registered callback is
/// expected to drain all currently-available input before returning (the
/// session's readiness handler does).
#[derive(Debug, Clone)]
pub struct TokioEvents {
    handle: Handle,
}

impl TokioEvents {
    /// Create an event source on the given runtime handle.
    #[must_use]
    pub const fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// Create an event source on the current Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns an initialization error when called outside a runtime.
    pub fn current() -> std::result::Result<Self, InitError> {
        Handle::try_current()
            .map(Self::new)
            .map_err(|e| InitError::event_loop(e.to_string()))
    }
}

impl EventSource for TokioEvents {
    fn watch_readable(&self, fd: RawFd, mut callback: ReadyCallback) -> Result<Subscription> {
        let task = self.handle.spawn(async move {
            let async_fd =
                match AsyncFd::with_interest(BorrowedDescriptor(fd), Interest::READABLE) {
                    Ok(async_fd) => async_fd,
                    Err(e) => {
                        tracing::warn!(fd, error = %e, "cannot register descriptor with reactor");
                        return;
                    }
                };
            loop {
                match async_fd.readable().await {
                    Ok(mut guard) => {
                        // The callback drains until it observes no more
                        // input, so this readiness event ends not-ready;
                        // try_io clears only what this guard saw, keeping
                        // readiness that arrived during the drain.
                        let _ = guard.try_io(|_| {
                            callback();
                            io::Result::<()>::Err(io::ErrorKind::WouldBlock.into())
                        });
                    }
                    Err(e) => {
                        tracing::warn!(fd, error = %e, "readiness polling failed; watcher exiting");
                        return;
                    }
                }
            }
        });
        Ok(Subscription::new(move || task.abort()))
    }
}
