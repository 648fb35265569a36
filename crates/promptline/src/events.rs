//! The event-loop boundary.
//!
//! promptline does not own a reactor. It consumes one through the
//! [`EventSource`] trait: a way to be called back when a file descriptor has
//! input available, and a way to cancel that registration. The Tokio-backed
//! adapter in [`tokio_source`] covers the common case; tests use
//! [`crate::test_utils::FakeEvents`] to fire readiness by hand.

use std::fmt;
use std::os::fd::RawFd;

use crate::error::Result;

pub mod tokio_source;

pub use tokio_source::TokioEvents;

/// Callback invoked whenever the watched descriptor becomes readable.
pub type ReadyCallback = Box<dyn FnMut() + Send>;

/// A source of input-readiness notifications.
pub trait EventSource: Send + Sync {
    /// Register `callback` to run whenever `fd` has data available to read.
    ///
    /// The registration stays live until the returned [`Subscription`] is
    /// cancelled or dropped.
    ///
    /// # Errors
    ///
    /// Returns an event loop error if the registration cannot be serviced.
    fn watch_readable(&self, fd: RawFd, callback: ReadyCallback) -> Result<Subscription>;
}

/// A live input-readiness registration.
///
/// Cancelling is non-blocking: a callback already in flight may still run
/// once, and must tolerate the state it finds. Dropping the subscription
/// cancels it.
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    /// Create a subscription from its cancellation action.
    #[must_use]
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Cancel the registration explicitly.
    pub fn cancel(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("live", &self.cancel.is_some())
            .finish()
    }
}
