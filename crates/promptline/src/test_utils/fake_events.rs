//! Deterministic event source for unit testing.
//!
//! Readiness never arrives on its own; tests fire it by hand with
//! [`FakeEvents::fire`]. Cancellation is observable through the live-watch
//! count, which is how tests verify the subscription is dropped on hide and
//! re-registered exactly once on show.

use std::os::fd::RawFd;
use std::sync::{Arc, Mutex, PoisonError};

use crate::error::{PromptError, Result};
use crate::events::{EventSource, ReadyCallback, Subscription};

struct Watch {
    id: u64,
    fd: RawFd,
    callback: Option<ReadyCallback>,
    active: bool,
}

#[derive(Default)]
struct FakeEventsState {
    watches: Vec<Watch>,
    next_id: u64,
    fail_watch: bool,
}

/// A hand-driven [`EventSource`].
///
/// Clones share state; keep one for the test and hand another to the
/// session.
#[derive(Clone, Default)]
pub struct FakeEvents {
    state: Arc<Mutex<FakeEventsState>>,
}

impl FakeEvents {
    /// Create a fake event source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeEventsState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of currently live registrations.
    #[must_use]
    pub fn live_watches(&self) -> usize {
        self.lock().watches.iter().filter(|w| w.active).count()
    }

    /// Number of registrations ever made.
    #[must_use]
    pub fn total_watches(&self) -> usize {
        self.lock().watches.len()
    }

    /// Make subsequent registrations fail.
    pub fn set_fail_watch(&self, fail: bool) {
        self.lock().fail_watch = fail;
    }

    /// Deliver a readiness notification to every live watch on `fd`.
    ///
    /// Callbacks run with the registry lock released, so a callback may
    /// freely cancel or add registrations (hide/show does both).
    pub fn fire(&self, fd: RawFd) {
        let mut ready = Vec::new();
        {
            let mut state = self.lock();
            for watch in &mut state.watches {
                if watch.active && watch.fd == fd {
                    if let Some(callback) = watch.callback.take() {
                        ready.push((watch.id, callback));
                    }
                }
            }
        }
        for (id, mut callback) in ready {
            callback();
            // Hand the callback back unless the watch was cancelled while
            // it ran.
            let mut state = self.lock();
            if let Some(watch) = state.watches.iter_mut().find(|w| w.id == id) {
                if watch.active {
                    watch.callback = Some(callback);
                }
            }
        }
    }
}

impl EventSource for FakeEvents {
    fn watch_readable(&self, fd: RawFd, callback: ReadyCallback) -> Result<Subscription> {
        let mut state = self.lock();
        if state.fail_watch {
            return Err(PromptError::event_loop("registration refused"));
        }
        let id = state.next_id;
        state.next_id += 1;
        state.watches.push(Watch {
            id,
            fd,
            callback: Some(callback),
            active: true,
        });
        drop(state);

        let registry = Arc::clone(&self.state);
        Ok(Subscription::new(move || {
            let mut state = registry.lock().unwrap_or_else(PoisonError::into_inner);
            if let Some(watch) = state.watches.iter_mut().find(|w| w.id == id) {
                watch.active = false;
                watch.callback = None;
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[test]
    fn fire_invokes_matching_watches() {
        let events = FakeEvents::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let sub = events
            .watch_readable(
                3,
                Box::new(move || {
                    counter.fetch_add(1, Ordering::SeqCst);
                }),
            )
            .unwrap();

        events.fire(3);
        events.fire(4);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(events.live_watches(), 1);
        drop(sub);
        assert_eq!(events.live_watches(), 0);

        events.fire(3);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn cancelled_watch_stops_firing() {
        let events = FakeEvents::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let sub = events
            .watch_readable(
                0,
                Box::new(move || {
                    counter.fetch_add(1, Ordering::SeqCst);
                }),
            )
            .unwrap();
        sub.cancel();
        events.fire(0);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn failing_registration() {
        let events = FakeEvents::new();
        events.set_fail_watch(true);
        let err = events.watch_readable(0, Box::new(|| {})).unwrap_err();
        assert!(err.to_string().contains("registration refused"));
    }
}
