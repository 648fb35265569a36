//! The prompt session handle.
//!
//! A [`Session`] owns everything needed to render and restore the
//! interactive prompt: the line-editing engine, the output writer, the
//! active prompt string, and the live input-readiness subscription. The
//! suspend/resume protocol drives it through the
//! [`VisibilityCounter`](crate::visibility::VisibilityCounter) state
//! machine: capture and restore work happens only when a call crosses the
//! 0↔1 depth boundary.
//!
//! The handle is clonable and cheap to share; when the last clone drops,
//! cleanup runs exactly once: the prompt's footprint is removed, the
//! readiness registration is cancelled, and the editor detaches, restoring
//! the terminal's line-discipline settings. That covers normal-exit and
//! unwind paths alike.

use std::io::Write;
use std::os::fd::RawFd;
use std::sync::{Arc, Mutex, PoisonError, Weak};

use crate::config::PromptConfig;
use crate::editor::{LineEditor, ReadOutcome};
use crate::error::{InitError, PromptError, Result};
use crate::events::{EventSource, ReadyCallback, Subscription};
use crate::visibility::{Snapshot, Transition, VisibilityCounter};

/// Callback invoked with each line the user completes.
pub type LineCallback = Box<dyn FnMut(String) + Send>;

/// Everything the session owns, guarded by one lock.
pub(crate) struct SessionState {
    /// The opaque line-editing engine.
    editor: Box<dyn LineEditor>,
    /// Where asynchronous output goes.
    output: Box<dyn Write + Send>,
    /// The reactor that delivers input-readiness notifications.
    events: Arc<dyn EventSource>,
    /// The descriptor watched for input readiness.
    input_fd: RawFd,
    /// Session name, for diagnostics.
    name: String,
    /// The user-visible prompt text when shown.
    prompt: String,
    /// The suspend/resume nesting counter.
    visibility: VisibilityCounter,
    /// Captured editor state while hidden.
    snapshot: Option<Snapshot>,
    /// Live readiness registration; present iff the prompt is shown.
    subscription: Option<Subscription>,
    /// Set once cleanup has run; every operation afterwards is a no-op.
    closed: bool,
}

impl SessionState {
    /// Suspend the prompt's visual footprint.
    fn hide(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        if self.visibility.hide() == Transition::BecameHidden {
            // Outermost hide: stop reading, capture, blank.
            self.subscription = None;
            self.snapshot = Some(Snapshot::new(self.editor.buffer(), self.editor.cursor()));
            self.editor.set_prompt("");
            self.editor.set_buffer("");
            PromptError::with_write_context(self.editor.redisplay(), "blanking prompt")?;
            tracing::debug!(name = %self.name, "prompt hidden");
        }
        Ok(())
    }

    /// Resume the prompt's visual footprint.
    fn show(&mut self, callback: ReadyCallback) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        if self.visibility.show() == Transition::BecameVisible {
            // Outermost show: restore the captured state, then resume
            // reading. The initial show after install has no snapshot; the
            // editor drew the prompt itself when it attached.
            if let Some(snapshot) = self.snapshot.take() {
                let prompt = self.prompt.clone();
                self.editor.set_prompt(&prompt);
                self.editor.set_buffer(&snapshot.buffer);
                self.editor.set_cursor(snapshot.cursor);
                PromptError::with_write_context(self.editor.redisplay(), "restoring prompt")?;
            }
            if self.subscription.is_none() {
                self.subscription = Some(self.events.watch_readable(self.input_fd, callback)?);
            }
            tracing::debug!(name = %self.name, "prompt shown");
        }
        Ok(())
    }

    /// Write foreign bytes to the output handle.
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        PromptError::with_write_context(
            self.output.write_all(bytes),
            "writing asynchronous output",
        )?;
        PromptError::with_write_context(self.output.flush(), "flushing asynchronous output")
    }

    /// Run the teardown sequence once: force-hide, cancel the readiness
    /// registration, detach the editor.
    fn close(&mut self) {
        if self.closed {
            return;
        }
        // Best effort: the terminal may already be gone.
        let _ = self.hide();
        self.subscription = None;
        self.editor.detach();
        self.closed = true;
        tracing::debug!(name = %self.name, "prompt session closed");
    }
}

impl Drop for SessionState {
    fn drop(&mut self) {
        self.close();
    }
}

/// Handle to the process's interactive prompt session.
///
/// Created by [`SessionBuilder::install`](crate::SessionBuilder::install).
/// Clones share one underlying session; the free functions in
/// [`crate::global`] reach the same session through a weak registration, so
/// they never extend its lifetime.
pub struct Session {
    state: Arc<Mutex<SessionState>>,
    on_line: Arc<Mutex<LineCallback>>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").finish_non_exhaustive()
    }
}

impl Clone for Session {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            on_line: Arc::clone(&self.on_line),
        }
    }
}

impl Session {
    /// Start building a session.
    #[must_use]
    pub fn builder() -> super::SessionBuilder {
        super::SessionBuilder::new()
    }

    /// Attach the editor, perform the initial show, and optionally register
    /// the process-wide handle.
    pub(crate) fn install(
        config: PromptConfig,
        mut editor: Box<dyn LineEditor>,
        events: Arc<dyn EventSource>,
        output: Box<dyn Write + Send>,
        input_fd: RawFd,
        on_line: LineCallback,
        register_global: bool,
    ) -> Result<Self> {
        if register_global && crate::global::is_installed() {
            return Err(InitError::AlreadyInitialized.into());
        }
        editor
            .attach(&config.prompt)
            .map_err(InitError::EditorAttach)?;
        let state = SessionState {
            editor,
            output,
            events,
            input_fd,
            name: config.name,
            prompt: config.prompt,
            // Constructed hidden; the initial show below brings the counter
            // to zero and registers the readiness subscription.
            visibility: VisibilityCounter::hidden(),
            snapshot: None,
            subscription: None,
            closed: false,
        };
        let session = Self {
            state: Arc::new(Mutex::new(state)),
            on_line: Arc::new(Mutex::new(on_line)),
        };
        session.show()?;
        if register_global {
            crate::global::register(&session)?;
        }
        Ok(session)
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Suspend the prompt so foreign output can interleave cleanly.
    ///
    /// Nested hides collapse: only the outermost call blanks the display.
    ///
    /// # Errors
    ///
    /// Returns a write failure if blanking the display fails.
    pub fn hide(&self) -> Result<()> {
        self.lock_state().hide()
    }

    /// Resume the prompt, restoring the captured buffer and cursor.
    ///
    /// Extra shows beyond the matching hides are safe no-ops.
    ///
    /// # Errors
    ///
    /// Returns a write failure if restoring the display fails, or an event
    /// loop error if input readiness cannot be re-registered.
    pub fn show(&self) -> Result<()> {
        let callback = readiness_callback(Arc::downgrade(&self.state), Arc::clone(&self.on_line));
        self.lock_state().show(callback)
    }

    /// Write bytes to the terminal without disturbing the prompt:
    /// hide, write verbatim, show.
    ///
    /// The byte sequence should end with a line terminator so subsequent
    /// output and the restored prompt do not visually merge with it.
    ///
    /// # Errors
    ///
    /// Returns the first failure among hide, write, and show; the bracketing
    /// calls always both run so the nesting stays balanced.
    pub fn print(&self, bytes: impl AsRef<[u8]>) -> Result<()> {
        let hidden = self.hide();
        let written = self.lock_state().write_bytes(bytes.as_ref());
        let shown = self.show();
        hidden.and(written).and(shown)
    }

    /// Like [`print`](Self::print), appending a newline when `text` lacks
    /// one.
    ///
    /// # Errors
    ///
    /// See [`print`](Self::print).
    pub fn print_line(&self, text: &str) -> Result<()> {
        if text.ends_with('\n') {
            self.print(text)
        } else {
            self.print(format!("{text}\n"))
        }
    }

    /// Consume all currently-available input, dispatching completed lines
    /// to the line callback.
    ///
    /// Invoked by the readiness subscription; callable directly when
    /// driving the session by hand. Skipped entirely while hidden or
    /// closed.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if reading from the input handle failed; lines
    /// completed before the failure are still dispatched.
    pub fn read_input(&self) -> Result<()> {
        drain_input(&self.state, &self.on_line)
    }

    /// The currently configured prompt text.
    #[must_use]
    pub fn prompt(&self) -> String {
        self.lock_state().prompt.clone()
    }

    /// The session name.
    #[must_use]
    pub fn name(&self) -> String {
        self.lock_state().name.clone()
    }

    /// Whether the prompt is currently off-screen.
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.lock_state().visibility.is_hidden()
    }

    /// The current hide/show nesting depth.
    #[must_use]
    pub fn depth(&self) -> u32 {
        self.lock_state().visibility.depth()
    }

    /// Whether cleanup has already run.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.lock_state().closed
    }

    /// Run cleanup now instead of waiting for the last handle to drop.
    /// Idempotent; the handle stays valid but every operation becomes a
    /// no-op.
    pub fn close(&self) {
        self.lock_state().close();
    }

    /// Downgrade to a weak registration for the process-wide registry.
    pub(crate) fn downgrade(&self) -> WeakSession {
        WeakSession {
            state: Arc::downgrade(&self.state),
            on_line: Arc::downgrade(&self.on_line),
        }
    }
}

/// Weak counterpart of [`Session`] held by the global registry, so the
/// registry never keeps a session alive past its owning handles.
pub(crate) struct WeakSession {
    state: Weak<Mutex<SessionState>>,
    on_line: Weak<Mutex<LineCallback>>,
}

impl WeakSession {
    /// Upgrade to a usable handle, if any owning handle is still alive.
    pub(crate) fn upgrade(&self) -> Option<Session> {
        Some(Session {
            state: self.state.upgrade()?,
            on_line: self.on_line.upgrade()?,
        })
    }
}

/// Build the callback the event source invokes on input readiness.
///
/// Holds only weak state so the registration inside the session cannot keep
/// the session alive through its own subscription.
fn readiness_callback(
    state: Weak<Mutex<SessionState>>,
    on_line: Arc<Mutex<LineCallback>>,
) -> ReadyCallback {
    Box::new(move || {
        let Some(state) = state.upgrade() else { return };
        if let Err(e) = drain_input(&state, &on_line) {
            tracing::warn!(error = %e, "failed to read pending input");
        }
    })
}

/// Read every available input unit, then dispatch completed lines with the
/// state lock released so the callback can call hide/show/print freely.
fn drain_input(
    state: &Arc<Mutex<SessionState>>,
    on_line: &Arc<Mutex<LineCallback>>,
) -> Result<()> {
    let mut lines = Vec::new();
    let mut failure = None;
    {
        let mut guard = state.lock().unwrap_or_else(PoisonError::into_inner);
        if guard.closed || guard.visibility.is_hidden() {
            return Ok(());
        }
        loop {
            match guard.editor.read_char() {
                Ok(ReadOutcome::Line(line)) => lines.push(line),
                Ok(ReadOutcome::Consumed) => {}
                Ok(ReadOutcome::Empty) => break,
                Err(e) => {
                    failure = Some(PromptError::Io(e));
                    break;
                }
            }
        }
    }
    for line in lines {
        let mut callback = on_line.lock().unwrap_or_else(PoisonError::into_inner);
        (*callback)(line);
    }
    failure.map_or(Ok(()), Err)
}
