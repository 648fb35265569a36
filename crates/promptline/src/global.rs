//! Process-wide access to the installed session.
//!
//! The suspend/resume API must be callable from shared code paths that
//! cannot know whether (or when) the prompt was initialized. The free
//! functions here are therefore total: before `install`, after the session
//! drops, or after `close`, `hide` and `show` are no-ops and `print` falls
//! back to standard output.
//!
//! The registry holds only a weak handle, so it never extends the session's
//! lifetime: cleanup still runs the moment the last owning handle drops.

use std::io::Write;
use std::sync::{Mutex, PoisonError};

use crate::error::{InitError, PromptError, Result};
use crate::session::{Session, WeakSession};

static REGISTRY: Mutex<Option<WeakSession>> = Mutex::new(None);

/// Look up the installed session, if one is alive and not closed.
#[must_use]
pub fn current() -> Option<Session> {
    let slot = REGISTRY.lock().unwrap_or_else(PoisonError::into_inner);
    slot.as_ref()
        .and_then(WeakSession::upgrade)
        .filter(|session| !session.is_closed())
}

/// Whether a live, unclosed session is currently registered.
pub(crate) fn is_installed() -> bool {
    current().is_some()
}

/// Register a session as the process-wide singleton.
pub(crate) fn register(session: &Session) -> std::result::Result<(), InitError> {
    let mut slot = REGISTRY.lock().unwrap_or_else(PoisonError::into_inner);
    if slot
        .as_ref()
        .and_then(WeakSession::upgrade)
        .is_some_and(|existing| !existing.is_closed())
    {
        return Err(InitError::AlreadyInitialized);
    }
    *slot = Some(session.downgrade());
    Ok(())
}

/// Suspend the installed prompt. Safe no-op when no session exists.
///
/// # Errors
///
/// Returns a write failure if blanking the display fails.
pub fn hide() -> Result<()> {
    current().map_or(Ok(()), |session| session.hide())
}

/// Resume the installed prompt. Safe no-op when no session exists or the
/// prompt is already visible.
///
/// # Errors
///
/// Returns a write failure if restoring the display fails, or an event loop
/// error if input readiness cannot be re-registered.
pub fn show() -> Result<()> {
    current().map_or(Ok(()), |session| session.show())
}

/// Write bytes to the terminal without disturbing the prompt.
///
/// Works before the session exists: the bytes go verbatim to standard
/// output with no hide/show effect.
///
/// # Errors
///
/// Returns a write failure if the output handle rejects the bytes.
pub fn print(bytes: impl AsRef<[u8]>) -> Result<()> {
    current().map_or_else(
        || {
            let mut stdout = std::io::stdout().lock();
            PromptError::with_write_context(
                stdout.write_all(bytes.as_ref()),
                "writing to standard output",
            )?;
            PromptError::with_write_context(stdout.flush(), "flushing standard output")
        },
        |session| session.print(bytes.as_ref()),
    )
}

/// Like [`print`], appending a newline when `text` lacks one.
///
/// # Errors
///
/// See [`print`].
pub fn print_line(text: &str) -> Result<()> {
    if text.ends_with('\n') {
        print(text)
    } else {
        print(format!("{text}\n"))
    }
}
