//! Error types for promptline.
//!
//! This module defines all error types used throughout the library.
//! Initialization failures are fatal to the feature and carry enough context
//! for the caller to decide whether to abort; runtime conditions that the
//! suspend/resume protocol defines as harmless (use before init, imbalanced
//! show) are deliberately *not* errors and never appear here.

use std::io;

use thiserror::Error;

/// The main error type for promptline operations.
#[derive(Debug, Error)]
pub enum PromptError {
    /// Failed to initialize the prompt session.
    #[error("failed to initialize prompt session: {0}")]
    Init(#[from] InitError),

    /// A write to the output handle failed.
    ///
    /// This usually means the terminal is gone (closed pipe), at which point
    /// further interactive operation is meaningless.
    #[error("{context}: {source}")]
    Write {
        /// What operation was being performed.
        context: String,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The event loop could not service a readiness registration.
    #[error("event loop error: {message}")]
    EventLoop {
        /// Description of the event loop failure.
        message: String,
    },

    /// Configuration error.
    #[error("configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },
}

/// Errors related to session initialization.
#[derive(Debug, Error)]
pub enum InitError {
    /// A prompt session is already installed for this process.
    #[error("a prompt session is already installed for this process")]
    AlreadyInitialized,

    /// No line-completion callback was supplied.
    #[error("a line-completion callback is required")]
    MissingLineCallback,

    /// No line editor was supplied.
    #[error("a line editor is required")]
    MissingEditor,

    /// The input handle is not a terminal.
    #[error("input is not a terminal")]
    NotATerminal,

    /// The line editor failed to attach to the terminal.
    #[error("failed to attach line editor: {0}")]
    EditorAttach(#[source] io::Error),

    /// No event loop is available to watch input readiness.
    #[error("no event loop available: {reason}")]
    EventLoop {
        /// Why an event loop could not be obtained.
        reason: String,
    },
}

/// Result type alias for promptline operations.
pub type Result<T> = std::result::Result<T, PromptError>;

impl PromptError {
    /// Create a write failure with the given operation context.
    pub fn write(context: impl Into<String>, source: io::Error) -> Self {
        Self::Write {
            context: context.into(),
            source,
        }
    }

    /// Wrap an I/O result, attaching an operation context to any failure.
    pub fn with_write_context<T>(result: io::Result<T>, context: impl Into<String>) -> Result<T> {
        result.map_err(|e| Self::write(context, e))
    }

    /// Create an event loop error.
    pub fn event_loop(message: impl Into<String>) -> Self {
        Self::EventLoop {
            message: message.into(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Check if this is an initialization error.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self, Self::Init(_))
    }

    /// Check if this is a write failure.
    #[must_use]
    pub const fn is_write(&self) -> bool {
        matches!(self, Self::Write { .. })
    }
}

impl InitError {
    /// Create an editor attach error.
    #[must_use]
    pub const fn editor_attach(source: io::Error) -> Self {
        Self::EditorAttach(source)
    }

    /// Create an event loop availability error.
    pub fn event_loop(reason: impl Into<String>) -> Self {
        Self::EventLoop {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_error_display() {
        let err = PromptError::write(
            "writing asynchronous output",
            io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"),
        );
        let msg = err.to_string();
        assert!(msg.contains("writing asynchronous output"));
        assert!(msg.contains("pipe closed"));
        assert!(err.is_write());
    }

    #[test]
    fn with_write_context_failure() {
        let result: io::Result<()> = Err(io::Error::new(
            io::ErrorKind::BrokenPipe,
            "terminal went away",
        ));
        let err = PromptError::with_write_context(result, "flushing output").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("flushing output"));
        assert!(msg.contains("terminal went away"));
    }

    #[test]
    fn with_write_context_success() {
        let result: io::Result<i32> = Ok(7);
        let value = PromptError::with_write_context(result, "some operation").unwrap();
        assert_eq!(value, 7);
    }

    #[test]
    fn init_error_display() {
        let err = PromptError::from(InitError::AlreadyInitialized);
        assert!(err.is_init());
        assert!(err.to_string().contains("already installed"));

        let err = PromptError::from(InitError::NotATerminal);
        assert!(err.to_string().contains("not a terminal"));
    }

    #[test]
    fn editor_attach_preserves_source() {
        let err = InitError::editor_attach(io::Error::other("no tty"));
        assert!(err.to_string().contains("failed to attach line editor"));
        assert!(err.to_string().contains("no tty"));
    }

    #[test]
    fn event_loop_error_display() {
        let err = PromptError::event_loop("watcher task died");
        assert!(err.to_string().contains("watcher task died"));

        let init = InitError::event_loop("no tokio runtime");
        assert!(init.to_string().contains("no tokio runtime"));
    }

    #[test]
    fn config_error_display() {
        let err = PromptError::config("bad prompt file");
        assert!(err.to_string().contains("bad prompt file"));
    }
}
