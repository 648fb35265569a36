//! promptline: asynchronous output alongside an interactive prompt.
//!
//! A program that runs a line-editing prompt on a terminal often also needs
//! to emit unsolicited output to the same terminal: log lines, timer
//! ticks, results from background tasks. Written naively, that output lands
//! in the middle of the prompt and the user's in-progress input. This crate
//! arbitrates the display: a reference-counted hide/show protocol removes
//! the prompt's visual footprint, lets foreign output interleave cleanly,
//! then restores the prompt, the buffered text, and the cursor exactly as
//! they were and resumes reading keystrokes.
//!
//! # Features
//!
//! - **Nested suspend/resume**: hide/show pairs from overlapping call
//!   sites collapse to one capture and one restore at the outermost pair
//! - **`print` convenience** that brackets a verbatim write with hide/show
//! - **Safe before init**: every operation is callable unconditionally;
//!   `print` falls back to stdout, the rest are no-ops
//! - **Pluggable boundaries**: the line editor and the event loop are
//!   traits ([`LineEditor`], [`EventSource`]); a Tokio readiness adapter is
//!   included, and deterministic fakes ship behind the `test-utils` feature
//! - **Guaranteed cleanup**: dropping the last session handle restores the
//!   terminal's line discipline exactly once, on normal exit and unwind
//!   paths alike
//!
//! # Example
//!
//! ```ignore
//! use promptline::Session;
//!
//! #[tokio::main]
//! async fn main() -> promptline::Result<()> {
//!     let session = Session::builder()
//!         .prompt("> ")
//!         .editor(my_editor())
//!         .on_line(|line| {
//!             let _ = promptline::print_line(&format!("you said: {line}"));
//!         })
//!         .install()?;
//!
//!     // Any background task can now print without corrupting the prompt:
//!     tokio::spawn(async {
//!         let _ = promptline::print_line("tick");
//!     });
//!     # drop(session);
//!     Ok(())
//! }
//! ```

#[cfg(not(unix))]
compile_error!("promptline watches raw file descriptors and requires a Unix platform");

// Core types
pub mod config;
pub mod error;
pub mod prelude;

// Boundary traits
pub mod editor;
pub mod events;

// Core modules
pub mod global;
pub mod session;
pub mod visibility;

// Re-export commonly used items
pub use config::{DEFAULT_PROMPT, PromptConfig};
pub use editor::{LineEditor, ReadOutcome};
pub use error::{InitError, PromptError, Result};
pub use events::{EventSource, ReadyCallback, Subscription, TokioEvents};
pub use global::{current, hide, print, print_line, show};
pub use session::{LineCallback, Session, SessionBuilder};
pub use visibility::{Snapshot, Transition, VisibilityCounter};

// Test utilities
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

#[cfg(any(test, feature = "test-utils"))]
pub use test_utils::{CaptureOutput, FakeEditor, FakeEvents, Frame};
