//! Convenience re-exports for common usage.
//!
//! ```ignore
//! use promptline::prelude::*;
//! ```

pub use crate::config::PromptConfig;
pub use crate::editor::{LineEditor, ReadOutcome};
pub use crate::error::{InitError, PromptError, Result};
pub use crate::events::{EventSource, Subscription, TokioEvents};
pub use crate::session::{Session, SessionBuilder};
