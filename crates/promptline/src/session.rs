//! Session module for the interactive prompt.
//!
//! This module provides the session handle and its builder. The
//! [`Session`] type is the main entry point:
//!
//! - Install with [`Session::builder`]
//! - Suspend/resume with [`Session::hide`] / [`Session::show`]
//! - Interleave output with [`Session::print`] / [`Session::print_line`]
//! - Tear down with [`Session::close`] (or just drop the last handle)
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
//!         .on_line(|line| println!("got: {line}"))
//!         .install()?;
//!
//!     // Any task may now interleave output safely:
//!     session.print_line("build finished")?;
//!     Ok(())
//! }
//! ```

mod builder;
mod handle;

pub use builder::SessionBuilder;
pub use handle::{LineCallback, Session};

pub(crate) use handle::WeakSession;
