//! A scripted session over the deterministic fakes.
//!
//! Run with:
//!
//! ```text
//! cargo run --example scripted --features test-utils
//! ```
//!
//! The "user" types half a command, a background tick interrupts, the user
//! finishes the line. The printed transcript shows the prompt blanked for
//! the tick and repainted with the half-typed input intact.

use std::sync::Arc;

use promptline::test_utils::{CaptureOutput, FakeEditor, FakeEvents};
use promptline::Session;

const INPUT_FD: std::os::fd::RawFd = 0;

fn main() -> promptline::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let output = CaptureOutput::new();
    let editor = FakeEditor::with_output(output.clone());
    let events = FakeEvents::new();

    let session = Session::builder()
        .prompt("> ")
        .name("scripted")
        .editor(Box::new(editor.clone()))
        .events(Arc::new(events.clone()))
        .output(Box::new(output.clone()))
        .input_fd(INPUT_FD)
        .on_line(|line| {
            let _ = promptline::print_line(&format!("you said: {line}"));
        })
        .install()?;

    // The user types half a command.
    editor.queue_input("status --a");
    events.fire(INPUT_FD);

    // A background task interrupts with a tick.
    session.print("[worker] heartbeat ok\n")?;

    // The user finishes the line.
    editor.queue_input("ll\n");
    events.fire(INPUT_FD);

    session.close();

    println!("--- terminal transcript ---");
    println!("{}", output.contents_str().replace('\r', "\\r\n"));
    Ok(())
}
