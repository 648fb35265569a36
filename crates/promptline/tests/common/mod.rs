//! Shared fixture for integration tests.

// Not every test binary uses every helper.
#![allow(dead_code)]

use std::os::fd::RawFd;
use std::sync::{Arc, Mutex};

use promptline::test_utils::{CaptureOutput, FakeEditor, FakeEvents};
use promptline::Session;

/// Descriptor the fixture watches; FakeEvents treats it as an opaque token.
pub const INPUT_FD: RawFd = 33;

/// A fully wired session over deterministic fakes.
pub struct Fixture {
    pub session: Session,
    pub editor: FakeEditor,
    pub events: FakeEvents,
    pub output: CaptureOutput,
    pub lines: Arc<Mutex<Vec<String>>>,
}

impl Fixture {
    /// Install a session with the default `"> "` prompt.
    pub fn install() -> Self {
        Self::with_prompt("> ")
    }

    /// Install a session with the given prompt. The editor renders its
    /// redisplays into the same sink the session writes to, so
    /// `output.contents_str()` is a complete terminal transcript.
    pub fn with_prompt(prompt: &str) -> Self {
        let output = CaptureOutput::new();
        let editor = FakeEditor::with_output(output.clone());
        let events = FakeEvents::new();
        let lines = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&lines);
        let session = Session::builder()
            .prompt(prompt)
            .name("fixture")
            .editor(Box::new(editor.clone()))
            .events(Arc::new(events.clone()))
            .output(Box::new(output.clone()))
            .input_fd(INPUT_FD)
            .on_line(move |line| sink.lock().unwrap().push(line))
            .register_global(false)
            .install()
            .expect("fixture session installs");
        Self {
            session,
            editor,
            events,
            output,
            lines,
        }
    }

    /// Simulate the user typing `input` while readiness is delivered.
    pub fn type_input(&self, input: &str) {
        self.editor.queue_input(input);
        self.events.fire(INPUT_FD);
    }

    /// Lines the `on_line` callback received so far.
    pub fn completed_lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }
}
