//! Session builder.
//!
//! Collects the options a prompt session needs, applies configuration
//! precedence (explicit values > environment > file > defaults), fills in
//! platform defaults for the event source and the terminal handles, and
//! installs the session.

use std::io::{self, Write};
use std::os::fd::{AsRawFd, RawFd};
use std::path::PathBuf;
use std::sync::Arc;

use crossterm::tty::IsTty;

use crate::config::{PromptConfig, file};
use crate::editor::LineEditor;
use crate::error::{InitError, Result};
use crate::events::EventSource;

use super::handle::{LineCallback, Session};

/// Builder for installing a prompt session.
///
/// `on_line` and `editor` are required; everything else has a default.
pub struct SessionBuilder {
    prompt: Option<String>,
    name: Option<String>,
    config_file: Option<PathBuf>,
    editor: Option<Box<dyn LineEditor>>,
    events: Option<Arc<dyn EventSource>>,
    output: Option<Box<dyn Write + Send>>,
    input_fd: Option<RawFd>,
    on_line: Option<LineCallback>,
    register_global: bool,
}

impl SessionBuilder {
    /// Create a new builder with default options.
    #[must_use]
    pub fn new() -> Self {
        Self {
            prompt: None,
            name: None,
            config_file: None,
            editor: None,
            events: None,
            output: None,
            input_fd: None,
            on_line: None,
            register_global: true,
        }
    }

    /// Set the visible prompt text (default `"> "`).
    #[must_use]
    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    /// Set the session name (default = program name).
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Load prompt settings from a TOML configuration file. Explicit
    /// builder values and `PROMPTLINE_*` environment variables still win.
    #[must_use]
    pub fn config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    /// Apply a prepared configuration as explicit values.
    #[must_use]
    pub fn config(mut self, config: PromptConfig) -> Self {
        self.prompt = Some(config.prompt);
        self.name = Some(config.name);
        self
    }

    /// Supply the line-editing engine (required).
    #[must_use]
    pub fn editor(mut self, editor: Box<dyn LineEditor>) -> Self {
        self.editor = Some(editor);
        self
    }

    /// Supply the event source (default = the current Tokio runtime on
    /// unix).
    #[must_use]
    pub fn events(mut self, events: Arc<dyn EventSource>) -> Self {
        self.events = Some(events);
        self
    }

    /// Supply the output writer (default = stdout).
    #[must_use]
    pub fn output(mut self, output: Box<dyn Write + Send>) -> Self {
        self.output = Some(output);
        self
    }

    /// Supply the input descriptor to watch for readiness (default =
    /// stdin, which must then be a terminal).
    #[must_use]
    pub const fn input_fd(mut self, fd: RawFd) -> Self {
        self.input_fd = Some(fd);
        self
    }

    /// Set the line-completion callback (required).
    #[must_use]
    pub fn on_line(mut self, callback: impl FnMut(String) + Send + 'static) -> Self {
        self.on_line = Some(Box::new(callback));
        self
    }

    /// Skip the process-wide registration, leaving the free
    /// `hide`/`show`/`print` functions unaware of this session. Intended
    /// for embedding and tests; the default is to register.
    #[must_use]
    pub const fn register_global(mut self, register: bool) -> Self {
        self.register_global = register;
        self
    }

    /// Install the session: resolve configuration, attach the editor,
    /// perform the initial show, and register the process-wide handle.
    ///
    /// # Errors
    ///
    /// Returns an initialization error when a required option is missing,
    /// the input is not a terminal, the editor fails to attach, no event
    /// source is available, or a session is already installed.
    pub fn install(self) -> Result<Session> {
        let on_line = self.on_line.ok_or(InitError::MissingLineCallback)?;
        let editor = self.editor.ok_or(InitError::MissingEditor)?;

        let mut config = PromptConfig::default();
        if let Some(path) = &self.config_file {
            config = file::load(path)?.apply_to(config);
        }
        config = config.with_env_overrides();
        if let Some(prompt) = self.prompt {
            config.prompt = prompt;
        }
        if let Some(name) = self.name {
            config.name = name;
        }

        let events = match self.events {
            Some(events) => events,
            None => default_event_source()?,
        };

        let input_fd = match self.input_fd {
            Some(fd) => fd,
            None => {
                let stdin = io::stdin();
                if !stdin.is_tty() {
                    return Err(InitError::NotATerminal.into());
                }
                stdin.as_raw_fd()
            }
        };

        let output = self
            .output
            .unwrap_or_else(|| Box::new(io::stdout()) as Box<dyn Write + Send>);

        Session::install(
            config,
            editor,
            events,
            output,
            input_fd,
            on_line,
            self.register_global,
        )
    }
}

impl Default for SessionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn default_event_source() -> std::result::Result<Arc<dyn EventSource>, InitError> {
    crate::events::TokioEvents::current().map(|events| Arc::new(events) as Arc<dyn EventSource>)
}
