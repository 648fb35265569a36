//! Configuration types for promptline.
//!
//! This module defines the prompt session configuration and the places it
//! can come from: explicit builder values, `PROMPTLINE_*` environment
//! variables, and an optional TOML file. Precedence is explicit values >
//! environment > file > defaults.

use std::path::Path;

use crate::error::Result;

pub mod env;
pub mod file;

/// Default visible prompt text.
pub const DEFAULT_PROMPT: &str = "> ";

/// Fallback session name when the program name cannot be determined.
pub const DEFAULT_NAME: &str = "promptline";

/// Configuration for a prompt session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptConfig {
    /// Session name, used to identify the editor instance (defaults to the
    /// program name).
    pub name: String,

    /// The user-visible prompt text when the prompt is shown.
    pub prompt: String,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            name: program_name(),
            prompt: DEFAULT_PROMPT.to_string(),
        }
    }
}

impl PromptConfig {
    /// Create a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the session name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the prompt text.
    #[must_use]
    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Apply `PROMPTLINE_*` environment overrides on top of this
    /// configuration.
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        let reader = env::EnvConfig::default();
        if let Some(prompt) = reader.get(env::vars::PROMPT) {
            self.prompt = prompt;
        }
        if let Some(name) = reader.get(env::vars::NAME) {
            self.name = name;
        }
        self
    }

    /// Load configuration from a TOML file, applying defaults for any
    /// missing values.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let loaded = file::load(path.as_ref())?;
        Ok(loaded.apply_to(Self::default()))
    }
}

/// Determine the running program's name from `argv[0]`.
#[must_use]
pub fn program_name() -> String {
    std::env::args()
        .next()
        .as_deref()
        .map(Path::new)
        .and_then(Path::file_name)
        .and_then(|n| n.to_str())
        .map_or_else(|| DEFAULT_NAME.to_string(), ToString::to_string)
}
