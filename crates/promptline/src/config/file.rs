//! File-based configuration loading.

use std::path::Path;

use serde::Deserialize;

use crate::error::{PromptError, Result};

use super::PromptConfig;

/// Values parsed from a configuration file. Every field is optional; absent
/// fields fall back to whatever configuration they are applied on top of.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// The `[prompt]` table.
    #[serde(default)]
    pub prompt: PromptTable,
}

/// The `[prompt]` table of a configuration file.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PromptTable {
    /// Prompt text.
    pub prompt: Option<String>,
    /// Session name.
    pub name: Option<String>,
}

impl FileConfig {
    /// Parse a TOML document.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the document is not valid TOML or
    /// contains unknown fields.
    pub fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents)
            .map_err(|e| PromptError::config(format!("invalid config file: {e}")))
    }

    /// Overlay these values on top of an existing configuration.
    #[must_use]
    pub fn apply_to(self, mut config: PromptConfig) -> PromptConfig {
        if let Some(prompt) = self.prompt.prompt {
            config.prompt = prompt;
        }
        if let Some(name) = self.prompt.name {
            config.name = name;
        }
        config
    }
}

/// Load and parse a configuration file.
///
/// # Errors
///
/// Returns a configuration error if the file cannot be read or parsed.
pub fn load(path: &Path) -> Result<FileConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| PromptError::config(format!("cannot read {}: {e}", path.display())))?;
    FileConfig::parse(&contents)
}
