//! Environment-based configuration.

/// Environment configuration prefix.
pub const DEFAULT_PREFIX: &str = "PROMPTLINE";

/// Environment variable reader.
#[derive(Debug, Clone)]
pub struct EnvConfig {
    /// Prefix for environment variables.
    prefix: String,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX)
    }
}

impl EnvConfig {
    /// Create a new environment config reader.
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Build the full environment variable name.
    fn var_name(&self, name: &str) -> String {
        format!("{}_{}", self.prefix, name.to_uppercase())
    }

    /// Get a string value.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<String> {
        std::env::var(self.var_name(name)).ok()
    }

    /// Set a value (for testing).
    pub fn set(&self, name: &str, value: impl Into<String>) {
        // SAFETY: test-only helper; tests that use it do not run concurrently
        // with other environment access in this crate.
        unsafe { std::env::set_var(self.var_name(name), value.into()) };
    }

    /// Unset a value (for testing).
    pub fn unset(&self, name: &str) {
        // SAFETY: see `set`.
        unsafe { std::env::remove_var(self.var_name(name)) };
    }
}

/// Recognized environment variables.
pub mod vars {
    /// Prompt text override.
    pub const PROMPT: &str = "PROMPT";
    /// Session name override.
    pub const NAME: &str = "NAME";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_config_prefix() {
        let config = EnvConfig::new("TESTPL");
        assert_eq!(config.var_name("prompt"), "TESTPL_PROMPT");
        assert_eq!(config.var_name("some_name"), "TESTPL_SOME_NAME");
    }

    #[test]
    fn env_roundtrip() {
        let config = EnvConfig::new("TESTPL_RT");
        config.set("PROMPT", "$ ");
        assert_eq!(config.get("PROMPT").as_deref(), Some("$ "));
        assert_eq!(config.get("MISSING"), None);
        config.unset("PROMPT");
        assert_eq!(config.get("PROMPT"), None);
    }
}
