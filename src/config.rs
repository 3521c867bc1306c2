//! Global configuration parsing and validation.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::{AppError, Result};

fn default_search_command() -> String {
    "gemini".into()
}

fn default_search_args() -> Vec<String> {
    vec!["-p".into()]
}

fn default_cache_ttl_seconds() -> u64 {
    3600
}

fn default_max_history() -> usize {
    100
}

fn default_max_query_length() -> usize {
    500
}

fn default_history_resource_limit() -> usize {
    20
}

/// Global configuration parsed from `config.toml`.
///
/// Every field has a default, so an empty document is a valid configuration.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct GlobalConfig {
    /// External search program, resolved on `PATH`.
    #[serde(default = "default_search_command")]
    pub search_command: String,
    /// Arguments placed before the constructed prompt argument.
    #[serde(default = "default_search_args")]
    pub search_args: Vec<String>,
    /// Optional model name passed as `-m <model>`.
    #[serde(default)]
    pub model: Option<String>,
    /// Invocation timeout; 0 means no timeout.
    #[serde(default)]
    pub timeout_seconds: u64,
    /// Lifetime of a cached search result.
    #[serde(default = "default_cache_ttl_seconds")]
    pub cache_ttl_seconds: u64,
    /// Maximum number of retained history records.
    #[serde(default = "default_max_history")]
    pub max_history: usize,
    /// Maximum accepted query length in characters.
    #[serde(default = "default_max_query_length")]
    pub max_query_length: usize,
    /// Number of records exposed by the history resource.
    #[serde(default = "default_history_resource_limit")]
    pub history_resource_limit: usize,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            search_command: default_search_command(),
            search_args: default_search_args(),
            model: None,
            timeout_seconds: 0,
            cache_ttl_seconds: default_cache_ttl_seconds(),
            max_history: default_max_history(),
            max_query_length: default_max_query_length(),
            history_resource_limit: default_history_resource_limit(),
        }
    }
}

impl GlobalConfig {
    /// Load and validate configuration from a TOML file path.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the file cannot be read or contains
    /// invalid TOML, or if validation fails.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .map_err(|err| AppError::Config(format!("failed to read config: {err}")))?;
        Self::from_toml_str(&raw)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if parsing or validation fails.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Cache time-to-live as a [`Duration`].
    #[must_use]
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_seconds)
    }

    /// Invocation timeout, or `None` when invocations may block indefinitely.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_seconds > 0).then(|| Duration::from_secs(self.timeout_seconds))
    }

    /// Check field invariants after parsing or CLI overrides.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` naming the first invalid field.
    pub fn validate(&self) -> Result<()> {
        if self.search_command.trim().is_empty() {
            return Err(AppError::Config("search_command must not be empty".into()));
        }

        if self.cache_ttl_seconds == 0 {
            return Err(AppError::Config(
                "cache_ttl_seconds must be greater than zero".into(),
            ));
        }

        if self.max_history == 0 {
            return Err(AppError::Config(
                "max_history must be greater than zero".into(),
            ));
        }

        if self.max_query_length == 0 {
            return Err(AppError::Config(
                "max_query_length must be greater than zero".into(),
            ));
        }

        if self.model.as_deref().is_some_and(|m| m.trim().is_empty()) {
            return Err(AppError::Config("model must not be empty when set".into()));
        }

        Ok(())
    }
}
