//! Engine configuration file parsing.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Tunables of the interception engine.
///
/// Expected format:
/// ```toml
/// max_search_nodes = 50000
/// retry_failed_location = true
/// wrapper_name_prefix = "Hooked"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HookConfig {
    /// Upper bound on the nodes a single location search may expand. `None` searches the
    /// whole reachable graph.
    pub max_search_nodes: Option<usize>,

    /// Search again, on next use, for targets that could not be located when their binding
    /// was created.
    pub retry_failed_location: bool,

    /// Wrappers are named `<prefix>(<original name>)`.
    pub wrapper_name_prefix: String,
}

impl HookConfig {
    pub fn new() -> Self {
        HookConfig {
            max_search_nodes: None,
            retry_failed_location: true,
            wrapper_name_prefix: "Hooked".to_string(),
        }
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(&content)
    }

    /// Parse configuration from a TOML string. Missing keys keep their defaults.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn with_max_search_nodes(mut self, max: usize) -> Self {
        self.max_search_nodes = Some(max);
        self
    }

    pub fn with_retry_failed_location(mut self, retry: bool) -> Self {
        self.retry_failed_location = retry;
        self
    }

    pub(crate) fn wrapper_name(&self, original_name: &str) -> String {
        let name = if original_name.is_empty() {
            "anonymous"
        } else {
            original_name
        };
        format!("{}({})", self.wrapper_name_prefix, name)
    }
}

impl Default for HookConfig {
    fn default() -> Self {
        Self::new()
    }
}
