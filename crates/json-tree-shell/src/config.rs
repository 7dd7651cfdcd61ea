//! Editor configuration, read from an optional TOML file.
//!
//! ```toml
//! history_limit = 200
//! search_from_root = false
//! indent = 4
//! log_level = "debug"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use json_tree::{SearchScope, SessionOptions, DEFAULT_INDENT};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("history_limit must be at least 1")]
    ZeroHistoryLimit,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Maximum undo depth. Unlimited when absent, and never 0.
    pub history_limit: Option<usize>,
    /// `find` searches the whole document unless `-here` is given.
    pub search_from_root: bool,
    /// Indentation width of the saved file.
    pub indent: usize,
    /// Log filter used when no `-v` flag is given, e.g. `"info"`.
    pub log_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            history_limit: None,
            search_from_root: true,
            indent: DEFAULT_INDENT,
            log_level: None,
        }
    }
}

impl Config {
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(text)?;
        if config.history_limit == Some(0) {
            return Err(ConfigError::ZeroHistoryLimit);
        }
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        Self::parse(&text)
    }

    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            history_limit: self.history_limit,
            search_scope: if self.search_from_root { SearchScope::Root } else { SearchScope::Current },
        }
    }
}
