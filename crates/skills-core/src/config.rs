//! Configuration parsing for the catalog builder and consumer.
//!
//! Uses a key=value format with `#` comments and optional quotes.
//! Precedence: CLI flags > `--config` file > `.skills/config` > defaults.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Workspace-relative location of the implicit config file.
pub const DEFAULT_CONFIG_FILE: &str = ".skills/config";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("invalid config line: {0}")]
    InvalidLine(String),
    #[error("unknown config key: {0}")]
    UnknownKey(String),
}

/// Shared settings for building and reading the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Where the builder writes and the consumer reads the catalog.
    pub catalog_path: PathBuf,
    /// Remote catalog URL; when set, the consumer reads from it instead.
    pub catalog_url: Option<String>,

    // GitHub endpoints
    pub api_base: String,
    pub raw_base: String,
    pub web_base: String,

    pub branch: String,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from("public/skills-data.json"),
            catalog_url: None,
            api_base: "https://api.github.com".to_string(),
            raw_base: "https://raw.githubusercontent.com".to_string(),
            web_base: "https://github.com".to_string(),
            branch: "main".to_string(),
            user_agent: "agent-skills-browser".to_string(),
        }
    }
}

impl Config {
    /// Defaults, overlaid with the nearest `.skills/config` at or above
    /// `start`, then with `explicit` if given.
    ///
    /// A relative `catalog_path` is resolved against the workspace root:
    /// the directory holding `.skills/config`, or `start` when none exists.
    pub fn discover(start: &Path, explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let workspace_root = find_workspace_root(start);
        let implicit = workspace_root.join(DEFAULT_CONFIG_FILE);
        if implicit.is_file() {
            config.load_file(&implicit)?;
        }
        if let Some(path) = explicit {
            config.load_file(path)?;
        }
        config.resolve_paths(&workspace_root);
        Ok(config)
    }

    /// Load and merge values from a config file.
    pub fn load_file(&mut self, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path)?;
        self.parse_content(&content)
    }

    /// Parse config content (key=value format).
    pub fn parse_content(&mut self, content: &str) -> Result<(), ConfigError> {
        for line in content.lines() {
            let trimmed = line.trim();

            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let Some((key, value)) = trimmed.split_once('=') else {
                return Err(ConfigError::InvalidLine(line.to_string()));
            };

            let key = key.trim();
            let value = Self::unquote(value.trim());

            self.apply_value(key, &value)?;
        }
        Ok(())
    }

    /// Remove surrounding quotes from a value.
    fn unquote(value: &str) -> String {
        if value.len() >= 2
            && ((value.starts_with('"') && value.ends_with('"'))
                || (value.starts_with('\'') && value.ends_with('\'')))
        {
            return value[1..value.len() - 1].to_string();
        }
        value.to_string()
    }

    fn apply_value(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "catalog_path" => self.catalog_path = PathBuf::from(value),
            "catalog_url" => {
                self.catalog_url = if value.is_empty() {
                    None
                } else {
                    Some(value.to_string())
                }
            }
            "api_base" => self.api_base = value.trim_end_matches('/').to_string(),
            "raw_base" => self.raw_base = value.trim_end_matches('/').to_string(),
            "web_base" => self.web_base = value.trim_end_matches('/').to_string(),
            "branch" => self.branch = value.to_string(),
            "user_agent" => self.user_agent = value.to_string(),
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }

    /// Resolve a relative catalog path against a workspace root.
    fn resolve_paths(&mut self, workspace_root: &Path) {
        if self.catalog_path.is_relative() {
            self.catalog_path = workspace_root.join(&self.catalog_path);
        }
    }
}

/// Nearest ancestor of `start` (inclusive) holding `.skills/config`.
pub fn find_workspace_root(start: &Path) -> PathBuf {
    start
        .ancestors()
        .find(|dir| dir.join(DEFAULT_CONFIG_FILE).is_file())
        .unwrap_or(start)
        .to_path_buf()
}
