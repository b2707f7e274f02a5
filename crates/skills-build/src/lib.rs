//! skills-build: assembles the skills catalog from GitHub repositories.

pub mod builder;
pub mod github;

pub use builder::{BuildResult, Builder, SourceError};
pub use github::{ContentEntry, DescriptorFetchError, GithubClient, ListingError};

use skills_core::Config;

/// Settings the builder needs from configuration and the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuilderConfig {
    pub api_base: String,
    pub raw_base: String,
    pub web_base: String,
    pub branch: String,
    pub user_agent: String,
    /// GitHub credential; sent to the contents API only.
    pub token: Option<String>,
}

impl BuilderConfig {
    pub fn from_config(config: &Config, token: Option<String>) -> Self {
        Self {
            api_base: config.api_base.clone(),
            raw_base: config.raw_base.clone(),
            web_base: config.web_base.trim_end_matches('/').to_string(),
            branch: config.branch.clone(),
            user_agent: config.user_agent.clone(),
            token: token.filter(|t| !t.is_empty()),
        }
    }
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self::from_config(&Config::default(), None)
    }
}
