//! Catalog access for skillsctl.
//!
//! Loads the catalog from a local file or an HTTP(S) URL and fetches skill
//! bodies that were not embedded in the catalog.

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::StatusCode;
use skills_core::{Catalog, ConfigError, LoadError, SkillRecord};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, warn};

/// Placeholder shown when a skill body cannot be fetched.
pub const BODY_UNAVAILABLE: &str = "Failed to load skill content.";

#[derive(Debug, Error)]
pub enum CtlError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("skill not found: {0}")]
    SkillNotFound(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Where the catalog document lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogLocation {
    Path(PathBuf),
    Url(String),
}

impl CatalogLocation {
    /// `http://` and `https://` values are URLs; anything else is a path.
    pub fn parse(value: &str) -> Self {
        let lower = value.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Self::Url(value.to_string())
        } else {
            Self::Path(PathBuf::from(value))
        }
    }
}

/// HTTP client for remote catalogs and skill bodies.
#[derive(Debug)]
pub struct Client {
    user_agent: String,
    http: reqwest::Client,
}

impl Client {
    pub fn new(user_agent: &str) -> Self {
        Self {
            user_agent: user_agent.to_string(),
            http: reqwest::Client::new(),
        }
    }

    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Ok(value) = HeaderValue::from_str(&self.user_agent) {
            headers.insert(USER_AGENT, value);
        }
        headers
    }

    /// Load and validate the catalog.
    pub async fn load_catalog(&self, location: &CatalogLocation) -> Result<Catalog, LoadError> {
        match location {
            CatalogLocation::Path(path) => Catalog::load(path),
            CatalogLocation::Url(url) => {
                let content = self.fetch_catalog(url).await?;
                Catalog::from_json(&content)
            }
        }
    }

    async fn fetch_catalog(&self, url: &str) -> Result<String, LoadError> {
        let fetch_err = |message: String| LoadError::Fetch {
            url: url.to_string(),
            message,
        };

        let response = self
            .http
            .get(url)
            .headers(self.headers())
            .send()
            .await
            .map_err(|e| fetch_err(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(LoadError::NotFound(url.to_string()));
        }
        if !status.is_success() {
            return Err(fetch_err(format!("HTTP {}", status.as_u16())));
        }

        response.text().await.map_err(|e| fetch_err(e.to_string()))
    }

    /// Body text for a skill, fetching it when the catalog omitted it.
    ///
    /// Never fails: an unreachable body yields [`BODY_UNAVAILABLE`].
    pub async fn resolve_skill_body(&self, skill: &SkillRecord) -> String {
        if !skill.body.is_empty() {
            return skill.body.clone();
        }

        debug!(id = %skill.id, url = %skill.skill_md_url, "fetching skill body");
        let response = match self
            .http
            .get(&skill.skill_md_url)
            .headers(self.headers())
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!(id = %skill.id, error = %e, "failed to fetch skill body");
                return BODY_UNAVAILABLE.to_string();
            }
        };

        if !response.status().is_success() {
            warn!(
                id = %skill.id,
                status = response.status().as_u16(),
                "failed to fetch skill body"
            );
            return BODY_UNAVAILABLE.to_string();
        }

        match response.text().await {
            Ok(text) => text,
            Err(e) => {
                warn!(id = %skill.id, error = %e, "failed to read skill body");
                BODY_UNAVAILABLE.to_string()
            }
        }
    }
}
