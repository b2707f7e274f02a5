//! GitHub access for the catalog builder.
//!
//! Two hosts are involved: the contents API (listings, authenticated when a
//! token is configured) and the raw content host (file downloads, never
//! authenticated).

use crate::BuilderConfig;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Failure to list a repository directory. Fatal for that source.
#[derive(Debug, Error)]
pub enum ListingError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("GitHub API error {status}: {url}")]
    Status { status: u16, url: String },
    #[error("invalid listing from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Failure to download one descriptor. The item is skipped.
#[derive(Debug, Error)]
pub enum DescriptorFetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("HTTP {status} fetching {url}")]
    Status { status: u16, url: String },
}

/// One entry of a contents API listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ContentEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    /// API URL listing this entry's own contents.
    #[serde(default)]
    pub url: String,
    /// Raw download URL; absent for directories.
    #[serde(default)]
    pub download_url: Option<String>,
}

impl ContentEntry {
    pub fn is_dir(&self) -> bool {
        self.kind == "dir"
    }
}

/// HTTP client for the contents API and raw host.
#[derive(Debug)]
pub struct GithubClient {
    api_base: String,
    raw_base: String,
    user_agent: String,
    token: Option<String>,
    http: reqwest::Client,
}

impl GithubClient {
    pub fn new(config: &BuilderConfig) -> Self {
        Self {
            api_base: config.api_base.trim_end_matches('/').to_string(),
            raw_base: config.raw_base.trim_end_matches('/').to_string(),
            user_agent: config.user_agent.clone(),
            token: config.token.clone().filter(|t| !t.is_empty()),
            http: reqwest::Client::new(),
        }
    }

    /// `GET {api_base}/repos/{owner}/{repo}/contents[/{path}]`.
    pub fn contents_url(&self, owner: &str, repo: &str, path: Option<&str>) -> String {
        let base = format!(
            "{}/repos/{}/{}/contents",
            self.api_base,
            urlencoding::encode(owner),
            urlencoding::encode(repo)
        );
        match path {
            Some(path) if !path.is_empty() => format!("{base}/{}", encode_path(path)),
            _ => base,
        }
    }

    /// Raw URL of a file at `branch` in `owner/repo`.
    pub fn raw_url(&self, owner: &str, repo: &str, branch: &str, path: &str) -> String {
        format!(
            "{}/{}/{}/{}/{}",
            self.raw_base,
            urlencoding::encode(owner),
            urlencoding::encode(repo),
            urlencoding::encode(branch),
            encode_path(path)
        )
    }

    /// Headers for the contents API, with the credential if one is set.
    fn api_headers(&self) -> HeaderMap {
        let mut headers = self.raw_headers();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        if let Some(token) = &self.token {
            if let Ok(value) = HeaderValue::from_str(&format!("token {token}")) {
                headers.insert(AUTHORIZATION, value);
            }
        }
        headers
    }

    fn raw_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Ok(value) = HeaderValue::from_str(&self.user_agent) {
            headers.insert(USER_AGENT, value);
        }
        headers
    }

    /// List a directory through the contents API.
    pub async fn list_contents(&self, url: &str) -> Result<Vec<ContentEntry>, ListingError> {
        let response = self.http.get(url).headers(self.api_headers()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ListingError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        response
            .json::<Vec<ContentEntry>>()
            .await
            .map_err(|source| ListingError::Decode {
                url: url.to_string(),
                source,
            })
    }

    /// Download a file from the raw host. A 404 is `Ok(None)`.
    pub async fn fetch_raw(&self, url: &str) -> Result<Option<String>, DescriptorFetchError> {
        let response = self.http.get(url).headers(self.raw_headers()).send().await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(DescriptorFetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(Some(response.text().await?))
    }
}

/// Percent-encode each segment of a slash-separated path.
pub(crate) fn encode_path(path: &str) -> String {
    path.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}
