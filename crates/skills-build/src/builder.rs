//! Catalog assembly: per-source fetch pipelines and the final build.
//!
//! Sources are fetched strictly one after another. A failure for one skill
//! never aborts the build; a failed listing drops only that source.

use crate::github::{encode_path, ContentEntry, DescriptorFetchError, GithubClient, ListingError};
use crate::BuilderConfig;
use chrono::Utc;
use skills_core::catalog::dedup_by_id;
use skills_core::markdown::{
    extract_summary, extract_title, pick_descriptor, truncate_chars, MAX_BODY_CHARS,
};
use skills_core::{
    categorize, default_catalog_sources, parse_descriptor, AlternateSource, Catalog, SkillRecord,
    SourceRepository, ALTERNATE_SOURCE, PRIMARY_SOURCES,
};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Outcome of a build: the catalog plus the sources that could not be listed.
#[derive(Debug)]
pub struct BuildResult {
    pub catalog: Catalog,
    pub errors: Vec<SourceError>,
}

/// A primary source whose listing failed.
#[derive(Debug, Error)]
#[error("failed to list {repository}: {error}")]
pub struct SourceError {
    /// `owner/repo`.
    pub repository: String,
    #[source]
    pub error: ListingError,
}

/// Fetches every configured source and assembles the catalog.
#[derive(Debug)]
pub struct Builder {
    client: GithubClient,
    web_base: String,
    branch: String,
}

impl Builder {
    pub fn new(config: &BuilderConfig) -> Self {
        Self {
            client: GithubClient::new(config),
            web_base: config.web_base.trim_end_matches('/').to_string(),
            branch: config.branch.clone(),
        }
    }

    /// Names of the skill directories under a source's `skills_path`, in
    /// listing order.
    pub async fn list_skill_directories(
        &self,
        source: &SourceRepository,
    ) -> Result<Vec<String>, ListingError> {
        let url = self
            .client
            .contents_url(source.owner, source.repo, Some(source.skills_path));
        let entries = self.client.list_contents(&url).await?;
        Ok(entries
            .into_iter()
            .filter(ContentEntry::is_dir)
            .map(|e| e.name)
            .collect())
    }

    /// Fetch and parse `SKILL.md` for one skill directory.
    ///
    /// Returns `Ok(None)` when the descriptor does not exist.
    pub async fn fetch_skill_descriptor(
        &self,
        source: &SourceRepository,
        dir: &str,
    ) -> Result<Option<SkillRecord>, DescriptorFetchError> {
        let skill_md_url = self.client.raw_url(
            source.owner,
            source.repo,
            &self.branch,
            &format!("{}/{dir}/SKILL.md", source.skills_path),
        );
        let Some(content) = self.client.fetch_raw(&skill_md_url).await? else {
            return Ok(None);
        };

        let descriptor = parse_descriptor(&content);
        if !descriptor.has_header() {
            debug!(source = %source.full_name(), dir, "SKILL.md has no header block");
        }

        let description = descriptor.get("description").unwrap_or_default().to_string();
        Ok(Some(SkillRecord {
            id: source.skill_id(dir),
            name: descriptor.get("name").unwrap_or(dir).to_string(),
            slug: dir.to_string(),
            category: categorize(dir, &description),
            description,
            platform: source.platform.to_string(),
            platform_icon: source.platform_icon.to_string(),
            source: source.full_name(),
            source_url: self.tree_url(
                source.owner,
                source.repo,
                &format!("{}/{dir}", source.skills_path),
            ),
            skill_md_url,
            body: descriptor.body,
        }))
    }

    /// All skills of one primary source. Per-skill failures are skipped.
    pub async fn fetch_primary_source(
        &self,
        source: &SourceRepository,
    ) -> Result<Vec<SkillRecord>, ListingError> {
        info!(source = %source.full_name(), "fetching skills");
        let dirs = self.list_skill_directories(source).await?;

        let mut records = Vec::new();
        for dir in &dirs {
            match self.fetch_skill_descriptor(source, dir).await {
                Ok(Some(record)) => records.push(record),
                Ok(None) => {
                    debug!(source = %source.full_name(), dir = %dir, "no SKILL.md, skipping");
                }
                Err(e) => {
                    warn!(
                        source = %source.full_name(),
                        dir = %dir,
                        error = %e,
                        "skipping skill"
                    );
                }
            }
        }

        info!(source = %source.full_name(), count = records.len(), "found skills");
        Ok(records)
    }

    /// Skills from a repository of top-level markdown directories.
    ///
    /// Never fails: a listing failure yields no skills.
    pub async fn fetch_alternate_source(&self, alt: &AlternateSource) -> Vec<SkillRecord> {
        info!(source = %alt.full_name(), "fetching skills");
        let url = self.client.contents_url(alt.owner, alt.repo, None);
        let entries = match self.client.list_contents(&url).await {
            Ok(entries) => entries,
            Err(e) => {
                warn!(source = %alt.full_name(), error = %e, "failed to list source");
                return Vec::new();
            }
        };

        let mut records = Vec::new();
        for entry in entries
            .iter()
            .filter(|e| e.is_dir() && !e.name.starts_with('.'))
        {
            if let Some(record) = self.fetch_alternate_skill(alt, entry).await {
                records.push(record);
            }
        }

        info!(source = %alt.full_name(), count = records.len(), "found skills");
        records
    }

    async fn fetch_alternate_skill(
        &self,
        alt: &AlternateSource,
        entry: &ContentEntry,
    ) -> Option<SkillRecord> {
        let files = match self.client.list_contents(&entry.url).await {
            Ok(files) => files,
            Err(e) => {
                debug!(dir = %entry.name, error = %e, "failed to list directory, skipping");
                return None;
            }
        };

        let candidates: Vec<&ContentEntry> =
            files.iter().filter(|f| f.download_url.is_some()).collect();
        let Some(download_url) = pick_descriptor(&candidates, |f| f.name.as_str())
            .and_then(|f| f.download_url.clone())
        else {
            debug!(dir = %entry.name, "no markdown file, skipping");
            return None;
        };

        let content = match self.client.fetch_raw(&download_url).await {
            Ok(Some(content)) => content,
            Ok(None) => {
                debug!(dir = %entry.name, url = %download_url, "markdown file not found, skipping");
                return None;
            }
            Err(e) => {
                warn!(dir = %entry.name, error = %e, "skipping skill");
                return None;
            }
        };

        let title = extract_title(&content).unwrap_or_else(|| entry.name.clone());
        Some(SkillRecord {
            id: alt.skill_id(&entry.name),
            slug: entry.name.clone(),
            description: extract_summary(&content).unwrap_or_default(),
            category: categorize(&entry.name, &title),
            name: title,
            platform: alt.platform.to_string(),
            platform_icon: alt.platform_icon.to_string(),
            source: alt.full_name(),
            source_url: self.tree_url(alt.owner, alt.repo, &entry.name),
            skill_md_url: download_url,
            body: truncate_chars(&content, MAX_BODY_CHARS).to_string(),
        })
    }

    /// Fetch every source, drop duplicate ids, and assemble the catalog.
    pub async fn build_catalog(&self) -> BuildResult {
        let mut skills = Vec::new();
        let mut errors = Vec::new();

        for source in &PRIMARY_SOURCES {
            match self.fetch_primary_source(source).await {
                Ok(records) => skills.extend(records),
                Err(error) => {
                    warn!(source = %source.full_name(), error = %error, "failed to list source");
                    errors.push(SourceError {
                        repository: source.full_name(),
                        error,
                    });
                }
            }
        }
        skills.extend(self.fetch_alternate_source(&ALTERNATE_SOURCE).await);

        let (skills, dropped) = dedup_by_id(skills);
        for id in &dropped {
            warn!(id = %id, "duplicate skill id, keeping first");
        }

        let catalog = Catalog::new(Utc::now(), default_catalog_sources(&self.web_base), skills);
        info!(
            total = catalog.total_skills,
            failed_sources = errors.len(),
            "catalog built"
        );
        BuildResult { catalog, errors }
    }

    fn tree_url(&self, owner: &str, repo: &str, path: &str) -> String {
        format!(
            "{}/{owner}/{repo}/tree/{}/{}",
            self.web_base,
            self.branch,
            encode_path(path)
        )
    }
}
