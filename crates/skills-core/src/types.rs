//! Core types for the skills catalog.
//!
//! These types match the persisted catalog document: camelCase field names,
//! one record per skill, and the static list of upstream repositories.

use crate::category::Category;
use serde::{Deserialize, Serialize};

/// Owner/repo on GitHub that holds one skill folder per directory under
/// `skills_path`, each with a `SKILL.md` descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceRepository {
    pub owner: &'static str,
    pub repo: &'static str,
    /// Subdirectory containing the skill folders.
    pub skills_path: &'static str,
    /// Display name of the source family.
    pub platform: &'static str,
    pub platform_icon: &'static str,
}

impl SourceRepository {
    /// `owner/repo`, as stored in `SkillRecord::source`.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }

    /// Deterministic record id for a skill directory in this repository.
    pub fn skill_id(&self, slug: &str) -> String {
        format!("{}-{}-{}", self.owner, self.repo, slug)
    }
}

/// Repository whose skills are top-level directories with free-form
/// markdown instead of a `SKILL.md` header block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlternateSource {
    pub owner: &'static str,
    pub repo: &'static str,
    pub platform: &'static str,
    pub platform_icon: &'static str,
}

impl AlternateSource {
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }

    pub fn skill_id(&self, slug: &str) -> String {
        format!("{}-{}-{}", self.owner, self.repo, slug)
    }
}

/// Repositories scanned with the `SKILL.md` layout, in build order.
pub const PRIMARY_SOURCES: [SourceRepository; 2] = [
    SourceRepository {
        owner: "huggingface",
        repo: "skills",
        skills_path: "skills",
        platform: "HuggingFace",
        platform_icon: "🤗",
    },
    SourceRepository {
        owner: "obra",
        repo: "superpowers",
        skills_path: "skills",
        platform: "Superpowers",
        platform_icon: "⚡",
    },
];

/// The one repository scanned with the top-level markdown layout.
pub const ALTERNATE_SOURCE: AlternateSource = AlternateSource {
    owner: "muratcankoylan",
    repo: "Agent-Skills-for-Context-Engineering",
    platform: "Context Engineering",
    platform_icon: "🧠",
};

/// Provenance entry in the catalog's `sources` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSource {
    pub name: String,
    pub url: String,
}

impl CatalogSource {
    pub fn new(owner: &str, repo: &str, web_base: &str) -> Self {
        Self {
            name: format!("{owner}/{repo}"),
            url: format!("{}/{owner}/{repo}", web_base.trim_end_matches('/')),
        }
    }
}

/// Static provenance list: every primary source followed by the alternate one.
pub fn default_catalog_sources(web_base: &str) -> Vec<CatalogSource> {
    PRIMARY_SOURCES
        .iter()
        .map(|s| CatalogSource::new(s.owner, s.repo, web_base))
        .chain(std::iter::once(CatalogSource::new(
            ALTERNATE_SOURCE.owner,
            ALTERNATE_SOURCE.repo,
            web_base,
        )))
        .collect()
}

/// One skill in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillRecord {
    /// `owner-repo-slug`, unique within a catalog.
    pub id: String,
    pub name: String,
    /// Directory name at the source.
    pub slug: String,
    pub description: String,
    pub category: Category,
    pub platform: String,
    pub platform_icon: String,
    /// `owner/repo`.
    pub source: String,
    pub source_url: String,
    pub skill_md_url: String,
    pub body: String,
}
