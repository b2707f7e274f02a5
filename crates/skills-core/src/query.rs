//! Read-only views over a loaded catalog.
//!
//! Filtering never mutates the catalog; every view borrows from it.

use crate::catalog::Catalog;
use crate::types::SkillRecord;
use chrono::{DateTime, Utc};
use std::collections::BTreeSet;

/// Sentinel facet value meaning "no filter".
pub const ALL: &str = "All";

/// Placeholder shown for skills without a description.
pub const NO_DESCRIPTION: &str = "No description available.";

/// One facet of a filter: either disabled or an exact value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Facet {
    #[default]
    All,
    Only(String),
}

impl Facet {
    /// Parse a facet, treating the `All` sentinel (any case) as disabled.
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case(ALL) {
            Self::All
        } else {
            Self::Only(value.to_string())
        }
    }

    fn admits(&self, value: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == value,
        }
    }
}

impl From<Option<String>> for Facet {
    fn from(value: Option<String>) -> Self {
        value.map_or(Self::All, |v| Self::parse(&v))
    }
}

/// Platform, category, and free-text criteria, all ANDed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillFilter {
    pub platform: Facet,
    pub category: Facet,
    pub search: String,
}

impl SkillFilter {
    pub fn matches(&self, skill: &SkillRecord) -> bool {
        if !self.platform.admits(&skill.platform) {
            return false;
        }
        if !self.category.admits(skill.category.as_str()) {
            return false;
        }
        if self.search.is_empty() {
            return true;
        }
        let query = self.search.to_lowercase();
        skill.name.to_lowercase().contains(&query)
            || skill.description.to_lowercase().contains(&query)
            || skill.category.as_str().to_lowercase().contains(&query)
    }
}

/// Skills admitted by `criteria`, in catalog order.
pub fn filter<'a>(catalog: &'a Catalog, criteria: &SkillFilter) -> Vec<&'a SkillRecord> {
    catalog.skills.iter().filter(|s| criteria.matches(s)).collect()
}

/// `All` followed by each platform in first-seen order.
pub fn distinct_platforms(catalog: &Catalog) -> Vec<String> {
    let mut platforms = vec![ALL.to_string()];
    for skill in &catalog.skills {
        if !platforms[1..].contains(&skill.platform) {
            platforms.push(skill.platform.clone());
        }
    }
    platforms
}

/// `All` followed by each category label present, alphabetically.
pub fn distinct_categories(catalog: &Catalog) -> Vec<String> {
    let labels: BTreeSet<&str> = catalog
        .skills
        .iter()
        .map(|s| s.category.as_str())
        .collect();
    std::iter::once(ALL)
        .chain(labels)
        .map(String::from)
        .collect()
}

/// Description for display, with a placeholder when empty.
pub fn display_description(skill: &SkillRecord) -> &str {
    if skill.description.is_empty() {
        NO_DESCRIPTION
    } else {
        &skill.description
    }
}

/// Headline numbers for a catalog view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSummary {
    pub total_skills: usize,
    pub shown: usize,
    pub source_count: usize,
    pub generated_at: DateTime<Utc>,
}

impl CatalogSummary {
    pub fn new(catalog: &Catalog, shown: usize) -> Self {
        Self {
            total_skills: catalog.total_skills,
            shown,
            source_count: catalog.sources.len(),
            generated_at: catalog.generated_at,
        }
    }

    /// "Showing X of Y skills".
    pub fn showing_line(&self) -> String {
        format!("Showing {} of {} skills", self.shown, self.total_skills)
    }

    /// "N skills from M open-source repositories."
    pub fn banner(&self) -> String {
        format!(
            "{} skills from {} open-source repositories.",
            self.total_skills, self.source_count
        )
    }

    /// "Data refreshed YYYY-MM-DD".
    pub fn refreshed_line(&self) -> String {
        format!("Data refreshed {}", self.generated_at.format("%Y-%m-%d"))
    }
}
