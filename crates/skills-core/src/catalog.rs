//! Catalog document: construction, ordering, and persistence.
//!
//! The catalog file is the only contract between the builder and its
//! consumers. It is written as pretty-printed JSON and replaced whole on
//! every build.

use crate::types::{CatalogSource, SkillRecord};
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

/// Failure to obtain a usable catalog.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("catalog not found: {0}")]
    NotFound(String),
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("malformed catalog: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("inconsistent catalog: totalSkills is {declared} but {actual} skills are present")]
    Inconsistent { declared: usize, actual: usize },
    #[error("failed to fetch catalog from {url}: {message}")]
    Fetch { url: String, message: String },
}

/// Failure to persist a catalog.
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("failed to serialize catalog: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
}

/// The aggregated, persisted set of skills.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    #[serde(with = "millis_timestamp")]
    pub generated_at: DateTime<Utc>,
    pub total_skills: usize,
    pub sources: Vec<CatalogSource>,
    pub skills: Vec<SkillRecord>,
}

impl Catalog {
    /// Assemble a catalog, sorting skills by name and deriving the count.
    pub fn new(
        generated_at: DateTime<Utc>,
        sources: Vec<CatalogSource>,
        mut skills: Vec<SkillRecord>,
    ) -> Self {
        skills.sort_by(|a, b| compare_names(&a.name, &b.name));
        Self {
            generated_at: generated_at.trunc_subsecs(3),
            total_skills: skills.len(),
            sources,
            skills,
        }
    }

    /// Parse and validate a catalog document.
    pub fn from_json(content: &str) -> Result<Self, LoadError> {
        let catalog: Catalog = serde_json::from_str(content)?;
        if catalog.total_skills != catalog.skills.len() {
            return Err(LoadError::Inconsistent {
                declared: catalog.total_skills,
                actual: catalog.skills.len(),
            });
        }
        Ok(catalog)
    }

    /// Load a catalog file from disk.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                LoadError::NotFound(path.display().to_string())
            } else {
                LoadError::Io {
                    path: path.display().to_string(),
                    source: e,
                }
            }
        })?;
        Self::from_json(&content)
    }

    /// Pretty-printed JSON form of the catalog.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write the catalog to `path`, replacing any previous file.
    ///
    /// The document is written next to the target and renamed into place.
    pub fn write_to(&self, path: &Path) -> Result<(), WriteError> {
        let json = self.to_json_pretty()?;
        let io_err = |source: io::Error| WriteError::Io {
            path: path.display().to_string(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
        tmp_name.push(".tmp");
        let tmp_path = path.with_file_name(tmp_name);
        fs::write(&tmp_path, json).map_err(io_err)?;
        fs::rename(&tmp_path, path).map_err(io_err)?;
        Ok(())
    }

    pub fn find(&self, id: &str) -> Option<&SkillRecord> {
        self.skills.iter().find(|s| s.id == id)
    }
}

/// Drop records whose id was already seen, keeping the first occurrence.
///
/// Returns the kept records and the ids that were dropped.
pub fn dedup_by_id(records: Vec<SkillRecord>) -> (Vec<SkillRecord>, Vec<String>) {
    let mut seen = HashSet::new();
    let mut dropped = Vec::new();
    let kept = records
        .into_iter()
        .filter(|r| {
            if seen.insert(r.id.clone()) {
                true
            } else {
                dropped.push(r.id.clone());
                false
            }
        })
        .collect();
    (kept, dropped)
}

/// Locale-style name ordering: case-insensitive first, then lowercase before
/// uppercase, then raw code points.
///
/// Not a full collator. Punctuation and non-ASCII letters order by code
/// point, so `a-b` sorts before `a_b` and `éa` sorts after `za`, where an
/// ICU locale comparison would put both the other way round.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| {
            a.chars()
                .zip(b.chars())
                .find(|(x, y)| x != y)
                .map_or(Ordering::Equal, |(x, y)| {
                    x.is_uppercase().cmp(&y.is_uppercase())
                })
        })
        .then_with(|| a.cmp(b))
}

/// RFC 3339 with millisecond precision and a `Z` suffix.
mod millis_timestamp {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let s = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
