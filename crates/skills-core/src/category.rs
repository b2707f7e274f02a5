//! Keyword taxonomy for skill categories.
//!
//! Categories are assigned from the skill name and description by an ordered
//! rule table. The first rule whose pattern matches wins; a skill matching no
//! rule is `General`.

use regex::RegexSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Closed set of catalog categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Quality,
    #[serde(rename = "Git & Workflow")]
    GitWorkflow,
    Planning,
    DevOps,
    #[serde(rename = "ML & Data")]
    MlData,
    Tools,
    Agents,
    Development,
    General,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Self::Quality,
        Self::GitWorkflow,
        Self::Planning,
        Self::DevOps,
        Self::MlData,
        Self::Tools,
        Self::Agents,
        Self::Development,
        Self::General,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Quality => "Quality",
            Self::GitWorkflow => "Git & Workflow",
            Self::Planning => "Planning",
            Self::DevOps => "DevOps",
            Self::MlData => "ML & Data",
            Self::Tools => "Tools",
            Self::Agents => "Agents",
            Self::Development => "Development",
            Self::General => "General",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                let labels: Vec<_> = Self::ALL.iter().map(Category::as_str).collect();
                format!(
                    "invalid category '{s}', expected one of: {}",
                    labels.join(", ")
                )
            })
    }
}

/// Rule table in priority order. Patterns are matched against lowercased text.
const RULES: [(&str, Category); 8] = [
    ("debug|test|verify|review|lint", Category::Quality),
    ("git|branch|commit|worktree|pr", Category::GitWorkflow),
    ("plan|design|brainstorm|spec", Category::Planning),
    ("deploy|ci|cd|docker|hosting", Category::DevOps),
    ("data|model|train|evaluat|dataset", Category::MlData),
    ("cli|tool|hub|upload|download|cache", Category::Tools),
    ("agent|subagent|dispatch|parallel", Category::Agents),
    ("code|develop|implement|build|scaffold", Category::Development),
];

static RULE_SET: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new(RULES.iter().map(|(pattern, _)| *pattern))
        .expect("category rule patterns are valid regexes")
});

/// Assign a category from a skill's name and description.
pub fn categorize(name: &str, description: &str) -> Category {
    let text = format!("{name} {description}").to_lowercase();
    // Set matches iterate in ascending rule index, so the first is the winner.
    RULE_SET
        .matches(&text)
        .into_iter()
        .next()
        .map_or(Category::General, |idx| RULES[idx].1)
}
