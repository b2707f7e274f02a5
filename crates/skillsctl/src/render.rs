//! Output rendering for skillsctl.
//!
//! Formats catalog views for terminal display.

use skills_core::query::{display_description, CatalogSummary};
use skills_core::{CatalogSource, SkillRecord};

const ID_WIDTH: usize = 40;
const NAME_WIDTH: usize = 32;
const PLATFORM_WIDTH: usize = 20;

/// Print skills in tabular format, followed by the count line.
pub fn print_skill_list(skills: &[&SkillRecord], summary: &CatalogSummary) {
    if skills.is_empty() {
        println!("No skills match your filters.");
        println!();
        println!("{}", summary.showing_line());
        return;
    }

    println!(
        "{:<ID_WIDTH$}  {:<NAME_WIDTH$}  {:<PLATFORM_WIDTH$}  {}",
        "ID", "NAME", "PLATFORM", "CATEGORY"
    );
    println!("{}", "-".repeat(ID_WIDTH + NAME_WIDTH + PLATFORM_WIDTH + 20));

    for skill in skills {
        println!("{}", format_skill_row(skill));
    }

    println!();
    println!("{}", summary.showing_line());
}

fn format_skill_row(skill: &SkillRecord) -> String {
    format!(
        "{:<ID_WIDTH$}  {:<NAME_WIDTH$}  {:<PLATFORM_WIDTH$}  {}",
        truncate(&skill.id, ID_WIDTH),
        truncate(&skill.name, NAME_WIDTH),
        format_platform(skill),
        skill.category,
    )
}

fn format_platform(skill: &SkillRecord) -> String {
    let label = if skill.platform_icon.is_empty() {
        skill.platform.clone()
    } else {
        format!("{} {}", skill.platform_icon, skill.platform)
    };
    truncate(&label, PLATFORM_WIDTH)
}

/// Print one facet value per line.
pub fn print_facets(values: &[String]) {
    for value in values {
        println!("{value}");
    }
}

/// Print the detail view for a single skill.
pub fn print_skill_details(skill: &SkillRecord, install: &str, body: &str) {
    println!("{}", skill.name);
    println!();
    println!("  ID:        {}", skill.id);
    println!("  Platform:  {}", format_platform(skill));
    println!("  Category:  {}", skill.category);
    println!("  Source:    {}", skill.source);
    println!();
    println!("{}", display_description(skill));
    println!();
    println!("Quick install:");
    for line in install.lines() {
        println!("  {line}");
    }
    println!();
    println!("{body}");
    println!();
    println!("View on GitHub: {}", skill.source_url);
}

/// Print the source repositories with the freshness and size banner.
pub fn print_sources(sources: &[CatalogSource], summary: &CatalogSummary) {
    for source in sources {
        println!("{:<56}  {}", source.name, source.url);
    }
    println!();
    println!("{}", summary.refreshed_line());
    println!("{}", summary.banner());
}

/// Shorten `s` to at most `max_len` characters, marking the cut with `...`.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}
