//! Quick-install commands shown alongside a skill.

use crate::types::{SkillRecord, SourceRepository};

/// Shell snippet for installing or viewing a skill.
///
/// Skills from `SKILL.md` repositories can be fetched straight into
/// `.claude/skills/`; everything else links to its source page.
pub fn install_command(skill: &SkillRecord, primary_sources: &[SourceRepository]) -> String {
    let installable = primary_sources
        .iter()
        .any(|source| source.platform == skill.platform);
    if installable {
        format!(
            "# Add to your .claude/skills/ directory\ncurl -sL {} > .claude/skills/{}/SKILL.md",
            skill.skill_md_url, skill.slug
        )
    } else {
        format!("# View source\nopen {}", skill.source_url)
    }
}
