//! Heuristics for skills published as plain markdown (no header block).
//!
//! Used for repositories where each top-level directory is a skill and the
//! best markdown file in it stands in for a descriptor.

/// Maximum characters kept for an extracted description.
pub const MAX_DESCRIPTION_CHARS: usize = 200;
/// Maximum characters kept for a markdown body.
pub const MAX_BODY_CHARS: usize = 2000;
/// Minimum characters on a line for it to count as a description paragraph.
const MIN_DESCRIPTION_LINE_CHARS: usize = 11;

/// Rank of a file name as a skill descriptor; lower is better.
///
/// `README.md` beats `SKILL.md`, which beats any other `.md` file.
pub fn descriptor_rank(file_name: &str) -> Option<u8> {
    match file_name {
        "README.md" => Some(0),
        "SKILL.md" => Some(1),
        name if name.ends_with(".md") => Some(2),
        _ => None,
    }
}

/// Pick the best descriptor among `items`, keeping listing order among equals.
pub fn pick_descriptor<'a, T>(items: &'a [T], name: impl Fn(&T) -> &str) -> Option<&'a T> {
    items
        .iter()
        .enumerate()
        .filter_map(|(idx, item)| descriptor_rank(name(item)).map(|rank| (rank, idx, item)))
        .min_by_key(|(rank, idx, _)| (*rank, *idx))
        .map(|(_, _, item)| item)
}

/// Title from the first line starting with `#`, without the heading marker.
pub fn extract_title(content: &str) -> Option<String> {
    let line = content.split('\n').find(|l| l.starts_with('#'))?;
    let title = line.trim_start_matches('#').trim();
    if title.is_empty() {
        None
    } else {
        Some(title.to_string())
    }
}

/// First paragraph line that follows a blank line.
///
/// The line must not be a heading and must carry at least eleven characters.
/// A description placed directly under the title (no blank line) is not found.
pub fn extract_summary(content: &str) -> Option<String> {
    let lines: Vec<&str> = content.split('\n').collect();
    lines.iter().enumerate().skip(2).find_map(|(idx, line)| {
        if !lines[idx - 1].is_empty() || line.starts_with('#') {
            return None;
        }
        let text = line.split('\r').next().unwrap_or_default();
        if text.chars().count() < MIN_DESCRIPTION_LINE_CHARS {
            return None;
        }
        Some(truncate_chars(text.trim(), MAX_DESCRIPTION_CHARS).to_string())
    })
}

/// Prefix of `s` holding at most `max` characters.
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((byte_idx, _)) => &s[..byte_idx],
        None => s,
    }
}
