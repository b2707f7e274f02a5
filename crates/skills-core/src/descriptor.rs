//! SKILL.md descriptor parsing.
//!
//! A descriptor may start with a header block fenced by `---` lines holding
//! flat `key: value` pairs. Anything after the closing fence is the body.
//! Missing or unclosed headers degrade to empty metadata; parsing never fails.

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

const FENCE: &str = "---";

static KEY_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^([A-Za-z0-9_][A-Za-z0-9_-]*):\s*"?(.*?)"?\s*$"#)
        .expect("key/value pattern is a valid regex")
});

/// Header fields and body extracted from a descriptor file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Descriptor {
    fields: BTreeMap<String, String>,
    header: bool,
    /// Text after the closing fence, trimmed. Empty when there is no header.
    pub body: String,
}

impl Descriptor {
    /// Header value for `key`, if present and non-empty.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }

    /// Whether a closed header block was found.
    pub fn has_header(&self) -> bool {
        self.header
    }
}

fn is_fence(line: &str) -> bool {
    line.strip_suffix('\r').unwrap_or(line) == FENCE
}

/// Parse a descriptor's header block and body.
pub fn parse_descriptor(raw: &str) -> Descriptor {
    let mut lines = raw.split('\n');
    match lines.next() {
        Some(first) if is_fence(first) => {}
        _ => return Descriptor::default(),
    }

    let mut fields = BTreeMap::new();
    let mut consumed = raw.find('\n').map_or(raw.len(), |i| i + 1);
    let mut closed = false;

    for line in lines {
        consumed += line.len() + 1;
        if is_fence(line) {
            closed = true;
            break;
        }
        if let Some(caps) = KEY_VALUE.captures(line) {
            fields.insert(caps[1].to_string(), caps[2].trim().to_string());
        }
    }

    if !closed {
        return Descriptor::default();
    }

    let body = raw.get(consumed.min(raw.len())..).unwrap_or("").trim();
    Descriptor {
        fields,
        header: true,
        body: body.to_string(),
    }
}
