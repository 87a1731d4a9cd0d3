//! Field extraction from record bodies.
//!
//! Record bodies are YAML, but the engine's serializer drifts between versions
//! (flow vs block style, extra keys, reordered keys). Instead of a YAML
//! parser, each field is read with a small pattern that is compiled once and
//! matched against the raw body. None of the patterns know about record kinds,
//! so a new record kind only needs a new combination of them.
//!
//! Every extractor is total: no match, or a match whose numbers do not parse,
//! simply yields `None` (or an empty list).

use regex::Regex;

/// A `{fileID: N, guid: G, ...}` reference read from a record body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectRef {
    pub file_id: i64,
    /// Present for references into other assets
    pub guid: Option<String>,
}

/// Matches `key: value` and yields the value.
#[derive(Debug, Clone)]
pub struct ScalarField {
    regex: Regex,
}

impl ScalarField {
    pub fn new(key: &str) -> Self {
        let pattern = format!(r"(?m)^[ \t]*{}:[ \t]*(.*?)[ \t\r]*$", regex::escape(key));
        Self {
            regex: Regex::new(&pattern).expect("escaped scalar pattern compiles"),
        }
    }

    /// First matching value, trimmed, with one layer of matching quotes removed.
    pub fn extract<'a>(&self, body: &'a str) -> Option<&'a str> {
        let caps = self.regex.captures(body)?;
        let value = caps.get(1)?.as_str().trim();
        Some(strip_quotes(value))
    }
}

fn strip_quotes(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// Matches an inline `key: {fileID: N, ...}` reference.
#[derive(Debug, Clone)]
pub struct ReferenceField {
    regex: Regex,
}

impl ReferenceField {
    pub fn new(key: &str) -> Self {
        let pattern = format!(r"(?m)^[ \t]*{}:[ \t]*\{{([^}}]*)\}}", regex::escape(key));
        Self {
            regex: Regex::new(&pattern).expect("escaped reference pattern compiles"),
        }
    }

    pub fn extract(&self, body: &str) -> Option<ObjectRef> {
        let caps = self.regex.captures(body)?;
        parse_inline_ref(caps.get(1)?.as_str())
    }
}

/// Matches list items holding a reference, either `- marker: {fileID: N}`
/// or bare `- {fileID: N}`.
#[derive(Debug, Clone)]
pub struct ReferenceListField {
    regex: Regex,
}

impl ReferenceListField {
    /// Items of the form `- marker: {fileID: N}`
    pub fn keyed(marker: &str) -> Self {
        let pattern = format!(
            r"(?m)^[ \t]*-[ \t]+{}:[ \t]*\{{([^}}]*)\}}",
            regex::escape(marker)
        );
        Self {
            regex: Regex::new(&pattern).expect("escaped list pattern compiles"),
        }
    }

    /// Items of the form `- {fileID: N}`
    pub fn bare() -> Self {
        Self {
            regex: Regex::new(r"(?m)^[ \t]*-[ \t]+\{([^}]*)\}").expect("bare list pattern compiles"),
        }
    }

    /// All file ids in document order, duplicates included.
    pub fn extract(&self, body: &str) -> Vec<i64> {
        self.regex
            .captures_iter(body)
            .filter_map(|caps| caps.get(1))
            .filter_map(|inner| parse_inline_ref(inner.as_str()))
            .map(|reference| reference.file_id)
            .collect()
    }
}

/// Parse the inside of `{fileID: N, guid: G, type: T}`.
fn parse_inline_ref(inner: &str) -> Option<ObjectRef> {
    let mut file_id = None;
    let mut guid = None;
    for part in inner.split(',') {
        let Some((key, value)) = part.split_once(':') else {
            continue;
        };
        match key.trim() {
            "fileID" => file_id = Some(value.trim().parse::<i64>().ok()?),
            "guid" => {
                let value = value.trim();
                if !value.is_empty() {
                    guid = Some(value.to_string());
                }
            }
            _ => {}
        }
    }
    Some(ObjectRef {
        file_id: file_id?,
        guid,
    })
}

/// Slice of `body` belonging to a block-style `key:`.
///
/// Covers the lines after the key line that are indented deeper than the key,
/// plus `- ` items at the key's own indentation (the engine writes sequences
/// that way). Returns an empty string when the key is missing or its value is
/// written inline, e.g. `m_Children: []`.
pub fn section<'a>(body: &'a str, key: &str) -> &'a str {
    let mut offset = 0;
    let mut lines = body.split_inclusive('\n');

    let key_indent = loop {
        let Some(line) = lines.next() else {
            return "";
        };
        offset += line.len();
        let content = line.trim_start_matches([' ', '\t']);
        let Some(rest) = content.strip_prefix(key).and_then(|r| r.strip_prefix(':')) else {
            continue;
        };
        if !rest.trim().is_empty() {
            return "";
        }
        break line.len() - content.len();
    };

    let start = offset;
    for line in lines {
        let content = line.trim_start_matches([' ', '\t']);
        let indent = line.len() - content.len();
        let is_blank = content.trim().is_empty();
        let belongs = is_blank || indent > key_indent || (indent == key_indent && content.starts_with("- "));
        if !belongs {
            break;
        }
        offset += line.len();
    }
    &body[start..offset]
}

/// One-off form of [`ScalarField::extract`].
pub fn scalar<'a>(body: &'a str, key: &str) -> Option<&'a str> {
    ScalarField::new(key).extract(body)
}

/// One-off form of [`ReferenceField::extract`].
pub fn single_reference(body: &str, key: &str) -> Option<ObjectRef> {
    ReferenceField::new(key).extract(body)
}

/// One-off form of [`ReferenceListField::extract`]; `None` selects bare items.
pub fn reference_list(body: &str, marker: Option<&str>) -> Vec<i64> {
    match marker {
        Some(marker) => ReferenceListField::keyed(marker).extract(body),
        None => ReferenceListField::bare().extract(body),
    }
}
