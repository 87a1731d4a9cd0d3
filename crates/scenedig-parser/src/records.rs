//! Splitting a scene document into records.
//!
//! A Unity text scene is a YAML stream where every document starts with a
//! header line such as `--- !u!4 &1234567`: the number after `!u!` is the
//! class id (the record's type tag) and the number after `&` is the record's
//! local file id. Rather than parsing the YAML, the splitter slices the text
//! on those header lines and hands out each body untouched.

use crate::kind::RecordKind;
use once_cell::sync::Lazy;
use regex::Regex;
use std::iter::FusedIterator;

static HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^--- !u!(\d+) &(-?\d+)([ \t].*)?$").expect("record header pattern compiles")
});

/// Parsed form of a header line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordHeader {
    pub type_tag: i32,
    pub local_id: i64,
    /// Header carried the trailing `stripped` marker (prefab instance stub)
    pub stripped: bool,
}

impl RecordHeader {
    fn into_record(self, body: &str) -> Record<'_> {
        Record {
            type_tag: self.type_tag,
            local_id: self.local_id,
            stripped: self.stripped,
            body,
        }
    }
}

/// One record of a scene document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record<'a> {
    pub type_tag: i32,
    /// Unique within one document, may be negative
    pub local_id: i64,
    pub stripped: bool,
    /// Text between the header line and the next header (or end of input)
    pub body: &'a str,
}

impl Record<'_> {
    pub fn kind(&self) -> RecordKind {
        RecordKind::from_tag(self.type_tag)
    }
}

/// Parse a single line as a record header.
///
/// Returns `None` for anything that is not a header, including lines that
/// have the header shape but numbers that do not fit their types.
pub fn parse_header(line: &str) -> Option<RecordHeader> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    let caps = HEADER.captures(line)?;
    let type_tag = caps[1].parse::<i32>().ok()?;
    let local_id = caps[2].parse::<i64>().ok()?;
    let stripped = caps
        .get(3)
        .is_some_and(|rest| rest.as_str().trim() == "stripped");
    Some(RecordHeader {
        type_tag,
        local_id,
        stripped,
    })
}

/// Lazily split `text` into records, in document order.
///
/// Text before the first header (the `%YAML`/`%TAG` preamble) belongs to no
/// record. Input without any header yields nothing.
pub fn records(text: &str) -> Records<'_> {
    Records {
        text,
        cursor: 0,
        open: None,
    }
}

/// Iterator returned by [`records`].
#[derive(Debug, Clone)]
pub struct Records<'a> {
    text: &'a str,
    cursor: usize,
    /// Header of the record being collected and the offset its body starts at
    open: Option<(RecordHeader, usize)>,
}

impl<'a> Iterator for Records<'a> {
    type Item = Record<'a>;

    fn next(&mut self) -> Option<Record<'a>> {
        while self.cursor < self.text.len() {
            let line_start = self.cursor;
            let line_end = self.text[line_start..]
                .find('\n')
                .map_or(self.text.len(), |i| line_start + i + 1);
            self.cursor = line_end;

            let line = self.text[line_start..line_end].trim_end_matches('\n');
            let Some(header) = parse_header(line) else {
                continue;
            };

            if let Some((previous, body_start)) = self.open.replace((header, line_end)) {
                return Some(previous.into_record(&self.text[body_start..line_start]));
            }
        }

        self.open
            .take()
            .map(|(header, body_start)| header.into_record(&self.text[body_start..]))
    }
}

impl FusedIterator for Records<'_> {}
