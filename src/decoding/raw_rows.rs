//! Raw row inspection.
//!
//! Selects undecoded lines by tag, either as a flat listing or grouped per
//! composite key, for checking which record types each key carries.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::warn;

use crate::models::{RawLine, RecordTag};

use super::line_classifier::split_line;

/// A raw line kept for inspection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawRow {
    /// The line number.
    pub line: usize,
    /// The untouched line text.
    pub raw: String,
}

/// Raw rows grouped by composite key, then by tag.
pub type RawRowIndex = BTreeMap<String, BTreeMap<RecordTag, RawRow>>;

/// Returns the lines whose tag is in `tags`, in input order.
///
/// # Example
///
/// ```
/// use tps_decoder::decoding::select_rows;
/// use tps_decoder::models::{RawLine, RecordTag};
///
/// let lines = vec![RawLine::new(1, "A1:K:x"), RawLine::new(2, "A2:K:y")];
/// let rows = select_rows(&lines, &[RecordTag::DayBlockFirstThird]);
/// assert_eq!(rows.len(), 1);
/// assert_eq!(rows[0].line_number, 2);
/// ```
pub fn select_rows<'a>(lines: &'a [RawLine], tags: &[RecordTag]) -> Vec<&'a RawLine> {
    lines
        .iter()
        .filter(|line| tags.iter().any(|tag| has_tag(&line.text, *tag)))
        .collect()
}

/// Groups the lines whose tag is in `tags` by composite key.
///
/// A later line with the same key and tag replaces the earlier one. Lines
/// without a key are logged and left out.
pub fn group_rows(lines: &[RawLine], tags: &[RecordTag]) -> RawRowIndex {
    let mut index = RawRowIndex::new();

    for line in select_rows(lines, tags) {
        let Ok(parts) = split_line(&line.text) else {
            warn!(line = line.line_number, "Row has no composite key");
            continue;
        };
        let Ok(tag) = parts.tag.parse::<RecordTag>() else {
            continue;
        };
        index.entry(parts.key.to_string()).or_default().insert(
            tag,
            RawRow {
                line: line.line_number,
                raw: line.text.clone(),
            },
        );
    }

    index
}

fn has_tag(text: &str, tag: RecordTag) -> bool {
    text.strip_prefix(tag.as_str())
        .is_some_and(|rest| rest.starts_with(super::line_classifier::DELIMITER))
}
