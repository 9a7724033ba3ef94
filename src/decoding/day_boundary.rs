//! Day boundary detection.
//!
//! Day blocks carry no length prefix or terminator. The only reliable marker
//! is the day-of-week token each block contains, so a block is taken to run
//! from one anchor occurrence to the next, and the last one to the end of
//! the row.

use std::ops::Range;

/// The seven day-of-week tokens used as block anchors.
pub const DAY_ANCHORS: [&str; 7] = ["月", "火", "水", "木", "金", "土", "日"];

/// Returns true if `token` is a day-of-week anchor.
pub fn is_day_anchor(token: &str) -> bool {
    DAY_ANCHORS.contains(&token)
}

/// Finds the block ranges delimited by anchor tokens in `day_row`.
///
/// Each range starts at an anchor index and ends at the next anchor index;
/// the final range ends at `row_len`. Returns no ranges when the row holds
/// no anchor.
///
/// # Example
///
/// ```
/// use tps_decoder::decoding::scan_day_boundaries;
///
/// let row = ["x", "月", "1", "2", "火", "3"];
/// assert_eq!(scan_day_boundaries(&row, row.len()), vec![1..4, 4..6]);
/// ```
pub fn scan_day_boundaries(day_row: &[&str], row_len: usize) -> Vec<Range<usize>> {
    let mut ranges = Vec::new();
    let mut start: Option<usize> = None;

    for (index, token) in day_row.iter().enumerate() {
        if !is_day_anchor(token) {
            continue;
        }
        match start {
            None => start = Some(index),
            Some(block_start) => {
                ranges.push(block_start..index);
                start = Some(index);
            }
        }
    }

    if let Some(block_start) = start {
        ranges.push(block_start..row_len.max(block_start));
    }

    ranges
}

/// Slices `parent_row` at the anchors found in `day_row`.
///
/// The ranges found in `day_row` are applied to `parent_row`, clamped to its
/// length. When the parent row is the whole line and the day row its
/// payload, the parent leads by the two prefix tokens, so every slice opens
/// with the day number and numeric field that precede the weekday anchor.
///
/// # Example
///
/// ```
/// use tps_decoder::decoding::extract_day_blocks;
///
/// let parent = ["A2", "EMP001", "K2", "1", "0", "月", "480", "2", "0", "火", "450"];
/// let day_row = &parent[2..];
///
/// let blocks = extract_day_blocks(day_row, &parent);
/// assert_eq!(blocks, vec![vec!["1", "0", "月", "480"], vec!["2", "0", "火", "450"]]);
/// ```
pub fn extract_day_blocks<'a>(day_row: &[&str], parent_row: &[&'a str]) -> Vec<Vec<&'a str>> {
    scan_day_boundaries(day_row, parent_row.len())
        .into_iter()
        .map(|range| {
            let end = range.end.min(parent_row.len());
            let start = range.start.min(end);
            parent_row[start..end].to_vec()
        })
        .collect()
}
