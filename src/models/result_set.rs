//! Aggregated output of a decoding run.
//!
//! This module contains the [`ResultSet`] type and the per-key
//! [`EmployeeRecordGroup`] it is made of.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{DayRecord, HeaderEntry, PeriodLabel, RecordTag};

/// The day blocks of one `A2`/`A3`/`A4` line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayBlockGroup {
    /// The line the blocks were read from.
    pub line_number: usize,
    /// The third of the month the blocks cover.
    pub period_label: PeriodLabel,
    /// The adjusted token blocks, one per day.
    pub raw_blocks: Vec<Vec<String>>,
    /// The decoded days, in source order.
    pub day_records: Vec<DayRecord>,
}

/// A decoded record stored under one tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordEntry {
    /// An `A1` header.
    Header(HeaderEntry),
    /// An `A2`..`A4` day-block group.
    DayBlocks(DayBlockGroup),
}

/// All records sharing one composite key, by tag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeRecordGroup {
    entries: BTreeMap<RecordTag, RecordEntry>,
}

impl EmployeeRecordGroup {
    /// Creates an empty group.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `entry` under `tag`, returning the entry it replaced.
    pub fn insert(&mut self, tag: RecordTag, entry: RecordEntry) -> Option<RecordEntry> {
        self.entries.insert(tag, entry)
    }

    /// Returns the entry for `tag`.
    pub fn get(&self, tag: RecordTag) -> Option<&RecordEntry> {
        self.entries.get(&tag)
    }

    /// Returns the header entry, if an `A1` line was decoded for this key.
    pub fn header(&self) -> Option<&HeaderEntry> {
        match self.entries.get(&RecordTag::Header)? {
            RecordEntry::Header(header) => Some(header),
            RecordEntry::DayBlocks(_) => None,
        }
    }

    /// Returns the day-block group stored under `tag`.
    pub fn day_blocks(&self, tag: RecordTag) -> Option<&DayBlockGroup> {
        match self.entries.get(&tag)? {
            RecordEntry::DayBlocks(group) => Some(group),
            RecordEntry::Header(_) => None,
        }
    }

    pub(crate) fn day_blocks_mut(&mut self, tag: RecordTag) -> Option<&mut DayBlockGroup> {
        match self.entries.get_mut(&tag)? {
            RecordEntry::DayBlocks(group) => Some(group),
            RecordEntry::Header(_) => None,
        }
    }

    /// Returns the tags present, in tag order.
    pub fn tags(&self) -> impl Iterator<Item = RecordTag> + '_ {
        self.entries.keys().copied()
    }

    /// Returns the number of tags present.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no tag is present.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Decoded records keyed by composite key.
///
/// # Example
///
/// ```
/// use tps_decoder::models::ResultSet;
///
/// let results = ResultSet::default();
/// assert!(results.is_empty());
/// assert_eq!(serde_json::to_string(&results).unwrap(), "{}");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultSet {
    groups: BTreeMap<String, EmployeeRecordGroup>,
}

impl ResultSet {
    /// Returns the group for `key`.
    pub fn get(&self, key: &str) -> Option<&EmployeeRecordGroup> {
        self.groups.get(key)
    }

    /// Returns the group for `key`, creating an empty one on first sight.
    pub fn group_mut(&mut self, key: &str) -> &mut EmployeeRecordGroup {
        self.groups.entry(key.to_string()).or_default()
    }

    /// Returns all composite keys, sorted.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.groups.keys().map(String::as_str)
    }

    /// Iterates over `(key, group)` pairs, sorted by key.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &EmployeeRecordGroup)> + '_ {
        self.groups.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub(crate) fn groups_mut(&mut self) -> impl Iterator<Item = &mut EmployeeRecordGroup> + '_ {
        self.groups.values_mut()
    }

    /// Returns the number of composite keys.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns true if nothing was decoded.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
