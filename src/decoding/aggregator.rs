//! Record aggregation.
//!
//! The aggregator is the only stateful part of decoding: it folds decoded
//! lines into a [`ResultSet`] keyed by composite key. A later line with the
//! same key and tag replaces the earlier one.

use tracing::{debug, warn};

use crate::config::FinalPeriod;
use crate::models::{
    DayBlockGroup, DayRecord, HeaderEntry, PeriodLabel, RecordEntry, RecordTag, ResultSet,
};

/// Day blocks decoded from one line, before a period label is attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedDayBlocks {
    /// The line the blocks were read from.
    pub line_number: usize,
    /// The adjusted token blocks.
    pub raw_blocks: Vec<Vec<String>>,
    /// The decoded days.
    pub day_records: Vec<DayRecord>,
}

/// The decoded payload of one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedRecord {
    /// An `A1` header.
    Header(HeaderEntry),
    /// Day blocks of an `A2`..`A4` line.
    DayBlocks(DecodedDayBlocks),
}

/// One decoded line, ready to be merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedLine {
    /// The composite key.
    pub key: String,
    /// The record tag.
    pub tag: RecordTag,
    /// The decoded payload.
    pub record: DecodedRecord,
}

/// Folds decoded lines into a [`ResultSet`].
///
/// # Example
///
/// ```
/// use tps_decoder::config::FinalPeriod;
/// use tps_decoder::decoding::{DecodedDayBlocks, DecodedLine, DecodedRecord, RecordAggregator};
/// use tps_decoder::models::{PeriodLabel, RecordTag};
///
/// let mut aggregator = RecordAggregator::new(FinalPeriod::Thirty);
/// aggregator.insert(DecodedLine {
///     key: "EMP001".to_string(),
///     tag: RecordTag::DayBlockFinalThird,
///     record: DecodedRecord::DayBlocks(DecodedDayBlocks {
///         line_number: 4,
///         raw_blocks: vec![],
///         day_records: vec![],
///     }),
/// });
///
/// let results = aggregator.finish();
/// let group = results.get("EMP001").unwrap();
/// let blocks = group.day_blocks(RecordTag::DayBlockFinalThird).unwrap();
/// assert_eq!(blocks.period_label, PeriodLabel::FinalThirty);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RecordAggregator {
    final_period: FinalPeriod,
    results: ResultSet,
}

impl RecordAggregator {
    /// Creates an empty aggregator using `final_period` for `A4` labels.
    pub fn new(final_period: FinalPeriod) -> Self {
        Self {
            final_period,
            results: ResultSet::default(),
        }
    }

    /// Merges one decoded line, replacing any entry with the same key and tag.
    pub fn insert(&mut self, line: DecodedLine) {
        let DecodedLine { key, tag, record } = line;

        let entry = match record {
            DecodedRecord::Header(header) => RecordEntry::Header(header),
            DecodedRecord::DayBlocks(blocks) => {
                let Some(period_label) = tag.period_label(self.final_period.initial_label())
                else {
                    warn!(key = %key, tag = %tag, "Day blocks under a header tag were dropped");
                    return;
                };
                RecordEntry::DayBlocks(DayBlockGroup {
                    line_number: blocks.line_number,
                    period_label,
                    raw_blocks: blocks.raw_blocks,
                    day_records: blocks.day_records,
                })
            }
        };

        if let Some(previous) = self.results.group_mut(&key).insert(tag, entry) {
            debug!(
                key = %key,
                tag = %tag,
                replaced_line = entry_line(&previous),
                "Replaced earlier record"
            );
        }
    }

    /// Completes aggregation and returns the result set.
    ///
    /// Under [`FinalPeriod::Calendar`], `A4` labels are resolved here from
    /// each key's header, since the header may follow the day blocks.
    pub fn finish(mut self) -> ResultSet {
        if self.final_period == FinalPeriod::Calendar {
            for group in self.results.groups_mut() {
                let label = group
                    .header()
                    .and_then(|h| PeriodLabel::final_for_year_month(&h.record.target_year_month))
                    .unwrap_or(PeriodLabel::FinalThirtyOne);
                if let Some(blocks) = group.day_blocks_mut(RecordTag::DayBlockFinalThird) {
                    blocks.period_label = label;
                }
            }
        }
        self.results
    }
}

fn entry_line(entry: &RecordEntry) -> usize {
    match entry {
        RecordEntry::Header(header) => header.line_number,
        RecordEntry::DayBlocks(group) => group.line_number,
    }
}
