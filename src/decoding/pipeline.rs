//! Line-by-line decoding pipeline.
//!
//! Each line is classified, routed to the header or day-block path, and
//! merged into a [`RecordAggregator`]. Lines are processed in order, one at
//! a time; failures are reported per line according to the configured
//! [`ErrorPolicy`].

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::{DecoderConfig, ErrorPolicy};
use crate::error::{DecodeResult, LineError};
use crate::models::{HeaderEntry, RawLine, ResultSet};

use super::aggregator::{DecodedDayBlocks, DecodedLine, DecodedRecord, RecordAggregator};
use super::day_block::adjust_day_block;
use super::day_boundary::extract_day_blocks;
use super::day_row::decode_day_row;
use super::header_decoder::decode_header;
use super::line_classifier::{classify_line, tokenize};

/// Outcome of decoding a batch of lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DecodeReport {
    /// Decoded records by composite key.
    pub records: ResultSet,
    /// Lines that failed to decode, in input order.
    pub errors: Vec<LineError>,
    /// Number of lines seen.
    pub lines_read: usize,
    /// Number of lines merged into `records`.
    pub lines_decoded: usize,
    /// Number of lines passed over because their tag was not selected.
    pub lines_filtered: usize,
}

/// Decodes a single line.
///
/// Returns `Ok(None)` when the line's tag is not among the configured
/// record tags.
///
/// # Example
///
/// ```
/// use tps_decoder::config::DecoderConfig;
/// use tps_decoder::decoding::{DecodedRecord, decode_line};
/// use tps_decoder::models::{RawLine, RecordTag};
///
/// let line = RawLine::new(1, "A2:EMP001:K2:1:0:月:0:540:1080:60::480:0:0:0");
/// let decoded = decode_line(&line, &DecoderConfig::default()).unwrap().unwrap();
///
/// assert_eq!(decoded.key, "EMP001");
/// assert_eq!(decoded.tag, RecordTag::DayBlockFirstThird);
/// match decoded.record {
///     DecodedRecord::DayBlocks(blocks) => assert_eq!(blocks.day_records[0].work_time_mins, 480),
///     DecodedRecord::Header(_) => unreachable!(),
/// }
/// ```
pub fn decode_line(line: &RawLine, config: &DecoderConfig) -> DecodeResult<Option<DecodedLine>> {
    let classified = classify_line(&line.text)?;
    if !config.accepts(classified.tag) {
        return Ok(None);
    }

    let payload_tokens = tokenize(classified.payload);
    let record = if classified.tag.is_day_block() {
        let parent_tokens = tokenize(&line.text);
        DecodedRecord::DayBlocks(decode_day_blocks(
            line.line_number,
            &payload_tokens,
            &parent_tokens,
        )?)
    } else {
        let result = decode_header(&payload_tokens, config.header_strictness)?;
        DecodedRecord::Header(HeaderEntry {
            line_number: line.line_number,
            raw_tokens: payload_tokens.iter().map(|t| t.to_string()).collect(),
            record: result.record,
            token_count: result.token_count,
            expected_token_count: result.expected_token_count,
            length_valid: result.length_valid,
        })
    };

    Ok(Some(DecodedLine {
        key: classified.key.to_string(),
        tag: classified.tag,
        record,
    }))
}

fn decode_day_blocks(
    line_number: usize,
    day_row: &[&str],
    parent_row: &[&str],
) -> DecodeResult<DecodedDayBlocks> {
    let mut raw_blocks = Vec::new();
    let mut day_records = Vec::new();

    for block in extract_day_blocks(day_row, parent_row) {
        let adjusted = adjust_day_block(block)?;
        day_records.push(decode_day_row(&adjusted)?);
        raw_blocks.push(adjusted.into_iter().map(str::to_string).collect());
    }

    Ok(DecodedDayBlocks {
        line_number,
        raw_blocks,
        day_records,
    })
}

/// Decodes a batch of lines into a report.
///
/// # Errors
///
/// Under [`ErrorPolicy::Abort`], returns the first failing line. Under
/// [`ErrorPolicy::Skip`], failures are logged and collected in
/// [`DecodeReport::errors`] and this function does not fail.
///
/// # Example
///
/// ```
/// use tps_decoder::config::DecoderConfig;
/// use tps_decoder::decoding::decode_lines;
/// use tps_decoder::source::lines_from_str;
///
/// let text = "A2:EMP001:K2:1:0:月:0:540:1080:60::480:0:0:0\nZ9:EMP001:broken\n";
/// let report = decode_lines(lines_from_str(text), &DecoderConfig::default()).unwrap();
///
/// assert_eq!(report.lines_read, 2);
/// assert_eq!(report.lines_decoded, 1);
/// assert_eq!(report.errors[0].line_number, 2);
/// assert!(report.records.get("EMP001").is_some());
/// ```
pub fn decode_lines<I>(lines: I, config: &DecoderConfig) -> Result<DecodeReport, LineError>
where
    I: IntoIterator<Item = RawLine>,
{
    let mut aggregator = RecordAggregator::new(config.final_period);
    let mut report = DecodeReport::default();

    for line in lines {
        report.lines_read += 1;

        match decode_line(&line, config) {
            Ok(Some(decoded)) => {
                debug!(
                    line = line.line_number,
                    key = %decoded.key,
                    tag = %decoded.tag,
                    "Decoded line"
                );
                aggregator.insert(decoded);
                report.lines_decoded += 1;
            }
            Ok(None) => report.lines_filtered += 1,
            Err(error) => {
                let line_error = LineError {
                    line_number: line.line_number,
                    raw_text: line.text,
                    error,
                };
                match config.error_policy {
                    ErrorPolicy::Abort => return Err(line_error),
                    ErrorPolicy::Skip => {
                        warn!(
                            line = line_error.line_number,
                            error = %line_error.error,
                            "Skipping line that failed to decode"
                        );
                        report.errors.push(line_error);
                    }
                }
            }
        }
    }

    report.records = aggregator.finish();
    info!(
        lines_read = report.lines_read,
        lines_decoded = report.lines_decoded,
        lines_failed = report.errors.len(),
        keys = report.records.len(),
        "Decoding completed"
    );
    Ok(report)
}
