//! Decoding logic for TPS attendance exports.
//!
//! This module contains the steps that turn raw lines into a [`ResultSet`]:
//! line classification, header decoding, day boundary detection, day block
//! adjustment, day row decoding and aggregation by composite key, plus the
//! pipeline that runs them line by line and a raw row inspector.
//!
//! [`ResultSet`]: crate::models::ResultSet

mod aggregator;
mod day_block;
mod day_boundary;
mod day_row;
mod header_decoder;
mod line_classifier;
mod pipeline;
mod raw_rows;

pub use aggregator::{DecodedDayBlocks, DecodedLine, DecodedRecord, RecordAggregator};
pub use day_block::{RELOCATED_SLOT, adjust_day_block};
pub use day_boundary::{DAY_ANCHORS, extract_day_blocks, is_day_anchor, scan_day_boundaries};
pub use day_row::{decode_day_row, fit_day_slots};
pub use header_decoder::{HeaderDecodeResult, decode_header};
pub use line_classifier::{
    ClassifiedLine, DELIMITER, LineParts, classify_line, split_line, tokenize,
};
pub use pipeline::{DecodeReport, decode_line, decode_lines};
pub use raw_rows::{RawRow, RawRowIndex, group_rows, select_rows};
