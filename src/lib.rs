//! Decoder for TPS attendance record exports
//!
//! This crate turns colon-delimited attendance exports into structured
//! per-employee records. Each line carries a record tag (`A1` header, `A2`
//! to `A4` day blocks for the three thirds of a month), a composite key and
//! a payload; day-block payloads pack several days together, which are split
//! apart at their weekday markers and decoded into fixed schemas.
//!
//! # Example
//!
//! ```
//! use tps_decoder::config::DecoderConfig;
//! use tps_decoder::decoding::decode_lines;
//! use tps_decoder::models::{PeriodLabel, RecordTag};
//! use tps_decoder::source::lines_from_str;
//!
//! let text = "A2:EMP001:K2:1:0:月:0:540:1080:60::480:0:0:15\n";
//! let report = decode_lines(lines_from_str(text), &DecoderConfig::default()).unwrap();
//!
//! let blocks = report.records.get("EMP001").unwrap()
//!     .day_blocks(RecordTag::DayBlockFirstThird)
//!     .unwrap();
//! assert_eq!(blocks.period_label, PeriodLabel::FirstThird);
//! assert_eq!(blocks.day_records[0].work_late_overtime_mins, 15);
//! ```

#![warn(missing_docs)]

pub mod api;
pub mod cli;
pub mod config;
pub mod decoding;
pub mod error;
pub mod models;
pub mod source;
