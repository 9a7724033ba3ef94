//! Core data models for the TPS decoder.
//!
//! This module contains the input line type, the record tags, the two
//! positional schemas and the decoded output structures.

mod day_record;
mod header_record;
mod raw_line;
mod record_tag;
mod result_set;
mod schema;

pub use day_record::DayRecord;
pub use header_record::{HeaderEntry, HeaderRecord};
pub use raw_line::RawLine;
pub use record_tag::{PeriodLabel, RecordTag};
pub use result_set::{DayBlockGroup, EmployeeRecordGroup, RecordEntry, ResultSet};
pub use schema::{DAY_SCHEMA, FieldKind, FieldSpec, HEADER_SCHEMA, header_mandatory_fields};
