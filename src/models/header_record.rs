//! Header (`A1`) record model.
//!
//! This module defines the [`HeaderRecord`] decoded from the 26 header slots
//! and the [`HeaderEntry`] that keeps it together with its audit metadata.

use serde::{Deserialize, Serialize};

use super::schema::HEADER_SCHEMA;

/// The fixed-field header of one employee and reporting period.
///
/// The nine leading fields are mandatory. The `reserved_*` slots carry no
/// known meaning but are kept so every position survives decoding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderRecord {
    /// Slot 1: composite id fragment.
    pub record_composite_id: String,
    /// Slot 2: second composite id fragment.
    pub composite_id_part: String,
    /// Slot 3: dispatch code.
    pub dispatch_code: String,
    /// Slot 4: contract code.
    pub contract_code: String,
    /// Slot 5: staff identifier.
    pub staff_id: String,
    /// Slot 6: target year-month, e.g. `202401`.
    pub target_year_month: String,
    /// Slot 7: date period range.
    pub date_period_range: String,
    /// Slot 8: dispatch source.
    pub dispatch_src: String,
    /// Slot 9: dispatch name.
    pub dispatch_name: String,
    /// Slot 10: reserved.
    pub reserved_10: Option<String>,
    /// Slot 11: staff name.
    pub staff_name: Option<String>,
    /// Slot 12: reserved.
    pub reserved_12: Option<String>,
    /// Slot 13: reserved.
    pub reserved_13: Option<String>,
    /// Slot 14: total work time summary.
    pub total_work_time: Option<String>,
    /// Slot 15: overtime total summary.
    pub overtime_total_time: Option<String>,
    /// Slot 16: reserved.
    pub reserved_16: Option<String>,
    /// Slot 17: reserved.
    pub reserved_17: Option<String>,
    /// Slot 18: reserved.
    pub reserved_18: Option<String>,
    /// Slot 19: reserved.
    pub reserved_19: Option<String>,
    /// Slot 20: reserved.
    pub reserved_20: Option<String>,
    /// Slot 21: reserved.
    pub reserved_21: Option<String>,
    /// Slot 22: reserved.
    pub reserved_22: Option<String>,
    /// Slot 23: reserved.
    pub reserved_23: Option<String>,
    /// Slot 24: reserved.
    pub reserved_24: Option<String>,
    /// Slot 25: approver name.
    pub approver_name: Option<String>,
    /// Slot 26: reserved.
    pub reserved_26: Option<String>,
}

impl HeaderRecord {
    /// Builds a record from slot values in [`HEADER_SCHEMA`] order.
    ///
    /// Missing slots are treated as absent; a missing mandatory slot becomes
    /// an empty string; callers check the mandatory prefix beforehand.
    pub fn from_slots(slots: Vec<Option<String>>) -> Self {
        debug_assert!(slots.len() <= HEADER_SCHEMA.len());
        let mut slots = slots.into_iter();
        let mut next = move || slots.next().flatten();

        Self {
            record_composite_id: next().unwrap_or_default(),
            composite_id_part: next().unwrap_or_default(),
            dispatch_code: next().unwrap_or_default(),
            contract_code: next().unwrap_or_default(),
            staff_id: next().unwrap_or_default(),
            target_year_month: next().unwrap_or_default(),
            date_period_range: next().unwrap_or_default(),
            dispatch_src: next().unwrap_or_default(),
            dispatch_name: next().unwrap_or_default(),
            reserved_10: next(),
            staff_name: next(),
            reserved_12: next(),
            reserved_13: next(),
            total_work_time: next(),
            overtime_total_time: next(),
            reserved_16: next(),
            reserved_17: next(),
            reserved_18: next(),
            reserved_19: next(),
            reserved_20: next(),
            reserved_21: next(),
            reserved_22: next(),
            reserved_23: next(),
            reserved_24: next(),
            approver_name: next(),
            reserved_26: next(),
        }
    }
}

/// A decoded header together with the bookkeeping kept for auditing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderEntry {
    /// The line the header was read from.
    pub line_number: usize,
    /// The payload tokens as split from the line.
    pub raw_tokens: Vec<String>,
    /// The decoded fields.
    pub record: HeaderRecord,
    /// Number of payload tokens seen.
    pub token_count: usize,
    /// Number of slots in the header schema.
    pub expected_token_count: usize,
    /// True when `token_count == expected_token_count`.
    pub length_valid: bool,
}
