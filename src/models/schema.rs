//! Positional field schemas for header and day records.
//!
//! Both record kinds are decoded by zipping tokens onto an ordered list of
//! fields. The lists are declared here once, in slot order.

/// How a schema slot is typed and what it defaults to when absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Text that must be present.
    Text,
    /// Text that defaults to `None`.
    OptionalText,
    /// An integer that must be present.
    Integer,
    /// An integer that defaults to `None`.
    OptionalInteger,
    /// A minute count that defaults to `0`.
    Minutes,
}

impl FieldKind {
    /// Returns true if the slot has no default.
    pub fn is_required(&self) -> bool {
        matches!(self, FieldKind::Text | FieldKind::Integer)
    }
}

/// One named slot of a positional schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// The field name used in output and diagnostics.
    pub name: &'static str,
    /// The slot type.
    pub kind: FieldKind,
}

const fn field(name: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec { name, kind }
}

use FieldKind::{Integer, Minutes, OptionalInteger, OptionalText, Text};

/// The `A1` header schema.
pub const HEADER_SCHEMA: [FieldSpec; 26] = [
    field("record_composite_id", Text),
    field("composite_id_part", Text),
    field("dispatch_code", Text),
    field("contract_code", Text),
    field("staff_id", Text),
    field("target_year_month", Text),
    field("date_period_range", Text),
    field("dispatch_src", Text),
    field("dispatch_name", Text),
    field("reserved_10", OptionalText),
    field("staff_name", OptionalText),
    field("reserved_12", OptionalText),
    field("reserved_13", OptionalText),
    field("total_work_time", OptionalText),
    field("overtime_total_time", OptionalText),
    field("reserved_16", OptionalText),
    field("reserved_17", OptionalText),
    field("reserved_18", OptionalText),
    field("reserved_19", OptionalText),
    field("reserved_20", OptionalText),
    field("reserved_21", OptionalText),
    field("reserved_22", OptionalText),
    field("reserved_23", OptionalText),
    field("reserved_24", OptionalText),
    field("approver_name", OptionalText),
    field("reserved_26", OptionalText),
];

/// The per-day schema shared by `A2`, `A3` and `A4` blocks.
pub const DAY_SCHEMA: [FieldSpec; 13] = [
    field("day", Text),
    field("reserved_2", Integer),
    field("day_of_week", Text),
    field("reserved_4", OptionalInteger),
    field("start_working_time_mins", Minutes),
    field("end_working_time_mins", Minutes),
    field("break_time_mins", Minutes),
    field("day_notification_category", OptionalText),
    field("work_time_mins", Minutes),
    field("work_overtime_mins", Minutes),
    field("work_late_overtime_mins", Minutes),
    field("reserved_12", OptionalInteger),
    field("notes", OptionalText),
];

/// Number of leading header slots that must be present.
pub fn header_mandatory_fields() -> usize {
    HEADER_SCHEMA
        .iter()
        .take_while(|spec| spec.kind.is_required())
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_header_schema_has_nine_mandatory_fields() {
        assert_eq!(HEADER_SCHEMA.len(), 26);
        assert_eq!(header_mandatory_fields(), 9);
        assert!(
            HEADER_SCHEMA[9..]
                .iter()
                .all(|spec| spec.kind == FieldKind::OptionalText)
        );
    }

    #[test]
    fn test_day_schema_ends_with_notes() {
        assert_eq!(DAY_SCHEMA.len(), 13);
        assert_eq!(DAY_SCHEMA[12].name, "notes");
        assert_eq!(DAY_SCHEMA[10].name, "work_late_overtime_mins");
    }

    #[test]
    fn test_field_names_are_unique() {
        let header: HashSet<_> = HEADER_SCHEMA.iter().map(|s| s.name).collect();
        let day: HashSet<_> = DAY_SCHEMA.iter().map(|s| s.name).collect();
        assert_eq!(header.len(), HEADER_SCHEMA.len());
        assert_eq!(day.len(), DAY_SCHEMA.len());
    }
}
