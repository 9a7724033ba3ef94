//! Per-day attendance record model.

use serde::{Deserialize, Serialize};

/// One calendar day of attendance, decoded from an adjusted day block.
///
/// Minute fields default to `0` when absent; the optional numeric fields
/// default to `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRecord {
    /// Day of the month as written in the export.
    pub day: String,
    /// Unlabelled numeric field following the day.
    pub reserved_2: i64,
    /// Day-of-week label (`月`..`日`).
    pub day_of_week: String,
    /// Unlabelled optional numeric field.
    pub reserved_4: Option<i64>,
    /// Start of work, in minutes.
    pub start_working_time_mins: i64,
    /// End of work, in minutes.
    pub end_working_time_mins: i64,
    /// Break length, in minutes.
    pub break_time_mins: i64,
    /// Notification category for the day (leave, absence, ...).
    pub day_notification_category: Option<String>,
    /// Worked minutes.
    pub work_time_mins: i64,
    /// Overtime minutes.
    pub work_overtime_mins: i64,
    /// Late-night overtime minutes.
    pub work_late_overtime_mins: i64,
    /// Unlabelled optional numeric field.
    pub reserved_12: Option<i64>,
    /// Free-text remarks; absorbs any overflow tokens.
    pub notes: Option<String>,
}
