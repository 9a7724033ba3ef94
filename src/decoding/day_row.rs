//! Day row decoding.
//!
//! An adjusted day block is zipped onto [`DAY_SCHEMA`]. Tokens past the last
//! slot are merged into the trailing notes field, which is how remarks that
//! contain the delimiter are put back together without disturbing the
//! numeric fields before them.

use crate::error::{DecodeError, DecodeResult};
use crate::models::{DAY_SCHEMA, DayRecord, FieldKind};

/// Fits a block to the day schema length.
///
/// Longer blocks have every non-empty token from the last slot onward
/// concatenated into that slot; shorter blocks are padded with `None`.
///
/// # Example
///
/// ```
/// use tps_decoder::decoding::fit_day_slots;
///
/// let mut block = vec!["x"; 12];
/// block.extend(["see ", "", "note"]);
/// let slots = fit_day_slots(&block);
/// assert_eq!(slots.len(), 13);
/// assert_eq!(slots[12].as_deref(), Some("see note"));
/// ```
pub fn fit_day_slots(block: &[&str]) -> Vec<Option<String>> {
    let width = DAY_SCHEMA.len();
    let last = width - 1;

    if block.len() > width {
        let notes: String = block[last..].iter().filter(|t| !t.is_empty()).copied().collect();
        block[..last]
            .iter()
            .map(|t| Some(t.to_string()))
            .chain(std::iter::once(Some(notes)))
            .collect()
    } else {
        block
            .iter()
            .map(|t| Some(t.to_string()))
            .chain(std::iter::repeat(None))
            .take(width)
            .collect()
    }
}

/// Decodes one adjusted day block.
///
/// # Errors
///
/// Returns [`DecodeError::InvalidField`] if a numeric slot holds a value
/// that is not an integer, or if the required numeric slot is empty.
///
/// # Example
///
/// ```
/// use tps_decoder::decoding::decode_day_row;
///
/// let block = ["3", "0", "水", "", "540", "1080", "60", "", "480", "0", "15", "", "remote"];
/// let day = decode_day_row(&block).unwrap();
/// assert_eq!(day.day_of_week, "水");
/// assert_eq!(day.work_time_mins, 480);
/// assert_eq!(day.work_late_overtime_mins, 15);
/// assert_eq!(day.reserved_4, None);
/// assert_eq!(day.notes.as_deref(), Some("remote"));
/// ```
pub fn decode_day_row(block: &[&str]) -> DecodeResult<DayRecord> {
    let slots = fit_day_slots(block);
    let text = |index: usize| slots[index].clone();
    let integer = |index: usize| parse_integer(index, slots[index].as_deref());
    let minutes = |index: usize| -> DecodeResult<i64> {
        debug_assert_eq!(DAY_SCHEMA[index].kind, FieldKind::Minutes);
        Ok(integer(index)?.unwrap_or(0))
    };

    Ok(DayRecord {
        day: text(0).unwrap_or_default(),
        reserved_2: integer(1)?.ok_or_else(|| DecodeError::InvalidField {
            field: DAY_SCHEMA[1].name.to_string(),
            value: text(1).unwrap_or_default(),
        })?,
        day_of_week: text(2).unwrap_or_default(),
        reserved_4: integer(3)?,
        start_working_time_mins: minutes(4)?,
        end_working_time_mins: minutes(5)?,
        break_time_mins: minutes(6)?,
        day_notification_category: text(7),
        work_time_mins: minutes(8)?,
        work_overtime_mins: minutes(9)?,
        work_late_overtime_mins: minutes(10)?,
        reserved_12: integer(11)?,
        notes: text(12),
    })
}

/// Parses a numeric slot; absent and empty tokens are `None`.
fn parse_integer(index: usize, token: Option<&str>) -> DecodeResult<Option<i64>> {
    let Some(token) = token.map(str::trim).filter(|t| !t.is_empty()) else {
        return Ok(None);
    };
    token
        .parse::<i64>()
        .map(Some)
        .map_err(|_| DecodeError::InvalidField {
            field: DAY_SCHEMA[index].name.to_string(),
            value: token.to_string(),
        })
}
