//! Record tag and period label types.
//!
//! Every line of a TPS export starts with a record tag (`A1`..`A4`) that
//! decides how its payload is decoded. Day-block tags also carry the third
//! of the month the line covers, expressed as a [`PeriodLabel`].

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::DecodeError;

/// The record type of a line.
///
/// # Example
///
/// ```
/// use tps_decoder::models::RecordTag;
///
/// let tag: RecordTag = "A3".parse().unwrap();
/// assert_eq!(tag, RecordTag::DayBlockSecondThird);
/// assert!(tag.is_day_block());
/// assert_eq!(tag.to_string(), "A3");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RecordTag {
    /// `A1`: fixed-width header for one employee and period.
    #[serde(rename = "A1")]
    Header,
    /// `A2`: day blocks for days 1 to 10.
    #[serde(rename = "A2")]
    DayBlockFirstThird,
    /// `A3`: day blocks for days 11 to 20.
    #[serde(rename = "A3")]
    DayBlockSecondThird,
    /// `A4`: day blocks from day 21 to the end of the month.
    #[serde(rename = "A4")]
    DayBlockFinalThird,
}

impl RecordTag {
    /// All known tags in source order.
    pub const ALL: [RecordTag; 4] = [
        RecordTag::Header,
        RecordTag::DayBlockFirstThird,
        RecordTag::DayBlockSecondThird,
        RecordTag::DayBlockFinalThird,
    ];

    /// Returns the source token for this tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordTag::Header => "A1",
            RecordTag::DayBlockFirstThird => "A2",
            RecordTag::DayBlockSecondThird => "A3",
            RecordTag::DayBlockFinalThird => "A4",
        }
    }

    /// Returns true for the `A2`..`A4` tags.
    pub fn is_day_block(&self) -> bool {
        !matches!(self, RecordTag::Header)
    }

    /// Returns the period label for a day-block tag.
    ///
    /// `final_label` is used for `A4`, whose label depends on the month.
    /// Returns `None` for the header tag.
    ///
    /// # Example
    ///
    /// ```
    /// use tps_decoder::models::{PeriodLabel, RecordTag};
    ///
    /// let label = RecordTag::DayBlockFirstThird.period_label(PeriodLabel::FinalThirtyOne);
    /// assert_eq!(label, Some(PeriodLabel::FirstThird));
    /// assert_eq!(RecordTag::Header.period_label(PeriodLabel::FinalThirtyOne), None);
    /// ```
    pub fn period_label(&self, final_label: PeriodLabel) -> Option<PeriodLabel> {
        match self {
            RecordTag::Header => None,
            RecordTag::DayBlockFirstThird => Some(PeriodLabel::FirstThird),
            RecordTag::DayBlockSecondThird => Some(PeriodLabel::SecondThird),
            RecordTag::DayBlockFinalThird => Some(final_label),
        }
    }
}

impl fmt::Display for RecordTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordTag {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RecordTag::ALL
            .into_iter()
            .find(|tag| tag.as_str() == s)
            .ok_or_else(|| DecodeError::UnrecognizedTag { tag: s.to_string() })
    }
}

/// The third of a month covered by a day-block group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PeriodLabel {
    /// Days 1 to 10.
    #[serde(rename = "1_10")]
    FirstThird,
    /// Days 11 to 20.
    #[serde(rename = "11_20")]
    SecondThird,
    /// Days 21 to 30.
    #[serde(rename = "21_30")]
    FinalThirty,
    /// Days 21 to 31.
    #[serde(rename = "21_31")]
    FinalThirtyOne,
}

impl PeriodLabel {
    /// Returns the label text, e.g. `"1_10"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            PeriodLabel::FirstThird => "1_10",
            PeriodLabel::SecondThird => "11_20",
            PeriodLabel::FinalThirty => "21_30",
            PeriodLabel::FinalThirtyOne => "21_31",
        }
    }

    /// Picks the final-third label for a target year-month.
    ///
    /// Accepts `YYYYMM` as well as `YYYY-MM` or `YYYY/MM`. Months with 31
    /// days map to [`PeriodLabel::FinalThirtyOne`], all others to
    /// [`PeriodLabel::FinalThirty`]. Returns `None` when the value is not a
    /// valid year and month.
    ///
    /// # Example
    ///
    /// ```
    /// use tps_decoder::models::PeriodLabel;
    ///
    /// assert_eq!(PeriodLabel::final_for_year_month("202401"), Some(PeriodLabel::FinalThirtyOne));
    /// assert_eq!(PeriodLabel::final_for_year_month("2024-04"), Some(PeriodLabel::FinalThirty));
    /// assert_eq!(PeriodLabel::final_for_year_month("soon"), None);
    /// ```
    pub fn final_for_year_month(value: &str) -> Option<PeriodLabel> {
        let digits: String = value.chars().filter(|c| c.is_ascii_digit()).collect();
        if digits.len() != 6 {
            return None;
        }
        let year: i32 = digits[..4].parse().ok()?;
        let month: u32 = digits[4..].parse().ok()?;

        match days_in_month(year, month)? {
            31 => Some(PeriodLabel::FinalThirtyOne),
            _ => Some(PeriodLabel::FinalThirty),
        }
    }
}

impl fmt::Display for PeriodLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn days_in_month(year: i32, month: u32) -> Option<u32> {
    NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some(next.pred_opt()?.day())
}
