//! Configuration types for the decoder.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML configuration file. Every field has a
//! default, so a partial file (or no file) is valid.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::models::{PeriodLabel, RecordTag};

/// Encoding of TPS exports that carry no byte order mark and are not UTF-8.
pub const DEFAULT_ENCODING: &str = "windows-31j";

/// What to do when a header line has more tokens than the schema.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderStrictness {
    /// Reject the line with a schema mismatch.
    Strict,
    /// Ignore the extra tokens and flag the header as not length-valid.
    #[default]
    Lenient,
}

/// How the `A4` period label is chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinalPeriod {
    /// Always `21_30`.
    Thirty,
    /// Always `21_31`.
    #[default]
    ThirtyOne,
    /// From the header's target year-month; `21_31` when it is unknown.
    Calendar,
}

impl FinalPeriod {
    /// Returns the label used before any header is consulted.
    pub fn initial_label(&self) -> PeriodLabel {
        match self {
            FinalPeriod::Thirty => PeriodLabel::FinalThirty,
            FinalPeriod::ThirtyOne | FinalPeriod::Calendar => PeriodLabel::FinalThirtyOne,
        }
    }
}

/// What the pipeline does when a line fails to decode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorPolicy {
    /// Log the failure, record it in the report and continue.
    #[default]
    Skip,
    /// Stop at the first failing line.
    Abort,
}

/// Input files picked by `--slim` and the default run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetPaths {
    /// The small sample export.
    pub slim: PathBuf,
    /// The full export.
    pub full: PathBuf,
}

impl Default for DatasetPaths {
    fn default() -> Self {
        Self {
            slim: PathBuf::from("./data/mock/data_small.csv"),
            full: PathBuf::from("./data/mock/data.csv"),
        }
    }
}

/// The complete decoder configuration.
///
/// # Example
///
/// ```
/// use tps_decoder::config::{DecoderConfig, FinalPeriod, HeaderStrictness};
///
/// let config = DecoderConfig::from_yaml_str("final_period: calendar\n").unwrap();
/// assert_eq!(config.final_period, FinalPeriod::Calendar);
/// assert_eq!(config.header_strictness, HeaderStrictness::Lenient);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    /// Header schema overflow policy.
    pub header_strictness: HeaderStrictness,
    /// `A4` period label policy.
    pub final_period: FinalPeriod,
    /// Per-line failure policy.
    pub error_policy: ErrorPolicy,
    /// Tags to decode; lines with other tags are passed over.
    pub record_tags: Vec<RecordTag>,
    /// Input files for the command line tool.
    pub datasets: DatasetPaths,
    /// Encoding label for exports that are not UTF-8.
    pub encoding: String,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            header_strictness: HeaderStrictness::default(),
            final_period: FinalPeriod::default(),
            error_policy: ErrorPolicy::default(),
            record_tags: RecordTag::ALL.to_vec(),
            datasets: DatasetPaths::default(),
            encoding: DEFAULT_ENCODING.to_string(),
        }
    }
}

impl DecoderConfig {
    /// Parses a configuration from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Returns true if lines tagged `tag` should be decoded.
    pub fn accepts(&self, tag: RecordTag) -> bool {
        self.record_tags.contains(&tag)
    }
}
