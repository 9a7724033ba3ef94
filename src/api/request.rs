//! Request types for the decoder API.
//!
//! This module defines the JSON request structures for the `/decode` endpoint.

use serde::{Deserialize, Serialize};

use crate::config::{DecoderConfig, ErrorPolicy, FinalPeriod, HeaderStrictness};
use crate::models::RecordTag;

/// Request body for the `/decode` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecodeRequest {
    /// The export text, one record per line.
    pub text: String,
    /// Per-request overrides of the server configuration.
    #[serde(default)]
    pub options: DecodeOptions,
}

/// Decoder options a request may override.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DecodeOptions {
    /// Header schema overflow policy.
    #[serde(default)]
    pub header_strictness: Option<HeaderStrictness>,
    /// `A4` period label policy.
    #[serde(default)]
    pub final_period: Option<FinalPeriod>,
    /// Per-line failure policy.
    #[serde(default)]
    pub error_policy: Option<ErrorPolicy>,
    /// Tags to decode.
    #[serde(default)]
    pub record_tags: Option<Vec<RecordTag>>,
}

impl DecodeOptions {
    /// Returns `base` with the options set in this request applied.
    pub fn apply(self, base: &DecoderConfig) -> DecoderConfig {
        DecoderConfig {
            header_strictness: self.header_strictness.unwrap_or(base.header_strictness),
            final_period: self.final_period.unwrap_or(base.final_period),
            error_policy: self.error_policy.unwrap_or(base.error_policy),
            record_tags: self.record_tags.unwrap_or_else(|| base.record_tags.clone()),
            datasets: base.datasets.clone(),
            encoding: base.encoding.clone(),
        }
    }
}
