//! Error types for the TPS decoder.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while decoding attendance records.

use serde::Serialize;
use thiserror::Error;

/// The main error type for the TPS decoder.
///
/// Decoding steps return this error type; per-line failures are wrapped in
/// [`LineError`] so the offending line can be reported.
///
/// # Example
///
/// ```
/// use tps_decoder::error::DecodeError;
///
/// let error = DecodeError::UnrecognizedTag {
///     tag: "B9".to_string(),
/// };
/// assert_eq!(error.to_string(), "Unrecognized record tag: B9");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DecodeError {
    /// A line lacks the minimum `tag:key` prefix.
    #[error("Malformed record: {message}")]
    MalformedRecord {
        /// A description of what was missing.
        message: String,
    },

    /// A day block adjustment was attempted on zero tokens.
    #[error("Day block is empty")]
    EmptyBlock,

    /// The token count does not fit a fixed schema.
    #[error("Schema mismatch for {schema}: observed {observed} fields, expected {expected}")]
    SchemaMismatch {
        /// The schema being decoded (always "header").
        schema: String,
        /// The number of tokens supplied.
        observed: usize,
        /// The number of fields the schema allows or requires.
        expected: usize,
    },

    /// The record tag is not one of `A1`..`A4`.
    #[error("Unrecognized record tag: {tag}")]
    UnrecognizedTag {
        /// The tag found on the line.
        tag: String,
    },

    /// A numeric field holds a value that is not an integer.
    #[error("Invalid value for field '{field}': {value:?}")]
    InvalidField {
        /// The schema field name.
        field: String,
        /// The offending token.
        value: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The configured input encoding label is not a known encoding.
    #[error("Unknown input encoding: {label}")]
    UnknownEncoding {
        /// The label as configured.
        label: String,
    },

    /// The input file could not be read.
    #[error("Failed to read '{path}': {message}")]
    Io {
        /// The path that failed.
        path: String,
        /// The underlying I/O error message.
        message: String,
    },
}

/// A decode failure tied to the input line that caused it.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("line {line_number}: {error}")]
pub struct LineError {
    /// The 1-based line number.
    pub line_number: usize,
    /// The raw line text.
    pub raw_text: String,
    /// The underlying decode error.
    #[source]
    pub error: DecodeError,
}

/// A type alias for Results that return DecodeError.
pub type DecodeResult<T> = Result<T, DecodeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_record_displays_message() {
        let error = DecodeError::MalformedRecord {
            message: "missing composite key".to_string(),
        };
        assert_eq!(error.to_string(), "Malformed record: missing composite key");
    }

    #[test]
    fn test_schema_mismatch_displays_counts() {
        let error = DecodeError::SchemaMismatch {
            schema: "header".to_string(),
            observed: 28,
            expected: 26,
        };
        assert_eq!(
            error.to_string(),
            "Schema mismatch for header: observed 28 fields, expected 26"
        );
    }

    #[test]
    fn test_unknown_encoding_names_label() {
        let error = DecodeError::UnknownEncoding {
            label: "ebcdic-jp".to_string(),
        };
        assert_eq!(error.to_string(), "Unknown input encoding: ebcdic-jp");
    }

    #[test]
    fn test_invalid_field_quotes_value() {
        let error = DecodeError::InvalidField {
            field: "work_time_mins".to_string(),
            value: "abc".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid value for field 'work_time_mins': \"abc\""
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = DecodeError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_line_error_prefixes_line_number() {
        let error = LineError {
            line_number: 7,
            raw_text: "A9:X".to_string(),
            error: DecodeError::UnrecognizedTag {
                tag: "A9".to_string(),
            },
        };
        assert_eq!(error.to_string(), "line 7: Unrecognized record tag: A9");
        assert!(std::error::Error::source(&error).is_some());
    }

    #[test]
    fn test_line_error_serializes_kind() {
        let error = LineError {
            line_number: 3,
            raw_text: "A1:K".to_string(),
            error: DecodeError::EmptyBlock,
        };
        let json = serde_json::to_value(&error).unwrap();
        assert_eq!(json["line_number"], 3);
        assert_eq!(json["error"]["kind"], "empty_block");
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<DecodeError>();
        assert_error::<LineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_empty_block() -> DecodeResult<()> {
            Err(DecodeError::EmptyBlock)
        }

        fn propagates_error() -> DecodeResult<()> {
            returns_empty_block()?;
            Ok(())
        }

        assert_eq!(propagates_error(), Err(DecodeError::EmptyBlock));
    }
}
