//! Header (`A1`) payload decoding.
//!
//! Header tokens are zipped positionally onto [`HEADER_SCHEMA`]. Short input
//! is padded with absent values; extra tokens are handled according to the
//! configured [`HeaderStrictness`].

use tracing::debug;

use crate::config::HeaderStrictness;
use crate::error::{DecodeError, DecodeResult};
use crate::models::{HEADER_SCHEMA, HeaderRecord, header_mandatory_fields};

/// Result of decoding a header payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderDecodeResult {
    /// The decoded header.
    pub record: HeaderRecord,
    /// Number of tokens supplied.
    pub token_count: usize,
    /// Number of slots in the header schema.
    pub expected_token_count: usize,
    /// True when the token count matches the schema exactly.
    pub length_valid: bool,
}

/// Decodes header payload tokens.
///
/// # Errors
///
/// Returns [`DecodeError::SchemaMismatch`] if fewer tokens than the
/// mandatory prefix are supplied, or if more tokens than the schema holds
/// are supplied under [`HeaderStrictness::Strict`].
///
/// # Example
///
/// ```
/// use tps_decoder::config::HeaderStrictness;
/// use tps_decoder::decoding::decode_header;
///
/// let tokens = ["K2", "EMP001", "D01", "C01", "S09", "202401", "0101-0131", "SRC", "Dispatch"];
///
/// let result = decode_header(&tokens, HeaderStrictness::Lenient).unwrap();
/// assert_eq!(result.record.target_year_month, "202401");
/// assert_eq!(result.token_count, 9);
/// assert!(!result.length_valid);
/// assert_eq!(result.record.staff_name, None);
/// ```
pub fn decode_header(
    tokens: &[&str],
    strictness: HeaderStrictness,
) -> DecodeResult<HeaderDecodeResult> {
    let expected = HEADER_SCHEMA.len();
    let mandatory = header_mandatory_fields();
    let token_count = tokens.len();

    if token_count < mandatory {
        return Err(DecodeError::SchemaMismatch {
            schema: "header".to_string(),
            observed: token_count,
            expected: mandatory,
        });
    }

    if token_count > expected {
        match strictness {
            HeaderStrictness::Strict => {
                return Err(DecodeError::SchemaMismatch {
                    schema: "header".to_string(),
                    observed: token_count,
                    expected,
                });
            }
            HeaderStrictness::Lenient => {
                debug!(
                    observed = token_count,
                    expected, "Ignoring header tokens beyond the schema"
                );
            }
        }
    }

    let slots = tokens
        .iter()
        .take(expected)
        .map(|token| Some(token.to_string()))
        .collect();

    Ok(HeaderDecodeResult {
        record: HeaderRecord::from_slots(slots),
        token_count,
        expected_token_count: expected,
        length_valid: token_count == expected,
    })
}
