//! Line classification.
//!
//! Splits a raw line into its record tag, composite key and payload. The
//! payload is cut from the original text by offset rather than rebuilt from
//! split tokens, so delimiters inside it survive untouched.

use crate::error::{DecodeError, DecodeResult};
use crate::models::RecordTag;

/// The field delimiter of a TPS export.
pub const DELIMITER: char = ':';

/// The three parts of a line, with the tag still unparsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineParts<'a> {
    /// The first token.
    pub tag: &'a str,
    /// The second token.
    pub key: &'a str,
    /// Everything after `tag:key:`.
    pub payload: &'a str,
}

/// A line whose tag has been recognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifiedLine<'a> {
    /// The record tag.
    pub tag: RecordTag,
    /// The composite key.
    pub key: &'a str,
    /// Everything after `tag:key:`.
    pub payload: &'a str,
}

/// Splits a line into tag, key and payload.
///
/// The payload starts right after the `tag:key` prefix; one leading
/// delimiter is removed from it.
///
/// # Errors
///
/// Returns [`DecodeError::MalformedRecord`] if the line has fewer than two
/// delimited tokens.
///
/// # Example
///
/// ```
/// use tps_decoder::decoding::split_line;
///
/// let parts = split_line("A2:EMP001:K2:note: with colon").unwrap();
/// assert_eq!(parts.tag, "A2");
/// assert_eq!(parts.key, "EMP001");
/// assert_eq!(parts.payload, "K2:note: with colon");
/// ```
pub fn split_line(text: &str) -> DecodeResult<LineParts<'_>> {
    let mut tokens = text.split(DELIMITER);
    let tag = tokens.next().unwrap_or_default();
    let key = tokens.next().ok_or_else(|| DecodeError::MalformedRecord {
        message: format!("expected '<tag>{DELIMITER}<key>' prefix"),
    })?;

    // Both tokens are prefixes of `text`, separated by one delimiter.
    let offset = tag.len() + DELIMITER.len_utf8() + key.len();
    let rest = &text[offset..];
    let payload = rest.strip_prefix(DELIMITER).unwrap_or(rest);

    Ok(LineParts { tag, key, payload })
}

/// Splits a line and parses its tag.
///
/// # Errors
///
/// Returns [`DecodeError::MalformedRecord`] for a missing key and
/// [`DecodeError::UnrecognizedTag`] for a tag outside `A1`..`A4`.
///
/// # Example
///
/// ```
/// use tps_decoder::decoding::classify_line;
/// use tps_decoder::models::RecordTag;
///
/// let line = classify_line("A1:EMP001:K2:D01").unwrap();
/// assert_eq!(line.tag, RecordTag::Header);
/// assert_eq!(line.key, "EMP001");
/// assert!(classify_line("B1:EMP001").is_err());
/// ```
pub fn classify_line(text: &str) -> DecodeResult<ClassifiedLine<'_>> {
    let parts = split_line(text)?;
    let tag = parts.tag.parse::<RecordTag>()?;

    Ok(ClassifiedLine {
        tag,
        key: parts.key,
        payload: parts.payload,
    })
}

/// Splits a payload or line on the delimiter.
pub fn tokenize(text: &str) -> Vec<&str> {
    text.split(DELIMITER).collect()
}
