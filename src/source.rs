//! Line source for TPS export files.
//!
//! Reads an export into numbered [`RawLine`]s. Exports are usually
//! Shift_JIS (Windows code page 932); a byte order mark or bytes that are
//! valid UTF-8 take precedence over the configured encoding. Malformed
//! sequences are replaced rather than rejected.

use std::fs;
use std::path::Path;

use encoding_rs::{Encoding, UTF_8};
use tracing::{debug, warn};

use crate::config::DEFAULT_ENCODING;
use crate::error::{DecodeError, DecodeResult};
use crate::models::RawLine;

/// The lines of an export and how its bytes were decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceInput {
    /// The numbered lines.
    pub lines: Vec<RawLine>,
    /// Name of the encoding actually used, e.g. `"Shift_JIS"`.
    pub encoding: &'static str,
    /// True if malformed byte sequences were replaced.
    pub had_errors: bool,
}

/// Looks up an encoding by its WHATWG label, e.g. `"windows-31j"`.
///
/// # Errors
///
/// Returns [`DecodeError::UnknownEncoding`] for an unknown label.
pub fn encoding_for_label(label: &str) -> DecodeResult<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes()).ok_or_else(|| DecodeError::UnknownEncoding {
        label: label.to_string(),
    })
}

/// Decodes raw export bytes.
///
/// A byte order mark selects its encoding; otherwise valid UTF-8 is read as
/// UTF-8 and anything else with `fallback`. Returns the text, the encoding
/// used and whether replacements were made.
///
/// # Example
///
/// ```
/// use tps_decoder::source::{decode_bytes, encoding_for_label};
///
/// let sjis = encoding_for_label("windows-31j").unwrap();
/// let (text, used, had_errors) = decode_bytes(b"A2:K:\x8c\x8e", sjis);
/// assert_eq!(text, "A2:K:月");
/// assert_eq!(used.name(), "Shift_JIS");
/// assert!(!had_errors);
/// ```
pub fn decode_bytes(bytes: &[u8], fallback: &'static Encoding) -> (String, &'static Encoding, bool) {
    let encoding = if Encoding::for_bom(bytes).is_none() && std::str::from_utf8(bytes).is_ok() {
        UTF_8
    } else {
        fallback
    };
    let (text, used, had_errors) = encoding.decode(bytes);
    (text.into_owned(), used, had_errors)
}

/// Reads and numbers the lines of an export file.
///
/// `encoding` is the label used when the file has no byte order mark and
/// is not valid UTF-8.
///
/// # Errors
///
/// Returns [`DecodeError::UnknownEncoding`] for an unknown label and
/// [`DecodeError::Io`] if the file cannot be read.
pub fn read_input<P: AsRef<Path>>(path: P, encoding: &str) -> DecodeResult<SourceInput> {
    let path = path.as_ref();
    let fallback = encoding_for_label(encoding)?;
    let bytes = fs::read(path).map_err(|e| DecodeError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    let (text, used, had_errors) = decode_bytes(&bytes, fallback);
    if had_errors {
        warn!(
            path = %path.display(),
            encoding = used.name(),
            "Input contains byte sequences invalid in its encoding; they were replaced"
        );
    }

    let lines = lines_from_str(&text);
    debug!(
        path = %path.display(),
        encoding = used.name(),
        lines = lines.len(),
        "Read input file"
    );
    Ok(SourceInput {
        lines,
        encoding: used.name(),
        had_errors,
    })
}

/// Reads and numbers the lines of an export file using the default
/// encoding.
///
/// # Errors
///
/// Returns [`DecodeError::Io`] if the file cannot be read.
pub fn read_lines<P: AsRef<Path>>(path: P) -> DecodeResult<Vec<RawLine>> {
    read_input(path, DEFAULT_ENCODING).map(|input| input.lines)
}

/// Splits text into numbered lines.
///
/// Lines are numbered by physical position starting at 1. Surrounding
/// whitespace and a leading byte order mark are removed; blank lines are
/// skipped but still counted.
///
/// # Example
///
/// ```
/// use tps_decoder::source::lines_from_str;
///
/// let lines = lines_from_str("A1:K:x\n\n  A2:K:y  \r\n");
/// assert_eq!(lines.len(), 2);
/// assert_eq!(lines[1].line_number, 3);
/// assert_eq!(lines[1].text, "A2:K:y");
/// ```
pub fn lines_from_str(text: &str) -> Vec<RawLine> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    text.lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
        .map(|(line_number, line)| RawLine::new(line_number, line))
        .collect()
}
