//! Raw input line model.

use serde::{Deserialize, Serialize};

/// One line of a TPS export, as handed over by the line source.
///
/// # Example
///
/// ```
/// use tps_decoder::models::RawLine;
///
/// let line = RawLine::new(1, "A2:EMP001:K2:1:0:月");
/// assert_eq!(line.line_number, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawLine {
    /// The 1-based physical line number.
    pub line_number: usize,
    /// The decoded line text, surrounding whitespace removed.
    pub text: String,
}

impl RawLine {
    /// Creates a raw line.
    pub fn new(line_number: usize, text: impl Into<String>) -> Self {
        Self {
            line_number,
            text: text.into(),
        }
    }
}
