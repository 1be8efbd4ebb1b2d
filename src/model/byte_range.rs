use crate::error::{Error, Result};
use std::fmt;

/// A sub-range of a resource, written `length[@start]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ByteRange {
    /// Number of bytes.
    pub length: u64,
    /// Offset of the first byte. `None` means the range follows the
    /// previous one.
    pub start: Option<u64>,
}

impl ByteRange {
    /// Create a byte range.
    pub fn new(length: u64, start: Option<u64>) -> Self {
        Self { length, start }
    }

    /// Parse `length[@start]`.
    pub fn parse(text: &str) -> Result<Self> {
        let (length, start) = match text.split_once('@') {
            Some((length, start)) => (length, Some(start)),
            None => (text, None),
        };

        let length = parse_offset(length, "range length")?;
        let start = start.map(|s| parse_offset(s, "range start")).transpose()?;

        Ok(Self { length, start })
    }

    /// Whether the range has a known start and a non-zero length, so that a
    /// following open range can continue from its end.
    pub fn closed(&self) -> bool {
        self.length > 0 && self.start.is_some()
    }

    /// Offset one past the last byte, when the start is known.
    pub fn end(&self) -> Option<u64> {
        self.start.and_then(|start| start.checked_add(self.length))
    }
}

fn parse_offset(text: &str, what: &str) -> Result<u64> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::syntax(format!("failed to parse {}", what)));
    }
    text.parse()
        .map_err(|_| Error::syntax(format!("failed to parse {}", what)))
}

impl fmt::Display for ByteRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.start {
            Some(start) => write!(f, "{}@{}", self.length, start),
            None => write!(f, "{}", self.length),
        }
    }
}
