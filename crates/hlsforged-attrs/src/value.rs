//! Typed attribute values.

use crate::error::{AttrError, Result};
use std::fmt;

/// The seven kinds an attribute value can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ValueKind {
    /// `decimal-integer`: up to 20 decimal digits.
    Integer,
    /// `hexadecimal-sequence`: `0x`-prefixed hex digits.
    Bytes,
    /// `decimal-floating-point`: non-negative decimal.
    Float,
    /// `signed-decimal-floating-point`: optionally negative decimal.
    SignedFloat,
    /// `quoted-string`: text between double quotes.
    QuotedString,
    /// `enumerated-string`: bare token.
    Enumerated,
    /// `decimal-resolution`: `WIDTHxHEIGHT`.
    Resolution,
}

impl ValueKind {
    /// Grammar name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Integer => "decimal-integer",
            ValueKind::Bytes => "hexadecimal-sequence",
            ValueKind::Float => "decimal-floating-point",
            ValueKind::SignedFloat => "signed-decimal-floating-point",
            ValueKind::QuotedString => "quoted-string",
            ValueKind::Enumerated => "enumerated-string",
            ValueKind::Resolution => "decimal-resolution",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single typed attribute value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttributeValue {
    /// Unsigned decimal integer.
    Integer(u64),
    /// Decoded hexadecimal sequence.
    Bytes(Vec<u8>),
    /// Non-negative float.
    Float(f64),
    /// Float that may be negative.
    SignedFloat(f64),
    /// Contents of a quoted string, without the quotes.
    String(String),
    /// Bare enumerated token.
    Enum(String),
    /// Width and height.
    Resolution(u64, u64),
}

impl AttributeValue {
    /// Build an enumerated-string value.
    pub fn enumerated(token: impl Into<String>) -> Self {
        Self::Enum(token.into())
    }

    /// Build a quoted-string value.
    pub fn quoted(text: impl Into<String>) -> Self {
        Self::String(text.into())
    }

    /// The kind of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            AttributeValue::Integer(_) => ValueKind::Integer,
            AttributeValue::Bytes(_) => ValueKind::Bytes,
            AttributeValue::Float(_) => ValueKind::Float,
            AttributeValue::SignedFloat(_) => ValueKind::SignedFloat,
            AttributeValue::String(_) => ValueKind::QuotedString,
            AttributeValue::Enum(_) => ValueKind::Enumerated,
            AttributeValue::Resolution(..) => ValueKind::Resolution,
        }
    }

    /// Render this value in its textual form.
    ///
    /// Fails when the value has no legal rendering: a quoted string with a
    /// quote or line break, an enumerated token with whitespace, a comma or a
    /// quote, a negative unsigned float, or a non-finite float.
    pub fn encode(&self) -> Result<String> {
        match self {
            AttributeValue::Integer(n) => Ok(n.to_string()),
            AttributeValue::Bytes(data) => Ok(format!("0x{}", hex::encode_upper(data))),
            AttributeValue::Float(f) => {
                if !f.is_finite() || f.is_sign_negative() {
                    return Err(self.illegal());
                }
                Ok(format_float(*f))
            }
            AttributeValue::SignedFloat(f) => {
                if !f.is_finite() {
                    return Err(self.illegal());
                }
                Ok(format_float(*f))
            }
            AttributeValue::String(s) => {
                if !is_valid_quoted(s) {
                    return Err(self.illegal());
                }
                Ok(format!("\"{}\"", s))
            }
            AttributeValue::Enum(s) => {
                if !is_valid_enumerated(s) {
                    return Err(self.illegal());
                }
                Ok(s.clone())
            }
            AttributeValue::Resolution(w, h) => Ok(format!("{}x{}", w, h)),
        }
    }

    fn illegal(&self) -> AttrError {
        AttrError::IllegalValue {
            kind: self.kind(),
            value: format!("{:?}", self),
        }
    }
}

/// Shortest round-trip decimal that still reads back as a float.
///
/// An integral float gets a `.0` suffix, otherwise it would parse back as a
/// decimal integer.
pub fn format_float(f: f64) -> String {
    let text = f.to_string();
    if text.contains('.') {
        text
    } else {
        text + ".0"
    }
}

/// Whether `s` may appear between double quotes.
pub fn is_valid_quoted(s: &str) -> bool {
    !s.contains(['"', '\r', '\n'])
}

/// Whether `s` may be written as a bare enumerated token.
pub fn is_valid_enumerated(s: &str) -> bool {
    !s.chars().any(|c| c.is_whitespace() || c == ',' || c == '"')
}

impl From<u64> for AttributeValue {
    fn from(n: u64) -> Self {
        Self::Integer(n)
    }
}

impl From<u32> for AttributeValue {
    fn from(n: u32) -> Self {
        Self::Integer(u64::from(n))
    }
}

impl From<Vec<u8>> for AttributeValue {
    fn from(data: Vec<u8>) -> Self {
        Self::Bytes(data)
    }
}

impl From<&[u8]> for AttributeValue {
    fn from(data: &[u8]) -> Self {
        Self::Bytes(data.to_vec())
    }
}

impl From<String> for AttributeValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<&str> for AttributeValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<(u64, u64)> for AttributeValue {
    fn from((w, h): (u64, u64)) -> Self {
        Self::Resolution(w, h)
    }
}
