//! Error types for hlsforged-attrs.

use crate::value::ValueKind;
use thiserror::Error;

/// Result type for attribute-list operations.
pub type Result<T> = std::result::Result<T, AttrError>;

/// Error type for attribute-list parsing, access, and encoding.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AttrError {
    /// No `NAME=` token at the given byte offset.
    #[error("invalid attribute name at offset {offset}")]
    BadAttrName {
        /// Byte offset into the attribute-list body.
        offset: usize,
    },

    /// The value following `NAME=` matches none of the value kinds.
    #[error("invalid attribute syntax for {name:?}")]
    BadAttrSyntax {
        /// Name of the attribute whose value failed to parse.
        name: String,
    },

    /// A required attribute is absent.
    #[error("missing required attribute {0:?}")]
    MissingRequiredAttribute(String),

    /// An attribute is present but holds a different kind of value.
    #[error("expected {expected} for attribute {name:?}, but got {actual}")]
    TypeMismatch {
        /// Attribute name.
        name: String,
        /// Kind the caller asked for.
        expected: ValueKind,
        /// Kind that was actually parsed.
        actual: ValueKind,
    },

    /// A value cannot be written in its kind's textual form.
    #[error("illegal {kind}: {value:?}")]
    IllegalValue {
        /// Kind of the offending value.
        kind: ValueKind,
        /// Debug rendering of the offending value.
        value: String,
    },

    /// An attribute name cannot be written (must match `[A-Z0-9-]+`).
    #[error("illegal attribute name {0:?}")]
    IllegalName(String),
}

impl AttrError {
    /// Create a missing-attribute error.
    pub fn missing(name: impl Into<String>) -> Self {
        Self::MissingRequiredAttribute(name.into())
    }

    /// Whether this error reports an absent attribute.
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::MissingRequiredAttribute(_))
    }
}

/// Turns "missing" into `None` for optional attributes.
///
/// Kind mismatches still surface as errors, so an optional attribute with a
/// malformed value is never silently dropped.
pub trait OptionalAttr<T> {
    /// Map [`AttrError::MissingRequiredAttribute`] to `Ok(None)`.
    fn optional(self) -> Result<Option<T>>;
}

impl<T> OptionalAttr<T> for Result<T> {
    fn optional(self) -> Result<Option<T>> {
        match self {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.is_missing() => Ok(None),
            Err(err) => Err(err),
        }
    }
}
