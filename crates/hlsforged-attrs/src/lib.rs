//! # hlsforged-attrs
//!
//! Typed attribute-list grammar for HLS playlist tags.
//!
//! An attribute list is the comma-separated `NAME=value` body of tags such as
//! `#EXT-X-STREAM-INF` or `#EXT-X-KEY`. Each value is classified into exactly
//! one of seven kinds (integer, hexadecimal bytes, unsigned float, signed
//! float, quoted string, enumerated token, resolution) and read back through
//! typed accessors that report a missing attribute separately from a value of
//! the wrong kind.
//!
//! ## Quick Start
//!
//! ```
//! use hlsforged_attrs::{AttributeList, ValueKind, AttrError};
//!
//! let attrs = AttributeList::parse("BANDWIDTH=1280000,RESOLUTION=720x480").unwrap();
//! assert_eq!(attrs.integer("BANDWIDTH").unwrap(), 1280000);
//! assert_eq!(attrs.resolution("RESOLUTION").unwrap(), (720, 480));
//!
//! // Wrong kind is a distinct error from a missing attribute.
//! assert!(matches!(
//!     attrs.string("BANDWIDTH"),
//!     Err(AttrError::TypeMismatch { expected: ValueKind::QuotedString, .. })
//! ));
//! ```
//!
//! ## Encoding
//!
//! ```
//! use hlsforged_attrs::{AttributeList, AttributeValue};
//!
//! let attrs = AttributeList::new()
//!     .with("METHOD", AttributeValue::enumerated("AES-128"))
//!     .with("URI", "https://example.com/key");
//! assert_eq!(attrs.encode().unwrap(), "METHOD=AES-128,URI=\"https://example.com/key\"");
//! ```

pub mod error;
pub mod lexer;
pub mod list;
pub mod value;

pub use error::{AttrError, OptionalAttr, Result};
pub use list::AttributeList;
pub use value::{AttributeValue, ValueKind};
