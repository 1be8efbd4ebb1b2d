use super::ByteRange;
use crate::error::Result;
use crate::tags::attr;
use hlsforged_attrs::{AttributeList, OptionalAttr};

/// Media initialization section from `#EXT-X-MAP`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Map {
    pub uri: String,
    /// Sub-range of the resource, carried as a quoted `BYTERANGE` attribute.
    pub byte_range: Option<ByteRange>,
}

impl Map {
    /// Create a map covering the whole resource.
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            byte_range: None,
        }
    }

    /// Parse the attribute list of an `#EXT-X-MAP` tag.
    pub fn parse(body: &str) -> Result<Self> {
        Self::from_attributes(&AttributeList::parse(body)?)
    }

    pub(crate) fn from_attributes(attrs: &AttributeList) -> Result<Self> {
        Ok(Self {
            uri: attrs.string(attr::URI)?.to_string(),
            byte_range: attrs
                .string(attr::BYTERANGE)
                .optional()?
                .map(ByteRange::parse)
                .transpose()?,
        })
    }

    /// Attribute list for an `#EXT-X-MAP` tag.
    pub fn to_attributes(&self) -> AttributeList {
        let mut attrs = AttributeList::new().with(attr::URI, self.uri.as_str());
        attrs.insert_opt(attr::BYTERANGE, self.byte_range.map(|r| r.to_string()));
        attrs
    }
}
