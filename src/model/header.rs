use super::{insert_yes, yes_no};
use crate::error::Result;
use crate::tags::attr;
use hlsforged_attrs::{AttributeList, AttributeValue};

/// Tags shared by media and master playlists.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Header {
    /// Declared protocol version. A playlist without `#EXT-X-VERSION` is
    /// version 1.
    pub version: u32,
    /// `#EXT-X-INDEPENDENT-SEGMENTS`
    pub independent_segments: bool,
    /// `#EXT-X-START`
    pub start: Option<Start>,
}

impl Default for Header {
    fn default() -> Self {
        Self {
            version: 1,
            independent_segments: false,
            start: None,
        }
    }
}

impl Header {
    /// Header declaring `version`.
    pub fn with_version(version: u32) -> Self {
        Self {
            version,
            ..Self::default()
        }
    }
}

/// Preferred point at which to start playing a playlist.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Start {
    /// Offset in seconds. Negative values count back from the end of the
    /// last segment.
    pub time_offset: f64,
    /// Start at the exact offset rather than the segment containing it.
    pub precise: bool,
}

impl Start {
    /// Parse the attribute list of an `#EXT-X-START` tag.
    pub fn parse(body: &str) -> Result<Self> {
        Self::from_attributes(&AttributeList::parse(body)?)
    }

    pub(crate) fn from_attributes(attrs: &AttributeList) -> Result<Self> {
        Ok(Self {
            time_offset: attrs.signed_float(attr::TIME_OFFSET)?,
            precise: yes_no(attrs, attr::PRECISE)?,
        })
    }

    /// Attribute list for an `#EXT-X-START` tag.
    pub fn to_attributes(&self) -> AttributeList {
        let mut attrs =
            AttributeList::new().with(attr::TIME_OFFSET, AttributeValue::SignedFloat(self.time_offset));
        insert_yes(&mut attrs, attr::PRECISE, self.precise);
        attrs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use assert_matches::assert_matches;
    use hlsforged_attrs::AttrError;

    #[test]
    fn test_parse_start() {
        let start = Start::parse("TIME-OFFSET=-12.5,PRECISE=YES").unwrap();
        assert_eq!(start.time_offset, -12.5);
        assert!(start.precise);

        let start = Start::parse("TIME-OFFSET=10").unwrap_err();
        assert_matches!(start, Error::Attr(AttrError::TypeMismatch { .. }));

        let start = Start::parse("TIME-OFFSET=10.0").unwrap();
        assert!(!start.precise);
    }

    #[test]
    fn test_start_requires_offset() {
        assert_matches!(
            Start::parse("PRECISE=NO"),
            Err(Error::Attr(AttrError::MissingRequiredAttribute(_)))
        );
    }

    #[test]
    fn test_start_encode() {
        let start = Start {
            time_offset: 4.0,
            precise: false,
        };
        assert_eq!(start.to_attributes().encode().unwrap(), "TIME-OFFSET=4.0");
    }

    #[test]
    fn test_default_header_is_version_one() {
        assert_eq!(Header::default().version, 1);
    }
}
