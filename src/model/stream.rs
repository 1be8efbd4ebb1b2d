use super::{join_list, split_list};
use crate::error::{Error, Result};
use crate::tags::attr;
use hlsforged_attrs::{AttrError, AttributeList, AttributeValue, OptionalAttr, ValueKind};

/// Required HDCP output protection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HdcpLevel {
    /// `TYPE-0`
    Type0,
    /// `NONE`
    None,
}

impl HdcpLevel {
    /// Tag spelling of the level.
    pub fn as_str(&self) -> &'static str {
        match self {
            HdcpLevel::Type0 => "TYPE-0",
            HdcpLevel::None => "NONE",
        }
    }
}

/// Attributes shared by `#EXT-X-STREAM-INF` and `#EXT-X-I-FRAME-STREAM-INF`.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StreamInf {
    /// Peak bitrate in bits per second.
    pub bandwidth: u64,
    pub average_bandwidth: Option<u64>,
    pub codecs: Vec<String>,
    /// Width and height in pixels.
    pub resolution: Option<(u64, u64)>,
    pub hdcp_level: Option<HdcpLevel>,
    pub program_id: Option<u64>,
}

impl StreamInf {
    /// Stream with only the required bandwidth.
    pub fn new(bandwidth: u64) -> Self {
        Self {
            bandwidth,
            ..Self::default()
        }
    }

    pub(crate) fn from_attributes(attrs: &AttributeList) -> Result<Self> {
        let hdcp_level = match attrs.enumerated(attr::HDCP_LEVEL).optional()? {
            None => None,
            Some("TYPE-0") => Some(HdcpLevel::Type0),
            Some("NONE") => Some(HdcpLevel::None),
            Some(_) => return Err(Error::InvalidAttributeValue(attr::HDCP_LEVEL)),
        };

        Ok(Self {
            bandwidth: attrs.integer(attr::BANDWIDTH)?,
            average_bandwidth: attrs.integer(attr::AVERAGE_BANDWIDTH).optional()?,
            codecs: attrs
                .string(attr::CODECS)
                .optional()?
                .map(split_list)
                .unwrap_or_default(),
            resolution: attrs.resolution(attr::RESOLUTION).optional()?,
            hdcp_level,
            program_id: attrs.integer(attr::PROGRAM_ID).optional()?,
        })
    }

    fn write_attributes(&self, attrs: &mut AttributeList) -> Result<()> {
        attrs.insert(attr::BANDWIDTH, self.bandwidth);
        attrs.insert_opt(attr::AVERAGE_BANDWIDTH, self.average_bandwidth);
        if !self.codecs.is_empty() {
            attrs.insert(attr::CODECS, join_list(&self.codecs, attr::CODECS)?);
        }
        attrs.insert_opt(attr::RESOLUTION, self.resolution);
        attrs.insert_opt(
            attr::HDCP_LEVEL,
            self.hdcp_level.map(|l| AttributeValue::enumerated(l.as_str())),
        );
        attrs.insert_opt(attr::PROGRAM_ID, self.program_id);
        Ok(())
    }
}

/// Value of a variant stream's `CLOSED-CAPTIONS` attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ClosedCaptionsGroup {
    /// Group id of the closed-caption renditions.
    Group(String),
    /// The stream carries no closed captions.
    None,
}

/// A variant stream: `#EXT-X-STREAM-INF` followed by its URI line.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VariantStream {
    pub uri: String,
    pub stream: StreamInf,
    pub frame_rate: Option<f64>,
    /// Audio rendition group id.
    pub audio: Option<String>,
    /// Video rendition group id.
    pub video: Option<String>,
    /// Subtitles rendition group id.
    pub subtitles: Option<String>,
    pub closed_captions: Option<ClosedCaptionsGroup>,
}

impl VariantStream {
    /// Variant stream with no optional attributes.
    pub fn new(uri: impl Into<String>, bandwidth: u64) -> Self {
        Self {
            uri: uri.into(),
            stream: StreamInf::new(bandwidth),
            frame_rate: None,
            audio: None,
            video: None,
            subtitles: None,
            closed_captions: None,
        }
    }

    /// Parse an `#EXT-X-STREAM-INF` attribute list; `uri` is the line after it.
    pub fn parse(body: &str, uri: impl Into<String>) -> Result<Self> {
        Self::from_attributes(&AttributeList::parse(body)?, uri.into())
    }

    pub(crate) fn from_attributes(attrs: &AttributeList, uri: String) -> Result<Self> {
        let closed_captions = match attrs.get(attr::CLOSED_CAPTIONS) {
            None => None,
            Some(AttributeValue::String(group)) => Some(ClosedCaptionsGroup::Group(group.clone())),
            Some(AttributeValue::Enum(token)) if token == "NONE" => Some(ClosedCaptionsGroup::None),
            Some(AttributeValue::Enum(_)) => {
                return Err(Error::InvalidAttributeValue(attr::CLOSED_CAPTIONS))
            }
            Some(other) => {
                return Err(AttrError::TypeMismatch {
                    name: attr::CLOSED_CAPTIONS.to_string(),
                    expected: ValueKind::QuotedString,
                    actual: other.kind(),
                }
                .into())
            }
        };

        Ok(Self {
            uri,
            stream: StreamInf::from_attributes(attrs)?,
            frame_rate: attrs.float(attr::FRAME_RATE).optional()?,
            audio: attrs.string(attr::AUDIO).optional()?.map(str::to_string),
            video: attrs.string(attr::VIDEO).optional()?.map(str::to_string),
            subtitles: attrs.string(attr::SUBTITLES).optional()?.map(str::to_string),
            closed_captions,
        })
    }

    /// Attribute list for the `#EXT-X-STREAM-INF` tag. The URI is written
    /// on its own line.
    pub fn to_attributes(&self) -> Result<AttributeList> {
        let mut attrs = AttributeList::new();
        self.stream.write_attributes(&mut attrs)?;
        attrs.insert_opt(attr::FRAME_RATE, self.frame_rate.map(AttributeValue::Float));
        attrs.insert_opt(attr::AUDIO, self.audio.as_deref());
        attrs.insert_opt(attr::VIDEO, self.video.as_deref());
        attrs.insert_opt(attr::SUBTITLES, self.subtitles.as_deref());
        match &self.closed_captions {
            Some(ClosedCaptionsGroup::Group(group)) => {
                attrs.insert(attr::CLOSED_CAPTIONS, group.as_str());
            }
            Some(ClosedCaptionsGroup::None) => {
                attrs.insert(attr::CLOSED_CAPTIONS, AttributeValue::enumerated("NONE"));
            }
            None => {}
        }
        Ok(attrs)
    }
}

/// An I-frame stream from `#EXT-X-I-FRAME-STREAM-INF`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IFrameStream {
    /// I-frame playlist, from the inline `URI` attribute.
    pub uri: String,
    pub stream: StreamInf,
    /// Video rendition group id.
    pub video: Option<String>,
}

impl IFrameStream {
    /// I-frame stream with no optional attributes.
    pub fn new(uri: impl Into<String>, bandwidth: u64) -> Self {
        Self {
            uri: uri.into(),
            stream: StreamInf::new(bandwidth),
            video: None,
        }
    }

    /// Parse an `#EXT-X-I-FRAME-STREAM-INF` attribute list.
    pub fn parse(body: &str) -> Result<Self> {
        Self::from_attributes(&AttributeList::parse(body)?)
    }

    pub(crate) fn from_attributes(attrs: &AttributeList) -> Result<Self> {
        Ok(Self {
            uri: attrs.string(attr::URI)?.to_string(),
            stream: StreamInf::from_attributes(attrs)?,
            video: attrs.string(attr::VIDEO).optional()?.map(str::to_string),
        })
    }

    /// Attribute list for the `#EXT-X-I-FRAME-STREAM-INF` tag.
    pub fn to_attributes(&self) -> Result<AttributeList> {
        let mut attrs = AttributeList::new();
        self.stream.write_attributes(&mut attrs)?;
        attrs.insert_opt(attr::VIDEO, self.video.as_deref());
        attrs.insert(attr::URI, self.uri.as_str());
        Ok(attrs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_variant() {
        let stream = VariantStream::parse(
            "BANDWIDTH=1280000,AVERAGE-BANDWIDTH=1000000,CODECS=\"avc1.4d401e,mp4a.40.2\",RESOLUTION=640x360,FRAME-RATE=29.97,HDCP-LEVEL=TYPE-0,AUDIO=\"aac\",CLOSED-CAPTIONS=NONE",
            "low/index.m3u8",
        )
        .unwrap();

        assert_eq!(stream.uri, "low/index.m3u8");
        assert_eq!(stream.stream.bandwidth, 1280000);
        assert_eq!(stream.stream.average_bandwidth, Some(1000000));
        assert_eq!(stream.stream.codecs, vec!["avc1.4d401e", "mp4a.40.2"]);
        assert_eq!(stream.stream.resolution, Some((640, 360)));
        assert_eq!(stream.stream.hdcp_level, Some(HdcpLevel::Type0));
        assert_eq!(stream.frame_rate, Some(29.97));
        assert_eq!(stream.audio.as_deref(), Some("aac"));
        assert_eq!(stream.closed_captions, Some(ClosedCaptionsGroup::None));
    }

    #[test]
    fn test_bandwidth_required() {
        assert_matches!(
            VariantStream::parse("CODECS=\"mp4a.40.2\"", "a.m3u8"),
            Err(Error::Attr(AttrError::MissingRequiredAttribute(name))) if name == "BANDWIDTH"
        );
    }

    #[test]
    fn test_bad_hdcp_level() {
        assert_matches!(
            VariantStream::parse("BANDWIDTH=1,HDCP-LEVEL=TYPE-1", "a.m3u8"),
            Err(Error::InvalidAttributeValue("HDCP-LEVEL"))
        );
    }

    #[test]
    fn test_closed_captions_group() {
        let stream = VariantStream::parse("BANDWIDTH=1,CLOSED-CAPTIONS=\"cc\"", "a.m3u8").unwrap();
        assert_eq!(
            stream.closed_captions,
            Some(ClosedCaptionsGroup::Group("cc".into()))
        );
        assert_matches!(
            VariantStream::parse("BANDWIDTH=1,CLOSED-CAPTIONS=SOME", "a.m3u8"),
            Err(Error::InvalidAttributeValue("CLOSED-CAPTIONS"))
        );
    }

    #[test]
    fn test_parse_iframe() {
        let stream = IFrameStream::parse(
            "BANDWIDTH=86000,URI=\"low/iframe.m3u8\",CODECS=\"avc1.4d401e\",VIDEO=\"low\"",
        )
        .unwrap();
        assert_eq!(stream.uri, "low/iframe.m3u8");
        assert_eq!(stream.stream.bandwidth, 86000);
        assert_eq!(stream.video.as_deref(), Some("low"));
    }

    #[test]
    fn test_iframe_requires_uri() {
        assert_matches!(
            IFrameStream::parse("BANDWIDTH=86000"),
            Err(Error::Attr(AttrError::MissingRequiredAttribute(name))) if name == "URI"
        );
    }

    #[test]
    fn test_encode_variant() {
        let mut stream = VariantStream::new("hi.m3u8", 2560000);
        stream.stream.codecs = vec!["avc1.4d401f".into(), "mp4a.40.2".into()];
        stream.stream.resolution = Some((1280, 720));
        stream.frame_rate = Some(30.0);
        stream.audio = Some("aac".into());

        assert_eq!(
            stream.to_attributes().unwrap().encode().unwrap(),
            "BANDWIDTH=2560000,CODECS=\"avc1.4d401f,mp4a.40.2\",RESOLUTION=1280x720,FRAME-RATE=30.0,AUDIO=\"aac\""
        );
    }

    #[test]
    fn test_encode_iframe() {
        let stream = IFrameStream::new("iframe.m3u8", 86000);
        assert_eq!(
            stream.to_attributes().unwrap().encode().unwrap(),
            "BANDWIDTH=86000,URI=\"iframe.m3u8\""
        );
    }
}
