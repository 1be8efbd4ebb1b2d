use super::{insert_yes, join_list, split_list, yes_no};
use crate::error::{Error, Result};
use crate::tags::attr;
use hlsforged_attrs::{AttrError, AttributeList, AttributeValue, OptionalAttr, ValueKind};
use std::fmt;
use std::str::FromStr;

/// Media type of a rendition, from the `TYPE` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MediaType {
    Audio,
    Video,
    Subtitles,
    ClosedCaptions,
}

impl MediaType {
    /// Tag spelling of the type.
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Audio => "AUDIO",
            MediaType::Video => "VIDEO",
            MediaType::Subtitles => "SUBTITLES",
            MediaType::ClosedCaptions => "CLOSED-CAPTIONS",
        }
    }
}

impl FromStr for MediaType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "AUDIO" => Ok(MediaType::Audio),
            "VIDEO" => Ok(MediaType::Video),
            "SUBTITLES" => Ok(MediaType::Subtitles),
            "CLOSED-CAPTIONS" => Ok(MediaType::ClosedCaptions),
            _ => Err(Error::InvalidAttributeValue(attr::TYPE)),
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Closed-caption channel within the transport stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InstreamId {
    /// CEA-608 channel `CC1` through `CC4`.
    Cc(u8),
    /// CEA-708 service `SERVICE1` through `SERVICE63`.
    Service(u8),
}

impl FromStr for InstreamId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidInstreamId(s.to_string());
        if let Some(n) = s.strip_prefix("CC") {
            match channel_number(n) {
                Some(n @ 1..=4) => Ok(InstreamId::Cc(n)),
                _ => Err(invalid()),
            }
        } else if let Some(n) = s.strip_prefix("SERVICE") {
            match channel_number(n) {
                Some(n @ 1..=63) => Ok(InstreamId::Service(n)),
                _ => Err(invalid()),
            }
        } else {
            Err(invalid())
        }
    }
}

/// Plain decimal digits with no sign or leading zero.
fn channel_number(digits: &str) -> Option<u8> {
    if digits.starts_with('0') || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

impl fmt::Display for InstreamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstreamId::Cc(n) => write!(f, "CC{}", n),
            InstreamId::Service(n) => write!(f, "SERVICE{}", n),
        }
    }
}

impl InstreamId {
    fn check(&self) -> Result<()> {
        match self {
            InstreamId::Cc(1..=4) | InstreamId::Service(1..=63) => Ok(()),
            other => Err(Error::InvalidInstreamId(other.to_string())),
        }
    }
}

/// Fields that depend on the rendition's media type.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RenditionKind {
    Audio {
        uri: Option<String>,
        /// Number of independent channels.
        channels: Option<u32>,
    },
    Video {
        uri: Option<String>,
    },
    Subtitles {
        uri: Option<String>,
        forced: bool,
    },
    ClosedCaptions {
        instream_id: InstreamId,
    },
}

impl RenditionKind {
    /// Media type this kind belongs to.
    pub fn media_type(&self) -> MediaType {
        match self {
            RenditionKind::Audio { .. } => MediaType::Audio,
            RenditionKind::Video { .. } => MediaType::Video,
            RenditionKind::Subtitles { .. } => MediaType::Subtitles,
            RenditionKind::ClosedCaptions { .. } => MediaType::ClosedCaptions,
        }
    }

    /// URI of the rendition's media playlist, when it has one.
    pub fn uri(&self) -> Option<&str> {
        match self {
            RenditionKind::Audio { uri, .. }
            | RenditionKind::Video { uri }
            | RenditionKind::Subtitles { uri, .. } => uri.as_deref(),
            RenditionKind::ClosedCaptions { .. } => None,
        }
    }
}

/// An alternative rendition from `#EXT-X-MEDIA`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rendition {
    pub group_id: String,
    pub name: String,
    /// RFC 5646 language tag.
    pub language: Option<String>,
    pub assoc_language: Option<String>,
    pub default: bool,
    pub autoselect: bool,
    /// Uniform Type Identifiers.
    pub characteristics: Vec<String>,
    pub kind: RenditionKind,
}

impl Rendition {
    /// Create a rendition with no optional attributes.
    pub fn new(group_id: impl Into<String>, name: impl Into<String>, kind: RenditionKind) -> Self {
        Self {
            group_id: group_id.into(),
            name: name.into(),
            language: None,
            assoc_language: None,
            default: false,
            autoselect: false,
            characteristics: Vec::new(),
            kind,
        }
    }

    /// Media type of this rendition.
    pub fn media_type(&self) -> MediaType {
        self.kind.media_type()
    }

    /// Parse the attribute list of an `#EXT-X-MEDIA` tag.
    pub fn parse(body: &str) -> Result<Self> {
        Self::from_attributes(&AttributeList::parse(body)?)
    }

    pub(crate) fn from_attributes(attrs: &AttributeList) -> Result<Self> {
        let media_type: MediaType = attrs.enumerated(attr::TYPE)?.parse()?;
        let uri = attrs.string(attr::URI).optional()?.map(str::to_string);

        let kind = match media_type {
            MediaType::Audio => RenditionKind::Audio {
                uri,
                channels: attrs
                    .string(attr::CHANNELS)
                    .optional()?
                    .map(|c| {
                        c.parse::<u32>()
                            .map_err(|_| Error::InvalidAttributeValue(attr::CHANNELS))
                    })
                    .transpose()?,
            },
            MediaType::Video => RenditionKind::Video { uri },
            MediaType::Subtitles => RenditionKind::Subtitles {
                uri,
                forced: yes_no(attrs, attr::FORCED)?,
            },
            MediaType::ClosedCaptions => RenditionKind::ClosedCaptions {
                instream_id: instream_id(attrs)?,
            },
        };

        Ok(Self {
            group_id: attrs.string(attr::GROUP_ID)?.to_string(),
            name: attrs.string(attr::NAME)?.to_string(),
            language: attrs.string(attr::LANGUAGE).optional()?.map(str::to_string),
            assoc_language: attrs
                .string(attr::ASSOC_LANGUAGE)
                .optional()?
                .map(str::to_string),
            default: yes_no(attrs, attr::DEFAULT)?,
            autoselect: yes_no(attrs, attr::AUTOSELECT)?,
            characteristics: attrs
                .string(attr::CHARACTERISTICS)
                .optional()?
                .map(split_list)
                .unwrap_or_default(),
            kind,
        })
    }

    /// Attribute list for an `#EXT-X-MEDIA` tag.
    pub fn to_attributes(&self) -> Result<AttributeList> {
        if self.group_id.is_empty() {
            return Err(AttrError::missing(attr::GROUP_ID).into());
        }
        if self.name.is_empty() {
            return Err(AttrError::missing(attr::NAME).into());
        }

        let mut attrs = AttributeList::new()
            .with(attr::TYPE, AttributeValue::enumerated(self.media_type().as_str()))
            .with(attr::GROUP_ID, self.group_id.as_str())
            .with(attr::NAME, self.name.as_str());
        attrs.insert_opt(attr::LANGUAGE, self.language.as_deref());
        attrs.insert_opt(attr::ASSOC_LANGUAGE, self.assoc_language.as_deref());
        insert_yes(&mut attrs, attr::DEFAULT, self.default);
        insert_yes(&mut attrs, attr::AUTOSELECT, self.autoselect);

        match &self.kind {
            RenditionKind::Audio { uri, channels } => {
                attrs.insert_opt(attr::URI, uri.as_deref());
                attrs.insert_opt(attr::CHANNELS, channels.map(|c| c.to_string()));
            }
            RenditionKind::Video { uri } => {
                attrs.insert_opt(attr::URI, uri.as_deref());
            }
            RenditionKind::Subtitles { uri, forced } => {
                attrs.insert_opt(attr::URI, uri.as_deref());
                insert_yes(&mut attrs, attr::FORCED, *forced);
            }
            RenditionKind::ClosedCaptions { instream_id } => {
                instream_id.check()?;
                attrs.insert(attr::INSTREAM_ID, instream_id.to_string());
            }
        }

        if !self.characteristics.is_empty() {
            attrs.insert(
                attr::CHARACTERISTICS,
                join_list(&self.characteristics, attr::CHARACTERISTICS)?,
            );
        }

        Ok(attrs)
    }
}

/// `INSTREAM-ID` is a quoted string, but bare tokens are accepted as well.
fn instream_id(attrs: &AttributeList) -> Result<InstreamId> {
    match attrs.get(attr::INSTREAM_ID) {
        Some(AttributeValue::String(s) | AttributeValue::Enum(s)) => s.parse(),
        Some(other) => Err(AttrError::TypeMismatch {
            name: attr::INSTREAM_ID.to_string(),
            expected: ValueKind::QuotedString,
            actual: other.kind(),
        }
        .into()),
        None => Err(AttrError::missing(attr::INSTREAM_ID).into()),
    }
}
