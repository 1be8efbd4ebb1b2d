use super::{Header, MediaSegment};
use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Mutability of a media playlist, from `#EXT-X-PLAYLIST-TYPE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlaylistType {
    /// Segments may only be appended.
    Event,
    /// The playlist never changes.
    Vod,
}

impl PlaylistType {
    /// Tag spelling of the type.
    pub fn as_str(&self) -> &'static str {
        match self {
            PlaylistType::Event => "EVENT",
            PlaylistType::Vod => "VOD",
        }
    }
}

impl FromStr for PlaylistType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "EVENT" => Ok(PlaylistType::Event),
            "VOD" => Ok(PlaylistType::Vod),
            other => Err(Error::BadPlaylistType(other.to_string())),
        }
    }
}

impl fmt::Display for PlaylistType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A media playlist: an ordered list of segments.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MediaPlaylist {
    pub header: Header,
    pub segments: Vec<MediaSegment>,
    /// Upper bound on segment duration, in whole seconds.
    pub target_duration: u64,
    pub media_sequence: u64,
    pub discontinuity_sequence: u64,
    pub playlist_type: Option<PlaylistType>,
    pub i_frames_only: bool,
    /// `#EXT-X-ENDLIST` was present; no more segments will be added.
    pub end_list: bool,
}

impl MediaPlaylist {
    /// Empty media playlist with the given header.
    pub fn new(header: Header) -> Self {
        Self {
            header,
            ..Self::default()
        }
    }

    /// Sum of all segment durations in seconds.
    pub fn duration(&self) -> f64 {
        self.segments.iter().map(|s| s.duration).sum()
    }
}
