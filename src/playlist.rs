//! Top-level playlist type.

use crate::model::{Header, MasterPlaylist, MediaPlaylist};

/// Which kind of playlist a document is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Dialect {
    Media,
    Master,
}

/// A decoded playlist. A document is either a media or a master playlist,
/// never both.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Playlist {
    Media(MediaPlaylist),
    Master(MasterPlaylist),
}

impl Playlist {
    /// Dialect of this playlist.
    pub fn dialect(&self) -> Dialect {
        match self {
            Playlist::Media(_) => Dialect::Media,
            Playlist::Master(_) => Dialect::Master,
        }
    }

    /// Shared header tags.
    pub fn header(&self) -> &Header {
        match self {
            Playlist::Media(p) => &p.header,
            Playlist::Master(p) => &p.header,
        }
    }

    /// Declared protocol version.
    pub fn version(&self) -> u32 {
        self.header().version
    }

    pub fn as_media(&self) -> Option<&MediaPlaylist> {
        match self {
            Playlist::Media(p) => Some(p),
            Playlist::Master(_) => None,
        }
    }

    pub fn as_master(&self) -> Option<&MasterPlaylist> {
        match self {
            Playlist::Master(p) => Some(p),
            Playlist::Media(_) => None,
        }
    }

    pub fn into_media(self) -> Option<MediaPlaylist> {
        match self {
            Playlist::Media(p) => Some(p),
            Playlist::Master(_) => None,
        }
    }

    pub fn into_master(self) -> Option<MasterPlaylist> {
        match self {
            Playlist::Master(p) => Some(p),
            Playlist::Media(_) => None,
        }
    }
}

impl From<MediaPlaylist> for Playlist {
    fn from(p: MediaPlaylist) -> Self {
        Playlist::Media(p)
    }
}

impl From<MasterPlaylist> for Playlist {
    fn from(p: MasterPlaylist) -> Self {
        Playlist::Master(p)
    }
}
