use super::{Header, IFrameStream, Key, Rendition, SessionData, VariantStream};

/// A master playlist: variant streams and their alternative renditions.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MasterPlaylist {
    pub header: Header,
    pub renditions: Vec<Rendition>,
    pub variant_streams: Vec<VariantStream>,
    pub i_frame_streams: Vec<IFrameStream>,
    pub session_data: SessionData,
    pub session_keys: Vec<Key>,
}

impl MasterPlaylist {
    /// Empty master playlist with the given header.
    pub fn new(header: Header) -> Self {
        Self {
            header,
            ..Self::default()
        }
    }

    /// Renditions belonging to `group_id`.
    pub fn group<'a>(&'a self, group_id: &'a str) -> impl Iterator<Item = &'a Rendition> + 'a {
        self.renditions.iter().filter(move |r| r.group_id == group_id)
    }
}
