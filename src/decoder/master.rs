//! Master playlist assembly.

use super::Line;
use crate::error::{Error, Result};
use crate::model::{
    Header, IFrameStream, Key, MasterPlaylist, Rendition, SessionDataEntry, VariantStream,
};
use crate::tags;

/// Fold buffered master-playlist lines into a [`MasterPlaylist`].
pub(super) fn assemble(header: Header, lines: &[Line<'_>]) -> Result<MasterPlaylist> {
    let version = header.version;
    let mut playlist = MasterPlaylist::new(header);
    let mut lines = lines.iter().peekable();

    while let Some(line) = lines.next() {
        let Line::Tag { name, body, .. } = *line else {
            return Err(line.error(Error::UnexpectedUri));
        };

        match name {
            tags::MEDIA => {
                let rendition = Rendition::parse(body).map_err(|e| line.error(e))?;
                playlist.renditions.push(rendition);
            }
            tags::STREAM_INF => {
                let Some(Line::Uri { uri, .. }) = lines.next_if(|next| matches!(next, Line::Uri { .. }))
                else {
                    return Err(line.error(Error::MissingUri));
                };
                let stream = VariantStream::parse(body, *uri).map_err(|e| line.error(e))?;
                playlist.variant_streams.push(stream);
            }
            tags::I_FRAME_STREAM_INF => {
                let stream = IFrameStream::parse(body).map_err(|e| line.error(e))?;
                playlist.i_frame_streams.push(stream);
            }
            tags::SESSION_DATA => {
                let entry = SessionDataEntry::parse(body).map_err(|e| line.error(e))?;
                playlist.session_data.push(entry);
            }
            tags::SESSION_KEY => {
                let key = Key::parse(body, version).map_err(|e| line.error(e))?;
                playlist.session_keys.push(key);
            }
            other => return Err(line.error(Error::UnexpectedTag(other.to_string()))),
        }
    }

    Ok(playlist)
}
