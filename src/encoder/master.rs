//! Master playlist writer.

use super::write_attribute_tag;
use crate::error::Result;
use crate::model::MasterPlaylist;
use crate::tags;
use std::fmt::Write;

pub(super) fn write(out: &mut String, playlist: &MasterPlaylist) -> Result<()> {
    for entry in &playlist.session_data {
        write_attribute_tag(out, tags::SESSION_DATA, &entry.to_attributes())?;
    }
    for key in &playlist.session_keys {
        write_attribute_tag(out, tags::SESSION_KEY, &key.to_attributes()?)?;
    }
    for rendition in &playlist.renditions {
        write_attribute_tag(out, tags::MEDIA, &rendition.to_attributes()?)?;
    }
    for stream in &playlist.variant_streams {
        write_attribute_tag(out, tags::STREAM_INF, &stream.to_attributes()?)?;
        writeln!(out, "{}", stream.uri)?;
    }
    for stream in &playlist.i_frame_streams {
        write_attribute_tag(out, tags::I_FRAME_STREAM_INF, &stream.to_attributes()?)?;
    }
    Ok(())
}
