//! Media playlist writer.

use super::write_attribute_tag;
use crate::error::Result;
use crate::model::{validate_date, EncryptionMethod, Key, MediaPlaylist, MediaSegment};
use crate::tags;
use std::fmt::Write;
use tracing::trace;

pub(super) fn write(out: &mut String, playlist: &MediaPlaylist) -> Result<()> {
    writeln!(out, "{}:{}", tags::TARGETDURATION, playlist.target_duration)?;

    if playlist.media_sequence != 0 {
        writeln!(out, "{}:{}", tags::MEDIA_SEQUENCE, playlist.media_sequence)?;
    }
    if playlist.discontinuity_sequence != 0 {
        writeln!(
            out,
            "{}:{}",
            tags::DISCONTINUITY_SEQUENCE,
            playlist.discontinuity_sequence
        )?;
    }
    if let Some(playlist_type) = playlist.playlist_type {
        writeln!(out, "{}:{}", tags::PLAYLIST_TYPE, playlist_type)?;
    }
    if playlist.i_frames_only {
        writeln!(out, "{}", tags::I_FRAMES_ONLY)?;
    }

    let mut previous: Option<&MediaSegment> = None;
    for segment in &playlist.segments {
        write_segment(out, segment, previous)?;
        previous = Some(segment);
    }

    if playlist.end_list {
        writeln!(out, "{}", tags::ENDLIST)?;
    }

    Ok(())
}

/// Carried tags are only written when they differ from the previous
/// segment's.
fn write_segment(out: &mut String, segment: &MediaSegment, previous: Option<&MediaSegment>) -> Result<()> {
    let prev_key = previous.and_then(|p| p.key.as_ref());
    if segment.key.as_ref() != prev_key {
        match &segment.key {
            Some(key) => write_attribute_tag(out, tags::KEY, &key.to_attributes()?)?,
            // Back to clear text.
            None if prev_key.is_some_and(|k| k.method != EncryptionMethod::None) => {
                write_attribute_tag(out, tags::KEY, &Key::none().to_attributes()?)?
            }
            None => {}
        }
    }

    let prev_map = previous.and_then(|p| p.map.as_ref());
    if let Some(map) = &segment.map {
        if Some(map) != prev_map {
            write_attribute_tag(out, tags::MAP, &map.to_attributes())?;
        }
    }

    let prev_date = previous.and_then(|p| p.program_date_time.as_deref());
    if let Some(date) = segment.program_date_time.as_deref() {
        if Some(date) != prev_date {
            validate_date(date)?;
            writeln!(out, "{}:{}", tags::PROGRAM_DATE_TIME, date)?;
        }
    }

    let prev_range = previous.and_then(|p| p.date_range.as_ref());
    if let Some(range) = &segment.date_range {
        if Some(range) != prev_range {
            write_attribute_tag(out, tags::DATERANGE, &range.to_attributes()?)?;
        }
    }

    if segment.discontinuity {
        writeln!(out, "{}", tags::DISCONTINUITY)?;
    }
    if let Some(range) = &segment.byte_range {
        writeln!(out, "{}:{}", tags::BYTERANGE, range)?;
    }

    writeln!(
        out,
        "{}:{},{}",
        tags::INF,
        segment.duration,
        segment.title.as_deref().unwrap_or_default()
    )?;
    writeln!(out, "{}", segment.uri)?;

    trace!(uri = %segment.uri, duration = segment.duration, "wrote segment");
    Ok(())
}
