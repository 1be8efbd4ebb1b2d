//! Media playlist assembly.
//!
//! Segment tags accumulate in a [`SegmentBuilder`] until a URI line seals
//! them into a [`MediaSegment`]. Key, map, program date-time and date range
//! tags go into [`Carry`] instead, which outlives each seal so that every
//! segment reports the most recent value of each.

use super::Line;
use crate::error::{Error, Result};
use crate::model::{
    parse_decimal, validate_date, ByteRange, DateRange, Header, Key, Map, MediaPlaylist,
    MediaSegment,
};
use crate::tags;
use tracing::trace;

#[derive(Debug, Default)]
struct Carry {
    key: Option<Key>,
    map: Option<Map>,
    program_date_time: Option<String>,
    date_range: Option<DateRange>,
}

#[derive(Debug, Default)]
struct SegmentBuilder {
    duration: f64,
    title: Option<String>,
    byte_range: Option<ByteRange>,
    discontinuity: bool,
    /// Any segment tag, carried or not, since the last seal.
    described: bool,
    /// Line of the last EXTINF, BYTERANGE or DISCONTINUITY since the last seal.
    open: Option<(usize, String)>,
}

impl SegmentBuilder {
    fn seal(&mut self, uri: &str, carry: &Carry) -> MediaSegment {
        let builder = std::mem::take(self);
        MediaSegment {
            uri: uri.to_string(),
            duration: builder.duration,
            title: builder.title,
            byte_range: builder.byte_range,
            discontinuity: builder.discontinuity,
            key: carry.key.clone(),
            map: carry.map.clone(),
            program_date_time: carry.program_date_time.clone(),
            date_range: carry.date_range.clone(),
        }
    }
}

/// Fold buffered media-playlist lines into a [`MediaPlaylist`].
pub(super) fn assemble(header: Header, lines: &[Line<'_>]) -> Result<MediaPlaylist> {
    let version = header.version;
    let mut playlist = MediaPlaylist::new(header);
    let mut carry = Carry::default();
    let mut builder = SegmentBuilder::default();

    for line in lines {
        match *line {
            Line::Uri { number, uri } => {
                if playlist.end_list {
                    return Err(line.error(Error::UnexpectedMediaSegment));
                }
                if !builder.described {
                    return Err(line.error(Error::UnexpectedUri));
                }

                let segment = builder.seal(uri, &carry);
                trace!(
                    line = number,
                    uri = %segment.uri,
                    duration = segment.duration,
                    "sealed media segment"
                );
                playlist.segments.push(segment);
            }
            Line::Tag { number, name, body, text } => {
                if is_segment_tag(name) {
                    // Carried tags may trail #EXT-X-ENDLIST; they never reach a segment.
                    let opens = matches!(name, tags::INF | tags::BYTERANGE | tags::DISCONTINUITY);
                    if opens && playlist.end_list {
                        return Err(line.error(Error::UnexpectedMediaSegment));
                    }
                    segment_tag(name, body, version, &playlist, &mut builder, &mut carry)
                        .map_err(|e| line.error(e))?;
                    builder.described = true;
                    if opens {
                        builder.open = Some((number, text.to_string()));
                    }
                } else {
                    playlist_tag(name, body, &mut playlist).map_err(|e| line.error(e))?;
                }
            }
        }
    }

    if let Some((number, text)) = builder.open {
        return Err(Error::MissingUri.at_line(number, text));
    }

    Ok(playlist)
}

fn is_segment_tag(name: &str) -> bool {
    matches!(
        name,
        tags::INF
            | tags::BYTERANGE
            | tags::DISCONTINUITY
            | tags::KEY
            | tags::MAP
            | tags::PROGRAM_DATE_TIME
            | tags::DATERANGE
    )
}

fn segment_tag(
    name: &str,
    body: &str,
    version: u32,
    playlist: &MediaPlaylist,
    builder: &mut SegmentBuilder,
    carry: &mut Carry,
) -> Result<()> {
    match name {
        tags::INF => {
            let (duration, title) = body
                .split_once(',')
                .ok_or_else(|| Error::syntax("missing comma"))?;

            if version < 3 && duration.contains('.') {
                return Err(Error::CompatibilityVersion {
                    required: 3,
                    declared: version,
                });
            }

            builder.duration = parse_duration(duration)?;
            builder.title = (!title.is_empty()).then(|| title.to_string());
        }
        tags::BYTERANGE => {
            if version < 4 {
                return Err(Error::CompatibilityVersion {
                    required: 4,
                    declared: version,
                });
            }

            let mut range = ByteRange::parse(body)?;
            if range.start.is_none() {
                range.start = playlist
                    .segments
                    .last()
                    .filter(|s| s.has_dependable_range())
                    .and_then(|s| s.byte_range)
                    .and_then(|r| r.end());
                if range.start.is_none() {
                    return Err(Error::MissingRangeStart);
                }
            }
            builder.byte_range = Some(range);
        }
        tags::DISCONTINUITY => builder.discontinuity = true,
        tags::KEY => carry.key = Some(Key::parse(body, version)?),
        tags::MAP => carry.map = Some(Map::parse(body)?),
        tags::PROGRAM_DATE_TIME => {
            validate_date(body)?;
            carry.program_date_time = Some(body.to_string());
        }
        tags::DATERANGE => carry.date_range = Some(DateRange::parse(body)?),
        other => return Err(Error::UnexpectedTag(other.to_string())),
    }
    Ok(())
}

fn playlist_tag(name: &str, body: &str, playlist: &mut MediaPlaylist) -> Result<()> {
    match name {
        tags::TARGETDURATION => playlist.target_duration = parse_decimal(body)?,
        tags::MEDIA_SEQUENCE => {
            if !playlist.segments.is_empty() {
                return Err(Error::SequenceAfterSegment(tags::MEDIA_SEQUENCE));
            }
            playlist.media_sequence = parse_decimal(body)?;
        }
        tags::DISCONTINUITY_SEQUENCE => {
            if !playlist.segments.is_empty() {
                return Err(Error::SequenceAfterSegment(tags::DISCONTINUITY_SEQUENCE));
            }
            playlist.discontinuity_sequence = parse_decimal(body)?;
        }
        tags::PLAYLIST_TYPE => playlist.playlist_type = Some(body.parse()?),
        tags::I_FRAMES_ONLY => playlist.i_frames_only = true,
        tags::ENDLIST => playlist.end_list = true,
        other => return Err(Error::UnexpectedTag(other.to_string())),
    }
    Ok(())
}

/// Parse an `#EXTINF` duration in seconds.
fn parse_duration(text: &str) -> Result<f64> {
    let valid = !text.is_empty()
        && text.bytes().all(|b| b.is_ascii_digit() || b == b'.')
        && !text.starts_with('.')
        && !text.ends_with('.')
        && text.bytes().filter(|b| *b == b'.').count() <= 1;
    if !valid {
        return Err(Error::syntax(format!("failed to parse duration {:?}", text)));
    }
    text.parse()
        .map_err(|_| Error::syntax(format!("failed to parse duration {:?}", text)))
}
