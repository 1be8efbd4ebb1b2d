//! Playlist encoding.
//!
//! The encoder validates the playlist first and only then writes it, so a
//! failed encode never produces partial output.

mod master;
mod media;
mod validate;

use crate::error::Result;
use crate::model::Header;
use crate::playlist::Playlist;
use crate::tags;
use hlsforged_attrs::AttributeList;
use std::fmt::Write;
use tracing::debug;

/// Encode a playlist to UTF-8 bytes.
pub fn encode(playlist: &Playlist) -> Result<Vec<u8>> {
    encode_to_string(playlist).map(String::into_bytes)
}

/// Encode a playlist to text.
///
/// ```
/// use hlsforged::{encode_to_string, Header, MediaPlaylist, MediaSegment, Playlist};
///
/// let mut playlist = MediaPlaylist::new(Header::with_version(3));
/// playlist.target_duration = 10;
/// playlist.segments.push(MediaSegment::new("a.ts", 9.009));
/// playlist.end_list = true;
///
/// let text = encode_to_string(&Playlist::Media(playlist)).unwrap();
/// assert!(text.starts_with("#EXTM3U\n#EXT-X-VERSION:3\n"));
/// assert!(text.contains("#EXTINF:9.009,\na.ts\n"));
/// ```
pub fn encode_to_string(playlist: &Playlist) -> Result<String> {
    validate::validate(playlist)?;

    let mut out = String::new();
    write_header(&mut out, playlist.header())?;

    match playlist {
        Playlist::Media(p) => media::write(&mut out, p)?,
        Playlist::Master(p) => master::write(&mut out, p)?,
    }

    debug!(
        dialect = ?playlist.dialect(),
        version = playlist.version(),
        bytes = out.len(),
        "encoded playlist"
    );

    Ok(out)
}

fn write_header(out: &mut String, header: &Header) -> Result<()> {
    writeln!(out, "{}", tags::HEADER)?;
    writeln!(out, "{}:{}", tags::VERSION, header.version)?;

    if header.independent_segments {
        writeln!(out, "{}", tags::INDEPENDENT_SEGMENTS)?;
    }
    if let Some(start) = &header.start {
        write_attribute_tag(out, tags::START, &start.to_attributes())?;
    }

    Ok(())
}

/// Write `#TAG:ATTR=...` on its own line.
pub(crate) fn write_attribute_tag(out: &mut String, tag: &str, attrs: &AttributeList) -> Result<()> {
    writeln!(out, "{}:{}", tag, attrs.encode()?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::model::{MasterPlaylist, MediaPlaylist, Start};
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_header() {
        let mut header = Header::with_version(6);
        header.independent_segments = true;
        header.start = Some(Start {
            time_offset: -3.5,
            precise: true,
        });

        let mut out = String::new();
        write_header(&mut out, &header).unwrap();
        assert_eq!(
            out,
            "#EXTM3U\n#EXT-X-VERSION:6\n#EXT-X-INDEPENDENT-SEGMENTS\n#EXT-X-START:TIME-OFFSET=-3.5,PRECISE=YES\n"
        );
    }

    #[test]
    fn test_encode_bytes_match_text() {
        let playlist = Playlist::Master(MasterPlaylist::default());
        let text = encode_to_string(&playlist).unwrap();
        assert_eq!(encode(&playlist).unwrap(), text.into_bytes());
    }

    #[test]
    fn test_failed_encode_writes_nothing() {
        let mut playlist = MediaPlaylist::new(Header::with_version(2));
        playlist
            .segments
            .push(crate::model::MediaSegment::new("a.ts", 2.5));
        assert_matches!(
            encode(&Playlist::Media(playlist)),
            Err(Error::CompatibilityVersion { required: 3, declared: 2 })
        );
    }
}
