//! Playlist decoding.
//!
//! Decoding runs in two passes. The first pass checks the header, handles
//! the tags shared by both dialects, decides whether the document is a media
//! or a master playlist, and buffers every remaining URI and tag line. The
//! second pass folds the buffered lines into the dialect's playlist type.

mod master;
mod media;

use crate::config::DecoderConfig;
use crate::error::{Error, Result};
use crate::model::{parse_decimal, Header, Start};
use crate::playlist::{Dialect, Playlist};
use crate::tags::{self, TagClass};
use tracing::{debug, warn};

/// A buffered line, tagged with its 1-based line number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Line<'a> {
    Uri {
        number: usize,
        uri: &'a str,
    },
    Tag {
        number: usize,
        name: &'a str,
        body: &'a str,
        text: &'a str,
    },
}

impl<'a> Line<'a> {
    pub(crate) fn number(&self) -> usize {
        match self {
            Line::Uri { number, .. } | Line::Tag { number, .. } => *number,
        }
    }

    pub(crate) fn text(&self) -> &'a str {
        match self {
            Line::Uri { uri, .. } => uri,
            Line::Tag { text, .. } => text,
        }
    }

    /// Attach this line's position to an error.
    pub(crate) fn error(&self, err: impl Into<Error>) -> Error {
        err.into().at_line(self.number(), self.text())
    }
}

/// Playlist decoder.
///
/// ```
/// use hlsforged::{Decoder, DecoderConfig};
///
/// let decoder = Decoder::new(DecoderConfig::lenient());
/// let playlist = decoder
///     .decode_str("#EXTM3U\n#EXT-X-UNKNOWN\n#EXT-X-TARGETDURATION:10\n#EXTINF:10,\na.ts\n")
///     .unwrap();
/// assert_eq!(playlist.as_media().unwrap().segments.len(), 1);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Decoder {
    config: DecoderConfig,
}

impl Decoder {
    /// Create a decoder with the given configuration.
    pub fn new(config: DecoderConfig) -> Self {
        Self { config }
    }

    /// The decoder's configuration.
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Decode a playlist from UTF-8 bytes.
    pub fn decode(&self, input: &[u8]) -> Result<Playlist> {
        if input.is_empty() {
            return Err(Error::UnexpectedEof);
        }
        self.decode_str(std::str::from_utf8(input)?)
    }

    /// Decode a playlist from text.
    pub fn decode_str(&self, input: &str) -> Result<Playlist> {
        if input.is_empty() {
            return Err(Error::UnexpectedEof);
        }

        let mut lines = input
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .enumerate()
            .map(|(i, line)| (i + 1, line));

        match lines.next() {
            Some((_, tags::HEADER)) => {}
            _ => return Err(Error::NoHeader),
        }

        let mut header = Header::default();
        let mut version_seen = false;
        let mut dialect: Option<Dialect> = None;
        let mut buffered = Vec::new();

        for (number, text) in lines {
            if text.is_empty() {
                continue;
            }

            if !text.starts_with('#') {
                buffered.push(Line::Uri { number, uri: text });
                continue;
            }

            if !text.starts_with("#EXT") {
                continue;
            }

            let (name, body) = text.split_once(':').unwrap_or((text, ""));
            let line = Line::Tag {
                number,
                name,
                body,
                text,
            };

            let Some(class) = tags::classify(name) else {
                if self.config.strict {
                    return Err(line.error(Error::UnexpectedTag(name.to_string())));
                }
                warn!(line = number, tag = name, "skipping unknown tag");
                continue;
            };

            match class {
                TagClass::Header if name == tags::VERSION => {
                    if version_seen {
                        return Err(line.error(Error::BadVersionNumber));
                    }
                    header.version = parse_version(body).map_err(|e| line.error(e))?;
                    version_seen = true;
                }
                TagClass::Header => {
                    return Err(line.error(Error::UnexpectedTag(name.to_string())));
                }
                TagClass::Shared if name == tags::INDEPENDENT_SEGMENTS => {
                    header.independent_segments = true;
                }
                TagClass::Shared => {
                    header.start = Some(Start::parse(body).map_err(|e| line.error(e))?);
                }
                TagClass::Media | TagClass::Master => {
                    let tag_dialect = if class == TagClass::Media {
                        Dialect::Media
                    } else {
                        Dialect::Master
                    };

                    match dialect {
                        None => {
                            debug!(line = number, tag = name, dialect = ?tag_dialect, "resolved playlist dialect");
                            dialect = Some(tag_dialect);
                        }
                        Some(current) if current != tag_dialect => {
                            return Err(line.error(Error::MixedTags));
                        }
                        Some(_) => {}
                    }

                    buffered.push(line);
                }
            }
        }

        let playlist = match dialect {
            Some(Dialect::Media) => Playlist::Media(media::assemble(header, &buffered)?),
            Some(Dialect::Master) => Playlist::Master(master::assemble(header, &buffered)?),
            None => return Err(Error::UnknownType),
        };

        match &playlist {
            Playlist::Media(p) => debug!(
                version = p.header.version,
                segments = p.segments.len(),
                end_list = p.end_list,
                "decoded media playlist"
            ),
            Playlist::Master(p) => debug!(
                version = p.header.version,
                variants = p.variant_streams.len(),
                renditions = p.renditions.len(),
                i_frame_streams = p.i_frame_streams.len(),
                "decoded master playlist"
            ),
        }

        Ok(playlist)
    }
}

fn parse_version(body: &str) -> Result<u32> {
    let version = parse_decimal(body).map_err(|_| Error::BadVersionNumber)?;
    u32::try_from(version).map_err(|_| Error::BadVersionNumber)
}

/// Decode a playlist from UTF-8 bytes with the default (strict) configuration.
pub fn decode(input: &[u8]) -> Result<Playlist> {
    Decoder::default().decode(input)
}

/// Decode a playlist from text with the default (strict) configuration.
pub fn decode_str(input: &str) -> Result<Playlist> {
    Decoder::default().decode_str(input)
}
