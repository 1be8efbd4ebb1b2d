//! hlsforged - HLS playlist decoding and encoding
//!
//! Decodes `.m3u8` documents into a typed [`Playlist`] (either a
//! [`MediaPlaylist`] or a [`MasterPlaylist`]) and encodes them back to text.
//!
//! ```
//! use hlsforged::{decode_str, encode_to_string};
//!
//! let input = "#EXTM3U\n#EXT-X-VERSION:3\n#EXT-X-TARGETDURATION:10\n#EXTINF:9.009,\nfirst.ts\n#EXT-X-ENDLIST\n";
//!
//! let playlist = decode_str(input).unwrap();
//! let media = playlist.as_media().unwrap();
//! assert_eq!(media.segments[0].uri, "first.ts");
//! assert!(media.end_list);
//!
//! assert_eq!(encode_to_string(&playlist).unwrap(), input);
//! ```
//!
//! Attribute lists (`NAME=VALUE,...`) are handled by the [`hlsforged_attrs`]
//! crate, re-exported here.

pub mod config;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod model;
pub mod playlist;
pub mod tags;

pub use config::{DecoderConfig, DecoderConfigBuilder};
pub use decoder::{decode, decode_str, Decoder};
pub use encoder::{encode, encode_to_string};
pub use error::{Error, ErrorKind, Result};
pub use model::{
    ByteRange, ClientAttribute, ClosedCaptionsGroup, DateRange, EncryptionMethod, Header,
    HdcpLevel, IFrameStream, InstreamId, Key, Map, MasterPlaylist, MediaPlaylist, MediaSegment,
    MediaType, PlaylistType, Rendition, RenditionKind, SessionData, SessionDataContent,
    SessionDataEntry, Start, StreamInf, VariantStream,
};
pub use playlist::{Dialect, Playlist};

pub use hlsforged_attrs;
