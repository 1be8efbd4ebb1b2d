//! Tag names and their dialect classification.

use phf::phf_map;

pub const HEADER: &str = "#EXTM3U";
pub const VERSION: &str = "#EXT-X-VERSION";

pub const INF: &str = "#EXTINF";
pub const BYTERANGE: &str = "#EXT-X-BYTERANGE";
pub const DISCONTINUITY: &str = "#EXT-X-DISCONTINUITY";
pub const KEY: &str = "#EXT-X-KEY";
pub const MAP: &str = "#EXT-X-MAP";
pub const PROGRAM_DATE_TIME: &str = "#EXT-X-PROGRAM-DATE-TIME";
pub const DATERANGE: &str = "#EXT-X-DATERANGE";

pub const TARGETDURATION: &str = "#EXT-X-TARGETDURATION";
pub const MEDIA_SEQUENCE: &str = "#EXT-X-MEDIA-SEQUENCE";
pub const DISCONTINUITY_SEQUENCE: &str = "#EXT-X-DISCONTINUITY-SEQUENCE";
pub const ENDLIST: &str = "#EXT-X-ENDLIST";
pub const PLAYLIST_TYPE: &str = "#EXT-X-PLAYLIST-TYPE";
pub const I_FRAMES_ONLY: &str = "#EXT-X-I-FRAMES-ONLY";

pub const MEDIA: &str = "#EXT-X-MEDIA";
pub const STREAM_INF: &str = "#EXT-X-STREAM-INF";
pub const I_FRAME_STREAM_INF: &str = "#EXT-X-I-FRAME-STREAM-INF";
pub const SESSION_DATA: &str = "#EXT-X-SESSION-DATA";
pub const SESSION_KEY: &str = "#EXT-X-SESSION-KEY";

pub const INDEPENDENT_SEGMENTS: &str = "#EXT-X-INDEPENDENT-SEGMENTS";
pub const START: &str = "#EXT-X-START";

/// Which dialect a tag belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagClass {
    /// `#EXTM3U` and `#EXT-X-VERSION`, handled by the header pass.
    Header,
    /// Allowed in either dialect.
    Shared,
    /// Media playlists only.
    Media,
    /// Master playlists only.
    Master,
}

static TAG_CLASSES: phf::Map<&'static str, TagClass> = phf_map! {
    "#EXTM3U" => TagClass::Header,
    "#EXT-X-VERSION" => TagClass::Header,

    "#EXT-X-INDEPENDENT-SEGMENTS" => TagClass::Shared,
    "#EXT-X-START" => TagClass::Shared,

    "#EXTINF" => TagClass::Media,
    "#EXT-X-BYTERANGE" => TagClass::Media,
    "#EXT-X-DISCONTINUITY" => TagClass::Media,
    "#EXT-X-KEY" => TagClass::Media,
    "#EXT-X-MAP" => TagClass::Media,
    "#EXT-X-PROGRAM-DATE-TIME" => TagClass::Media,
    "#EXT-X-DATERANGE" => TagClass::Media,
    "#EXT-X-TARGETDURATION" => TagClass::Media,
    "#EXT-X-MEDIA-SEQUENCE" => TagClass::Media,
    "#EXT-X-DISCONTINUITY-SEQUENCE" => TagClass::Media,
    "#EXT-X-ENDLIST" => TagClass::Media,
    "#EXT-X-PLAYLIST-TYPE" => TagClass::Media,
    "#EXT-X-I-FRAMES-ONLY" => TagClass::Media,

    "#EXT-X-MEDIA" => TagClass::Master,
    "#EXT-X-STREAM-INF" => TagClass::Master,
    "#EXT-X-I-FRAME-STREAM-INF" => TagClass::Master,
    "#EXT-X-SESSION-DATA" => TagClass::Master,
    "#EXT-X-SESSION-KEY" => TagClass::Master,
};

/// Classify a tag name, or `None` when the tag is unknown.
pub fn classify(tag: &str) -> Option<TagClass> {
    TAG_CLASSES.get(tag).copied()
}

/// Attribute names used across the tag codecs.
pub mod attr {
    pub const ASSOC_LANGUAGE: &str = "ASSOC-LANGUAGE";
    pub const AUDIO: &str = "AUDIO";
    pub const AUTOSELECT: &str = "AUTOSELECT";
    pub const AVERAGE_BANDWIDTH: &str = "AVERAGE-BANDWIDTH";
    pub const BANDWIDTH: &str = "BANDWIDTH";
    pub const BYTERANGE: &str = "BYTERANGE";
    pub const CHANNELS: &str = "CHANNELS";
    pub const CHARACTERISTICS: &str = "CHARACTERISTICS";
    pub const CLASS: &str = "CLASS";
    pub const CLOSED_CAPTIONS: &str = "CLOSED-CAPTIONS";
    pub const CODECS: &str = "CODECS";
    pub const DATA_ID: &str = "DATA-ID";
    pub const DEFAULT: &str = "DEFAULT";
    pub const DURATION: &str = "DURATION";
    pub const END_DATE: &str = "END-DATE";
    pub const END_ON_NEXT: &str = "END-ON-NEXT";
    pub const FORCED: &str = "FORCED";
    pub const FRAME_RATE: &str = "FRAME-RATE";
    pub const GROUP_ID: &str = "GROUP-ID";
    pub const HDCP_LEVEL: &str = "HDCP-LEVEL";
    pub const ID: &str = "ID";
    pub const INSTREAM_ID: &str = "INSTREAM-ID";
    pub const IV: &str = "IV";
    pub const KEYFORMAT: &str = "KEYFORMAT";
    pub const KEYFORMATVERSIONS: &str = "KEYFORMATVERSIONS";
    pub const LANGUAGE: &str = "LANGUAGE";
    pub const METHOD: &str = "METHOD";
    pub const NAME: &str = "NAME";
    pub const PLANNED_DURATION: &str = "PLANNED-DURATION";
    pub const PRECISE: &str = "PRECISE";
    pub const PROGRAM_ID: &str = "PROGRAM-ID";
    pub const RESOLUTION: &str = "RESOLUTION";
    pub const SCTE35_CMD: &str = "SCTE35-CMD";
    pub const SCTE35_IN: &str = "SCTE35-IN";
    pub const SCTE35_OUT: &str = "SCTE35-OUT";
    pub const START_DATE: &str = "START-DATE";
    pub const SUBTITLES: &str = "SUBTITLES";
    pub const TIME_OFFSET: &str = "TIME-OFFSET";
    pub const TYPE: &str = "TYPE";
    pub const URI: &str = "URI";
    pub const VALUE: &str = "VALUE";
    pub const VIDEO: &str = "VIDEO";
}
