use super::{ByteRange, DateRange, Key, Map};

/// One media segment: its URI line plus the tags that describe it.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MediaSegment {
    pub uri: String,
    /// Duration in seconds, from `#EXTINF`.
    pub duration: f64,
    /// Title after the comma in `#EXTINF`.
    pub title: Option<String>,
    pub byte_range: Option<ByteRange>,
    /// `#EXT-X-DISCONTINUITY` precedes this segment.
    pub discontinuity: bool,

    // Carried from the most recent tag of each kind.
    pub key: Option<Key>,
    pub map: Option<Map>,
    /// ISO-8601 date-time of the segment's first sample.
    pub program_date_time: Option<String>,
    pub date_range: Option<DateRange>,
}

impl MediaSegment {
    /// Segment with a URI and duration and nothing else.
    pub fn new(uri: impl Into<String>, duration: f64) -> Self {
        Self {
            uri: uri.into(),
            duration,
            ..Self::default()
        }
    }

    /// Whether a following open byte range can start where this one ends.
    pub fn has_dependable_range(&self) -> bool {
        self.byte_range.is_some_and(|r| r.closed())
    }
}
