//! Error types for hlsforged.

use hlsforged_attrs::AttrError;
use thiserror::Error;

/// Result type for hlsforged operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Broad category of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Document-level shape: header, dialect, end of input.
    Structural,
    /// Token-level syntax: attribute names and values, scalar tag bodies.
    Grammar,
    /// Well-formed input that breaks a rule of the format.
    Semantic,
    /// A segment or URI line where none is allowed, or a missing one.
    SegmentState,
    /// A structured value that cannot be written as text.
    Encoding,
}

/// Error type for decoding and encoding playlists.
#[derive(Debug, Error)]
pub enum Error {
    /// The first line is not `#EXTM3U`.
    #[error("missing #EXTM3U header")]
    NoHeader,

    /// The input is empty.
    #[error("unexpected end of input")]
    UnexpectedEof,

    /// The input is not UTF-8.
    #[error("invalid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// Media-only and master-only tags appear in the same document.
    #[error("playlist contains both master and media tags")]
    MixedTags,

    /// No tag identified the document as a media or master playlist.
    #[error("failed to determine playlist type")]
    UnknownType,

    /// A tag this library does not recognize (strict mode only).
    #[error("unexpected tag {0:?}")]
    UnexpectedTag(String),

    /// Attribute grammar or accessor failure.
    #[error(transparent)]
    Attr(#[from] AttrError),

    /// A scalar tag body (duration, date, integer, byte range) is malformed.
    #[error("invalid syntax: {0}")]
    BadSyntax(String),

    /// `#EXT-X-VERSION` is not an integer, or appears twice.
    #[error("invalid version number")]
    BadVersionNumber,

    /// An attribute holds a value outside its allowed set.
    #[error("invalid value for attribute {0:?}")]
    InvalidAttributeValue(&'static str),

    /// Unknown `METHOD` on a key.
    #[error("invalid encryption method {0:?}")]
    BadEncryptionMethod(String),

    /// Unknown `#EXT-X-PLAYLIST-TYPE` value.
    #[error("invalid playlist type {0:?}")]
    BadPlaylistType(String),

    /// Closed-caption `INSTREAM-ID` outside CC1-CC4 / SERVICE1-SERVICE63.
    #[error("invalid instream id {0:?}")]
    InvalidInstreamId(String),

    /// A feature needs a higher declared protocol version.
    #[error("compatibility version {required} required, playlist declares {declared}")]
    CompatibilityVersion {
        /// Minimum version the feature needs.
        required: u32,
        /// Version the playlist declares.
        declared: u32,
    },

    /// Two renditions in one group share a name.
    #[error("rendition group {group_id:?} has more than one rendition named {name:?}")]
    DuplicateRenditionName {
        /// Group identifier.
        group_id: String,
        /// Repeated rendition name.
        name: String,
    },

    /// More than one rendition in a group is marked default.
    #[error("rendition group {group_id:?} has more than one default rendition")]
    MultipleDefaultRenditions {
        /// Group identifier.
        group_id: String,
    },

    /// A sequence-number tag after the first media segment.
    #[error("{0} must appear before the first media segment")]
    SequenceAfterSegment(&'static str),

    /// A byte range without a start that cannot inherit one.
    #[error("missing byte range start")]
    MissingRangeStart,

    /// A media segment after `#EXT-X-ENDLIST`.
    #[error("found media segment after #EXT-X-ENDLIST")]
    UnexpectedMediaSegment,

    /// A URI line with nothing to attach it to.
    #[error("unexpected uri")]
    UnexpectedUri,

    /// A segment drops a map, program date-time or date range that the
    /// previous segment carried. Decoding carries the old value forward, so
    /// the change cannot be written.
    #[error("segment {index} clears {tag}, which cannot be encoded")]
    ClearedCarryTag {
        /// 0-based index of the segment in the playlist.
        index: usize,
        /// Tag whose value was dropped.
        tag: &'static str,
    },

    /// A tag that needs a URI line is not followed by one.
    #[error("missing uri")]
    MissingUri,

    /// Writing output failed.
    #[error("format error: {0}")]
    Fmt(#[from] std::fmt::Error),

    /// Any of the above, raised while handling a specific source line.
    #[error("{source} on line {line} ({text})")]
    AtLine {
        /// 1-based line number.
        line: usize,
        /// Original line text.
        text: String,
        /// The underlying error.
        source: Box<Error>,
    },
}

impl Error {
    /// Attach source-line context. Errors that already carry a line are
    /// returned unchanged.
    pub fn at_line(self, line: usize, text: impl Into<String>) -> Self {
        match self {
            Error::AtLine { .. } => self,
            other => Error::AtLine {
                line,
                text: text.into(),
                source: Box::new(other),
            },
        }
    }

    /// Create a syntax error.
    pub fn syntax(msg: impl Into<String>) -> Self {
        Self::BadSyntax(msg.into())
    }

    /// The error without any line context.
    pub fn inner(&self) -> &Error {
        match self {
            Error::AtLine { source, .. } => source.inner(),
            other => other,
        }
    }

    /// The 1-based source line, when known.
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::AtLine { line, .. } => Some(*line),
            _ => None,
        }
    }

    /// Category of the underlying error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NoHeader
            | Error::UnexpectedEof
            | Error::Utf8(_)
            | Error::MixedTags
            | Error::UnknownType => ErrorKind::Structural,
            Error::Attr(AttrError::BadAttrName { .. } | AttrError::BadAttrSyntax { .. })
            | Error::BadSyntax(_)
            | Error::BadVersionNumber
            | Error::UnexpectedTag(_) => ErrorKind::Grammar,
            Error::Attr(AttrError::IllegalValue { .. } | AttrError::IllegalName(_))
            | Error::Fmt(_) => ErrorKind::Encoding,
            Error::Attr(_)
            | Error::InvalidAttributeValue(_)
            | Error::BadEncryptionMethod(_)
            | Error::BadPlaylistType(_)
            | Error::InvalidInstreamId(_)
            | Error::CompatibilityVersion { .. }
            | Error::DuplicateRenditionName { .. }
            | Error::MultipleDefaultRenditions { .. }
            | Error::SequenceAfterSegment(_)
            | Error::MissingRangeStart => ErrorKind::Semantic,
            Error::ClearedCarryTag { .. } => ErrorKind::Encoding,
            Error::UnexpectedMediaSegment | Error::UnexpectedUri | Error::MissingUri => {
                ErrorKind::SegmentState
            }
            Error::AtLine { source, .. } => source.kind(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_at_line_display() {
        let err = Error::MissingUri.at_line(4, "#EXT-X-STREAM-INF:BANDWIDTH=1");
        assert_eq!(
            err.to_string(),
            "missing uri on line 4 (#EXT-X-STREAM-INF:BANDWIDTH=1)"
        );
        assert_eq!(err.line(), Some(4));
    }

    #[test]
    fn test_inner_preserves_kind() {
        let err = Error::from(AttrError::missing("BANDWIDTH")).at_line(2, "#EXT-X-STREAM-INF:");
        assert_matches!(
            err.inner(),
            Error::Attr(AttrError::MissingRequiredAttribute(name)) if name == "BANDWIDTH"
        );
        assert_eq!(err.kind(), ErrorKind::Semantic);
    }

    #[test]
    fn test_at_line_does_not_nest() {
        let err = Error::MixedTags.at_line(3, "a").at_line(9, "b");
        assert_eq!(err.line(), Some(3));
    }

    #[test]
    fn test_kinds() {
        assert_eq!(Error::NoHeader.kind(), ErrorKind::Structural);
        assert_eq!(Error::MixedTags.kind(), ErrorKind::Structural);
        assert_eq!(Error::BadVersionNumber.kind(), ErrorKind::Grammar);
        assert_eq!(
            Error::Attr(AttrError::BadAttrSyntax { name: "X".into() }).kind(),
            ErrorKind::Grammar
        );
        assert_eq!(Error::UnexpectedMediaSegment.kind(), ErrorKind::SegmentState);
        assert_eq!(
            Error::UnexpectedUri.at_line(7, "a.ts").kind(),
            ErrorKind::SegmentState
        );
        assert_eq!(
            Error::CompatibilityVersion {
                required: 4,
                declared: 3
            }
            .kind(),
            ErrorKind::Semantic
        );
    }
}
