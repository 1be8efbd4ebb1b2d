//! Playlist entities and their tag codecs.
//!
//! Every entity that lives in an attribute-list tag can be read from an
//! [`AttributeList`] and written back to one. Entities with scalar tag bodies
//! ([`ByteRange`], program date-times) parse their body text directly.

mod byte_range;
mod date_range;
mod header;
mod key;
mod map;
mod master;
mod media;
mod rendition;
mod segment;
mod session;
mod stream;

pub use byte_range::ByteRange;
pub use date_range::{ClientAttribute, DateRange};
pub use header::{Header, Start};
pub use key::{EncryptionMethod, Key};
pub use map::Map;
pub use master::MasterPlaylist;
pub use media::{MediaPlaylist, PlaylistType};
pub use rendition::{InstreamId, MediaType, Rendition, RenditionKind};
pub use segment::MediaSegment;
pub use session::{SessionData, SessionDataContent, SessionDataEntry};
pub use stream::{ClosedCaptionsGroup, HdcpLevel, IFrameStream, StreamInf, VariantStream};

use crate::error::{Error, Result};
use hlsforged_attrs::{AttributeList, AttributeValue, OptionalAttr};
use regex::Regex;
use std::sync::LazyLock;

/// ISO-8601 calendar, week and ordinal dates with optional time and zone.
static ISO8601: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[+-]?\d{4,}(?:-?(?:\d{2}(?:-?\d{2})?|W\d{2}(?:-?\d)?|\d{3}))?(?:T\d{2}(?::?\d{2}(?::?\d{2}(?:\.\d+)?)?)?(?:Z|[+-]\d{2}(?::?\d{2})?)?)?$",
    )
    .expect("ISO-8601 pattern is a valid regex")
});

/// Fail unless `date` is an ISO-8601 date.
pub(crate) fn validate_date(date: &str) -> Result<()> {
    if ISO8601.is_match(date) {
        Ok(())
    } else {
        Err(Error::syntax(format!("invalid date {:?}", date)))
    }
}

/// Parse a `decimal-integer` scalar tag body.
pub(crate) fn parse_decimal(text: &str) -> Result<u64> {
    if text.is_empty() || text.len() > 20 || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::syntax(format!("invalid decimal integer {:?}", text)));
    }
    text.parse()
        .map_err(|_| Error::syntax(format!("invalid decimal integer {:?}", text)))
}

/// Read an optional `YES`/`NO` attribute; absent means `false`.
pub(crate) fn yes_no(attrs: &AttributeList, name: &'static str) -> Result<bool> {
    match attrs.enumerated(name).optional()? {
        None | Some("NO") => Ok(false),
        Some("YES") => Ok(true),
        Some(_) => Err(Error::InvalidAttributeValue(name)),
    }
}

/// Write `NAME=YES` when `flag` is set.
pub(crate) fn insert_yes(attrs: &mut AttributeList, name: &str, flag: bool) {
    if flag {
        attrs.insert(name, AttributeValue::enumerated("YES"));
    }
}

/// Split a quoted comma-separated list.
pub(crate) fn split_list(text: &str) -> Vec<String> {
    text.split(',').map(str::to_string).collect()
}

/// Join list items into one quoted value. Items may not contain a comma.
pub(crate) fn join_list(items: &[String], name: &'static str) -> Result<String> {
    if items.iter().any(|item| item.contains(',')) {
        return Err(Error::InvalidAttributeValue(name));
    }
    Ok(items.join(","))
}
