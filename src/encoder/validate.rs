//! Checks that run before any output is written.

use crate::error::{Error, Result};
use crate::model::{MasterPlaylist, MediaPlaylist, MediaSegment, MediaType, Rendition};
use crate::playlist::Playlist;
use crate::tags;
use std::collections::{HashMap, HashSet};

/// Validate cross-entity invariants and version compatibility.
pub(crate) fn validate(playlist: &Playlist) -> Result<()> {
    match playlist {
        Playlist::Media(p) => validate_media(p),
        Playlist::Master(p) => validate_master(p),
    }
}

fn require(required: u32, declared: u32) -> Result<()> {
    if declared < required {
        return Err(Error::CompatibilityVersion { required, declared });
    }
    Ok(())
}

/// Text written on a line of its own may not break the line structure.
fn check_uri(uri: &str) -> Result<()> {
    if uri.is_empty() || uri.starts_with('#') || uri.contains(['\r', '\n']) {
        return Err(Error::InvalidAttributeValue("URI"));
    }
    Ok(())
}

fn validate_media(playlist: &MediaPlaylist) -> Result<()> {
    let version = playlist.header.version;

    let mut previous: Option<&MediaSegment> = None;
    for (index, segment) in playlist.segments.iter().enumerate() {
        check_uri(&segment.uri)?;
        if let Some(previous) = previous {
            check_carried(index, previous, segment)?;
        }
        previous = Some(segment);

        if !segment.duration.is_finite() || segment.duration < 0.0 {
            return Err(Error::syntax(format!(
                "invalid segment duration {}",
                segment.duration
            )));
        }
        if segment.duration.fract() != 0.0 {
            require(3, version)?;
        }
        if segment
            .title
            .as_deref()
            .is_some_and(|t| t.contains(['\r', '\n']))
        {
            return Err(Error::syntax("segment title contains a line break"));
        }

        if segment.byte_range.is_some() {
            require(4, version)?;
        }
        if let Some(key) = &segment.key {
            require(key.required_version(), version)?;
        }
    }

    Ok(())
}

/// Only keys can be cleared in text (`METHOD=NONE`). The other carried tags
/// stay in force once written.
fn check_carried(index: usize, previous: &MediaSegment, segment: &MediaSegment) -> Result<()> {
    let cleared = [
        (previous.map.is_some() && segment.map.is_none(), tags::MAP),
        (
            previous.program_date_time.is_some() && segment.program_date_time.is_none(),
            tags::PROGRAM_DATE_TIME,
        ),
        (
            previous.date_range.is_some() && segment.date_range.is_none(),
            tags::DATERANGE,
        ),
    ];
    match cleared.into_iter().find(|(cleared, _)| *cleared) {
        Some((_, tag)) => Err(Error::ClearedCarryTag { index, tag }),
        None => Ok(()),
    }
}

fn validate_master(playlist: &MasterPlaylist) -> Result<()> {
    validate_renditions(&playlist.renditions)?;

    for key in &playlist.session_keys {
        require(key.required_version(), playlist.header.version)?;
    }
    for stream in &playlist.variant_streams {
        check_uri(&stream.uri)?;
    }

    Ok(())
}

#[derive(Default)]
struct RenditionGroup<'a> {
    names: HashSet<&'a str>,
    has_default: bool,
}

/// Within each (media type, group id) group, names are unique and at most
/// one rendition is the default.
pub(crate) fn validate_renditions(renditions: &[Rendition]) -> Result<()> {
    let mut groups: HashMap<(MediaType, &str), RenditionGroup<'_>> = HashMap::new();

    for rendition in renditions {
        let group = groups
            .entry((rendition.media_type(), rendition.group_id.as_str()))
            .or_default();

        if !group.names.insert(rendition.name.as_str()) {
            return Err(Error::DuplicateRenditionName {
                group_id: rendition.group_id.clone(),
                name: rendition.name.clone(),
            });
        }

        if rendition.default {
            if group.has_default {
                return Err(Error::MultipleDefaultRenditions {
                    group_id: rendition.group_id.clone(),
                });
            }
            group.has_default = true;
        }
    }

    Ok(())
}
