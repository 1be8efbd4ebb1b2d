//! Encoder integration tests.
//!
//! Builds playlists in code, encodes them, and checks the exact text as well
//! as the validation failures raised before any output is produced.

use assert_matches::assert_matches;
use hlsforged::hlsforged_attrs::AttrError;
use hlsforged::{
    decode_str, encode, encode_to_string, ByteRange, ClientAttribute, DateRange,
    EncryptionMethod, Error, ErrorKind, Header, IFrameStream, InstreamId, Key, Map,
    MasterPlaylist, MediaPlaylist, MediaSegment, Playlist, PlaylistType, Rendition,
    RenditionKind, Start, VariantStream,
};
use pretty_assertions::assert_eq;

// ---------------------------------------------------------------------------
// Test helpers
// ---------------------------------------------------------------------------

fn audio(group: &str, name: &str, default: bool) -> Rendition {
    let mut rendition = Rendition::new(
        group,
        name,
        RenditionKind::Audio {
            uri: Some(format!("{}/{}.m3u8", group, name.to_lowercase())),
            channels: None,
        },
    );
    rendition.default = default;
    rendition
}

fn vod_playlist(version: u32) -> MediaPlaylist {
    let mut playlist = MediaPlaylist::new(Header::with_version(version));
    playlist.target_duration = 10;
    playlist.playlist_type = Some(PlaylistType::Vod);
    playlist.end_list = true;
    playlist
}

// ---------------------------------------------------------------------------
// Media playlists
// ---------------------------------------------------------------------------

#[test]
fn test_encode_vod_playlist() {
    let mut playlist = vod_playlist(4);
    playlist.header.independent_segments = true;

    let mut first = MediaSegment::new("http://media.example.com/first.ts", 9.009);
    first.byte_range = Some(ByteRange::new(8765213, Some(7896)));
    first.map = Some(Map::new("init.mp4"));
    playlist.segments.push(first);

    let mut second = MediaSegment::new("http://media.example.com/second.ts", 3.003);
    second.map = Some(Map::new("init.mp4"));
    second.discontinuity = true;
    second.title = Some("ad break".into());
    playlist.segments.push(second);

    let text = encode_to_string(&playlist.into()).unwrap();
    assert_eq!(
        text,
        "#EXTM3U
#EXT-X-VERSION:4
#EXT-X-INDEPENDENT-SEGMENTS
#EXT-X-TARGETDURATION:10
#EXT-X-PLAYLIST-TYPE:VOD
#EXT-X-MAP:URI=\"init.mp4\"
#EXT-X-BYTERANGE:8765213@7896
#EXTINF:9.009,
http://media.example.com/first.ts
#EXT-X-DISCONTINUITY
#EXTINF:3.003,ad break
http://media.example.com/second.ts
#EXT-X-ENDLIST
"
    );
}

#[test]
fn test_encode_live_playlist_without_endlist() {
    let mut playlist = MediaPlaylist::new(Header::with_version(3));
    playlist.target_duration = 8;
    playlist.media_sequence = 2680;
    playlist.segments.push(MediaSegment::new("fileSequence2680.ts", 7.975));

    let text = encode_to_string(&playlist.into()).unwrap();
    assert!(text.contains("#EXT-X-MEDIA-SEQUENCE:2680\n"));
    assert!(!text.contains("#EXT-X-ENDLIST"));
    assert!(!text.contains("#EXT-X-DISCONTINUITY-SEQUENCE"));
}

#[test]
fn test_encode_start_and_key_format() {
    let mut playlist = vod_playlist(5);
    playlist.header.start = Some(Start {
        time_offset: -12.0,
        precise: false,
    });

    let mut key = Key::new(EncryptionMethod::SampleAes, Some("skd://key".into()));
    key.iv = Some([0x0a; 16]);
    key.key_format = Some("com.apple.streamingkeydelivery".into());
    key.key_format_versions = vec![1, 2];

    let mut segment = MediaSegment::new("a.ts", 10.0);
    segment.key = Some(key);
    playlist.segments.push(segment);

    let text = encode_to_string(&playlist.into()).unwrap();
    assert!(text.contains("#EXT-X-START:TIME-OFFSET=-12.0\n"));
    assert!(text.contains(
        "#EXT-X-KEY:METHOD=SAMPLE-AES,URI=\"skd://key\",IV=0x0A0A0A0A0A0A0A0A0A0A0A0A0A0A0A0A,KEYFORMAT=\"com.apple.streamingkeydelivery\",KEYFORMATVERSIONS=\"1/2\"\n"
    ));
}

#[test]
fn test_encode_date_range_client_attributes() {
    let mut range = DateRange::new("ad-1", "2014-03-05T11:15:00Z");
    range.class = Some("com.example.ad".into());
    range.end_on_next = true;
    range
        .client_attributes
        .insert("X-AD-ID".into(), ClientAttribute::String("1234".into()));
    range
        .client_attributes
        .insert("X-SCORE".into(), ClientAttribute::Float(0.5));

    let mut playlist = vod_playlist(3);
    let mut segment = MediaSegment::new("a.ts", 10.0);
    segment.date_range = Some(range);
    playlist.segments.push(segment);

    let text = encode_to_string(&playlist.into()).unwrap();
    assert!(text.contains(
        "#EXT-X-DATERANGE:ID=\"ad-1\",CLASS=\"com.example.ad\",START-DATE=\"2014-03-05T11:15:00Z\",X-AD-ID=\"1234\",X-SCORE=0.5,END-ON-NEXT=YES\n"
    ));
}

// ---------------------------------------------------------------------------
// Master playlists
// ---------------------------------------------------------------------------

#[test]
fn test_encode_master_playlist() {
    let mut playlist = MasterPlaylist::new(Header::with_version(4));
    playlist.renditions.push(audio("aac", "English", true));
    playlist.renditions.push(audio("aac", "Deutsch", false));

    let mut cc = Rendition::new(
        "cc",
        "English",
        RenditionKind::ClosedCaptions {
            instream_id: InstreamId::Cc(1),
        },
    );
    cc.language = Some("en".into());
    playlist.renditions.push(cc);

    let mut variant = VariantStream::new("low/video.m3u8", 1280000);
    variant.stream.codecs = vec!["avc1.4d401f".into(), "mp4a.40.2".into()];
    variant.stream.resolution = Some((1280, 720));
    variant.audio = Some("aac".into());
    playlist.variant_streams.push(variant);

    playlist
        .i_frame_streams
        .push(IFrameStream::new("low/iframe.m3u8", 86000));

    let text = encode_to_string(&playlist.into()).unwrap();
    assert_eq!(
        text,
        "#EXTM3U
#EXT-X-VERSION:4
#EXT-X-MEDIA:TYPE=AUDIO,GROUP-ID=\"aac\",NAME=\"English\",DEFAULT=YES,URI=\"aac/english.m3u8\"
#EXT-X-MEDIA:TYPE=AUDIO,GROUP-ID=\"aac\",NAME=\"Deutsch\",URI=\"aac/deutsch.m3u8\"
#EXT-X-MEDIA:TYPE=CLOSED-CAPTIONS,GROUP-ID=\"cc\",NAME=\"English\",LANGUAGE=\"en\",INSTREAM-ID=\"CC1\"
#EXT-X-STREAM-INF:BANDWIDTH=1280000,CODECS=\"avc1.4d401f,mp4a.40.2\",RESOLUTION=1280x720,AUDIO=\"aac\"
low/video.m3u8
#EXT-X-I-FRAME-STREAM-INF:BANDWIDTH=86000,URI=\"low/iframe.m3u8\"
"
    );
}

#[test]
fn test_duplicate_default_rendition() {
    let mut playlist = MasterPlaylist::default();
    playlist.renditions.push(audio("aac", "English", true));
    playlist.renditions.push(audio("aac", "Deutsch", true));

    let err = encode(&playlist.into()).unwrap_err();
    assert_matches!(&err, Error::MultipleDefaultRenditions { group_id } if group_id == "aac");
    assert_eq!(err.kind(), ErrorKind::Semantic);
}

#[test]
fn test_duplicate_rendition_name() {
    let mut playlist = MasterPlaylist::default();
    playlist.renditions.push(audio("aac", "English", true));
    playlist.renditions.push(audio("aac", "English", false));

    assert_matches!(
        encode(&playlist.into()),
        Err(Error::DuplicateRenditionName { group_id, name }) if group_id == "aac" && name == "English"
    );
}

#[test]
fn test_rendition_groups_checked_only_on_encode() {
    let input = "#EXTM3U\n#EXT-X-MEDIA:TYPE=AUDIO,GROUP-ID=\"aac\",NAME=\"English\",DEFAULT=YES\n#EXT-X-MEDIA:TYPE=AUDIO,GROUP-ID=\"aac\",NAME=\"Deutsch\",DEFAULT=YES\n#EXT-X-STREAM-INF:BANDWIDTH=1,AUDIO=\"aac\"\nlow.m3u8\n";

    let playlist = decode_str(input).unwrap();
    assert_eq!(playlist.as_master().unwrap().renditions.len(), 2);
    assert_matches!(
        encode(&playlist),
        Err(Error::MultipleDefaultRenditions { .. })
    );
}

// ---------------------------------------------------------------------------
// Validation failures
// ---------------------------------------------------------------------------

#[test]
fn test_version_compatibility() {
    let mut playlist = vod_playlist(1);
    playlist.segments.push(MediaSegment::new("a.ts", 9.009));
    assert_matches!(
        encode(&playlist.clone().into()),
        Err(Error::CompatibilityVersion { required: 3, declared: 1 })
    );

    playlist.header.version = 3;
    playlist.segments[0].byte_range = Some(ByteRange::new(100, Some(0)));
    assert_matches!(
        encode(&playlist.clone().into()),
        Err(Error::CompatibilityVersion { required: 4, declared: 3 })
    );

    let mut master = MasterPlaylist::new(Header::with_version(4));
    let mut key = Key::new(EncryptionMethod::Aes128, Some("https://example.com/key".into()));
    key.key_format_versions = vec![1];
    master.session_keys.push(key);
    assert_matches!(
        encode(&master.into()),
        Err(Error::CompatibilityVersion { required: 5, declared: 4 })
    );
}

#[test]
fn test_illegal_quoted_string() {
    let mut playlist = vod_playlist(3);
    let mut segment = MediaSegment::new("a.ts", 10.0);
    segment.map = Some(Map::new("init\".mp4"));
    playlist.segments.push(segment);

    let err = encode(&playlist.into()).unwrap_err();
    assert_matches!(err, Error::Attr(AttrError::IllegalValue { .. }));
}

#[test]
fn test_client_attribute_needs_prefix() {
    let mut range = DateRange::new("ad-1", "2014-03-05T11:15:00Z");
    range
        .client_attributes
        .insert("AD-ID".into(), ClientAttribute::String("1234".into()));

    let mut playlist = vod_playlist(3);
    let mut segment = MediaSegment::new("a.ts", 10.0);
    segment.date_range = Some(range);
    playlist.segments.push(segment);

    let err = encode(&playlist.into()).unwrap_err();
    assert_matches!(&err, Error::Attr(AttrError::IllegalName(name)) if name == "AD-ID");
    assert_eq!(err.kind(), ErrorKind::Encoding);
}

#[test]
fn test_end_on_next_requires_class() {
    let mut range = DateRange::new("ad-1", "2014-03-05T11:15:00Z");
    range.end_on_next = true;

    let mut playlist = vod_playlist(3);
    let mut segment = MediaSegment::new("a.ts", 10.0);
    segment.date_range = Some(range);
    playlist.segments.push(segment);

    assert_matches!(
        encode(&playlist.into()),
        Err(Error::Attr(AttrError::MissingRequiredAttribute(name))) if name == "CLASS"
    );
}

#[test]
fn test_cleared_carried_tags_are_rejected() {
    let mut first = MediaSegment::new("a.ts", 10.0);
    first.map = Some(Map::new("init.mp4"));
    first.program_date_time = Some("2010-02-19T14:54:23Z".into());
    first.date_range = Some(DateRange::new("ad-1", "2010-02-19T14:54:23Z"));

    let clear_map = |s: &mut MediaSegment| s.map = None;
    let clear_date = |s: &mut MediaSegment| s.program_date_time = None;
    let clear_range = |s: &mut MediaSegment| s.date_range = None;
    let cases: [(&str, &dyn Fn(&mut MediaSegment)); 3] = [
        ("#EXT-X-MAP", &clear_map),
        ("#EXT-X-PROGRAM-DATE-TIME", &clear_date),
        ("#EXT-X-DATERANGE", &clear_range),
    ];

    for (expected, clear) in cases {
        let mut second = first.clone();
        second.uri = "b.ts".into();
        clear(&mut second);

        let mut playlist = vod_playlist(3);
        playlist.segments = vec![first.clone(), second];

        let err = encode(&playlist.into()).unwrap_err();
        assert_matches!(&err, Error::ClearedCarryTag { index: 1, tag } if *tag == expected);
        assert_eq!(err.kind(), ErrorKind::Encoding);
    }
}

#[test]
fn test_carried_tags_survive_round_trip() {
    let mut playlist = vod_playlist(3);
    for uri in ["a.ts", "b.ts"] {
        let mut segment = MediaSegment::new(uri, 10.0);
        segment.map = Some(Map::new("init.mp4"));
        playlist.segments.push(segment);
    }

    let playlist: Playlist = playlist.into();
    let decoded = decode_str(&encode_to_string(&playlist).unwrap()).unwrap();
    assert_eq!(decoded, playlist);
}

#[test]
fn test_key_without_uri() {
    let mut playlist = vod_playlist(3);
    let mut segment = MediaSegment::new("a.ts", 10.0);
    segment.key = Some(Key::new(EncryptionMethod::Aes128, None));
    playlist.segments.push(segment);

    assert_matches!(
        encode(&playlist.into()),
        Err(Error::Attr(AttrError::MissingRequiredAttribute(name))) if name == "URI"
    );
}
