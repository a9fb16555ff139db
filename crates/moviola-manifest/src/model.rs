//! Manifest wire format and parsing.
//!
//! Field names are the wire names. The producer emits a lot of metadata we
//! do not act on (`index_segment`, timing hints, `avg_id`); it is kept
//! optional so abbreviated manifests still parse, and unknown fields are
//! ignored outright.

use serde::Deserialize;

use crate::error::{ManifestError, ManifestResult};

/// Root manifest document: one clip, its media root, and every available
/// encoding of each track.
#[derive(Debug, Clone, Deserialize)]
pub struct MasterManifest {
    /// Opaque stable identifier for the clip.
    pub clip_id: String,
    /// Relative path fragment the media root is resolved from.
    pub base_url: String,
    pub video: Vec<Representation>,
    #[serde(default)]
    pub audio: Option<Vec<Representation>>,
}

/// One encoding variant of a track.
#[derive(Debug, Clone, Deserialize)]
pub struct Representation {
    #[serde(default)]
    pub id: Option<String>,
    /// Relative to the media root, prefixes every segment URL of this track.
    pub base_url: String,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub codecs: Option<String>,
    #[serde(default)]
    pub bitrate: Option<u64>,
    pub avg_bitrate: u64,
    #[serde(default)]
    pub avg_id: Option<String>,
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub max_segment_duration: Option<f64>,
    /// Base64-encoded initialization segment (container header).
    pub init_segment: String,
    #[serde(default)]
    pub index_segment: Option<String>,
    /// Manifest order is playback order; never reordered downstream.
    pub segments: Vec<Segment>,
    // video tracks
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub framerate: Option<f64>,
    // audio tracks
    #[serde(default)]
    pub channels: Option<u32>,
    #[serde(default)]
    pub sample_rate: Option<u32>,
    #[serde(default)]
    pub audio_primary: Option<bool>,
}

impl Representation {
    /// MIME type, defaulting by the track shape when the manifest omits it.
    pub fn mime_type_or(&self, fallback: &str) -> String {
        self.mime_type
            .clone()
            .unwrap_or_else(|| fallback.to_string())
    }
}

/// One time-bounded chunk of a representation's media data.
#[derive(Debug, Clone, Deserialize)]
pub struct Segment {
    /// Relative to the track root. Order in the manifest is byte order.
    pub url: String,
    #[serde(default)]
    pub start: Option<f64>,
    #[serde(default)]
    pub end: Option<f64>,
    #[serde(default)]
    pub size: Option<u64>,
}

/// Parses manifest bytes into [`MasterManifest`].
pub fn parse_master(data: &[u8]) -> ManifestResult<MasterManifest> {
    serde_json::from_slice(data).map_err(|e| ManifestError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_MANIFEST: &str = r#"{
        "clip_id": "abc123",
        "base_url": "../../parcel/",
        "video": [{
            "id": "v-540",
            "base_url": "540p/",
            "format": "dash",
            "mime_type": "video/mp4",
            "codecs": "avc1.640028",
            "bitrate": 1200000,
            "avg_bitrate": 1100000,
            "duration": 63.5,
            "max_segment_duration": 6,
            "width": 960,
            "height": 540,
            "framerate": 25.0,
            "init_segment": "AAAA",
            "index_segment": "sidx.mp4",
            "segments": [
                {"url": "seg-0.m4s", "start": 0, "end": 6, "size": 91234},
                {"url": "seg-1.m4s", "start": 6, "end": 12, "size": 88123}
            ]
        }],
        "audio": [{
            "id": "a-128",
            "base_url": "audio/",
            "mime_type": "audio/mp4",
            "codecs": "mp4a.40.2",
            "bitrate": 128000,
            "avg_bitrate": 127000,
            "duration": 63.5,
            "channels": 2,
            "sample_rate": 48000,
            "audio_primary": true,
            "init_segment": "BBBB",
            "segments": [{"url": "seg-0.m4s"}]
        }]
    }"#;

    #[test]
    fn parses_full_manifest() {
        let master = parse_master(FULL_MANIFEST.as_bytes()).unwrap();

        assert_eq!(master.clip_id, "abc123");
        assert_eq!(master.base_url, "../../parcel/");
        assert_eq!(master.video.len(), 1);

        let video = &master.video[0];
        assert_eq!(video.height, Some(540));
        assert_eq!(video.avg_bitrate, 1_100_000);
        assert_eq!(video.segments.len(), 2);
        assert_eq!(video.segments[0].url, "seg-0.m4s");

        let audio = master.audio.as_ref().unwrap();
        assert_eq!(audio[0].channels, Some(2));
        assert_eq!(audio[0].audio_primary, Some(true));
    }

    #[test]
    fn parses_abbreviated_manifest() {
        // Only the fields resolution actually needs.
        let data = br#"{
            "clip_id": "abc",
            "base_url": "/media/",
            "video": [{
                "avg_bitrate": 500,
                "height": 480,
                "base_url": "v1/",
                "init_segment": "AAA=",
                "segments": [{"url": "s0.m4s"}]
            }]
        }"#;

        let master = parse_master(data).unwrap();
        assert_eq!(master.video[0].avg_bitrate, 500);
        assert!(master.audio.is_none());
    }

    #[test]
    fn missing_clip_id_is_a_parse_error() {
        let data = br#"{"base_url": "/media/", "video": []}"#;
        let error = parse_master(data).unwrap_err();
        assert!(matches!(error, ManifestError::Parse(_)));
    }

    #[test]
    fn missing_segments_is_a_parse_error() {
        let data = br#"{
            "clip_id": "abc",
            "base_url": "/media/",
            "video": [{"avg_bitrate": 500, "base_url": "v1/", "init_segment": "AAA="}]
        }"#;
        assert!(matches!(
            parse_master(data).unwrap_err(),
            ManifestError::Parse(_)
        ));
    }

    #[test]
    fn unknown_fields_are_tolerated() {
        let data = br#"{
            "clip_id": "abc",
            "base_url": "/media/",
            "some_future_field": {"nested": true},
            "video": [{
                "avg_bitrate": 500,
                "base_url": "v1/",
                "init_segment": "AAA=",
                "segments": [],
                "unexpected": 9
            }]
        }"#;
        assert!(parse_master(data).is_ok());
    }

    #[test]
    fn not_json_is_a_parse_error() {
        assert!(matches!(
            parse_master(b"#EXTM3U").unwrap_err(),
            ManifestError::Parse(_)
        ));
    }
}
