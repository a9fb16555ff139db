#![forbid(unsafe_code)]

use std::fmt;

/// Which track of a clip an operation applies to.
///
/// Lives here so both the downloader (state slots) and subscribers (progress
/// events) speak the same name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackKind {
    Video,
    Audio,
}

impl TrackKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TrackKind::Video => "video",
            TrackKind::Audio => "audio",
        }
    }
}

impl fmt::Display for TrackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pipeline event, published on the [`crate::EventBus`].
#[derive(Clone, Debug)]
pub enum Event {
    /// A manifest URL was observed in some tab.
    ManifestDetected { tab_id: i64, url: String },
    /// A track download advanced.
    DownloadProgress { track: TrackKind, percent: f32 },
    /// A track download finished.
    DownloadComplete { track: TrackKind, total_bytes: u64 },
    /// A record was saved to or deleted from the video catalog.
    CatalogUpdated { id: String },
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(TrackKind::Video, "video")]
    #[case(TrackKind::Audio, "audio")]
    fn track_kind_display(#[case] kind: TrackKind, #[case] expected: &str) {
        assert_eq!(kind.to_string(), expected);
    }

    #[test]
    fn event_is_cloneable_for_broadcast() {
        let event = Event::DownloadProgress {
            track: TrackKind::Video,
            percent: 42.0,
        };
        let clone = event.clone();
        assert!(matches!(
            clone,
            Event::DownloadProgress {
                track: TrackKind::Video,
                ..
            }
        ));
    }
}
