#![forbid(unsafe_code)]

use std::path::PathBuf;

use moviola_catalog::DEFAULT_CHUNK_FILE_THRESHOLD;
use moviola_download::DEFAULT_BATCH_SIZE;
use moviola_events::EventBus;
use moviola_manifest::MaxHeight;
use moviola_net::NetOptions;

/// Configuration for a download [`crate::Session`].
#[derive(Clone, Debug)]
pub struct MoviolaConfig {
    /// Segments fetched concurrently per batch.
    pub batch_size: usize,
    /// Artifacts above this size are written as numbered chunk files.
    pub chunk_file_threshold: usize,
    /// Directory final artifacts are written into.
    pub downloads_dir: PathBuf,
    /// Event bus to publish on (one is created internally if not provided).
    pub events: Option<EventBus>,
    /// Capacity of the internally created events channel.
    pub events_channel_capacity: usize,
    /// Path to the ffmpeg binary. `None` means `ffmpeg` from `PATH`.
    pub ffmpeg: Option<PathBuf>,
    /// Video height ceiling for representation selection. `None` selects
    /// from all representations.
    pub max_height: Option<MaxHeight>,
    /// Network configuration.
    pub net: NetOptions,
}

impl Default for MoviolaConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            chunk_file_threshold: DEFAULT_CHUNK_FILE_THRESHOLD,
            downloads_dir: PathBuf::from("moviola"),
            events: None,
            events_channel_capacity: 32,
            ffmpeg: None,
            max_height: None,
            net: NetOptions::default(),
        }
    }
}

impl MoviolaConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the per-batch segment fetch width.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Set the size above which artifacts become chunk files.
    pub fn with_chunk_file_threshold(mut self, threshold: usize) -> Self {
        self.chunk_file_threshold = threshold;
        self
    }

    /// Set the downloads directory.
    pub fn with_downloads_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.downloads_dir = dir.into();
        self
    }

    /// Set the event bus shared with subscribers.
    pub fn with_events(mut self, events: EventBus) -> Self {
        self.events = Some(events);
        self
    }

    /// Set the internally created events channel capacity.
    pub fn with_events_channel_capacity(mut self, capacity: usize) -> Self {
        self.events_channel_capacity = capacity;
        self
    }

    /// Set an explicit ffmpeg binary path.
    pub fn with_ffmpeg(mut self, binary: impl Into<PathBuf>) -> Self {
        self.ffmpeg = Some(binary.into());
        self
    }

    /// Set the video quality ceiling.
    pub fn with_max_height(mut self, max_height: Option<MaxHeight>) -> Self {
        self.max_height = max_height;
        self
    }

    /// Set network options.
    pub fn with_net(mut self, net: NetOptions) -> Self {
        self.net = net;
        self
    }
}
