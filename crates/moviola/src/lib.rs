#![forbid(unsafe_code)]

//! moviola: detects adaptive-streaming manifests and reassembles the chosen
//! representations into one playable local file.
//!
//! The flow: a detected `master.json` URL goes through the
//! [`ManifestResolver`] (best video under an optional height ceiling, best
//! audio, absolute segment URLs, session-cached), the
//! [`SegmentDownloader`] fetches segments in ordered batches, the
//! reconstructor prefixes the base64 init segment, and — when an audio track
//! exists — an external [`Muxer`] copies both streams into one container.
//! [`Session`] wires all of it together.

mod config;
mod error;
mod session;

pub mod detect;
pub mod fixture;

pub use config::MoviolaConfig;
pub use detect::{ManifestNotice, ManifestWatcher, MANIFEST_MARKER};
pub use error::MoviolaError;
pub use session::{SavedClip, Session};

pub use moviola_cache::{Cache, MemoryCache};
pub use moviola_catalog::{
    ArtifactWriter, Catalog, CatalogError, MemoryCatalog, NewVideo, VideoRecord, VideoSummary,
};
pub use moviola_download::{
    assemble, DownloadError, ElementaryStream, SegmentDownloader, SharedDownloadState, TrackKind,
    TrackProgress,
};
pub use moviola_events::{Event, EventBus};
pub use moviola_manifest::{
    ManifestError, ManifestResolver, MasterManifest, MaxHeight, Representation, ResolvedMedia,
    ResolvedPair,
};
pub use moviola_mux::{FfmpegMuxer, MuxError, Muxer};
pub use moviola_net::{HttpClient, Net, NetError, NetExt, NetOptions, RetryNet, RetryPolicy};
