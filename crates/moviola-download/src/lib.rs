#![forbid(unsafe_code)]

//! Segmented-media download and reconstruction.
//!
//! Segments are fetched in fixed-size batches: all fetches within a batch run
//! concurrently, batches run strictly one after another, and the output is
//! always in manifest order. The init segment plus the ordered segment bodies
//! concatenate into one elementary stream per track.

mod assemble;
mod chunk;
mod downloader;
mod error;
mod state;

pub use assemble::{assemble, decode_init_segment, ElementaryStream};
pub use chunk::{split_in_chunks, Chunk};
pub use downloader::{SegmentDownloader, DEFAULT_BATCH_SIZE};
pub use error::{DownloadError, DownloadResult};
pub use state::{SharedDownloadState, TrackProgress};

pub use moviola_events::TrackKind;
