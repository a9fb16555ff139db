//! Chunked segment downloading.

use bytes::Bytes;
use futures::future::try_join_all;
use moviola_events::{Event, EventBus, TrackKind};
use moviola_manifest::{ResolvedMedia, ResolvedSegment};
use moviola_net::Net;
use tracing::{debug, warn};

use crate::assemble::decode_init_segment;
use crate::chunk::split_in_chunks;
use crate::error::{DownloadError, DownloadResult};
use crate::state::SharedDownloadState;

/// Segments fetched concurrently per batch. A fixed width, not derived from
/// bandwidth: it bounds peak in-flight connections.
pub const DEFAULT_BATCH_SIZE: usize = 3;

/// Downloads a resolved track's segments in ordered batches.
///
/// Batches run strictly one after another; fetches within a batch run
/// concurrently and their bodies are kept in manifest order however they
/// complete. The first failing segment fails the whole track and nothing
/// partial is kept.
pub struct SegmentDownloader<N> {
    net: N,
    state: SharedDownloadState,
    events: EventBus,
    batch_size: usize,
}

impl<N: Net> SegmentDownloader<N> {
    pub fn new(net: N, state: SharedDownloadState, events: EventBus) -> Self {
        Self {
            net,
            state,
            events,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    /// Set the batch width.
    ///
    /// # Panics
    ///
    /// Panics if `batch_size` is zero.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        assert!(batch_size > 0, "batch size must be non-zero");
        self.batch_size = batch_size;
        self
    }

    pub fn state(&self) -> &SharedDownloadState {
        &self.state
    }

    /// Downloads every segment of `media`, returning the bodies in manifest
    /// order.
    ///
    /// Returns `Ok(None)` without fetching anything when a pass for the same
    /// track kind is already running — overlapping requests are logged and
    /// dropped, never queued.
    pub async fn download(
        &self,
        media: &ResolvedMedia,
        kind: TrackKind,
    ) -> DownloadResult<Option<Vec<Bytes>>> {
        if !self.state.try_begin(kind) {
            warn!(track = %kind, "download already in progress, ignoring request");
            return Ok(None);
        }

        match self.run(media, kind).await {
            Ok((total_bytes, segments)) => {
                self.state.finish(kind);
                self.events.publish(Event::DownloadComplete {
                    track: kind,
                    total_bytes,
                });
                Ok(Some(segments))
            }
            Err(error) => {
                // Partial bytes go down with the failed pass; the slot resets
                // so the caller can re-initiate.
                self.state.fail(kind);
                Err(error)
            }
        }
    }

    async fn run(
        &self,
        media: &ResolvedMedia,
        kind: TrackKind,
    ) -> DownloadResult<(u64, Vec<Bytes>)> {
        let segment_count = media.segments.len();
        // The init segment is the first unit of progress.
        let total_units = segment_count + 1;

        let init = decode_init_segment(&media.representation.init_segment)?;
        let mut total_bytes = init.len() as u64;
        self.advance(kind, 100.0 / total_units as f32);

        debug!(
            track = %kind,
            segments = segment_count,
            batch_size = self.batch_size,
            "starting segment download"
        );

        let mut output: Vec<Bytes> = Vec::with_capacity(segment_count);
        for chunk in split_in_chunks(&media.segments, self.batch_size) {
            let fetches = chunk.values.iter().enumerate().map(|(offset, segment)| {
                self.fetch_segment(segment, chunk.start_index + offset)
            });

            // try_join_all keeps results in input order however the fetches
            // complete, and the first error fails the whole batch.
            let bodies = try_join_all(fetches).await?;
            for body in bodies {
                total_bytes += body.len() as u64;
                output.push(body);
            }

            let increment = 100.0 * chunk.values.len() as f32 / total_units as f32;
            self.advance(kind, increment);

            debug!(
                track = %kind,
                downloaded = output.len(),
                total = segment_count,
                "batch complete"
            );
        }

        Ok((total_bytes, output))
    }

    async fn fetch_segment(&self, segment: &ResolvedSegment, index: usize) -> DownloadResult<Bytes> {
        let response = self
            .net
            .get(segment.absolute_url.clone(), None)
            .await
            .map_err(|source| DownloadError::Segment { index, source })?;

        response
            .into_success_body()
            .map_err(|source| DownloadError::Segment { index, source })
    }

    fn advance(&self, kind: TrackKind, increment: f32) {
        let percent = self.state.advance(kind, increment);
        self.events.publish(Event::DownloadProgress {
            track: kind,
            percent,
        });
    }
}
