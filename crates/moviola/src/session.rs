//! Session orchestration: one manifest URL in, one saved clip out.

use std::path::PathBuf;
use std::sync::Arc;

use bytes::Bytes;
use moviola_cache::MemoryCache;
use moviola_catalog::{ArtifactWriter, Catalog, MemoryCatalog, NewVideo};
use moviola_download::{assemble, SegmentDownloader, SharedDownloadState, TrackKind};
use moviola_events::EventBus;
use moviola_manifest::{ManifestResolver, ResolvedPair};
use moviola_mux::{FfmpegMuxer, Muxer};
use moviola_net::{HttpClient, Net, NetExt, RetryNet};
use tracing::{debug, warn};

use crate::config::MoviolaConfig;
use crate::error::MoviolaError;

/// Outcome of a completed clip fetch.
#[derive(Debug, Clone)]
pub struct SavedClip {
    /// Catalog record id.
    pub id: String,
    /// Artifact file(s) written under the downloads directory.
    pub artifact_paths: Vec<PathBuf>,
}

type SessionCache = MemoryCache<String, Arc<ResolvedPair>>;

/// One download session: resolver, downloader, muxer, catalog, and artifact
/// writer sharing a single event bus and manifest cache.
///
/// Each track serializes against itself via the downloader's guard, but the
/// two tracks of one clip download concurrently.
pub struct Session<N, M, C> {
    resolver: ManifestResolver<N, SessionCache>,
    downloader: SegmentDownloader<N>,
    muxer: M,
    catalog: Arc<C>,
    artifacts: ArtifactWriter,
    events: EventBus,
}

impl Session<RetryNet<HttpClient>, FfmpegMuxer, MemoryCatalog> {
    /// Builds the production wiring: retrying reqwest client, ffmpeg muxer,
    /// in-memory catalog.
    pub fn new(config: MoviolaConfig) -> Self {
        let events = config
            .events
            .clone()
            .unwrap_or_else(|| EventBus::new(config.events_channel_capacity));
        let net = HttpClient::new(config.net.clone()).with_retry(config.net.retry_policy.clone());
        let muxer = match &config.ffmpeg {
            Some(binary) => FfmpegMuxer::with_binary(binary),
            None => FfmpegMuxer::new(),
        };
        let catalog = Arc::new(MemoryCatalog::with_events(events.clone()));

        Self::assemble_parts(net, muxer, catalog, events, &config)
    }
}

impl<N, M, C> Session<N, M, C>
where
    N: Net + Clone,
    M: Muxer,
    C: Catalog,
{
    /// Builds a session from explicit parts; tests inject fakes here.
    pub fn from_parts(net: N, muxer: M, catalog: Arc<C>, config: &MoviolaConfig) -> Self {
        let events = config
            .events
            .clone()
            .unwrap_or_else(|| EventBus::new(config.events_channel_capacity));
        Self::assemble_parts(net, muxer, catalog, events, config)
    }

    fn assemble_parts(
        net: N,
        muxer: M,
        catalog: Arc<C>,
        events: EventBus,
        config: &MoviolaConfig,
    ) -> Self {
        let resolver = ManifestResolver::new(net.clone(), Arc::new(MemoryCache::new()))
            .with_max_height(config.max_height.map(Into::into));
        let downloader = SegmentDownloader::new(net, SharedDownloadState::new(), events.clone())
            .with_batch_size(config.batch_size);
        let artifacts = ArtifactWriter::new(config.downloads_dir.clone())
            .with_chunk_threshold(config.chunk_file_threshold);

        Self {
            resolver,
            downloader,
            muxer,
            catalog,
            artifacts,
            events,
        }
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn download_state(&self) -> &SharedDownloadState {
        self.downloader.state()
    }

    pub fn catalog(&self) -> &Arc<C> {
        &self.catalog
    }

    /// Runs the full pipeline for one clip.
    ///
    /// Returns `Ok(None)` when a track of this clip is already downloading —
    /// the overlapping request is dropped, not queued. Everything else is
    /// all-or-nothing: the first failure anywhere propagates and no artifact
    /// is produced.
    pub async fn fetch_clip(
        &self,
        manifest_url: &str,
        name: &str,
        page_url: &str,
    ) -> Result<Option<SavedClip>, MoviolaError> {
        let resolved = self.resolver.resolve(manifest_url).await?;
        debug!(
            clip_id = %resolved.clip_id,
            has_audio = resolved.audio.is_some(),
            "starting clip fetch"
        );

        let (video_segments, audio_segments) = match resolved.audio.as_ref() {
            Some(audio) => {
                let (video, audio) = tokio::join!(
                    self.downloader.download(&resolved.video, TrackKind::Video),
                    self.downloader.download(audio, TrackKind::Audio),
                );
                (video?, audio?)
            }
            None => (
                self.downloader
                    .download(&resolved.video, TrackKind::Video)
                    .await?,
                None,
            ),
        };

        let Some(video_segments) = video_segments else {
            warn!(clip_id = %resolved.clip_id, "video track busy, dropping request");
            return Ok(None);
        };

        let video_stream = assemble(
            &resolved.video.representation.init_segment,
            &video_segments,
            &resolved.video.representation.mime_type_or("video/mp4"),
        )?;

        let audio_stream = match (resolved.audio.as_ref(), audio_segments) {
            (Some(audio), Some(segments)) => Some(assemble(
                &audio.representation.init_segment,
                &segments,
                &audio.representation.mime_type_or("audio/mp4"),
            )?),
            (Some(_), None) => {
                warn!(clip_id = %resolved.clip_id, "audio track busy, dropping request");
                return Ok(None);
            }
            (None, _) => None,
        };

        let (artifact_bytes, extension): (Bytes, &str) = match audio_stream.as_ref() {
            Some(audio) => (self.muxer.copy_mux(&video_stream, audio).await?, "mp4"),
            None => {
                // Raw elementary stream, no container wrapper: most players
                // won't open it directly. Kept as-is; muxing a single track
                // is out of scope.
                warn!(
                    clip_id = %resolved.clip_id,
                    "no audio track; writing raw video elementary stream"
                );
                (video_stream.bytes.clone(), "m4v")
            }
        };

        let id = self.catalog.save(NewVideo {
            name: name.to_string(),
            source_url: page_url.to_string(),
            video: video_stream.bytes.clone(),
            audio: audio_stream.as_ref().map(|a| a.bytes.clone()),
        })?;

        let artifact_paths = self.artifacts.write(name, extension, &artifact_bytes).await?;
        debug!(
            clip_id = %resolved.clip_id,
            record_id = %id,
            files = artifact_paths.len(),
            "clip fetch complete"
        );

        Ok(Some(SavedClip { id, artifact_paths }))
    }
}
