//! Cache-backed manifest resolution.

use std::sync::Arc;

use moviola_cache::Cache;
use moviola_net::Net;
use tracing::debug;
use url::Url;

use crate::error::{ManifestError, ManifestResult};
use crate::model::parse_master;
use crate::resolve::{media_root_url, resolve_media, ResolvedPair};
use crate::select::{best_audio, best_video};

/// Turns a manifest URL into a [`ResolvedPair`], at most once per session.
///
/// Cache hits return without touching the network. Two concurrent callers
/// resolving the same key may both fetch and both store; resolution is
/// idempotent and cheap next to segment downloads, so the race is accepted.
pub struct ManifestResolver<N, C> {
    net: N,
    cache: Arc<C>,
    max_height: Option<u32>,
}

impl<N, C> ManifestResolver<N, C>
where
    N: Net,
    C: Cache<String, Arc<ResolvedPair>>,
{
    pub fn new(net: N, cache: Arc<C>) -> Self {
        Self {
            net,
            cache,
            max_height: None,
        }
    }

    /// Set the video height ceiling applied during selection.
    pub fn with_max_height(mut self, max_height: Option<u32>) -> Self {
        self.max_height = max_height;
        self
    }

    pub async fn resolve(&self, manifest_url: &str) -> ManifestResult<Arc<ResolvedPair>> {
        let url = Url::parse(manifest_url)
            .map_err(|e| ManifestError::InvalidUrl(format!("manifest URL {manifest_url:?}: {e}")))?;
        let key = url.to_string();

        if let Some(cached) = self.cache.get(&key) {
            debug!(url = %url, clip_id = %cached.clip_id, "manifest cache hit");
            return Ok(cached);
        }

        debug!(url = %url, "manifest cache miss, fetching");
        let response = self.net.get(url.clone(), None).await?;
        let body = response.into_success_body().map_err(ManifestError::Fetch)?;

        let master = parse_master(&body)?;

        let video = best_video(&master.video, self.max_height)?;
        let audio = master.audio.as_deref().and_then(best_audio);

        let media_root = media_root_url(&url, &master.base_url)?;

        let pair = Arc::new(ResolvedPair {
            clip_id: master.clip_id.clone(),
            video: resolve_media(video, &media_root)?,
            audio: audio.map(|a| resolve_media(a, &media_root)).transpose()?,
        });

        debug!(
            url = %url,
            clip_id = %pair.clip_id,
            video_segments = pair.video.segments.len(),
            has_audio = pair.audio.is_some(),
            "manifest resolved"
        );
        self.cache.set(key, pair.clone());

        Ok(pair)
    }
}
