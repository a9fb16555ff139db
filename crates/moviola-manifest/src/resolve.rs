//! Two-level URL resolution.
//!
//! Level one: the manifest's `base_url` is resolved against the manifest's
//! own absolute URL (real relative-URL semantics, `..` segments and all).
//! Level two: each segment URL is the plain concatenation
//! `media_root + representation.base_url + segment.url` — the producer
//! builds paths by fragment pasting, so no slash normalization happens here.

use url::Url;

use crate::error::{ManifestError, ManifestResult};
use crate::model::{Representation, Segment};

/// A segment with its fetchable URL, computed once at resolution.
#[derive(Debug, Clone)]
pub struct ResolvedSegment {
    /// The manifest-relative URL, kept for diagnostics.
    pub url: String,
    pub absolute_url: Url,
}

/// One selected representation with every segment URL made absolute.
#[derive(Debug, Clone)]
pub struct ResolvedMedia {
    pub representation: Representation,
    /// The media root all segments hang off.
    pub absolute_url: Url,
    /// Same order as the manifest; byte order of the final artifact.
    pub segments: Vec<ResolvedSegment>,
}

/// The cached unit: both selected tracks of one clip.
#[derive(Debug, Clone)]
pub struct ResolvedPair {
    pub clip_id: String,
    pub video: ResolvedMedia,
    pub audio: Option<ResolvedMedia>,
}

/// Resolves the manifest's `base_url` against the manifest URL itself.
pub fn media_root_url(manifest_url: &Url, base_url: &str) -> ManifestResult<Url> {
    manifest_url
        .join(base_url)
        .map_err(|e| ManifestError::InvalidUrl(format!("media root from {base_url:?}: {e}")))
}

fn segment_absolute_url(
    media_root: &Url,
    representation: &Representation,
    segment: &Segment,
) -> ManifestResult<Url> {
    let absolute = format!("{}{}{}", media_root, representation.base_url, segment.url);
    Url::parse(&absolute)
        .map_err(|e| ManifestError::InvalidUrl(format!("segment URL {absolute:?}: {e}")))
}

/// Makes every segment of the representation fetchable.
pub fn resolve_media(
    representation: &Representation,
    media_root: &Url,
) -> ManifestResult<ResolvedMedia> {
    let segments = representation
        .segments
        .iter()
        .map(|segment| {
            Ok(ResolvedSegment {
                url: segment.url.clone(),
                absolute_url: segment_absolute_url(media_root, representation, segment)?,
            })
        })
        .collect::<ManifestResult<Vec<_>>>()?;

    Ok(ResolvedMedia {
        representation: representation.clone(),
        absolute_url: media_root.clone(),
        segments,
    })
}
