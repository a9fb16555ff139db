//! Media reconstruction.
//!
//! The init segment carries the container header; every media segment is a
//! self-contained fragment. Concatenating them in manifest order yields one
//! valid elementary stream for the track. Segment bytes are opaque and copied
//! verbatim; the only transformation anywhere is base64-decoding the init.

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine as _;
use bytes::{Bytes, BytesMut};

use crate::error::{DownloadError, DownloadResult};

/// A single-track byte stream, not yet wrapped in a multiplexed container.
#[derive(Debug, Clone)]
pub struct ElementaryStream {
    pub bytes: Bytes,
    pub mime_type: String,
}

impl ElementaryStream {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Decodes the manifest's base64 init segment into raw bytes.
pub fn decode_init_segment(init_segment_b64: &str) -> DownloadResult<Vec<u8>> {
    BASE64_STANDARD
        .decode(init_segment_b64)
        .map_err(|e| DownloadError::InitSegmentDecode(e.to_string()))
}

/// Prefixes the decoded init segment to the ordered segment bodies.
pub fn assemble(
    init_segment_b64: &str,
    segments: &[Bytes],
    mime_type: &str,
) -> DownloadResult<ElementaryStream> {
    let init = decode_init_segment(init_segment_b64)?;

    let total = init.len() + segments.iter().map(Bytes::len).sum::<usize>();
    let mut out = BytesMut::with_capacity(total);
    out.extend_from_slice(&init);
    for segment in segments {
        out.extend_from_slice(segment);
    }

    Ok(ElementaryStream {
        bytes: out.freeze(),
        mime_type: mime_type.to_string(),
    })
}
