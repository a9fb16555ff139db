use bytes::Bytes;

use crate::error::CatalogResult;

/// A completed download: reconstructed (or muxed) media plus where it came
/// from.
#[derive(Debug, Clone)]
pub struct VideoRecord {
    /// Store-generated unique id.
    pub id: String,
    pub name: String,
    /// Page URL the clip was detected on; the listing index.
    pub source_url: String,
    pub video: Bytes,
    pub audio: Option<Bytes>,
}

/// Listing projection: enough to render a row without hauling media bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoSummary {
    pub id: String,
    pub name: String,
}

/// Input for [`Catalog::save`]; the id is generated by the store.
#[derive(Debug, Clone)]
pub struct NewVideo {
    pub name: String,
    pub source_url: String,
    pub video: Bytes,
    pub audio: Option<Bytes>,
}

/// Keyed record store for completed downloads, indexed by source page URL.
pub trait Catalog: Send + Sync {
    /// Stores a record and returns its generated id.
    fn save(&self, video: NewVideo) -> CatalogResult<String>;

    /// All records saved for a page URL, in insertion order.
    fn list_by_url(&self, source_url: &str) -> Vec<VideoSummary>;

    fn get(&self, id: &str) -> Option<VideoRecord>;

    fn delete(&self, id: &str) -> CatalogResult<()>;
}
