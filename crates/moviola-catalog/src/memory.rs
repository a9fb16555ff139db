//! In-memory catalog.

use moviola_events::{Event, EventBus};
use parking_lot::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::error::{CatalogError, CatalogResult};
use crate::store::{Catalog, NewVideo, VideoRecord, VideoSummary};

/// [`Catalog`] backed by an in-memory list in insertion order.
///
/// Publishes [`Event::CatalogUpdated`] on save and delete when wired to a
/// bus, so listings can refresh without polling.
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    records: RwLock<Vec<VideoRecord>>,
    events: Option<EventBus>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_events(events: EventBus) -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            events: Some(events),
        }
    }

    fn notify(&self, id: &str) {
        if let Some(ref events) = self.events {
            events.publish(Event::CatalogUpdated { id: id.to_string() });
        }
    }
}

impl Catalog for MemoryCatalog {
    fn save(&self, video: NewVideo) -> CatalogResult<String> {
        let id = Uuid::new_v4().to_string();
        let record = VideoRecord {
            id: id.clone(),
            name: video.name,
            source_url: video.source_url,
            video: video.video,
            audio: video.audio,
        };

        debug!(
            id = %id,
            name = %record.name,
            source_url = %record.source_url,
            video_bytes = record.video.len(),
            has_audio = record.audio.is_some(),
            "catalog save"
        );
        self.records.write().push(record);
        self.notify(&id);

        Ok(id)
    }

    fn list_by_url(&self, source_url: &str) -> Vec<VideoSummary> {
        self.records
            .read()
            .iter()
            .filter(|r| r.source_url == source_url)
            .map(|r| VideoSummary {
                id: r.id.clone(),
                name: r.name.clone(),
            })
            .collect()
    }

    fn get(&self, id: &str) -> Option<VideoRecord> {
        self.records.read().iter().find(|r| r.id == id).cloned()
    }

    fn delete(&self, id: &str) -> CatalogResult<()> {
        let mut records = self.records.write();
        let before = records.len();
        records.retain(|r| r.id != id);

        if records.len() == before {
            return Err(CatalogError::NotFound { id: id.to_string() });
        }
        drop(records);

        debug!(id = %id, "catalog delete");
        self.notify(id);
        Ok(())
    }
}
