//! Manifest detection boundary.
//!
//! The host's network-observation layer reports completed requests as
//! [`ManifestNotice`]s. The watcher keeps the latest manifest URL per tab
//! (keyed-record delivery) and publishes [`Event::ManifestDetected`]
//! (one-shot delivery), so consumers can use either model. Filtering to the
//! active context is the consumer's side of the contract: ask for your own
//! tab via [`ManifestWatcher::latest_for`] and ignore events for other tabs.

use std::{collections::HashMap, sync::Arc};

use moviola_events::{Event, EventBus};
use parking_lot::RwLock;
use tracing::{debug, trace};

/// Substring that marks a request URL as a master manifest.
pub const MANIFEST_MARKER: &str = "master.json";

/// A completed network request observed by the host.
///
/// `tab_id` is negative for requests outside any tab (workers, prefetches);
/// those are never clip manifests we can attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestNotice {
    pub tab_id: i64,
    pub url: String,
}

/// Tracks the latest detected manifest URL per tab.
#[derive(Clone, Debug)]
pub struct ManifestWatcher {
    latest: Arc<RwLock<HashMap<i64, String>>>,
    events: EventBus,
}

impl ManifestWatcher {
    pub fn new(events: EventBus) -> Self {
        Self {
            latest: Arc::new(RwLock::new(HashMap::new())),
            events,
        }
    }

    /// Records a notice if it looks like a manifest. Returns whether it did.
    pub fn observe(&self, notice: &ManifestNotice) -> bool {
        if notice.tab_id < 0 {
            trace!(url = %notice.url, "ignoring tabless request");
            return false;
        }
        if !notice.url.contains(MANIFEST_MARKER) {
            return false;
        }

        debug!(tab_id = notice.tab_id, url = %notice.url, "manifest detected");
        self.latest
            .write()
            .insert(notice.tab_id, notice.url.clone());
        self.events.publish(Event::ManifestDetected {
            tab_id: notice.tab_id,
            url: notice.url.clone(),
        });
        true
    }

    /// Latest manifest URL seen in the given tab.
    pub fn latest_for(&self, tab_id: i64) -> Option<String> {
        self.latest.read().get(&tab_id).cloned()
    }

    /// Drops the record for a closed tab.
    pub fn forget(&self, tab_id: i64) {
        self.latest.write().remove(&tab_id);
    }
}
