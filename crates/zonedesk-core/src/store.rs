// ── View store ──
//
// The zone list and the single rendered record table, published through
// `watch` channels. Only the console writes here; front ends subscribe.
// The table is always replaced wholesale from a fresh listing, never
// patched in place.

use std::sync::Arc;

use tokio::sync::watch;

use crate::model::{Record, RecordId, Zone, ZoneId};
use crate::render::{DisplayTable, render};

/// What the record panel currently shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordView {
    /// Zone the records belong to; `None` when nothing is selected.
    pub zone_id: Option<ZoneId>,
    pub records: Arc<Vec<Record>>,
    pub table: Arc<DisplayTable>,
}

pub struct ViewStore {
    zones: watch::Sender<Arc<Vec<Zone>>>,
    records: watch::Sender<RecordView>,
}

impl Default for ViewStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewStore {
    pub fn new() -> Self {
        let (zones, _) = watch::channel(Arc::new(Vec::new()));
        let (records, _) = watch::channel(RecordView::default());
        Self { zones, records }
    }

    // ── Zones ────────────────────────────────────────────────────────

    pub fn zones(&self) -> Arc<Vec<Zone>> {
        Arc::clone(&self.zones.borrow())
    }

    pub fn zone(&self, id: ZoneId) -> Option<Zone> {
        self.zones.borrow().iter().find(|z| z.id == id).cloned()
    }

    pub fn subscribe_zones(&self) -> watch::Receiver<Arc<Vec<Zone>>> {
        self.zones.subscribe()
    }

    pub(crate) fn replace_zones(&self, zones: Vec<Zone>) {
        self.zones.send_modify(|z| *z = Arc::new(zones));
    }

    // ── Records ──────────────────────────────────────────────────────

    pub fn view(&self) -> RecordView {
        self.records.borrow().clone()
    }

    pub fn table(&self) -> Arc<DisplayTable> {
        Arc::clone(&self.records.borrow().table)
    }

    /// Cached record from the last listing of the active zone.
    pub fn record(&self, id: RecordId) -> Option<Record> {
        self.records
            .borrow()
            .records
            .iter()
            .find(|r| r.id == id)
            .cloned()
    }

    pub fn subscribe_records(&self) -> watch::Receiver<RecordView> {
        self.records.subscribe()
    }

    /// Replace the whole table with a fresh listing of `zone_id`.
    pub(crate) fn replace_records(&self, zone_id: ZoneId, records: Vec<Record>) {
        let table = Arc::new(render(&records));
        self.records.send_modify(|view| {
            *view = RecordView {
                zone_id: Some(zone_id),
                records: Arc::new(records),
                table,
            };
        });
    }

    pub(crate) fn clear_records(&self) {
        self.records.send_modify(|view| *view = RecordView::default());
    }

    pub(crate) fn clear(&self) {
        self.replace_zones(Vec::new());
        self.clear_records();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RecordType;

    fn record(id: i64) -> Record {
        Record {
            id: RecordId::new(id),
            zone_id: ZoneId::new(7),
            record_type: RecordType::A,
            name: "www".into(),
            content: "192.0.2.1".into(),
            priority: None,
            ttl: 300,
        }
    }

    #[test]
    fn replace_records_renders_table() {
        let store = ViewStore::new();
        let rx = store.subscribe_records();
        store.replace_records(ZoneId::new(7), vec![record(1), record(2)]);

        let view = rx.borrow();
        assert_eq!(view.zone_id, Some(ZoneId::new(7)));
        assert_eq!(view.table.records().count(), 2);
        drop(view);
        assert!(store.record(RecordId::new(2)).is_some());
    }

    #[test]
    fn clear_resets_to_placeholder() {
        let store = ViewStore::new();
        store.replace_records(ZoneId::new(7), vec![record(1)]);
        store.clear_records();
        assert_eq!(store.view().zone_id, None);
        assert!(store.table().is_empty());
        assert!(store.record(RecordId::new(1)).is_none());
    }
}
