// ── Record repository ──
//
// Record CRUD scoped to the active zone. Every successful mutation is
// followed by a fresh listing that replaces the whole table; the
// mutation response itself is never rendered.

use tracing::{debug, info, warn};

use zonedesk_api::{ApiClient, RecordBody};

use crate::config::PageContext;
use crate::convert::record_from_dto;
use crate::error::CoreError;
use crate::model::{Record, RecordDraft, RecordId, ValidRecord, ZoneId};
use crate::policy::{FormMode, RolePolicy};
use crate::selection::{Fenced, SelectionTicket, ZoneSelection};
use crate::store::ViewStore;

pub const SAVE_FAILED: &str = "Failed to save record";
pub const DELETE_FAILED: &str = "Failed to delete record";
pub const LIST_FAILED: &str = "Failed to load records";

pub struct RecordRepository<'a> {
    api: &'a ApiClient,
    selection: &'a ZoneSelection,
    store: &'a ViewStore,
    page: PageContext,
}

impl<'a> RecordRepository<'a> {
    pub fn new(
        api: &'a ApiClient,
        selection: &'a ZoneSelection,
        store: &'a ViewStore,
        page: PageContext,
    ) -> Self {
        Self {
            api,
            selection,
            store,
            page,
        }
    }

    /// Fetch the zone's records and, if `ticket` is still current,
    /// replace the displayed table with them.
    pub async fn list(&self, ticket: SelectionTicket) -> Result<Fenced<Vec<Record>>, CoreError> {
        let zone_id = ticket.zone_id();
        debug!(%zone_id, "listing records");
        let result = self.api.list_records(zone_id.get()).await;

        if !self.selection.is_current(ticket) {
            warn!(%zone_id, "discarding record list for superseded selection");
            return match result {
                Err(e) if e.is_auth_expired() => Err(e.into()),
                _ => Ok(Fenced::Stale),
            };
        }

        let records: Vec<Record> = result
            .map_err(|e| CoreError::from_api(e, LIST_FAILED))?
            .into_iter()
            .map(|dto| record_from_dto(dto, zone_id))
            .collect();

        debug!(%zone_id, count = records.len(), "records listed");
        self.store.replace_records(zone_id, records.clone());
        Ok(Fenced::Current(records))
    }

    /// Create or update, depending on whether the draft carries an id.
    pub async fn save(&self, draft: &RecordDraft) -> Result<Fenced<Vec<Record>>, CoreError> {
        let ticket = self.ticket_for(draft.zone_id)?;
        let valid = match draft.id {
            None => {
                self.policy(draft.zone_id, FormMode::Add).enforce(draft, None)?;
                draft.validate()?
            }
            Some(id) => {
                let existing = self.cached(id)?;
                if existing.record_type.is_soa() {
                    return Err(soa_read_only());
                }
                self.policy(draft.zone_id, FormMode::Edit)
                    .enforce(draft, Some(&existing))?;
                draft.validate()?
            }
        };

        match valid.id {
            None => self.create(ticket, &valid).await,
            Some(id) => self.update(ticket, id, &valid).await,
        }
    }

    pub async fn create(
        &self,
        ticket: SelectionTicket,
        record: &ValidRecord,
    ) -> Result<Fenced<Vec<Record>>, CoreError> {
        let body = RecordBody::from(record);
        let new_id = self
            .api
            .create_record(&body)
            .await
            .map_err(|e| CoreError::from_api(e, SAVE_FAILED))?;
        info!(zone_id = %record.zone_id, record_type = %record.record_type, ?new_id, "record created");
        self.relist_after(ticket, "Record saved").await
    }

    pub async fn update(
        &self,
        ticket: SelectionTicket,
        id: RecordId,
        record: &ValidRecord,
    ) -> Result<Fenced<Vec<Record>>, CoreError> {
        let body = RecordBody::from(record);
        self.api
            .update_record(id.get(), &body)
            .await
            .map_err(|e| CoreError::from_api(e, SAVE_FAILED))?;
        info!(zone_id = %record.zone_id, record_id = %id, "record updated");
        self.relist_after(ticket, "Record saved").await
    }

    /// The record a delete would remove, or why it cannot be deleted.
    /// Checked before asking the user to confirm.
    pub fn deletable(&self, id: RecordId) -> Result<Record, CoreError> {
        self.active_ticket()?;
        let record = self.cached(id)?;
        if record.record_type.is_soa() {
            return Err(soa_read_only());
        }
        Ok(record)
    }

    pub async fn delete(&self, id: RecordId) -> Result<Fenced<Vec<Record>>, CoreError> {
        let record = self.deletable(id)?;
        let ticket = self.ticket_for(record.zone_id)?;
        self.api
            .delete_record(id.get())
            .await
            .map_err(|e| CoreError::from_api(e, DELETE_FAILED))?;
        info!(zone_id = %record.zone_id, record_id = %id, "record deleted");
        self.relist_after(ticket, "Record deleted").await
    }

    // ── Helpers ──────────────────────────────────────────────────────

    /// Re-list after a successful mutation. If the re-list fails the
    /// mutation still happened, so say so.
    async fn relist_after(
        &self,
        ticket: SelectionTicket,
        done: &str,
    ) -> Result<Fenced<Vec<Record>>, CoreError> {
        if !self.selection.is_current(ticket) {
            debug!(zone_id = %ticket.zone_id(), "selection changed during mutation, skipping re-list");
            return Ok(Fenced::Stale);
        }
        self.list(ticket)
            .await
            .map_err(|e| e.after(done, "the table"))
    }

    fn active_ticket(&self) -> Result<SelectionTicket, CoreError> {
        self.selection.ticket().ok_or(CoreError::NoZoneSelected)
    }

    fn ticket_for(&self, zone_id: ZoneId) -> Result<SelectionTicket, CoreError> {
        let ticket = self.active_ticket()?;
        if ticket.zone_id() == zone_id {
            Ok(ticket)
        } else {
            Err(CoreError::validation(
                "zone",
                format!("record belongs to zone {zone_id}, not the selected zone"),
            ))
        }
    }

    fn cached(&self, id: RecordId) -> Result<Record, CoreError> {
        self.store.record(id).ok_or_else(|| CoreError::NotFound {
            entity: "record",
            id: id.to_string(),
        })
    }

    pub(crate) fn policy(&self, zone_id: ZoneId, mode: FormMode) -> RolePolicy {
        let (allow_ns, allow_a) = self.store.zone(zone_id).map_or(
            (self.page.allow_users_create_ns, self.page.allow_users_create_a),
            |z| (z.allow_user_create_ns, z.allow_user_create_a),
        );
        RolePolicy::compute(self.page.role, allow_ns, allow_a, mode)
    }
}

fn soa_read_only() -> CoreError {
    CoreError::ReadOnly {
        what: "SOA record".into(),
    }
}
