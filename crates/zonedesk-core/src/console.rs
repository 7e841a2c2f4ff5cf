// ── Console facade ──
//
// One signed-in session against one server. Owns the selection slot,
// the view store, the sync button and the notification channel, and
// hands borrowed views of them to the session, record and sync
// components. Every async operation here ends in exactly one
// notification, except responses for a superseded selection, which are
// dropped silently.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use tokio::sync::{broadcast, watch};
use tracing::{debug, info, warn};

use zonedesk_api::{ApiClient, CreateZoneBody, NsdStatus, TransportConfig};

use crate::command::{Command, CommandResult};
use crate::config::{ConsoleConfig, PageContext};
use crate::convert::zone_from_dto;
use crate::error::{AuthError, CoreError};
use crate::model::{Record, RecordDraft, RecordId, Session, Zone, ZoneDraft, ZoneId};
use crate::notify::{Notification, Notifier};
use crate::policy::{FormMode, RecordForm};
use crate::records::RecordRepository;
use crate::selection::{Fenced, SelectionState, ZoneSelection};
use crate::store::ViewStore;
use crate::sync::{SYNC_SUCCESS, SyncControl, SyncReport, SyncTrigger};
use crate::validate::{FILL_ALL_FIELDS, validate_password_change_form, validate_zone_draft};

pub const LOGIN_FAILED: &str = "Invalid username or password";
pub const ZONE_CREATE_FAILED: &str = "Failed to create zone";
pub const ZONE_DELETE_FAILED: &str = "Failed to delete zone";
pub const PASSWORD_FAILED: &str = "Failed to change password";

// ── Confirmation seam ────────────────────────────────────────────────

/// Asks the user to confirm a destructive action.
pub trait Confirm: Send + Sync {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

// ── Console ──────────────────────────────────────────────────────────

/// The main entry point for front ends.
///
/// Cheaply cloneable via `Arc<ConsoleInner>`.
#[derive(Clone)]
pub struct Console {
    inner: Arc<ConsoleInner>,
}

struct ConsoleInner {
    config: ConsoleConfig,
    api: ApiClient,
    session: watch::Sender<Option<Session>>,
    selection: ZoneSelection,
    store: ViewStore,
    sync: SyncControl,
    notifier: Notifier,
    confirm: Arc<dyn Confirm>,
}

impl Console {
    /// Build a console from configuration. Does not contact the server;
    /// call [`connect()`](Self::connect) or [`login()`](Self::login).
    pub fn new(config: ConsoleConfig, confirm: Arc<dyn Confirm>) -> Result<Self, CoreError> {
        let transport = TransportConfig {
            tls: (&config.tls).into(),
            timeout: config.timeout,
            cookie_jar: None,
        }
        .with_cookie_jar();
        let api = ApiClient::new(config.url.clone(), &transport)?;
        let (session, _) = watch::channel(None);

        Ok(Self {
            inner: Arc::new(ConsoleInner {
                config,
                api,
                session,
                selection: ZoneSelection::new(),
                store: ViewStore::new(),
                sync: SyncControl::new(),
                notifier: Notifier::new(),
                confirm,
            }),
        })
    }

    pub fn config(&self) -> &ConsoleConfig {
        &self.inner.config
    }

    pub fn page(&self) -> PageContext {
        self.inner.config.page
    }

    pub fn store(&self) -> &ViewStore {
        &self.inner.store
    }

    pub fn sync_control(&self) -> &SyncControl {
        &self.inner.sync
    }

    pub fn session(&self) -> Option<Session> {
        self.inner.session.borrow().clone()
    }

    pub fn subscribe_session(&self) -> watch::Receiver<Option<Session>> {
        self.inner.session.subscribe()
    }

    pub fn active_zone(&self) -> Option<ZoneId> {
        self.inner.selection.active()
    }

    pub fn subscribe_selection(&self) -> watch::Receiver<SelectionState> {
        self.inner.selection.subscribe()
    }

    pub fn notifications(&self) -> broadcast::Receiver<Notification> {
        self.inner.notifier.subscribe()
    }

    // ── Session ──────────────────────────────────────────────────────

    /// Log in with the configured credentials and load the zone list.
    pub async fn connect(&self) -> Result<Vec<Zone>, CoreError> {
        let username = self.inner.config.username.clone();
        self.login(&username, &self.inner.config.password).await?;
        self.list_zones().await
    }

    /// Authenticate. The role comes from the page context; the server
    /// does not report it.
    pub async fn login(&self, username: &str, password: &SecretString) -> Result<Session, CoreError> {
        let result = self
            .inner
            .api
            .login(username, password)
            .await
            .map_err(|e| CoreError::from_api(e, LOGIN_FAILED));

        match result {
            Ok(()) => {
                let session = Session {
                    authenticated: true,
                    role: self.page().role,
                    username: username.to_owned(),
                };
                self.inner.session.send_replace(Some(session.clone()));
                info!(username, role = %session.role, "logged in");
                self.inner.notifier.success(format!("Signed in as {username}"));
                Ok(session)
            }
            Err(e) => self.fail(e),
        }
    }

    /// End the session. Local state is torn down whether or not the
    /// server acknowledges; a failed request is still reported.
    pub async fn logout(&self) -> Result<(), CoreError> {
        let result = self.inner.api.logout().await;
        self.end_session();

        match result {
            Ok(()) => {
                info!("logged out");
                self.inner.notifier.success("Signed out");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "logout request failed, session discarded locally");
                let err = CoreError::from(e);
                self.inner.notifier.error(err.to_string());
                Err(err)
            }
        }
    }

    pub async fn change_password(
        &self,
        current: &SecretString,
        new: &SecretString,
        confirm: &SecretString,
    ) -> Result<(), CoreError> {
        let result = async {
            self.require_session()?;
            if !validate_password_change_form(
                current.expose_secret(),
                new.expose_secret(),
                confirm.expose_secret(),
            ) {
                return Err(CoreError::validation("password", FILL_ALL_FIELDS));
            }
            self.inner
                .api
                .change_password(current, new, confirm)
                .await
                .map_err(|e| CoreError::from_api(e, PASSWORD_FAILED))
        }
        .await;

        match result {
            Ok(message) => {
                info!("password changed");
                self.inner
                    .notifier
                    .success(message.unwrap_or_else(|| "Password changed".into()));
                Ok(())
            }
            Err(e) => self.fail(e),
        }
    }

    // ── Zones ────────────────────────────────────────────────────────

    /// Load the zones visible to this session. Drops the selection if
    /// the selected zone is gone.
    pub async fn list_zones(&self) -> Result<Vec<Zone>, CoreError> {
        match self.fetch_zones().await {
            Ok(zones) => {
                self.inner
                    .notifier
                    .info(format!("{} zone(s) loaded", zones.len()));
                Ok(zones)
            }
            Err(e) => self.fail(e),
        }
    }

    /// Make `zone_id` the active zone and load its records.
    pub async fn select_zone(&self, zone_id: ZoneId) -> Result<Fenced<Vec<Record>>, CoreError> {
        let zone = match self.require_session().and_then(|()| self.known_zone(zone_id)) {
            Ok(zone) => zone,
            Err(e) => return self.fail(e),
        };

        let previous = self.inner.selection.active();
        let ticket = self.inner.selection.select(zone_id);
        self.inner.sync.show();
        debug!(%zone_id, zone = %zone.name, "zone selected");

        match self.repository().list(ticket).await {
            Ok(Fenced::Current(records)) => {
                self.inner
                    .notifier
                    .info(format!("{}: {} record(s)", zone.name, records.len()));
                Ok(Fenced::Current(records))
            }
            Ok(Fenced::Stale) => Ok(Fenced::Stale),
            Err(e) => {
                if self.inner.selection.is_current(ticket) {
                    self.restore_selection(previous);
                }
                self.fail(e)
            }
        }
    }

    /// Put back the selection the table still shows.
    fn restore_selection(&self, previous: Option<ZoneId>) {
        match previous {
            Some(prev) if self.inner.store.view().zone_id == Some(prev) => {
                debug!(zone_id = %prev, "listing failed, restoring previous selection");
                self.inner.selection.select(prev);
            }
            _ => self.clear_selection(),
        }
    }

    /// Create a zone from the role-appropriate form and re-list zones.
    /// The current selection is kept.
    pub async fn create_zone(&self, draft: &ZoneDraft) -> Result<Vec<Zone>, CoreError> {
        let created = async {
            self.require_session()?;
            let valid = validate_zone_draft(draft, self.page().role)?;
            let name = valid.name().to_owned();
            let body = CreateZoneBody::from(valid);
            let message = self
                .inner
                .api
                .create_zone(&body)
                .await
                .map_err(|e| CoreError::from_api(e, ZONE_CREATE_FAILED))?;
            info!(zone = %name, "zone created");
            Ok::<_, CoreError>(message.unwrap_or_else(|| format!("Zone {name} created")))
        }
        .await;

        let message = match created {
            Ok(message) => message,
            Err(e) => return self.fail(e),
        };
        match self.relist_zones_after(&message).await {
            Ok(zones) => {
                self.inner.notifier.success(message);
                Ok(zones)
            }
            Err(e) => self.fail(e),
        }
    }

    /// Delete a zone and all its records after confirmation. If it was
    /// the active zone, the selection and the table are cleared.
    pub async fn delete_zone(&self, zone_id: ZoneId) -> Result<Vec<Zone>, CoreError> {
        let deleted = async {
            self.require_session()?;
            let zone = self.known_zone(zone_id)?;
            let prompt = format!("Delete zone {} and all its records?", zone.name);
            if !self.inner.confirm.confirm(&prompt) {
                return Err(CoreError::Cancelled);
            }
            let message = self
                .inner
                .api
                .delete_zone(zone_id.get())
                .await
                .map_err(|e| CoreError::from_api(e, ZONE_DELETE_FAILED))?;
            info!(%zone_id, zone = %zone.name, "zone deleted");

            if self.inner.selection.active() == Some(zone_id) {
                self.clear_selection();
            }
            Ok::<_, CoreError>(message.unwrap_or_else(|| format!("Zone {} deleted", zone.name)))
        }
        .await;

        let message = match deleted {
            Ok(message) => message,
            Err(e) => return self.fail(e),
        };
        match self.relist_zones_after(&message).await {
            Ok(zones) => {
                self.inner.notifier.success(message);
                Ok(zones)
            }
            Err(e) => self.fail(e),
        }
    }

    // ── Records ──────────────────────────────────────────────────────

    /// Blank record form for the active zone.
    pub fn open_add_form(&self) -> Result<RecordForm, CoreError> {
        self.require_session()?;
        let zone_id = self.active_zone().ok_or(CoreError::NoZoneSelected)?;
        let policy = self.repository().policy(zone_id, FormMode::Add);
        Ok(RecordForm::add(zone_id, policy))
    }

    /// Edit form for a listed record. SOA rows cannot be edited.
    pub fn open_edit_form(&self, record_id: RecordId) -> Result<RecordForm, CoreError> {
        self.require_session()?;
        let zone_id = self.active_zone().ok_or(CoreError::NoZoneSelected)?;
        let record = self
            .inner
            .store
            .record(record_id)
            .filter(|r| r.zone_id == zone_id)
            .ok_or_else(|| CoreError::NotFound {
                entity: "record",
                id: record_id.to_string(),
            })?;
        if record.record_type.is_soa() {
            return Err(CoreError::ReadOnly {
                what: "SOA record".into(),
            });
        }
        let policy = self.repository().policy(zone_id, FormMode::Edit);
        Ok(RecordForm::edit(&record, policy))
    }

    /// Create (no id) or update (id) a record, then re-list the zone.
    pub async fn save_record(&self, draft: &RecordDraft) -> Result<Fenced<Vec<Record>>, CoreError> {
        let result = match self.require_session() {
            Ok(()) => self.repository().save(draft).await,
            Err(e) => Err(e),
        };
        match result {
            Ok(outcome) => {
                self.inner.notifier.success("Record saved");
                Ok(outcome)
            }
            Err(e) => self.fail(e),
        }
    }

    /// Delete a record after confirmation, then re-list the zone.
    pub async fn delete_record(&self, record_id: RecordId) -> Result<Fenced<Vec<Record>>, CoreError> {
        let result = async {
            self.require_session()?;
            let repo = self.repository();
            let record = repo.deletable(record_id)?;
            let name = if record.name.is_empty() {
                "@"
            } else {
                record.name.as_str()
            };
            let prompt = format!("Delete {} record {name}?", record.record_type);
            if !self.inner.confirm.confirm(&prompt) {
                return Err(CoreError::Cancelled);
            }
            repo.delete(record_id).await
        }
        .await;

        match result {
            Ok(outcome) => {
                self.inner.notifier.success("Record deleted");
                Ok(outcome)
            }
            Err(e) => self.fail(e),
        }
    }

    // ── Sync / status ────────────────────────────────────────────────

    /// Push the active zone to the name server.
    pub async fn sync(&self) -> Result<Fenced<SyncReport>, CoreError> {
        let result = async {
            self.require_session()?;
            let ticket = self.inner.selection.ticket().ok_or(CoreError::NoZoneSelected)?;
            SyncTrigger::new(&self.inner.api, &self.inner.selection, &self.inner.sync)
                .sync(ticket)
                .await
        }
        .await;

        match result {
            Ok(Fenced::Current(report)) => {
                let message = if report.reloaded {
                    SYNC_SUCCESS.to_owned()
                } else {
                    format!("{SYNC_SUCCESS}, but the daemon was not reloaded")
                };
                self.inner.notifier.success(message);
                Ok(Fenced::Current(report))
            }
            Ok(Fenced::Stale) => Ok(Fenced::Stale),
            Err(e) => self.fail(e),
        }
    }

    pub async fn nsd_status(&self) -> Result<NsdStatus, CoreError> {
        let result = match self.require_session() {
            Ok(()) => self.inner.api.nsd_status().await.map_err(CoreError::from),
            Err(e) => Err(e),
        };
        match result {
            Ok(status) => {
                let state = if status.running { "running" } else { "not running" };
                self.inner.notifier.info(format!("NSD is {state}"));
                Ok(status)
            }
            Err(e) => self.fail(e),
        }
    }

    /// Re-list zones and, if one is selected, its records.
    pub async fn refresh(&self) -> Result<Vec<Zone>, CoreError> {
        let result = async {
            self.require_session()?;
            let zones = self.fetch_zones().await?;
            if let Some(ticket) = self.inner.selection.ticket() {
                self.repository().list(ticket).await?;
            }
            Ok::<_, CoreError>(zones)
        }
        .await;

        match result {
            Ok(zones) => {
                self.inner.notifier.info("Refreshed");
                Ok(zones)
            }
            Err(e) => self.fail(e),
        }
    }

    // ── Command dispatch ─────────────────────────────────────────────

    /// Route a command to its handler.
    pub async fn execute(&self, command: Command) -> Result<CommandResult, CoreError> {
        debug!(?command, "executing command");
        match command {
            Command::SelectZone(id) => Ok(records_result(self.select_zone(id).await?)),
            Command::CreateZone(draft) => self.create_zone(&draft).await.map(CommandResult::Zones),
            Command::DeleteZone(id) => self.delete_zone(id).await.map(CommandResult::Zones),
            Command::Refresh => self.refresh().await.map(CommandResult::Zones),
            Command::AddRecord => self.open_add_form().map(CommandResult::Form),
            Command::EditRecord(id) => self.open_edit_form(id).map(CommandResult::Form),
            Command::SaveRecord(draft) => Ok(records_result(self.save_record(&draft).await?)),
            Command::DeleteRecord(id) => Ok(records_result(self.delete_record(id).await?)),
            Command::SyncZone => Ok(match self.sync().await? {
                Fenced::Current(report) => CommandResult::Synced {
                    reloaded: report.reloaded,
                },
                Fenced::Stale => CommandResult::Superseded,
            }),
            Command::ChangePassword {
                current,
                new,
                confirm,
            } => self
                .change_password(&current, &new, &confirm)
                .await
                .map(|()| CommandResult::Ok),
        }
    }

    // ── Internals ────────────────────────────────────────────────────

    fn repository(&self) -> RecordRepository<'_> {
        RecordRepository::new(
            &self.inner.api,
            &self.inner.selection,
            &self.inner.store,
            self.page(),
        )
    }

    fn require_session(&self) -> Result<(), CoreError> {
        match &*self.inner.session.borrow() {
            Some(s) if s.authenticated => Ok(()),
            _ => Err(AuthError::NotAuthenticated.into()),
        }
    }

    fn known_zone(&self, zone_id: ZoneId) -> Result<Zone, CoreError> {
        self.inner.store.zone(zone_id).ok_or_else(|| CoreError::NotFound {
            entity: "zone",
            id: zone_id.to_string(),
        })
    }

    async fn fetch_zones(&self) -> Result<Vec<Zone>, CoreError> {
        self.require_session()?;
        let page = self.page();
        let zones: Vec<Zone> = self
            .inner
            .api
            .list_zones()
            .await?
            .into_iter()
            .map(|dto| zone_from_dto(dto, page))
            .collect();

        if let Some(active) = self.inner.selection.active() {
            if !zones.iter().any(|z| z.id == active) {
                warn!(zone_id = %active, "selected zone no longer listed, clearing selection");
                self.clear_selection();
            }
        }
        debug!(count = zones.len(), "zones listed");
        self.inner.store.replace_zones(zones.clone());
        Ok(zones)
    }

    async fn relist_zones_after(&self, done: &str) -> Result<Vec<Zone>, CoreError> {
        self.fetch_zones()
            .await
            .map_err(|e| e.after(done, "the zone list"))
    }

    fn clear_selection(&self) {
        self.inner.selection.clear();
        self.inner.store.clear_records();
        self.inner.sync.hide();
    }

    fn end_session(&self) {
        self.inner.session.send_replace(None);
        self.clear_selection();
        self.inner.store.clear();
    }

    /// Report a failure: one error notification, and a local sign-out
    /// if the server says the session is gone.
    fn fail<T>(&self, err: CoreError) -> Result<T, CoreError> {
        if err.is_session_expired() {
            warn!("session expired");
            self.end_session();
        }
        match &err {
            CoreError::Cancelled => self.inner.notifier.info(err.to_string()),
            _ => self.inner.notifier.error(err.to_string()),
        }
        Err(err)
    }
}

fn records_result(outcome: Fenced<Vec<Record>>) -> CommandResult {
    match outcome {
        Fenced::Current(records) => CommandResult::Records(records),
        Fenced::Stale => CommandResult::Superseded,
    }
}
