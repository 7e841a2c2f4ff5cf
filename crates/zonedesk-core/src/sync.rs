// ── Sync trigger ──
//
// Fires the name-server reconciliation for the active zone. The sync
// button goes `Busy` for the duration of the call; a `BusyGuard` puts
// it back on drop, so every exit path (success, rejection, transport
// failure, early return) restores it exactly once.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use strum::Display;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use zonedesk_api::ApiClient;

use crate::error::CoreError;
use crate::selection::{Fenced, SelectionTicket, ZoneSelection};

pub const SYNC_SUCCESS: &str = "NSD synchronized successfully";

/// State of the sync affordance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncButton {
    /// No zone selected.
    #[default]
    Hidden,
    #[strum(serialize = "Sync NSD")]
    Ready,
    #[strum(serialize = "Syncing...")]
    Busy,
}

/// Owner of the sync button state.
#[derive(Debug)]
pub struct SyncControl {
    state: watch::Sender<SyncButton>,
    settled: AtomicU64,
}

impl Default for SyncControl {
    fn default() -> Self {
        Self::new()
    }
}

impl SyncControl {
    pub fn new() -> Self {
        let (state, _) = watch::channel(SyncButton::Hidden);
        Self {
            state,
            settled: AtomicU64::new(0),
        }
    }

    pub fn state(&self) -> SyncButton {
        *self.state.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<SyncButton> {
        self.state.subscribe()
    }

    /// How many sync calls have settled since startup.
    pub fn settled_count(&self) -> u64 {
        self.settled.load(Ordering::Relaxed)
    }

    /// Reveal the button (a zone was selected). A busy button stays busy.
    pub(crate) fn show(&self) {
        self.state.send_if_modified(|s| {
            let changed = *s == SyncButton::Hidden;
            if changed {
                *s = SyncButton::Ready;
            }
            changed
        });
    }

    pub(crate) fn hide(&self) {
        self.state.send_replace(SyncButton::Hidden);
    }

    /// Enter the busy state. Fails if a sync is already in flight.
    pub(crate) fn begin(&self) -> Result<BusyGuard<'_>, CoreError> {
        let mut acquired = false;
        self.state.send_if_modified(|s| {
            if *s == SyncButton::Busy {
                return false;
            }
            *s = SyncButton::Busy;
            acquired = true;
            true
        });
        if acquired {
            Ok(BusyGuard { control: self })
        } else {
            Err(CoreError::Busy)
        }
    }
}

/// Holds the button in `Busy` until dropped.
#[must_use]
pub struct BusyGuard<'a> {
    control: &'a SyncControl,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.control.state.send_if_modified(|s| {
            let busy = *s == SyncButton::Busy;
            if busy {
                *s = SyncButton::Ready;
            }
            busy
        });
        self.control.settled.fetch_add(1, Ordering::Relaxed);
    }
}

/// Result of a sync the server accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    /// Whether the daemon actually reloaded the zone.
    pub reloaded: bool,
    pub message: Option<String>,
}

pub struct SyncTrigger<'a> {
    api: &'a ApiClient,
    selection: &'a ZoneSelection,
    control: &'a SyncControl,
}

impl<'a> SyncTrigger<'a> {
    pub fn new(api: &'a ApiClient, selection: &'a ZoneSelection, control: &'a SyncControl) -> Self {
        Self {
            api,
            selection,
            control,
        }
    }

    /// Sync the zone `ticket` was issued for.
    ///
    /// A response arriving after the selection moved on is dropped. Session
    /// expiry is still reported so the caller can sign out.
    pub async fn sync(&self, ticket: SelectionTicket) -> Result<Fenced<SyncReport>, CoreError> {
        let _busy = self.control.begin()?;
        let zone_id = ticket.zone_id();
        debug!(%zone_id, "syncing zone");

        let result = self.api.sync_zone(zone_id.get()).await;

        if !self.selection.is_current(ticket) {
            warn!(%zone_id, "discarding sync response for superseded selection");
            return match result {
                Err(e) if e.is_auth_expired() => Err(e.into()),
                _ => Ok(Fenced::Stale),
            };
        }

        let outcome = result?;
        info!(%zone_id, reloaded = outcome.reloaded, "zone synced");
        Ok(Fenced::Current(SyncReport {
            reloaded: outcome.reloaded,
            message: outcome.message,
        }))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn guard_restores_ready_on_drop() {
        let control = SyncControl::new();
        control.show();
        {
            let _guard = control.begin().unwrap();
            assert_eq!(control.state(), SyncButton::Busy);
        }
        assert_eq!(control.state(), SyncButton::Ready);
        assert_eq!(control.settled_count(), 1);
    }

    #[test]
    fn second_begin_while_busy_fails() {
        let control = SyncControl::new();
        control.show();
        let _guard = control.begin().unwrap();
        assert!(matches!(control.begin(), Err(CoreError::Busy)));
    }

    #[test]
    fn hiding_while_busy_is_not_undone() {
        let control = SyncControl::new();
        control.show();
        let guard = control.begin().unwrap();
        control.hide();
        drop(guard);
        assert_eq!(control.state(), SyncButton::Hidden);
        assert_eq!(control.settled_count(), 1);
    }

    #[test]
    fn labels() {
        assert_eq!(SyncButton::Ready.to_string(), "Sync NSD");
        assert_eq!(SyncButton::Busy.to_string(), "Syncing...");
    }
}
