// ── Zone selection state ──
//
// The single "current zone" slot. Every select bumps a generation
// counter; async work captures a `SelectionTicket` when it starts and
// may only touch the view if the ticket is still current when it ends.

use tokio::sync::watch;

use crate::model::ZoneId;

/// Snapshot of the selection slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionState {
    pub active: Option<ZoneId>,
    /// Bumped on every `select` / `clear`.
    pub generation: u64,
}

/// Proof that a request was issued for a particular selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionTicket {
    zone_id: ZoneId,
    generation: u64,
}

impl SelectionTicket {
    pub fn zone_id(self) -> ZoneId {
        self.zone_id
    }
}

/// Outcome of async work fenced by a [`SelectionTicket`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fenced<T> {
    /// The selection was unchanged; the result was applied.
    Current(T),
    /// The selection moved on while the request was in flight; the
    /// result was discarded.
    Stale,
}

impl<T> Fenced<T> {
    pub fn current(self) -> Option<T> {
        match self {
            Self::Current(v) => Some(v),
            Self::Stale => None,
        }
    }

    pub fn is_stale(&self) -> bool {
        matches!(self, Self::Stale)
    }
}

/// Owner of the selection slot. Injected into the components that read
/// it; nothing else writes to it.
#[derive(Debug)]
pub struct ZoneSelection {
    state: watch::Sender<SelectionState>,
}

impl Default for ZoneSelection {
    fn default() -> Self {
        Self::new()
    }
}

impl ZoneSelection {
    pub fn new() -> Self {
        let (state, _) = watch::channel(SelectionState::default());
        Self { state }
    }

    pub fn active(&self) -> Option<ZoneId> {
        self.state.borrow().active
    }

    pub fn snapshot(&self) -> SelectionState {
        *self.state.borrow()
    }

    /// Make `zone_id` the only selected zone, superseding any request
    /// issued under an earlier selection.
    pub fn select(&self, zone_id: ZoneId) -> SelectionTicket {
        let mut generation = 0;
        self.state.send_modify(|s| {
            s.active = Some(zone_id);
            s.generation += 1;
            generation = s.generation;
        });
        SelectionTicket {
            zone_id,
            generation,
        }
    }

    /// Deselect. Outstanding tickets become stale.
    pub fn clear(&self) {
        self.state.send_modify(|s| {
            s.active = None;
            s.generation += 1;
        });
    }

    /// Ticket for the current selection without superseding it. Used to
    /// re-list after a mutation and to fence sync responses.
    pub fn ticket(&self) -> Option<SelectionTicket> {
        let s = self.state.borrow();
        s.active.map(|zone_id| SelectionTicket {
            zone_id,
            generation: s.generation,
        })
    }

    pub fn is_current(&self, ticket: SelectionTicket) -> bool {
        let s = self.state.borrow();
        s.generation == ticket.generation && s.active == Some(ticket.zone_id)
    }

    pub fn subscribe(&self) -> watch::Receiver<SelectionState> {
        self.state.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        let sel = ZoneSelection::new();
        assert_eq!(sel.active(), None);
        assert!(sel.ticket().is_none());
    }

    #[test]
    fn later_select_supersedes_earlier_ticket() {
        let sel = ZoneSelection::new();
        let a = sel.select(ZoneId::new(1));
        let b = sel.select(ZoneId::new(2));
        assert!(!sel.is_current(a));
        assert!(sel.is_current(b));
        assert_eq!(sel.active(), Some(ZoneId::new(2)));
    }

    #[test]
    fn reselecting_same_zone_still_supersedes() {
        let sel = ZoneSelection::new();
        let first = sel.select(ZoneId::new(7));
        let second = sel.select(ZoneId::new(7));
        assert!(!sel.is_current(first));
        assert!(sel.is_current(second));
    }

    #[test]
    fn ticket_does_not_bump_generation() {
        let sel = ZoneSelection::new();
        let selected = sel.select(ZoneId::new(7));
        let refresh = sel.ticket();
        assert_eq!(refresh, Some(selected));
        assert!(sel.is_current(selected));
    }

    #[test]
    fn clear_invalidates_outstanding_tickets() {
        let sel = ZoneSelection::new();
        let ticket = sel.select(ZoneId::new(7));
        sel.clear();
        assert!(!sel.is_current(ticket));
        assert_eq!(sel.snapshot().generation, 2);
    }

    #[test]
    fn subscribers_see_changes() {
        let sel = ZoneSelection::new();
        let rx = sel.subscribe();
        sel.select(ZoneId::new(3));
        assert_eq!(rx.borrow().active, Some(ZoneId::new(3)));
    }
}
