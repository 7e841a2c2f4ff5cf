// ── User-visible notifications ──
//
// Every console operation ends in exactly one notification: a success
// confirmation or an error message. Front ends subscribe and display
// them however they like.

use chrono::{DateTime, Utc};
use serde::Serialize;
use strum::Display;
use tokio::sync::broadcast;
use tracing::trace;

const CHANNEL_SIZE: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub level: Level,
    pub message: String,
    pub at: DateTime<Utc>,
}

/// Broadcast fan-out of notifications.
#[derive(Debug, Clone)]
pub struct Notifier {
    tx: broadcast::Sender<Notification>,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_SIZE);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.tx.subscribe()
    }

    pub fn success(&self, message: impl Into<String>) {
        self.emit(Level::Success, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.emit(Level::Error, message.into());
    }

    pub fn info(&self, message: impl Into<String>) {
        self.emit(Level::Info, message.into());
    }

    fn emit(&self, level: Level, message: String) {
        trace!(%level, %message, "notification");
        // No subscribers is fine; nobody is watching.
        let _ = self.tx.send(Notification {
            level,
            message,
            at: Utc::now(),
        });
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn subscribers_receive_in_order() {
        let notifier = Notifier::new();
        let mut rx = notifier.subscribe();
        notifier.success("saved");
        notifier.error("nope");

        let first = rx.try_recv().unwrap();
        assert_eq!(first.level, Level::Success);
        assert_eq!(first.message, "saved");
        assert_eq!(rx.try_recv().unwrap().level, Level::Error);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn emitting_without_subscribers_is_harmless() {
        Notifier::new().info("nobody listening");
    }
}
