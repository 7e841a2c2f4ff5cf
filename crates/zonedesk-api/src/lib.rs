// zonedesk-api: Async Rust client for the zonedesk DNS administration API

pub mod auth;
pub mod client;
pub mod domains;
pub mod error;
pub mod models;
pub mod nsd;
pub mod records;
pub mod transport;

pub use client::ApiClient;
pub use error::Error;
pub use models::{CreateZoneBody, NsdStatus, RecordBody, RecordDto, ZoneDto};
pub use nsd::SyncOutcome;
pub use transport::{TlsMode, TransportConfig};
