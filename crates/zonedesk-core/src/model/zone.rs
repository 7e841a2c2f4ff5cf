// ── Zone domain types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::ZoneId;

/// A DNS zone managed by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    pub id: ZoneId,
    pub name: String,
    pub soa_email: String,
    pub soa_primary_ns: Option<String>,
    pub soa_refresh: Option<u32>,
    pub soa_retry: Option<u32>,
    pub soa_expire: Option<u32>,
    pub soa_minimum: Option<u32>,
    pub serial: u32,
    /// Owning user's login (admins see every owner's zones).
    pub owner: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    /// Whether non-admins may create NS records in this zone.
    pub allow_user_create_ns: bool,
    /// Whether non-admins may create A records in this zone.
    pub allow_user_create_a: bool,
}

/// Zone creation form as typed by the user.
///
/// Numeric SOA fields stay as text until validation so that blank input
/// can fall back to the server defaults and garbage can be rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneDraft {
    pub name: String,
    pub soa_email: String,
    // Admin-only fields
    pub soa_primary_ns: String,
    pub soa_refresh: String,
    pub soa_retry: String,
    pub soa_expire: String,
    pub soa_minimum: String,
    pub create_ns: bool,
    pub create_a: bool,
    // User-only field: address for the apex A record
    pub ip: String,
}

/// SOA timer defaults applied when an admin leaves a field blank.
pub mod soa_defaults {
    pub const REFRESH: u32 = 7200;
    pub const RETRY: u32 = 3600;
    pub const EXPIRE: u32 = 1_209_600;
    pub const MINIMUM: u32 = 3600;
}

/// A zone creation request that passed client-side validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidZone {
    Admin {
        name: String,
        soa_email: String,
        soa_primary_ns: String,
        soa_refresh: u32,
        soa_retry: u32,
        soa_expire: u32,
        soa_minimum: u32,
        create_ns: bool,
        create_a: bool,
    },
    User {
        name: String,
        soa_email: String,
        ip: String,
    },
}

impl ValidZone {
    pub fn name(&self) -> &str {
        match self {
            Self::Admin { name, .. } | Self::User { name, .. } => name,
        }
    }
}
