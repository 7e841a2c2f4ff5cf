// Wire types for the zonedesk HTTP API.
//
// Listing endpoints return the server's storage structs verbatim, so their
// field names are PascalCase (`ID`, `TTL`, `SOAEmail`). Request bodies use
// snake_case.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// The `{ success, message? }` acknowledgement returned by every
/// mutating endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    /// New row id (record creation only).
    #[serde(default)]
    pub id: Option<i64>,
    /// Whether the name server picked up the zone (sync only).
    #[serde(default)]
    pub reloaded: Option<bool>,
}

// ── Listings ────────────────────────────────────────────────────────

/// A zone as listed by `GET /api/domains`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneDto {
    #[serde(rename = "ID")]
    pub id: i64,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "UserID", default)]
    pub user_id: i64,
    #[serde(rename = "OwnerName", default)]
    pub owner_name: String,
    #[serde(rename = "SOAEmail", default)]
    pub soa_email: String,
    #[serde(rename = "SOAPrimaryNS", default)]
    pub soa_primary_ns: String,
    #[serde(rename = "SOARefresh", default)]
    pub soa_refresh: u32,
    #[serde(rename = "SOARetry", default)]
    pub soa_retry: u32,
    #[serde(rename = "SOAExpire", default)]
    pub soa_expire: u32,
    #[serde(rename = "SOAMinimum", default)]
    pub soa_minimum: u32,
    #[serde(rename = "Serial", default)]
    pub serial: u32,
    #[serde(rename = "CreatedAt", default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// A resource record as listed by `GET /api/domains/{id}/records`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordDto {
    #[serde(rename = "ID")]
    pub id: i64,
    #[serde(rename = "DomainID", default)]
    pub domain_id: i64,
    #[serde(rename = "Type")]
    pub record_type: String,
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "Content", default)]
    pub content: String,
    #[serde(rename = "Priority", default)]
    pub priority: Option<i64>,
    #[serde(rename = "TTL", default)]
    pub ttl: i64,
}

/// Name-server daemon status from `GET /api/nsd/status`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NsdStatus {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub running: bool,
    /// Free-form permission report (zone directory, reload rights).
    #[serde(default)]
    pub permissions: serde_json::Value,
}

/// Decode a JSON array that the server may also send as `null`.
pub(crate) fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Wrapper so listing endpoints can reuse [`null_as_empty`].
#[derive(Deserialize)]
#[serde(transparent, bound(deserialize = "T: Deserialize<'de>"))]
pub(crate) struct Listing<T> {
    #[serde(deserialize_with = "null_as_empty")]
    pub items: Vec<T>,
}

// ── Request bodies ──────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub(crate) struct LoginBody<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct ChangePasswordBody<'a> {
    pub current_password: &'a str,
    pub new_password: &'a str,
    pub confirm_password: &'a str,
}

/// Zone creation body. The accepted field set depends on the caller's role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CreateZoneBody {
    /// Full SOA tuning plus auto-created NS / A records.
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
    /// Name, contact, and the address for the apex A record; the server
    /// derives everything else.
    User {
        name: String,
        soa_email: String,
        ip: String,
    },
}

/// Record create/update body. `id` is `null` on create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordBody {
    pub id: Option<i64>,
    pub domain_id: i64,
    #[serde(rename = "type")]
    pub record_type: String,
    pub name: String,
    pub content: String,
    pub priority: Option<u16>,
    pub ttl: u32,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn record_listing_accepts_null() {
        let listing: Listing<RecordDto> = serde_json::from_value(json!(null)).unwrap();
        assert!(listing.items.is_empty());
    }

    #[test]
    fn record_dto_uses_server_field_names() {
        let dto: RecordDto = serde_json::from_value(json!({
            "ID": 3, "DomainID": 7, "Type": "MX", "Name": "",
            "Content": "mail.example.com.", "Priority": 10, "TTL": 3600
        }))
        .unwrap();
        assert_eq!(dto.id, 3);
        assert_eq!(dto.domain_id, 7);
        assert_eq!(dto.record_type, "MX");
        assert_eq!(dto.priority, Some(10));
        assert_eq!(dto.ttl, 3600);
    }

    #[test]
    fn user_zone_body_has_only_three_fields() {
        let body = CreateZoneBody::User {
            name: "example.com".into(),
            soa_email: "hostmaster@example.com".into(),
            ip: "192.0.2.1".into(),
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "name": "example.com",
                "soa_email": "hostmaster@example.com",
                "ip": "192.0.2.1"
            })
        );
    }

    #[test]
    fn record_body_serializes_type_key() {
        let body = RecordBody {
            id: None,
            domain_id: 7,
            record_type: "A".into(),
            name: "www".into(),
            content: "1.2.3.4".into(),
            priority: None,
            ttl: 3600,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["type"], "A");
        assert_eq!(value["id"], json!(null));
        assert_eq!(value["domain_id"], 7);
    }
}
