// ── Resource record domain types ──

use std::fmt;

use serde::{Deserialize, Serialize};

use super::ids::{RecordId, ZoneId};

/// DNS record type.
///
/// Types the server may report but the console does not know about are
/// kept verbatim in [`RecordType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RecordType {
    A,
    Aaaa,
    Cname,
    Mx,
    Ns,
    Txt,
    Srv,
    Ptr,
    Caa,
    Soa,
    Other(String),
}

impl RecordType {
    /// Types offered by the record form, in display order. `SOA` is
    /// server-managed and never offered.
    pub const SELECTABLE: &'static [RecordType] = &[
        Self::A,
        Self::Aaaa,
        Self::Cname,
        Self::Mx,
        Self::Ns,
        Self::Txt,
        Self::Srv,
        Self::Ptr,
        Self::Caa,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Cname => "CNAME",
            Self::Mx => "MX",
            Self::Ns => "NS",
            Self::Txt => "TXT",
            Self::Srv => "SRV",
            Self::Ptr => "PTR",
            Self::Caa => "CAA",
            Self::Soa => "SOA",
            Self::Other(s) => s,
        }
    }

    pub fn is_soa(&self) -> bool {
        *self == Self::Soa
    }

    /// Whether the type carries a priority (preference) value.
    pub fn has_priority(&self) -> bool {
        *self == Self::Mx
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for RecordType {
    fn from(s: &str) -> Self {
        let upper = s.trim().to_ascii_uppercase();
        match upper.as_str() {
            "A" => Self::A,
            "AAAA" => Self::Aaaa,
            "CNAME" => Self::Cname,
            "MX" => Self::Mx,
            "NS" => Self::Ns,
            "TXT" => Self::Txt,
            "SRV" => Self::Srv,
            "PTR" => Self::Ptr,
            "CAA" => Self::Caa,
            "SOA" => Self::Soa,
            _ => Self::Other(upper),
        }
    }
}

impl From<String> for RecordType {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<RecordType> for String {
    fn from(t: RecordType) -> Self {
        t.as_str().to_owned()
    }
}

/// A resource record as confirmed by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub zone_id: ZoneId,
    pub record_type: RecordType,
    /// Owner name relative to the zone; empty means the apex.
    pub name: String,
    pub content: String,
    /// Only meaningful for MX.
    pub priority: Option<u16>,
    pub ttl: u32,
}

/// The record form as typed by the user.
///
/// TTL and priority are free text here; [`RecordDraft::validate`] turns
/// them into numbers or rejects the draft before anything is sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordDraft {
    /// `None` creates a new record, `Some` updates that record.
    pub id: Option<RecordId>,
    pub zone_id: ZoneId,
    pub record_type: RecordType,
    pub name: String,
    pub content: String,
    pub priority: String,
    pub ttl: String,
}

impl RecordDraft {
    /// A blank draft for the add form.
    pub fn new(zone_id: ZoneId, record_type: RecordType) -> Self {
        Self {
            id: None,
            zone_id,
            record_type,
            name: String::new(),
            content: String::new(),
            priority: String::new(),
            ttl: String::new(),
        }
    }

    /// A draft pre-filled from an existing record, for the edit form.
    pub fn from_record(record: &Record) -> Self {
        Self {
            id: Some(record.id),
            zone_id: record.zone_id,
            record_type: record.record_type.clone(),
            name: record.name.clone(),
            content: record.content.clone(),
            priority: record.priority.map(|p| p.to_string()).unwrap_or_default(),
            ttl: record.ttl.to_string(),
        }
    }

    /// Validate and type the draft. See [`crate::validate::validate_record_draft`].
    pub fn validate(&self) -> Result<ValidRecord, crate::error::CoreError> {
        crate::validate::validate_record_draft(self)
    }
}

/// A record draft that passed client-side validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidRecord {
    pub id: Option<RecordId>,
    pub zone_id: ZoneId,
    pub record_type: RecordType,
    pub name: String,
    pub content: String,
    pub priority: Option<u16>,
    pub ttl: u32,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_and_unknown_types() {
        assert_eq!(RecordType::from("mx"), RecordType::Mx);
        assert_eq!(RecordType::from("AAAA"), RecordType::Aaaa);
        assert_eq!(RecordType::from("spf"), RecordType::Other("SPF".into()));
    }

    #[test]
    fn serde_uses_wire_names() {
        let json = serde_json::to_string(&RecordType::Cname).unwrap();
        assert_eq!(json, "\"CNAME\"");
        let parsed: RecordType = serde_json::from_str("\"SOA\"").unwrap();
        assert!(parsed.is_soa());
    }

    #[test]
    fn selectable_types_exclude_soa() {
        assert!(!RecordType::SELECTABLE.iter().any(RecordType::is_soa));
        assert!(RecordType::SELECTABLE.contains(&RecordType::Ns));
    }

    #[test]
    fn edit_draft_carries_record_values() {
        let record = Record {
            id: RecordId::new(5),
            zone_id: ZoneId::new(7),
            record_type: RecordType::Mx,
            name: String::new(),
            content: "mail.example.com.".into(),
            priority: Some(10),
            ttl: 3600,
        };
        let draft = RecordDraft::from_record(&record);
        assert_eq!(draft.id, Some(RecordId::new(5)));
        assert_eq!(draft.priority, "10");
        assert_eq!(draft.ttl, "3600");
    }
}
