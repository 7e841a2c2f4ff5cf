// ── Wire-to-domain conversions ──
//
// Server DTOs use zero/empty values for "not set"; the domain model uses
// `Option`. Page-context flags are attached to zones here since the API
// never reports them.

use zonedesk_api::{CreateZoneBody, RecordBody, RecordDto, ZoneDto};

use crate::config::PageContext;
use crate::model::{Record, RecordId, RecordType, ValidRecord, ValidZone, Zone, ZoneId};

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() { None } else { Some(s) }
}

fn non_zero(v: u32) -> Option<u32> {
    (v != 0).then_some(v)
}

pub(crate) fn zone_from_dto(dto: ZoneDto, page: PageContext) -> Zone {
    Zone {
        id: ZoneId::new(dto.id),
        name: dto.name,
        soa_email: dto.soa_email,
        soa_primary_ns: non_empty(dto.soa_primary_ns),
        soa_refresh: non_zero(dto.soa_refresh),
        soa_retry: non_zero(dto.soa_retry),
        soa_expire: non_zero(dto.soa_expire),
        soa_minimum: non_zero(dto.soa_minimum),
        serial: dto.serial,
        owner: non_empty(dto.owner_name),
        created_at: dto.created_at,
        allow_user_create_ns: page.allow_users_create_ns,
        allow_user_create_a: page.allow_users_create_a,
    }
}

/// Records listed for a zone. Priority survives only on MX; out-of-range
/// numbers from the server collapse to "not set" rather than failing the
/// whole listing.
pub(crate) fn record_from_dto(dto: RecordDto, zone_id: ZoneId) -> Record {
    let record_type = RecordType::from(dto.record_type);
    let priority = if record_type.has_priority() {
        dto.priority.and_then(|p| u16::try_from(p).ok())
    } else {
        None
    };
    let zone_id = if dto.domain_id == 0 {
        zone_id
    } else {
        ZoneId::new(dto.domain_id)
    };

    Record {
        id: RecordId::new(dto.id),
        zone_id,
        record_type,
        name: dto.name,
        content: dto.content,
        priority,
        ttl: u32::try_from(dto.ttl).unwrap_or_default(),
    }
}

impl From<&ValidRecord> for RecordBody {
    fn from(r: &ValidRecord) -> Self {
        Self {
            id: r.id.map(RecordId::get),
            domain_id: r.zone_id.get(),
            record_type: r.record_type.to_string(),
            name: r.name.clone(),
            content: r.content.clone(),
            priority: r.priority,
            ttl: r.ttl,
        }
    }
}

impl From<ValidZone> for CreateZoneBody {
    fn from(zone: ValidZone) -> Self {
        match zone {
            ValidZone::Admin {
                name,
                soa_email,
                soa_primary_ns,
                soa_refresh,
                soa_retry,
                soa_expire,
                soa_minimum,
                create_ns,
                create_a,
            } => Self::Admin {
                name,
                soa_email,
                soa_primary_ns,
                soa_refresh,
                soa_retry,
                soa_expire,
                soa_minimum,
                create_ns,
                create_a,
            },
            ValidZone::User {
                name,
                soa_email,
                ip,
            } => Self::User {
                name,
                soa_email,
                ip,
            },
        }
    }
}
