// ── Input validation ──
//
// Pure checks run before any request is built. A failure here means no
// network call is made; the error names the offending field.

use std::net::Ipv4Addr;

use crate::error::CoreError;
use crate::model::{RecordDraft, Role, ValidRecord, ValidZone, ZoneDraft, soa_defaults};

pub const FILL_ALL_FIELDS: &str = "Fill in all fields";
pub const INVALID_DOMAIN: &str = "Invalid domain name";

const MAX_LABEL_LEN: usize = 63;
const MAX_TTL: u32 = 2_147_483_647;

/// `true` iff `name` is a fully qualified domain name: one or more
/// labels of letters, digits and inner hyphens (1-63 chars each), then
/// an alphabetic top-level label of at least two characters.
pub fn validate_domain_name(name: &str) -> bool {
    let mut labels: Vec<&str> = name.split('.').collect();
    let Some(tld) = labels.pop() else {
        return false;
    };
    if labels.is_empty() {
        return false;
    }

    let tld_ok =
        (2..=MAX_LABEL_LEN).contains(&tld.len()) && tld.bytes().all(|b| b.is_ascii_alphabetic());

    tld_ok && labels.into_iter().all(is_host_label)
}

fn is_host_label(label: &str) -> bool {
    let bytes = label.as_bytes();
    let (Some(first), Some(last)) = (bytes.first(), bytes.last()) else {
        return false;
    };
    bytes.len() <= MAX_LABEL_LEN
        && first.is_ascii_alphanumeric()
        && last.is_ascii_alphanumeric()
        && bytes.iter().all(|b| b.is_ascii_alphanumeric() || *b == b'-')
}

/// `true` iff all three password fields are filled in.
///
/// Whether `next` matches `confirm` is left to the server.
pub fn validate_password_change_form(current: &str, next: &str, confirm: &str) -> bool {
    [current, next, confirm].iter().all(|s| !s.is_empty())
}

/// Turn a record form into a typed record, or say which field is wrong.
pub fn validate_record_draft(draft: &RecordDraft) -> Result<ValidRecord, CoreError> {
    if draft.record_type.is_soa() {
        return Err(CoreError::ReadOnly {
            what: "SOA record".into(),
        });
    }
    if draft.record_type.as_str().is_empty() {
        return Err(CoreError::validation("type", "Record type is required"));
    }

    let content = draft.content.trim();
    if content.is_empty() {
        return Err(CoreError::validation("content", "Content is required"));
    }

    let ttl = parse_ttl(&draft.ttl)?;
    let priority = if draft.record_type.has_priority() {
        Some(parse_priority(&draft.priority)?)
    } else {
        None
    };

    Ok(ValidRecord {
        id: draft.id,
        zone_id: draft.zone_id,
        record_type: draft.record_type.clone(),
        name: draft.name.trim().to_owned(),
        content: content.to_owned(),
        priority,
        ttl,
    })
}

fn parse_ttl(raw: &str) -> Result<u32, CoreError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(CoreError::validation("ttl", "TTL is required"));
    }
    raw.parse::<u32>()
        .ok()
        .filter(|ttl| (1..=MAX_TTL).contains(ttl))
        .ok_or_else(|| {
            CoreError::validation("ttl", format!("TTL must be a number between 1 and {MAX_TTL}"))
        })
}

fn parse_priority(raw: &str) -> Result<u16, CoreError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(CoreError::validation("priority", "Priority is required for MX records"));
    }
    raw.parse::<u16>().map_err(|_| {
        CoreError::validation("priority", "Priority must be a number between 0 and 65535")
    })
}

/// Validate the zone creation form for `role`.
///
/// Admins may leave SOA timers blank to get the server defaults; users
/// supply only the name, contact and the address for the apex A record.
pub fn validate_zone_draft(draft: &ZoneDraft, role: Role) -> Result<ValidZone, CoreError> {
    let name = draft.name.trim().to_ascii_lowercase();
    if name.is_empty() {
        return Err(CoreError::validation("name", FILL_ALL_FIELDS));
    }
    if !validate_domain_name(&name) {
        return Err(CoreError::validation("name", INVALID_DOMAIN));
    }
    let soa_email = draft.soa_email.trim().to_owned();

    if role.is_admin() {
        return Ok(ValidZone::Admin {
            name,
            soa_email,
            soa_primary_ns: draft.soa_primary_ns.trim().to_owned(),
            soa_refresh: soa_timer("soa_refresh", &draft.soa_refresh, soa_defaults::REFRESH)?,
            soa_retry: soa_timer("soa_retry", &draft.soa_retry, soa_defaults::RETRY)?,
            soa_expire: soa_timer("soa_expire", &draft.soa_expire, soa_defaults::EXPIRE)?,
            soa_minimum: soa_timer("soa_minimum", &draft.soa_minimum, soa_defaults::MINIMUM)?,
            create_ns: draft.create_ns,
            create_a: draft.create_a,
        });
    }

    let ip = draft.ip.trim();
    if ip.is_empty() {
        return Err(CoreError::validation("ip", FILL_ALL_FIELDS));
    }
    if ip.parse::<Ipv4Addr>().is_err() {
        return Err(CoreError::validation("ip", format!("'{ip}' is not an IPv4 address")));
    }

    Ok(ValidZone::User {
        name,
        soa_email,
        ip: ip.to_owned(),
    })
}

fn soa_timer(field: &'static str, raw: &str, default: u32) -> Result<u32, CoreError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(default);
    }
    raw.parse::<u32>()
        .ok()
        .filter(|v| *v > 0)
        .ok_or_else(|| CoreError::validation(field, "Must be a positive number of seconds"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{RecordId, RecordType, ZoneId};
    use pretty_assertions::assert_eq;

    #[test]
    fn accepts_fully_qualified_names() {
        for name in ["example.com", "sub.example.co.uk", "a-b.c0.io", "x.org", "1.example.net"] {
            assert!(validate_domain_name(name), "{name} should be valid");
        }
    }

    #[test]
    fn rejects_malformed_names() {
        let long_label = format!("{}.com", "a".repeat(64));
        for name in [
            "",
            "com",
            "no dots",
            "-bad.com",
            "bad-.com",
            ".example.com",
            "example.com.",
            "example..com",
            "example.c",
            "example.c0m",
            "under_score.com",
            long_label.as_str(),
        ] {
            assert!(!validate_domain_name(name), "{name:?} should be invalid");
        }
    }

    #[test]
    fn label_of_exactly_63_chars_is_allowed() {
        let name = format!("{}.com", "a".repeat(63));
        assert!(validate_domain_name(&name));
    }

    #[test]
    fn password_form_needs_every_field() {
        assert!(validate_password_change_form("old", "new", "new"));
        assert!(validate_password_change_form("old", "new", "different"));
        assert!(!validate_password_change_form("", "new", "new"));
        assert!(!validate_password_change_form("old", "new", ""));
    }

    fn draft(record_type: RecordType, ttl: &str, priority: &str) -> RecordDraft {
        RecordDraft {
            id: None,
            zone_id: ZoneId::new(7),
            record_type,
            name: " www ".into(),
            content: "1.2.3.4".into(),
            priority: priority.into(),
            ttl: ttl.into(),
        }
    }

    #[test]
    fn record_draft_is_typed() {
        let valid = validate_record_draft(&draft(RecordType::A, "3600", "")).unwrap();
        assert_eq!(valid.ttl, 3600);
        assert_eq!(valid.priority, None);
        assert_eq!(valid.name, "www");
    }

    #[test]
    fn priority_ignored_unless_mx() {
        let valid = validate_record_draft(&draft(RecordType::Txt, "60", "garbage")).unwrap();
        assert_eq!(valid.priority, None);

        let mx = validate_record_draft(&draft(RecordType::Mx, "60", "10")).unwrap();
        assert_eq!(mx.priority, Some(10));
    }

    #[test]
    fn rejects_non_numeric_ttl_and_priority() {
        let err = validate_record_draft(&draft(RecordType::A, "1h", "")).unwrap_err();
        assert!(matches!(err, CoreError::Validation { field: "ttl", .. }));

        let err = validate_record_draft(&draft(RecordType::A, "0", "")).unwrap_err();
        assert!(matches!(err, CoreError::Validation { field: "ttl", .. }));

        let err = validate_record_draft(&draft(RecordType::Mx, "60", "")).unwrap_err();
        assert!(matches!(err, CoreError::Validation { field: "priority", .. }));

        let err = validate_record_draft(&draft(RecordType::Mx, "60", "-1")).unwrap_err();
        assert!(matches!(err, CoreError::Validation { field: "priority", .. }));
    }

    #[test]
    fn soa_draft_is_read_only() {
        let mut d = draft(RecordType::Soa, "3600", "");
        d.id = Some(RecordId::new(1));
        assert!(matches!(validate_record_draft(&d), Err(CoreError::ReadOnly { .. })));
    }

    #[test]
    fn empty_content_is_rejected() {
        let mut d = draft(RecordType::A, "3600", "");
        d.content = "   ".into();
        let err = validate_record_draft(&d).unwrap_err();
        assert!(matches!(err, CoreError::Validation { field: "content", .. }));
    }

    #[test]
    fn admin_zone_gets_soa_defaults() {
        let draft = ZoneDraft {
            name: "Example.COM".into(),
            soa_email: "hostmaster@example.com".into(),
            soa_retry: "900".into(),
            create_ns: true,
            ..ZoneDraft::default()
        };
        let valid = validate_zone_draft(&draft, Role::Admin).unwrap();
        let ValidZone::Admin {
            name,
            soa_refresh,
            soa_retry,
            soa_expire,
            soa_minimum,
            create_ns,
            create_a,
            ..
        } = valid
        else {
            panic!("expected admin body");
        };
        assert_eq!(name, "example.com");
        assert_eq!(
            (soa_refresh, soa_retry, soa_expire, soa_minimum),
            (7200, 900, 1_209_600, 3600)
        );
        assert!(create_ns);
        assert!(!create_a);
    }

    #[test]
    fn admin_zone_rejects_garbage_timer() {
        let draft = ZoneDraft {
            name: "example.com".into(),
            soa_expire: "two weeks".into(),
            ..ZoneDraft::default()
        };
        let err = validate_zone_draft(&draft, Role::Admin).unwrap_err();
        assert!(matches!(err, CoreError::Validation { field: "soa_expire", .. }));
    }

    #[test]
    fn user_zone_needs_an_address() {
        let mut draft = ZoneDraft {
            name: "example.com".into(),
            soa_email: "me@example.com".into(),
            ..ZoneDraft::default()
        };
        let err = validate_zone_draft(&draft, Role::User).unwrap_err();
        assert!(matches!(err, CoreError::Validation { field: "ip", .. }));

        draft.ip = "192.0.2.10".into();
        assert_eq!(
            validate_zone_draft(&draft, Role::User).unwrap(),
            ValidZone::User {
                name: "example.com".into(),
                soa_email: "me@example.com".into(),
                ip: "192.0.2.10".into(),
            }
        );
    }

    #[test]
    fn invalid_zone_name_uses_standard_message() {
        let draft = ZoneDraft {
            name: "not a domain".into(),
            ..ZoneDraft::default()
        };
        let err = validate_zone_draft(&draft, Role::Admin).unwrap_err();
        assert_eq!(err.to_string(), "name: Invalid domain name");
    }
}
