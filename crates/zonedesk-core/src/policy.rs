// ── Role policy ──
//
// Which form fields a user sees, computed from the role and the
// admin-set permission flags. Nothing here is persisted; the console
// recomputes a policy whenever a form is opened.

use serde::Serialize;
use strum::{Display, EnumIter, IntoEnumIterator};

use crate::error::CoreError;
use crate::model::{Record, RecordDraft, RecordType, Role, ZoneId};

/// Whether a record form creates or edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FormMode {
    Add,
    Edit,
}

/// Field set for the record and zone forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RolePolicy {
    pub visible_record_types: Vec<RecordType>,
    pub soa_fields_editable: bool,
    pub record_type_field_locked: bool,
}

impl RolePolicy {
    pub fn compute(role: Role, allow_ns: bool, allow_a: bool, mode: FormMode) -> Self {
        let visible_record_types = RecordType::SELECTABLE
            .iter()
            .filter(|t| role.is_admin() || user_may_create(t, allow_ns, allow_a))
            .cloned()
            .collect();

        Self {
            visible_record_types,
            soa_fields_editable: role.is_admin(),
            record_type_field_locked: mode == FormMode::Edit && !role.is_admin(),
        }
    }

    pub fn allows_type(&self, record_type: &RecordType) -> bool {
        self.visible_record_types.contains(record_type)
    }

    /// Re-check a submitted draft against this policy.
    ///
    /// The form already hides what the user may not pick; this catches
    /// drafts that did not come through the form.
    pub fn enforce(&self, draft: &RecordDraft, existing: Option<&Record>) -> Result<(), CoreError> {
        match existing {
            None if !self.allows_type(&draft.record_type) => Err(CoreError::validation(
                "type",
                format!("{} records cannot be created here", draft.record_type),
            )),
            Some(record)
                if self.record_type_field_locked && record.record_type != draft.record_type =>
            {
                Err(CoreError::validation("type", "Record type cannot be changed"))
            }
            _ => Ok(()),
        }
    }
}

fn user_may_create(record_type: &RecordType, allow_ns: bool, allow_a: bool) -> bool {
    match record_type {
        RecordType::Ns => allow_ns,
        RecordType::A => allow_a,
        _ => !record_type.is_soa(),
    }
}

/// Priority is shown iff the type is MX, whatever the role.
pub fn priority_visible(record_type: &RecordType) -> bool {
    record_type.has_priority()
}

// ── Record form ─────────────────────────────────────────────────────

/// A record form ready for display: the draft plus the policy that
/// decides which inputs are shown and enabled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordForm {
    pub mode: FormMode,
    pub draft: RecordDraft,
    pub policy: RolePolicy,
    pub priority_visible: bool,
}

impl RecordForm {
    /// Blank add form, pre-set to the first type the user may pick.
    pub fn add(zone_id: ZoneId, policy: RolePolicy) -> Self {
        let record_type = policy
            .visible_record_types
            .first()
            .cloned()
            .unwrap_or(RecordType::Cname);
        Self {
            mode: FormMode::Add,
            priority_visible: priority_visible(&record_type),
            draft: RecordDraft::new(zone_id, record_type),
            policy,
        }
    }

    /// Edit form pre-filled from `record`. The record's own type is
    /// always listed, even when the user could no longer create it.
    pub fn edit(record: &Record, mut policy: RolePolicy) -> Self {
        if !policy.allows_type(&record.record_type) {
            policy.visible_record_types.push(record.record_type.clone());
        }
        Self {
            mode: FormMode::Edit,
            priority_visible: priority_visible(&record.record_type),
            draft: RecordDraft::from_record(record),
            policy,
        }
    }

    /// Change the type input, recomputing priority visibility.
    pub fn set_type(&mut self, record_type: RecordType) -> Result<(), CoreError> {
        if self.policy.record_type_field_locked {
            return Err(CoreError::validation("type", "Record type cannot be changed"));
        }
        if !self.policy.allows_type(&record_type) {
            return Err(CoreError::validation(
                "type",
                format!("{record_type} is not available"),
            ));
        }
        self.priority_visible = priority_visible(&record_type);
        self.draft.record_type = record_type;
        Ok(())
    }
}

// ── Zone creation form ──────────────────────────────────────────────

/// Inputs of the zone creation form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ZoneField {
    Name,
    SoaEmail,
    SoaPrimaryNs,
    SoaRefresh,
    SoaRetry,
    SoaExpire,
    SoaMinimum,
    CreateNs,
    CreateA,
    Ip,
}

impl ZoneField {
    fn admin_only(self) -> bool {
        !matches!(self, Self::Name | Self::SoaEmail | Self::Ip)
    }
}

/// Fields shown on the zone creation form for `role`.
pub fn zone_form_fields(role: Role) -> Vec<ZoneField> {
    ZoneField::iter()
        .filter(|f| match (role, f) {
            (Role::Admin, ZoneField::Ip) => false,
            (Role::Admin, _) => true,
            (Role::User, f) => !f.admin_only(),
        })
        .collect()
}
