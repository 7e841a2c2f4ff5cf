// ── Domain model ──

pub mod ids;
pub mod record;
pub mod session;
pub mod zone;

pub use ids::{RecordId, ZoneId};
pub use record::{Record, RecordDraft, RecordType, ValidRecord};
pub use session::{Role, Session};
pub use zone::{ValidZone, Zone, ZoneDraft, soa_defaults};
