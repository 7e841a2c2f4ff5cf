// Name-server daemon endpoints

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::NsdStatus;

/// Outcome of a successful sync call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncOutcome {
    /// Whether the daemon reloaded; `false` means the zone file was
    /// written but the reload needs more privileges.
    pub reloaded: bool,
    pub message: Option<String>,
}

impl ApiClient {
    /// Regenerate the zone file and ask the daemon to reload.
    ///
    /// `POST /api/nsd/sync/{zone_id}`
    pub async fn sync_zone(&self, zone_id: i64) -> Result<SyncOutcome, Error> {
        let url = self.api_url(&format!("nsd/sync/{zone_id}"))?;
        debug!(zone_id, "triggering name-server sync");
        let ack = self.post_empty(url).await?;
        Ok(SyncOutcome {
            reloaded: ack.reloaded.unwrap_or(false),
            message: ack.message,
        })
    }

    /// Query whether the daemon is running and what the server may do to it.
    ///
    /// `GET /api/nsd/status`
    pub async fn nsd_status(&self) -> Result<NsdStatus, Error> {
        let url = self.api_url("nsd/status")?;
        debug!("querying name-server status");
        self.get(url).await
    }
}
