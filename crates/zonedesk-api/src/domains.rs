// Zone (domain) endpoints

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{CreateZoneBody, Listing, ZoneDto};

impl ApiClient {
    /// List all zones visible to the authenticated user.
    ///
    /// `GET /api/domains` (admins see every zone, users their own)
    pub async fn list_zones(&self) -> Result<Vec<ZoneDto>, Error> {
        let url = self.api_url("domains")?;
        debug!("listing zones");
        let listing: Listing<ZoneDto> = self.get(url).await?;
        Ok(listing.items)
    }

    /// Create a zone.
    ///
    /// `POST /api/domains`
    pub async fn create_zone(&self, body: &CreateZoneBody) -> Result<Option<String>, Error> {
        let url = self.api_url("domains")?;
        debug!(?body, "creating zone");
        let ack = self.post(url, body).await?;
        Ok(ack.message)
    }

    /// Delete a zone and all of its records.
    ///
    /// `DELETE /api/domains/{id}`
    pub async fn delete_zone(&self, zone_id: i64) -> Result<Option<String>, Error> {
        let url = self.api_url(&format!("domains/{zone_id}"))?;
        debug!(zone_id, "deleting zone");
        let ack = self.delete(url).await?;
        Ok(ack.message)
    }
}
