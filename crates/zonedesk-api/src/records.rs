// Resource record endpoints
//
// Listing is zone-scoped (`/api/domains/{id}/records`); mutations address
// records directly and carry the zone id in the body.

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{Listing, RecordBody, RecordDto};

impl ApiClient {
    /// List the records of a zone, in server order (SOA, NS, then by name).
    ///
    /// `GET /api/domains/{id}/records`. An empty zone may come back as
    /// JSON `null`; that decodes to an empty list.
    pub async fn list_records(&self, zone_id: i64) -> Result<Vec<RecordDto>, Error> {
        let url = self.api_url(&format!("domains/{zone_id}/records"))?;
        debug!(zone_id, "listing records");
        let listing: Listing<RecordDto> = self.get(url).await?;
        Ok(listing.items)
    }

    /// Create a record. Returns the new id when the server reports it.
    ///
    /// `POST /api/records`
    pub async fn create_record(&self, body: &RecordBody) -> Result<Option<i64>, Error> {
        let url = self.api_url("records")?;
        debug!(zone_id = body.domain_id, record_type = %body.record_type, "creating record");
        let ack = self.post(url, body).await?;
        Ok(ack.id)
    }

    /// Update an existing record.
    ///
    /// `PUT /api/records/{id}`
    pub async fn update_record(&self, record_id: i64, body: &RecordBody) -> Result<(), Error> {
        let url = self.api_url(&format!("records/{record_id}"))?;
        debug!(record_id, "updating record");
        self.put(url, body).await?;
        Ok(())
    }

    /// Delete a record.
    ///
    /// `DELETE /api/records/{id}`
    pub async fn delete_record(&self, record_id: i64) -> Result<(), Error> {
        let url = self.api_url(&format!("records/{record_id}"))?;
        debug!(record_id, "deleting record");
        self.delete(url).await?;
        Ok(())
    }
}
