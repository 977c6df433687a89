use super::Vessel;
use crate::error::Result;
use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
pub trait VesselRepository: Send + Sync {
    /// Look up a vessel within the caller's account. Returns `None` for
    /// vessels of other clients even if the id exists.
    async fn find_by_id(&self, client_id: Uuid, vessel_id: Uuid) -> Result<Option<Vessel>>;
}
