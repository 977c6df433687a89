use super::WeighingRecord;
use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Read side over finalized records. Insertion happens through
/// `SessionRepository::finalize` so closure stays atomic.
#[async_trait]
pub trait WeighingRecordRepository: Send + Sync {
    async fn list_since(&self, client_id: Uuid, since: DateTime<Utc>)
        -> Result<Vec<WeighingRecord>>;
}
