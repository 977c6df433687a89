use super::{BinInSession, SessionState, WeighingSession};
use crate::error::Result;
use crate::record::WeighingRecord;
use async_trait::async_trait;
use uuid::Uuid;

/// Persistence for sessions and their bins. Implementations load sessions
/// with their bins attached; all reads are scoped to the calling client.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn insert(&self, session: &WeighingSession) -> Result<()>;

    async fn find_by_id(&self, client_id: Uuid, id: Uuid) -> Result<Option<WeighingSession>>;

    /// The open (state != completado) session for a vessel, if any.
    async fn find_open_by_vessel(
        &self,
        client_id: Uuid,
        vessel_id: Uuid,
    ) -> Result<Option<WeighingSession>>;

    async fn list_open(&self, client_id: Uuid) -> Result<Vec<WeighingSession>>;

    async fn list_completed(&self, client_id: Uuid) -> Result<Vec<WeighingSession>>;

    async fn add_bin(&self, bin: &BinInSession) -> Result<()>;

    async fn update_bin(&self, bin: &BinInSession) -> Result<()>;

    async fn set_state(&self, session_id: Uuid, state: &SessionState) -> Result<()>;

    /// Close a session: persist the finalized records and the terminal state
    /// in one transaction. Either everything lands or nothing does.
    async fn finalize(&self, session: &WeighingSession, records: &[WeighingRecord]) -> Result<()>;
}
