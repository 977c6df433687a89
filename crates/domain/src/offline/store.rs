use super::action::{ActionPayload, OfflineAction};
use crate::error::Result;
use crate::identity::Identity;
use async_trait::async_trait;

/// Durable local queue of not-yet-confirmed mutations. Survives process
/// restarts; implementable over an embedded database or a local file.
#[async_trait]
pub trait OfflineStore: Send + Sync {
    /// Append an action, assigning the next local id and the current
    /// timestamp. Returns the stored action.
    async fn append(&self, identity: &Identity, payload: &ActionPayload) -> Result<OfflineAction>;

    /// All queued actions in enqueue (FIFO) order.
    async fn pending(&self) -> Result<Vec<OfflineAction>>;

    async fn remove(&self, id: i64) -> Result<()>;

    async fn set_retries(&self, id: i64, retries: u32) -> Result<()>;

    async fn count(&self) -> Result<i64>;
}
