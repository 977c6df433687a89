use super::Bin;
use crate::error::Result;
use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
pub trait BinRepository: Send + Sync {
    async fn find_by_code(&self, client_id: Uuid, code: &str) -> Result<Option<Bin>>;
    async fn insert(&self, bin: &Bin) -> Result<()>;
    async fn update_tare(&self, bin_id: Uuid, tare: f64) -> Result<()>;
}
