use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use domain::bin::BinRepository;
use domain::error::{DomainError, Result};
use domain::Bin;

/// Maps a human-entered bin code to a stable `Bin` identity per client.
///
/// Codes are reused across sessions; hitting an existing code is the normal
/// path, not an error. The shared tare is last-write-wins - per-occurrence
/// tares live on `BinInSession`.
#[derive(Clone)]
pub struct BinRegistry {
    bins: Arc<dyn BinRepository>,
}

impl BinRegistry {
    pub fn new(bins: Arc<dyn BinRepository>) -> Self {
        Self { bins }
    }

    pub async fn resolve_or_create(&self, client_id: Uuid, code: &str, tare: f64) -> Result<Bin> {
        let code = code.trim();
        if code.is_empty() {
            return Err(DomainError::Validation("bin code cannot be empty".into()));
        }
        if tare < 0.0 {
            return Err(DomainError::Validation(format!(
                "tare cannot be negative: {tare}"
            )));
        }

        if let Some(mut existing) = self.bins.find_by_code(client_id, code).await? {
            if existing.tare != tare {
                info!(code, old = existing.tare, new = tare, "updating bin tare");
                self.bins.update_tare(existing.id, tare).await?;
                existing.tare = tare;
            }
            return Ok(existing);
        }

        let bin = Bin::new(client_id, code, tare);
        self.bins.insert(&bin).await?;
        info!(code, tare, "registered new bin");
        Ok(bin)
    }
}
