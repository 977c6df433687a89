use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The authenticated principal every engine operation runs as.
///
/// `client_id` is the owning account (tenant); no operation may read or write
/// rows belonging to another client regardless of what the store would allow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub operator_id: Uuid,
    pub client_id: Uuid,
}

impl Identity {
    pub fn new(operator_id: Uuid, client_id: Uuid) -> Self {
        Self {
            operator_id,
            client_id,
        }
    }
}
