use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered fishing boat, owned by one client account.
///
/// Vessels are managed by the buyer-facing CRUD screens; the weighing engine
/// only ever reads them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vessel {
    pub id: Uuid,
    pub name: String,
    pub registration: String,
    pub owner: String,
    pub phone: Option<String>,
    pub notes: Option<String>,
    pub client_id: Uuid,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
