use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A reusable physical container, identified by a human-entered code and
/// scoped to one client account.
///
/// The stored tare is last-write-wins: re-registering a known code with a
/// different tare updates it in place. Sessions that need the tare as it was
/// at registration time rely on the snapshot in `BinInSession`, never on this
/// value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bin {
    pub id: Uuid,
    pub code: String,
    pub tare: f64,
    pub capacity: Option<f64>,
    pub client_id: Uuid,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Bin {
    pub fn new(client_id: Uuid, code: impl Into<String>, tare: f64) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            code: code.into(),
            tare,
            capacity: None,
            client_id,
            active: true,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_bin_is_active() {
        let bin = Bin::new(Uuid::new_v4(), "BIN001", 12.5);
        assert_eq!(bin.code, "BIN001");
        assert_eq!(bin.tare, 12.5);
        assert!(bin.active);
        assert!(bin.capacity.is_none());
    }
}
