use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::identity::Identity;

/// Auto-retries stop once an action has failed this many replay attempts; the
/// action stays queued for manual intervention.
pub const MAX_RETRIES: u32 = 3;

/// The mutation a queued action will replay. Serialized as
/// `{ "type": "...", "data": { ... } }` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum ActionPayload {
    StartSession {
        vessel_id: Uuid,
    },
    AddBin {
        session_id: Uuid,
        code: String,
        tare: f64,
        notes: Option<String>,
    },
    RecordWeight {
        session_id: Uuid,
        bin_in_session_id: Uuid,
        gross: f64,
        notes: Option<String>,
    },
    ChangeState {
        session_id: Uuid,
    },
    CloseSession {
        session_id: Uuid,
    },
}

impl ActionPayload {
    pub fn kind(&self) -> &'static str {
        match self {
            ActionPayload::StartSession { .. } => "start_session",
            ActionPayload::AddBin { .. } => "add_bin",
            ActionPayload::RecordWeight { .. } => "record_weight",
            ActionPayload::ChangeState { .. } => "change_state",
            ActionPayload::CloseSession { .. } => "close_session",
        }
    }
}

/// A queued mutation awaiting replay. Ids are assigned by the durable store
/// in monotonically increasing order; replay walks them FIFO because later
/// mutations may depend on earlier ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfflineAction {
    pub id: i64,
    #[serde(flatten)]
    pub identity: Identity,
    #[serde(flatten)]
    pub payload: ActionPayload,
    /// Unix millis at enqueue time.
    pub timestamp: i64,
    pub retries: u32,
}
