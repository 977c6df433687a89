use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{DomainError, Result};
use crate::session::{BinInSession, WeighingSession};

/// Sync lifecycle of a finalized record. Updated by external sync tooling,
/// never by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordState {
    Pendiente,
    Sincronizado,
    Error,
}

impl RecordState {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordState::Pendiente => "pendiente",
            RecordState::Sincronizado => "sincronizado",
            RecordState::Error => "error",
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "pendiente" => Ok(RecordState::Pendiente),
            "sincronizado" => Ok(RecordState::Sincronizado),
            "error" => Ok(RecordState::Error),
            other => Err(DomainError::Storage(format!(
                "unknown record state: {other}"
            ))),
        }
    }
}

/// One finalized weighing, produced when a session closes. One session fans
/// out into N records, one per bin. Immutable afterwards except for the sync
/// flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeighingRecord {
    pub id: Uuid,
    pub vessel_id: Uuid,
    pub bin_id: Uuid,
    pub operator_id: Uuid,
    pub client_id: Uuid,
    pub gross: f64,
    pub net: f64,
    pub recorded_at: DateTime<Utc>,
    pub notes: Option<String>,
    pub state: RecordState,
    pub synced: bool,
    pub synced_at: Option<DateTime<Utc>>,
}

impl WeighingRecord {
    /// Build the finalized record for one bin of a closing session. The bin
    /// must already be weighed; an unweighed bin fails the same precondition
    /// the close check enforces.
    pub fn from_session_bin(
        session: &WeighingSession,
        bin: &BinInSession,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        let (Some(gross), Some(net)) = (bin.gross, bin.net) else {
            return Err(DomainError::Precondition(format!(
                "bin {} has no recorded weight",
                bin.code
            )));
        };
        Ok(Self {
            id: Uuid::new_v4(),
            vessel_id: session.vessel_id,
            bin_id: bin.bin_id,
            operator_id: session.operator_id,
            client_id: session.client_id,
            gross,
            net,
            recorded_at: now,
            notes: bin.notes.clone(),
            state: RecordState::Pendiente,
            synced: false,
            synced_at: None,
        })
    }
}
