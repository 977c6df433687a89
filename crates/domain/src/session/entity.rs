use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{BinInSession, SessionState};
use crate::error::{DomainError, Result};
use crate::record::WeighingRecord;

/// WeighingSession aggregate root - one vessel's in-progress or completed
/// weighing workflow.
///
/// All state-machine rules live here; repositories persist whatever the
/// aggregate decided. Invariant: at most one non-completed session per vessel
/// per client (enforced both in `start` callers and by a partial unique index
/// at the persistence boundary).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeighingSession {
    pub id: Uuid,
    pub vessel_id: Uuid,
    /// Denormalized for display, as the dashboard lists sessions constantly.
    pub vessel_name: String,
    #[serde(flatten)]
    pub state: SessionState,
    pub started_at: DateTime<Utc>,
    pub operator_id: Uuid,
    pub client_id: Uuid,
    pub notes: Option<String>,
    pub bins: Vec<BinInSession>,
}

impl WeighingSession {
    /// Start a new session in the taring state.
    pub fn start(
        vessel_id: Uuid,
        vessel_name: impl Into<String>,
        operator_id: Uuid,
        client_id: Uuid,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            vessel_id,
            vessel_name: vessel_name.into(),
            state: SessionState::Tara,
            started_at: Utc::now(),
            operator_id,
            client_id,
            notes: None,
            bins: Vec::new(),
        }
    }

    /// Register a bin in this session. The same physical bin cannot appear
    /// twice; a rejected call leaves the bin set unchanged.
    pub fn add_bin(
        &mut self,
        bin_id: Uuid,
        code: &str,
        tare: f64,
        notes: Option<String>,
    ) -> Result<BinInSession> {
        if !self.state.accepts_bins() {
            return Err(DomainError::InvalidState(format!(
                "session {} is {} and no longer accepts bins",
                self.id, self.state
            )));
        }
        if self.bins.iter().any(|b| b.bin_id == bin_id) {
            return Err(DomainError::Conflict(format!(
                "bin {code} is already registered in this session"
            )));
        }
        let bin = BinInSession::register(self.id, bin_id, code, tare, notes);
        self.bins.push(bin.clone());
        Ok(bin)
    }

    /// Move from taring to weighing. Requires at least one registered bin.
    /// Irreversible.
    pub fn promote_to_weighing(&mut self) -> Result<()> {
        match self.state {
            SessionState::Tara => {
                if self.bins.is_empty() {
                    return Err(DomainError::Precondition(
                        "at least one bin must be registered before weighing starts".to_string(),
                    ));
                }
                self.state = SessionState::Pesaje;
                Ok(())
            }
            _ => Err(DomainError::InvalidState(format!(
                "session {} is {}, expected tara",
                self.id, self.state
            ))),
        }
    }

    /// Record the gross weight for one bin and return the derived net.
    pub fn record_gross(
        &mut self,
        bin_in_session_id: Uuid,
        gross: f64,
        notes: Option<String>,
    ) -> Result<f64> {
        if self.state.is_terminal() {
            return Err(DomainError::InvalidState(format!(
                "session {} is completado",
                self.id
            )));
        }
        let bin = self
            .bins
            .iter_mut()
            .find(|b| b.id == bin_in_session_id)
            .ok_or_else(|| {
                DomainError::NotFound(format!("bin {bin_in_session_id} is not in this session"))
            })?;
        bin.record_gross(gross, notes)
    }

    /// Close the session, fanning out one finalized record per bin.
    ///
    /// All-or-nothing: if any bin lacks a recorded weight, no records are
    /// produced and the state is unchanged. The offending bin codes are named
    /// in the error so the operator knows what to weigh.
    pub fn close(&mut self, now: DateTime<Utc>) -> Result<Vec<WeighingRecord>> {
        match self.state {
            SessionState::Pesaje => {}
            SessionState::Tara => {
                return Err(DomainError::InvalidState(format!(
                    "session {} is still taring",
                    self.id
                )));
            }
            SessionState::Completado { .. } => {
                return Err(DomainError::InvalidState(format!(
                    "session {} is already completado",
                    self.id
                )));
            }
        }

        let pending: Vec<&str> = self
            .bins
            .iter()
            .filter(|b| !b.is_weighed())
            .map(|b| b.code.as_str())
            .collect();
        if !pending.is_empty() {
            return Err(DomainError::Precondition(format!(
                "bins missing recorded weight: {}",
                pending.join(", ")
            )));
        }

        let records = self
            .bins
            .iter()
            .map(|bin| WeighingRecord::from_session_bin(self, bin, now))
            .collect::<Result<Vec<_>>>()?;
        self.state = SessionState::Completado { closed_at: now };
        Ok(records)
    }

    pub fn bin(&self, bin_in_session_id: Uuid) -> Option<&BinInSession> {
        self.bins.iter().find(|b| b.id == bin_in_session_id)
    }

    /// Sum of recorded net weights so far.
    pub fn total_net(&self) -> f64 {
        self.bins.iter().filter_map(|b| b.net).sum()
    }
}
