use crate::error::{DomainError, Result};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Per-bin state within one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinState {
    Pendiente,
    TaraCompletada,
    PesajeCompletado,
}

impl BinState {
    pub fn as_str(&self) -> &'static str {
        match self {
            BinState::Pendiente => "pendiente",
            BinState::TaraCompletada => "tara_completada",
            BinState::PesajeCompletado => "pesaje_completado",
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "pendiente" => Ok(BinState::Pendiente),
            "tara_completada" => Ok(BinState::TaraCompletada),
            "pesaje_completado" => Ok(BinState::PesajeCompletado),
            other => Err(DomainError::Storage(format!("unknown bin state: {other}"))),
        }
    }
}

/// One bin's participation in one session.
///
/// The tare is captured at registration time; later edits to the shared
/// `Bin` row do not change it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BinInSession {
    pub id: Uuid,
    pub session_id: Uuid,
    pub bin_id: Uuid,
    pub code: String,
    pub tare: f64,
    pub gross: Option<f64>,
    pub net: Option<f64>,
    pub state: BinState,
    pub notes: Option<String>,
}

impl BinInSession {
    /// Register a bin in a session with the tare known right now.
    pub fn register(
        session_id: Uuid,
        bin_id: Uuid,
        code: impl Into<String>,
        tare: f64,
        notes: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            session_id,
            bin_id,
            code: code.into(),
            tare,
            gross: None,
            net: None,
            state: BinState::TaraCompletada,
            notes,
        }
    }

    /// Record the gross weight and derive the net. Single-shot: once a bin is
    /// weighed there are no corrections.
    pub fn record_gross(&mut self, gross: f64, notes: Option<String>) -> Result<f64> {
        if gross < 0.0 {
            return Err(DomainError::Validation(format!(
                "gross weight cannot be negative: {gross}"
            )));
        }
        match self.state {
            BinState::TaraCompletada => {
                let net = (gross - self.tare).max(0.0);
                self.gross = Some(gross);
                self.net = Some(net);
                self.state = BinState::PesajeCompletado;
                if notes.is_some() {
                    self.notes = notes;
                }
                Ok(net)
            }
            BinState::PesajeCompletado => Err(DomainError::InvalidState(format!(
                "bin {} already has a recorded weight",
                self.code
            ))),
            BinState::Pendiente => Err(DomainError::InvalidState(format!(
                "bin {} has no completed tare",
                self.code
            ))),
        }
    }

    pub fn is_weighed(&self) -> bool {
        self.state == BinState::PesajeCompletado
    }
}
