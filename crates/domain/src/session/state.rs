use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a weighing session.
///
/// The only legal path is `Tara -> Pesaje -> Completado`; no transition skips
/// a state and none reverses. The close timestamp exists only on the terminal
/// variant so a half-closed session is unrepresentable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "estado", rename_all = "snake_case")]
pub enum SessionState {
    /// Bins are being registered with their empty weights.
    Tara,
    /// Gross weights are being recorded; bins may still arrive.
    Pesaje,
    /// Closed. Immutable from here on.
    Completado { closed_at: DateTime<Utc> },
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::Tara => "tara",
            SessionState::Pesaje => "pesaje",
            SessionState::Completado { .. } => "completado",
        }
    }

    /// Bins can be added while taring and while weighing (staggered arrivals).
    pub fn accepts_bins(&self) -> bool {
        matches!(self, SessionState::Tara | SessionState::Pesaje)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionState::Completado { .. })
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
