use chrono::{DateTime, Utc};
use serde::Serialize;

use domain::WeighingSession;

/// A completed session plus the totals the history screen shows.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    #[serde(flatten)]
    pub session: WeighingSession,
    pub total_bins: usize,
    pub total_kilos: f64,
}

impl SessionSummary {
    pub fn from_session(session: WeighingSession) -> Self {
        let total_bins = session.bins.len();
        let total_kilos = session.total_net();
        Self {
            session,
            total_bins,
            total_kilos,
        }
    }
}

/// Dashboard counters for the weigher home screen.
#[derive(Debug, Clone, Default, Serialize)]
pub struct WeigherStats {
    /// Vessels with a session currently open.
    pub active_vessels: usize,
    /// Bins registered but not yet weighed across open sessions.
    pub pending_bins: usize,
    pub kilos_today: f64,
    pub last_weighing: Option<DateTime<Utc>>,
}
