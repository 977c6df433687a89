use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use domain::error::{DomainError, Result};
use domain::record::WeighingRecordRepository;
use domain::session::SessionRepository;
use domain::vessel::VesselRepository;
use domain::{ActionPayload, BinInSession, Identity, WeighingRecord, WeighingSession};

use super::queries::{SessionSummary, WeigherStats};
use super::registry::BinRegistry;

/// Coordinates the weighing session state machine: bin registration, weight
/// recording, state transitions, and closure into finalized records.
///
/// The rules themselves live on the `WeighingSession` aggregate; the engine
/// loads, delegates, and persists.
pub struct WeighingEngine {
    vessels: Arc<dyn VesselRepository>,
    sessions: Arc<dyn SessionRepository>,
    records: Arc<dyn WeighingRecordRepository>,
    registry: BinRegistry,
}

impl WeighingEngine {
    pub fn new(
        vessels: Arc<dyn VesselRepository>,
        sessions: Arc<dyn SessionRepository>,
        records: Arc<dyn WeighingRecordRepository>,
        registry: BinRegistry,
    ) -> Self {
        Self {
            vessels,
            sessions,
            records,
            registry,
        }
    }

    /// Start a weighing session for a vessel with no open session.
    pub async fn start_session(
        &self,
        identity: &Identity,
        vessel_id: Uuid,
    ) -> Result<WeighingSession> {
        let vessel = self
            .vessels
            .find_by_id(identity.client_id, vessel_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("vessel {vessel_id} not found")))?;

        if let Some(open) = self
            .sessions
            .find_open_by_vessel(identity.client_id, vessel_id)
            .await?
        {
            return Err(DomainError::Conflict(format!(
                "a weighing is already in progress for vessel {} (session {})",
                vessel.name, open.id
            )));
        }

        let session = WeighingSession::start(
            vessel_id,
            vessel.name.clone(),
            identity.operator_id,
            identity.client_id,
        );
        self.sessions.insert(&session).await?;
        info!(session_id = %session.id, vessel = %vessel.name, "weighing session started");
        Ok(session)
    }

    /// Register a bin in an open session, resolving the code through the
    /// registry. The session is never auto-promoted; starting to weigh is an
    /// explicit operator decision.
    pub async fn add_bin(
        &self,
        identity: &Identity,
        session_id: Uuid,
        code: &str,
        tare: f64,
        notes: Option<String>,
    ) -> Result<BinInSession> {
        let mut session = self.load(identity, session_id).await?;
        if !session.state.accepts_bins() {
            return Err(DomainError::InvalidState(format!(
                "session {session_id} is {} and no longer accepts bins",
                session.state
            )));
        }

        let bin = self
            .registry
            .resolve_or_create(identity.client_id, code, tare)
            .await?;
        let bin_in_session = session.add_bin(bin.id, &bin.code, tare, notes)?;
        self.sessions.add_bin(&bin_in_session).await?;
        info!(session_id = %session_id, code = %bin.code, tare, "bin registered in session");
        Ok(bin_in_session)
    }

    /// Explicit transition from taring to weighing.
    pub async fn promote_to_weighing(&self, identity: &Identity, session_id: Uuid) -> Result<()> {
        let mut session = self.load(identity, session_id).await?;
        session.promote_to_weighing()?;
        self.sessions.set_state(session_id, &session.state).await?;
        info!(session_id = %session_id, "session promoted to weighing");
        Ok(())
    }

    /// Record one bin's gross weight; returns the derived net.
    pub async fn record_gross_weight(
        &self,
        identity: &Identity,
        session_id: Uuid,
        bin_in_session_id: Uuid,
        gross: f64,
        notes: Option<String>,
    ) -> Result<f64> {
        let mut session = self.load(identity, session_id).await?;
        let net = session.record_gross(bin_in_session_id, gross, notes)?;
        let bin = session
            .bin(bin_in_session_id)
            .ok_or_else(|| DomainError::NotFound(format!("bin {bin_in_session_id} not found")))?;
        self.sessions.update_bin(bin).await?;
        info!(session_id = %session_id, code = %bin.code, gross, net, "gross weight recorded");
        Ok(net)
    }

    /// Close a fully-weighed session, fanning out finalized records
    /// atomically.
    pub async fn close_session(
        &self,
        identity: &Identity,
        session_id: Uuid,
    ) -> Result<Vec<WeighingRecord>> {
        let mut session = self.load(identity, session_id).await?;
        let records = session.close(Utc::now())?;
        self.sessions.finalize(&session, &records).await?;
        info!(
            session_id = %session_id,
            records = records.len(),
            total_kilos = session.total_net(),
            "session closed"
        );
        Ok(records)
    }

    // --- Read side ---

    pub async fn open_sessions(&self, identity: &Identity) -> Result<Vec<WeighingSession>> {
        self.sessions.list_open(identity.client_id).await
    }

    pub async fn session(&self, identity: &Identity, session_id: Uuid) -> Result<WeighingSession> {
        self.load(identity, session_id).await
    }

    /// Completed sessions with bin counts and net totals, newest first.
    pub async fn history(&self, identity: &Identity) -> Result<Vec<SessionSummary>> {
        let sessions = self.sessions.list_completed(identity.client_id).await?;
        Ok(sessions
            .into_iter()
            .map(SessionSummary::from_session)
            .collect())
    }

    pub async fn weigher_stats(&self, identity: &Identity) -> Result<WeigherStats> {
        let open = self.sessions.list_open(identity.client_id).await?;
        let day_start = Utc::now()
            .date_naive()
            .and_hms_opt(0, 0, 0)
            .map(|dt| dt.and_utc())
            .unwrap_or_else(Utc::now);
        let today = self
            .records
            .list_since(identity.client_id, day_start)
            .await?;

        Ok(WeigherStats {
            active_vessels: open.len(),
            pending_bins: open
                .iter()
                .flat_map(|s| s.bins.iter())
                .filter(|b| !b.is_weighed())
                .count(),
            kilos_today: today.iter().map(|r| r.net).sum(),
            last_weighing: today.iter().map(|r| r.recorded_at).max(),
        })
    }

    /// Entry point used by the offline queue to replay a captured mutation
    /// through the same operations the presentation layer calls.
    pub async fn apply(
        &self,
        identity: &Identity,
        payload: &ActionPayload,
    ) -> Result<serde_json::Value> {
        match payload {
            ActionPayload::StartSession { vessel_id } => {
                let session = self.start_session(identity, *vessel_id).await?;
                to_value(&session)
            }
            ActionPayload::AddBin {
                session_id,
                code,
                tare,
                notes,
            } => {
                let bin = self
                    .add_bin(identity, *session_id, code, *tare, notes.clone())
                    .await?;
                to_value(&bin)
            }
            ActionPayload::RecordWeight {
                session_id,
                bin_in_session_id,
                gross,
                notes,
            } => {
                let net = self
                    .record_gross_weight(
                        identity,
                        *session_id,
                        *bin_in_session_id,
                        *gross,
                        notes.clone(),
                    )
                    .await?;
                Ok(json!({ "net": net }))
            }
            ActionPayload::ChangeState { session_id } => {
                self.promote_to_weighing(identity, *session_id).await?;
                Ok(json!({ "estado": "pesaje" }))
            }
            ActionPayload::CloseSession { session_id } => {
                let records = self.close_session(identity, *session_id).await?;
                to_value(&records)
            }
        }
    }

    async fn load(&self, identity: &Identity, session_id: Uuid) -> Result<WeighingSession> {
        self.sessions
            .find_by_id(identity.client_id, session_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("session {session_id} not found")))
    }
}

fn to_value<T: serde::Serialize>(value: &T) -> Result<serde_json::Value> {
    serde_json::to_value(value).map_err(|e| DomainError::Storage(e.to_string()))
}
