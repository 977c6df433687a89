//! In-memory persistence backend for exercising the HTTP surface without a
//! database.

use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use application::{BinRegistry, OfflineQueue, WeighingEngine};
use domain::bin::BinRepository;
use domain::error::{DomainError, Result};
use domain::offline::OfflineStore;
use domain::record::WeighingRecordRepository;
use domain::session::SessionRepository;
use domain::vessel::VesselRepository;
use domain::{
    ActionPayload, Bin, BinInSession, Identity, OfflineAction, SessionState, Vessel,
    WeighingRecord, WeighingSession,
};
use server::state::AppState;

#[derive(Default)]
pub struct MemBackend {
    pub offline: AtomicBool,
    pub vessels: Mutex<Vec<Vessel>>,
    pub bins: Mutex<Vec<Bin>>,
    pub sessions: Mutex<Vec<WeighingSession>>,
    pub records: Mutex<Vec<WeighingRecord>>,
    queue_next_id: AtomicI64,
    pub queued: Mutex<Vec<OfflineAction>>,
}

impl MemBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn check_online(&self) -> Result<()> {
        if self.offline.load(Ordering::SeqCst) {
            Err(DomainError::Connectivity("backend unreachable".into()))
        } else {
            Ok(())
        }
    }

    pub fn seed_vessel(&self, client_id: Uuid, name: &str) -> Vessel {
        let now = Utc::now();
        let vessel = Vessel {
            id: Uuid::new_v4(),
            name: name.to_string(),
            registration: format!("REG-{}", name.to_uppercase()),
            owner: "Armador".to_string(),
            phone: None,
            notes: None,
            client_id,
            active: true,
            created_at: now,
            updated_at: now,
        };
        self.vessels.lock().unwrap().push(vessel.clone());
        vessel
    }
}

#[async_trait]
impl VesselRepository for MemBackend {
    async fn find_by_id(&self, client_id: Uuid, vessel_id: Uuid) -> Result<Option<Vessel>> {
        self.check_online()?;
        Ok(self
            .vessels
            .lock()
            .unwrap()
            .iter()
            .find(|v| v.client_id == client_id && v.id == vessel_id)
            .cloned())
    }
}

#[async_trait]
impl BinRepository for MemBackend {
    async fn find_by_code(&self, client_id: Uuid, code: &str) -> Result<Option<Bin>> {
        self.check_online()?;
        Ok(self
            .bins
            .lock()
            .unwrap()
            .iter()
            .find(|b| b.client_id == client_id && b.code == code)
            .cloned())
    }

    async fn insert(&self, bin: &Bin) -> Result<()> {
        self.check_online()?;
        self.bins.lock().unwrap().push(bin.clone());
        Ok(())
    }

    async fn update_tare(&self, bin_id: Uuid, tare: f64) -> Result<()> {
        self.check_online()?;
        if let Some(bin) = self.bins.lock().unwrap().iter_mut().find(|b| b.id == bin_id) {
            bin.tare = tare;
        }
        Ok(())
    }
}

#[async_trait]
impl SessionRepository for MemBackend {
    async fn insert(&self, session: &WeighingSession) -> Result<()> {
        self.check_online()?;
        let mut sessions = self.sessions.lock().unwrap();
        if sessions
            .iter()
            .any(|s| s.vessel_id == session.vessel_id && !s.state.is_terminal())
        {
            return Err(DomainError::Conflict(format!(
                "open session exists for vessel {}",
                session.vessel_id
            )));
        }
        sessions.push(session.clone());
        Ok(())
    }

    async fn find_by_id(&self, client_id: Uuid, id: Uuid) -> Result<Option<WeighingSession>> {
        self.check_online()?;
        Ok(self
            .sessions
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.client_id == client_id && s.id == id)
            .cloned())
    }

    async fn find_open_by_vessel(
        &self,
        client_id: Uuid,
        vessel_id: Uuid,
    ) -> Result<Option<WeighingSession>> {
        self.check_online()?;
        Ok(self
            .sessions
            .lock()
            .unwrap()
            .iter()
            .find(|s| {
                s.client_id == client_id && s.vessel_id == vessel_id && !s.state.is_terminal()
            })
            .cloned())
    }

    async fn list_open(&self, client_id: Uuid) -> Result<Vec<WeighingSession>> {
        self.check_online()?;
        Ok(self
            .sessions
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.client_id == client_id && !s.state.is_terminal())
            .cloned()
            .collect())
    }

    async fn list_completed(&self, client_id: Uuid) -> Result<Vec<WeighingSession>> {
        self.check_online()?;
        Ok(self
            .sessions
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.client_id == client_id && s.state.is_terminal())
            .cloned()
            .collect())
    }

    async fn add_bin(&self, bin: &BinInSession) -> Result<()> {
        self.check_online()?;
        let mut sessions = self.sessions.lock().unwrap();
        let session = sessions
            .iter_mut()
            .find(|s| s.id == bin.session_id)
            .ok_or_else(|| DomainError::NotFound(format!("session {}", bin.session_id)))?;
        session.bins.push(bin.clone());
        Ok(())
    }

    async fn update_bin(&self, bin: &BinInSession) -> Result<()> {
        self.check_online()?;
        let mut sessions = self.sessions.lock().unwrap();
        let session = sessions
            .iter_mut()
            .find(|s| s.id == bin.session_id)
            .ok_or_else(|| DomainError::NotFound(format!("session {}", bin.session_id)))?;
        if let Some(existing) = session.bins.iter_mut().find(|b| b.id == bin.id) {
            *existing = bin.clone();
        }
        Ok(())
    }

    async fn set_state(&self, session_id: Uuid, state: &SessionState) -> Result<()> {
        self.check_online()?;
        let mut sessions = self.sessions.lock().unwrap();
        if let Some(session) = sessions.iter_mut().find(|s| s.id == session_id) {
            session.state = state.clone();
        }
        Ok(())
    }

    async fn finalize(&self, session: &WeighingSession, records: &[WeighingRecord]) -> Result<()> {
        self.check_online()?;
        let mut sessions = self.sessions.lock().unwrap();
        let stored = sessions
            .iter_mut()
            .find(|s| s.id == session.id)
            .ok_or_else(|| DomainError::NotFound(format!("session {}", session.id)))?;
        stored.state = session.state.clone();
        stored.bins = session.bins.clone();
        self.records.lock().unwrap().extend_from_slice(records);
        Ok(())
    }
}

#[async_trait]
impl WeighingRecordRepository for MemBackend {
    async fn list_since(
        &self,
        client_id: Uuid,
        since: DateTime<Utc>,
    ) -> Result<Vec<WeighingRecord>> {
        self.check_online()?;
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.client_id == client_id && r.recorded_at >= since)
            .cloned()
            .collect())
    }
}

// The queue is local storage; it stays reachable when the backend is not.
#[async_trait]
impl OfflineStore for MemBackend {
    async fn append(&self, identity: &Identity, payload: &ActionPayload) -> Result<OfflineAction> {
        let action = OfflineAction {
            id: self.queue_next_id.fetch_add(1, Ordering::SeqCst) + 1,
            identity: *identity,
            payload: payload.clone(),
            timestamp: Utc::now().timestamp_millis(),
            retries: 0,
        };
        self.queued.lock().unwrap().push(action.clone());
        Ok(action)
    }

    async fn pending(&self) -> Result<Vec<OfflineAction>> {
        Ok(self.queued.lock().unwrap().clone())
    }

    async fn remove(&self, id: i64) -> Result<()> {
        self.queued.lock().unwrap().retain(|a| a.id != id);
        Ok(())
    }

    async fn set_retries(&self, id: i64, retries: u32) -> Result<()> {
        if let Some(action) = self.queued.lock().unwrap().iter_mut().find(|a| a.id == id) {
            action.retries = retries;
        }
        Ok(())
    }

    async fn count(&self) -> Result<i64> {
        Ok(self.queued.lock().unwrap().len() as i64)
    }
}

pub fn app_state(backend: Arc<MemBackend>) -> Arc<AppState> {
    let registry = BinRegistry::new(backend.clone());
    let engine = Arc::new(WeighingEngine::new(
        backend.clone(),
        backend.clone(),
        backend.clone(),
        registry,
    ));
    let queue = Arc::new(OfflineQueue::new(engine.clone(), backend));
    Arc::new(AppState::new(engine, queue))
}
