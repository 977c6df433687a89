//! In-memory persistence backend shared by the engine and queue tests.
//!
//! The backend honours the same uniqueness rules the real schema enforces and
//! can be flipped "offline", in which case every call fails with a
//! connectivity error.

use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

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

#[derive(Default)]
pub struct MemBackend {
    pub offline: AtomicBool,
    pub vessels: Mutex<Vec<Vessel>>,
    pub bins: Mutex<Vec<Bin>>,
    pub sessions: Mutex<Vec<WeighingSession>>,
    pub records: Mutex<Vec<WeighingRecord>>,
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
        let mut bins = self.bins.lock().unwrap();
        if bins
            .iter()
            .any(|b| b.client_id == bin.client_id && b.code == bin.code)
        {
            return Err(DomainError::Conflict(format!(
                "duplicate bin code {}",
                bin.code
            )));
        }
        bins.push(bin.clone());
        Ok(())
    }

    async fn update_tare(&self, bin_id: Uuid, tare: f64) -> Result<()> {
        self.check_online()?;
        let mut bins = self.bins.lock().unwrap();
        match bins.iter_mut().find(|b| b.id == bin_id) {
            Some(bin) => {
                bin.tare = tare;
                bin.updated_at = Utc::now();
                Ok(())
            }
            None => Err(DomainError::NotFound(format!("bin {bin_id}"))),
        }
    }
}

#[async_trait]
impl SessionRepository for MemBackend {
    async fn insert(&self, session: &WeighingSession) -> Result<()> {
        self.check_online()?;
        let mut sessions = self.sessions.lock().unwrap();
        // partial unique index: one open session per vessel
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
        if session.bins.iter().any(|b| b.bin_id == bin.bin_id) {
            return Err(DomainError::Conflict(format!(
                "bin {} already in session",
                bin.code
            )));
        }
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
        match session.bins.iter_mut().find(|b| b.id == bin.id) {
            Some(existing) => {
                *existing = bin.clone();
                Ok(())
            }
            None => Err(DomainError::NotFound(format!("session bin {}", bin.id))),
        }
    }

    async fn set_state(&self, session_id: Uuid, state: &SessionState) -> Result<()> {
        self.check_online()?;
        let mut sessions = self.sessions.lock().unwrap();
        match sessions.iter_mut().find(|s| s.id == session_id) {
            Some(session) => {
                session.state = state.clone();
                Ok(())
            }
            None => Err(DomainError::NotFound(format!("session {session_id}"))),
        }
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

/// Durable local queue: always reachable, even "offline".
#[derive(Default)]
pub struct MemOfflineStore {
    next_id: AtomicI64,
    pub actions: Mutex<Vec<OfflineAction>>,
}

impl MemOfflineStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

#[async_trait]
impl OfflineStore for MemOfflineStore {
    async fn append(&self, identity: &Identity, payload: &ActionPayload) -> Result<OfflineAction> {
        let action = OfflineAction {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            identity: *identity,
            payload: payload.clone(),
            timestamp: Utc::now().timestamp_millis(),
            retries: 0,
        };
        self.actions.lock().unwrap().push(action.clone());
        Ok(action)
    }

    async fn pending(&self) -> Result<Vec<OfflineAction>> {
        Ok(self.actions.lock().unwrap().clone())
    }

    async fn remove(&self, id: i64) -> Result<()> {
        self.actions.lock().unwrap().retain(|a| a.id != id);
        Ok(())
    }

    async fn set_retries(&self, id: i64, retries: u32) -> Result<()> {
        if let Some(action) = self.actions.lock().unwrap().iter_mut().find(|a| a.id == id) {
            action.retries = retries;
        }
        Ok(())
    }

    async fn count(&self) -> Result<i64> {
        Ok(self.actions.lock().unwrap().len() as i64)
    }
}

pub fn test_identity() -> Identity {
    Identity::new(Uuid::new_v4(), Uuid::new_v4())
}
