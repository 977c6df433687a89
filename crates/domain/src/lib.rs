//! Domain layer - Pure business logic with no external dependencies
//!
//! This crate contains:
//! - Entities (Vessel, Bin, WeighingSession, BinInSession, WeighingRecord)
//! - Value Objects (SessionState, BinState, RecordState, ActionPayload)
//! - The error taxonomy for the weighing workflow
//! - Repository and offline-store interfaces (traits)
//!
//! Principles:
//! - No dependencies on infrastructure
//! - The session state machine is enforced here, not in SQL or handlers
//! - Testable in isolation

pub mod bin;
pub mod error;
pub mod identity;
pub mod offline;
pub mod record;
pub mod session;
pub mod vessel;

// Re-export commonly used types
pub use bin::Bin;
pub use error::DomainError;
pub use identity::Identity;
pub use offline::{ActionPayload, OfflineAction, MAX_RETRIES};
pub use record::WeighingRecord;
pub use session::{BinInSession, BinState, SessionState, WeighingSession};
pub use vessel::Vessel;
