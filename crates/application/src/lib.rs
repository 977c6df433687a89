//! Application layer - Use cases and business workflows

pub mod offline;
pub mod weighing;

pub use offline::{ExecuteOutcome, OfflineQueue, SyncReport};
pub use weighing::{BinRegistry, SessionSummary, WeigherStats, WeighingEngine};
