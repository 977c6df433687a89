mod queue;

pub use queue::{ExecuteOutcome, OfflineQueue, SyncReport};
