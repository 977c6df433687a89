mod action;
mod store;

pub use action::{ActionPayload, OfflineAction, MAX_RETRIES};
pub use store::OfflineStore;
