mod bin_in_session;
mod entity;
mod repository;
mod state;

pub use bin_in_session::{BinInSession, BinState};
pub use entity::WeighingSession;
pub use repository::SessionRepository;
pub use state::SessionState;
