mod engine;
mod queries;
mod registry;

pub use engine::WeighingEngine;
pub use queries::{SessionSummary, WeigherStats};
pub use registry::BinRegistry;
