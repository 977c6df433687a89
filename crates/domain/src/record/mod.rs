mod entity;
mod repository;

pub use entity::{RecordState, WeighingRecord};
pub use repository::WeighingRecordRepository;
