mod entity;
mod repository;

pub use entity::Bin;
pub use repository::BinRepository;
