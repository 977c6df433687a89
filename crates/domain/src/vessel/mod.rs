mod entity;
mod repository;

pub use entity::Vessel;
pub use repository::VesselRepository;
