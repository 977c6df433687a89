pub mod entities;
mod bin_repository;
mod offline_store;
mod record_repository;
mod session_repository;
mod vessel_repository;

pub use bin_repository::SeaOrmBinRepository;
pub use offline_store::SqliteOfflineStore;
pub use record_repository::SeaOrmWeighingRecordRepository;
pub use session_repository::SeaOrmSessionRepository;
pub use vessel_repository::SeaOrmVesselRepository;

use chrono::{DateTime, FixedOffset, Utc};
use domain::DomainError;
use sea_orm::{DbErr, SqlErr};
use tracing::error;

/// Translate persistence failures into the domain taxonomy. Connection-class
/// errors are the only retryable ones; unique violations become conflicts so
/// the schema-level duplicate guards surface the same way as the in-engine
/// checks.
pub(crate) fn map_db_err(e: DbErr) -> DomainError {
    match &e {
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => DomainError::Connectivity(e.to_string()),
        _ => match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg)) => DomainError::Conflict(msg),
            _ => {
                error!(error = %e, "database operation failed");
                DomainError::Storage(e.to_string())
            }
        },
    }
}

pub(crate) fn to_offset(dt: DateTime<Utc>) -> DateTime<FixedOffset> {
    dt.fixed_offset()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use sea_orm::RuntimeErr;

    #[test]
    fn test_connection_errors_map_to_retryable_connectivity() {
        let err = map_db_err(DbErr::Conn(RuntimeErr::Internal("refused".into())));
        assert!(matches!(err, DomainError::Connectivity(_)));
        assert!(err.is_retryable());
    }

    #[test]
    fn test_unclassified_errors_map_to_storage() {
        let err = map_db_err(DbErr::Custom("boom".into()));
        assert!(matches!(err, DomainError::Storage(_)));
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_to_offset_preserves_the_instant() {
        let utc = Utc.with_ymd_and_hms(2025, 8, 1, 12, 30, 0).unwrap();
        assert_eq!(to_offset(utc), utc);
    }
}
