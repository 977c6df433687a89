use async_trait::async_trait;
use chrono::Utc;
use sqlx::{sqlite::SqlitePoolOptions, Pool, Row, Sqlite};
use tracing::error;
use uuid::Uuid;

use domain::error::{DomainError, Result};
use domain::offline::{ActionPayload, OfflineAction, OfflineStore};
use domain::Identity;

/// Durable offline queue backed by a local SQLite file. Survives process
/// restarts; row ids give the monotonically increasing action ids replay
/// relies on.
#[derive(Clone)]
pub struct SqliteOfflineStore {
    pool: Pool<Sqlite>,
}

impl SqliteOfflineStore {
    pub async fn new(connection_string: &str) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1) // SQLite is single-writer
            .connect(connection_string)
            .await
            .map_err(map_sqlx_err)?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS offline_actions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                operator_id TEXT NOT NULL,
                client_id TEXT NOT NULL,
                payload TEXT NOT NULL,
                enqueued_at INTEGER NOT NULL,
                retries INTEGER NOT NULL DEFAULT 0
            )",
        )
        .execute(&pool)
        .await
        .map_err(map_sqlx_err)?;

        Ok(Self { pool })
    }

    fn row_to_action(row: &sqlx::sqlite::SqliteRow) -> Result<OfflineAction> {
        let operator_id: String = row.get("operator_id");
        let client_id: String = row.get("client_id");
        let payload: String = row.get("payload");
        let retries: i64 = row.get("retries");

        Ok(OfflineAction {
            id: row.get("id"),
            identity: Identity::new(parse_uuid(&operator_id)?, parse_uuid(&client_id)?),
            payload: serde_json::from_str(&payload)
                .map_err(|e| DomainError::Storage(format!("corrupt queued payload: {e}")))?,
            timestamp: row.get("enqueued_at"),
            retries: retries as u32,
        })
    }
}

#[async_trait]
impl OfflineStore for SqliteOfflineStore {
    async fn append(&self, identity: &Identity, payload: &ActionPayload) -> Result<OfflineAction> {
        let payload_json = serde_json::to_string(payload)
            .map_err(|e| DomainError::Storage(e.to_string()))?;
        let timestamp = Utc::now().timestamp_millis();

        let result = sqlx::query(
            "INSERT INTO offline_actions (operator_id, client_id, payload, enqueued_at, retries)
             VALUES (?, ?, ?, ?, 0)",
        )
        .bind(identity.operator_id.to_string())
        .bind(identity.client_id.to_string())
        .bind(&payload_json)
        .bind(timestamp)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_err)?;

        Ok(OfflineAction {
            id: result.last_insert_rowid(),
            identity: *identity,
            payload: payload.clone(),
            timestamp,
            retries: 0,
        })
    }

    async fn pending(&self) -> Result<Vec<OfflineAction>> {
        let rows = sqlx::query(
            "SELECT id, operator_id, client_id, payload, enqueued_at, retries
             FROM offline_actions ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_err)?;

        rows.iter().map(Self::row_to_action).collect()
    }

    async fn remove(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM offline_actions WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_err)?;
        Ok(())
    }

    async fn set_retries(&self, id: i64, retries: u32) -> Result<()> {
        sqlx::query("UPDATE offline_actions SET retries = ? WHERE id = ?")
            .bind(retries as i64)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_err)?;
        Ok(())
    }

    async fn count(&self) -> Result<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM offline_actions")
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_err)
    }
}

// The queue is a local file; failures here are storage faults, not the
// connectivity losses the queue exists to absorb.
fn map_sqlx_err(e: sqlx::Error) -> DomainError {
    error!(error = %e, "offline queue storage failure");
    DomainError::Storage(e.to_string())
}

fn parse_uuid(s: &str) -> Result<Uuid> {
    Uuid::parse_str(s).map_err(|e| DomainError::Storage(format!("corrupt queued id {s}: {e}")))
}
