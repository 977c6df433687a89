use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use domain::error::Result;
use domain::record::{RecordState, WeighingRecord, WeighingRecordRepository};

use super::entities::pesajes;
use super::{map_db_err, to_offset};

pub struct SeaOrmWeighingRecordRepository {
    db: DatabaseConnection,
}

impl SeaOrmWeighingRecordRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn model_to_record(model: pesajes::Model) -> Result<WeighingRecord> {
        Ok(WeighingRecord {
            id: model.id,
            vessel_id: model.embarcacion_id,
            bin_id: model.bin_id,
            operator_id: model.usuario_id,
            client_id: model.cliente_id,
            gross: model.peso_bruto,
            net: model.peso_neto,
            recorded_at: model.fecha.to_utc(),
            notes: model.observaciones,
            state: RecordState::parse(&model.estado)?,
            synced: model.sincronizado,
            synced_at: model.fecha_sinc.map(|dt| dt.to_utc()),
        })
    }
}

#[async_trait]
impl WeighingRecordRepository for SeaOrmWeighingRecordRepository {
    async fn list_since(
        &self,
        client_id: Uuid,
        since: DateTime<Utc>,
    ) -> Result<Vec<WeighingRecord>> {
        let models = pesajes::Entity::find()
            .filter(pesajes::Column::ClienteId.eq(client_id))
            .filter(pesajes::Column::Fecha.gte(to_offset(since)))
            .order_by_asc(pesajes::Column::Fecha)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        models.into_iter().map(Self::model_to_record).collect()
    }
}
