use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use domain::bin::{Bin, BinRepository};
use domain::error::{DomainError, Result};

use super::entities::bins;
use super::{map_db_err, to_offset};

pub struct SeaOrmBinRepository {
    db: DatabaseConnection,
}

impl SeaOrmBinRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn model_to_bin(model: bins::Model) -> Bin {
        Bin {
            id: model.id,
            code: model.codigo,
            tare: model.tara,
            capacity: model.capacidad,
            client_id: model.cliente_id,
            active: model.activo,
            created_at: model.created_at.to_utc(),
            updated_at: model.updated_at.to_utc(),
        }
    }
}

#[async_trait]
impl BinRepository for SeaOrmBinRepository {
    async fn find_by_code(&self, client_id: Uuid, code: &str) -> Result<Option<Bin>> {
        let model = bins::Entity::find()
            .filter(bins::Column::ClienteId.eq(client_id))
            .filter(bins::Column::Codigo.eq(code))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(model.map(Self::model_to_bin))
    }

    async fn insert(&self, bin: &Bin) -> Result<()> {
        let active_model = bins::ActiveModel {
            id: Set(bin.id),
            codigo: Set(bin.code.clone()),
            tara: Set(bin.tare),
            capacidad: Set(bin.capacity),
            cliente_id: Set(bin.client_id),
            activo: Set(bin.active),
            created_at: Set(to_offset(bin.created_at)),
            updated_at: Set(to_offset(bin.updated_at)),
        };
        active_model.insert(&self.db).await.map_err(map_db_err)?;
        Ok(())
    }

    async fn update_tare(&self, bin_id: Uuid, tare: f64) -> Result<()> {
        let model = bins::Entity::find_by_id(bin_id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?
            .ok_or_else(|| DomainError::NotFound(format!("bin {bin_id} not found")))?;

        let mut active_model: bins::ActiveModel = model.into();
        active_model.tara = Set(tare);
        active_model.updated_at = Set(to_offset(Utc::now()));
        active_model.update(&self.db).await.map_err(map_db_err)?;
        Ok(())
    }
}
