use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use uuid::Uuid;

use domain::error::Result;
use domain::vessel::{Vessel, VesselRepository};

use super::entities::embarcaciones;
use super::map_db_err;

pub struct SeaOrmVesselRepository {
    db: DatabaseConnection,
}

impl SeaOrmVesselRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn model_to_vessel(model: embarcaciones::Model) -> Vessel {
        Vessel {
            id: model.id,
            name: model.nombre,
            registration: model.matricula,
            owner: model.propietario,
            phone: model.telefono,
            notes: model.observaciones,
            client_id: model.cliente_id,
            active: model.activa,
            created_at: model.created_at.to_utc(),
            updated_at: model.updated_at.to_utc(),
        }
    }
}

#[async_trait]
impl VesselRepository for SeaOrmVesselRepository {
    async fn find_by_id(&self, client_id: Uuid, vessel_id: Uuid) -> Result<Option<Vessel>> {
        let model = embarcaciones::Entity::find_by_id(vessel_id)
            .filter(embarcaciones::Column::ClienteId.eq(client_id))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(model.map(Self::model_to_vessel))
    }
}
