use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "embarcaciones")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub nombre: String,
    pub matricula: String,
    pub propietario: String,
    pub telefono: Option<String>,
    pub observaciones: Option<String>,
    pub cliente_id: Uuid,
    pub activa: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::pesajes_en_proceso::Entity")]
    PesajesEnProceso,
}

impl Related<super::pesajes_en_proceso::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PesajesEnProceso.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
