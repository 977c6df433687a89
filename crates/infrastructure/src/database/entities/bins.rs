use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bins")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub codigo: String,
    pub tara: f64,
    pub capacidad: Option<f64>,
    pub cliente_id: Uuid,
    pub activo: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::bins_pesaje::Entity")]
    BinsPesaje,
}

impl Related<super::bins_pesaje::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BinsPesaje.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
