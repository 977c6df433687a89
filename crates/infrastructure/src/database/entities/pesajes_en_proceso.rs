use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "pesajes_en_proceso")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub embarcacion_id: Uuid,
    pub embarcacion_nombre: String,
    pub estado: String,
    pub fecha_inicio: DateTimeWithTimeZone,
    pub fecha_cierre: Option<DateTimeWithTimeZone>,
    pub usuario_id: Uuid,
    pub cliente_id: Uuid,
    pub observaciones: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::embarcaciones::Entity",
        from = "Column::EmbarcacionId",
        to = "super::embarcaciones::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Embarcacion,
    #[sea_orm(has_many = "super::bins_pesaje::Entity")]
    BinsPesaje,
}

impl Related<super::embarcaciones::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Embarcacion.def()
    }
}

impl Related<super::bins_pesaje::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BinsPesaje.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
