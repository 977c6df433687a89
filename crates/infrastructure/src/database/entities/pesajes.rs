use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "pesajes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub embarcacion_id: Uuid,
    pub bin_id: Uuid,
    pub usuario_id: Uuid,
    pub cliente_id: Uuid,
    pub peso_bruto: f64,
    pub peso_neto: f64,
    pub fecha: DateTimeWithTimeZone,
    pub observaciones: Option<String>,
    pub estado: String,
    pub sincronizado: bool,
    pub fecha_sinc: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::bins::Entity",
        from = "Column::BinId",
        to = "super::bins::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Bin,
}

impl Related<super::bins::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bin.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
