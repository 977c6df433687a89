use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bins_pesaje")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub pesaje_id: Uuid,
    pub bin_id: Uuid,
    pub codigo: String,
    /// Tare captured at registration time, not a live reference to the bin.
    pub tara: f64,
    pub peso_bruto: Option<f64>,
    pub peso_neto: Option<f64>,
    pub estado: String,
    pub observaciones: Option<String>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::pesajes_en_proceso::Entity",
        from = "Column::PesajeId",
        to = "super::pesajes_en_proceso::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Pesaje,
    #[sea_orm(
        belongs_to = "super::bins::Entity",
        from = "Column::BinId",
        to = "super::bins::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Bin,
}

impl Related<super::pesajes_en_proceso::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Pesaje.def()
    }
}

impl Related<super::bins::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bin.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
