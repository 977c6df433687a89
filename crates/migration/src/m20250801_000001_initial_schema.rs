use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create embarcaciones table
        manager
            .create_table(
                Table::create()
                    .table(Embarcaciones::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Embarcaciones::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Embarcaciones::Nombre).string().not_null())
                    .col(ColumnDef::new(Embarcaciones::Matricula).string().not_null())
                    .col(
                        ColumnDef::new(Embarcaciones::Propietario)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Embarcaciones::Telefono).string())
                    .col(ColumnDef::new(Embarcaciones::Observaciones).string())
                    .col(ColumnDef::new(Embarcaciones::ClienteId).uuid().not_null())
                    .col(
                        ColumnDef::new(Embarcaciones::Activa)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Embarcaciones::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Embarcaciones::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Create bins table
        manager
            .create_table(
                Table::create()
                    .table(Bins::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Bins::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Bins::Codigo).string().not_null())
                    .col(ColumnDef::new(Bins::Tara).double().not_null())
                    .col(ColumnDef::new(Bins::Capacidad).double())
                    .col(ColumnDef::new(Bins::ClienteId).uuid().not_null())
                    .col(
                        ColumnDef::new(Bins::Activo)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Bins::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Bins::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Bin codes are unique per client; reuse resolves to the same row
        manager
            .create_index(
                Index::create()
                    .name("idx_bins_cliente_codigo")
                    .table(Bins::Table)
                    .col(Bins::ClienteId)
                    .col(Bins::Codigo)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Create pesajes_en_proceso table
        manager
            .create_table(
                Table::create()
                    .table(PesajesEnProceso::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PesajesEnProceso::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PesajesEnProceso::EmbarcacionId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PesajesEnProceso::EmbarcacionNombre)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PesajesEnProceso::Estado)
                            .string()
                            .not_null()
                            .default("tara"),
                    )
                    .col(
                        ColumnDef::new(PesajesEnProceso::FechaInicio)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PesajesEnProceso::FechaCierre).timestamp_with_time_zone(),
                    )
                    .col(ColumnDef::new(PesajesEnProceso::UsuarioId).uuid().not_null())
                    .col(ColumnDef::new(PesajesEnProceso::ClienteId).uuid().not_null())
                    .col(ColumnDef::new(PesajesEnProceso::Observaciones).string())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_pesajes_en_proceso_embarcacion")
                            .from(PesajesEnProceso::Table, PesajesEnProceso::EmbarcacionId)
                            .to(Embarcaciones::Table, Embarcaciones::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One open session per vessel. The application checks this too, but
        // a check-then-act in the engine alone races under concurrent starts;
        // the partial index makes the invariant hold at the storage boundary.
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE UNIQUE INDEX IF NOT EXISTS idx_pesajes_en_proceso_abierto \
                 ON pesajes_en_proceso (embarcacion_id) WHERE estado <> 'completado'",
            )
            .await?;

        // Create bins_pesaje table
        manager
            .create_table(
                Table::create()
                    .table(BinsPesaje::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BinsPesaje::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(BinsPesaje::PesajeId).uuid().not_null())
                    .col(ColumnDef::new(BinsPesaje::BinId).uuid().not_null())
                    .col(ColumnDef::new(BinsPesaje::Codigo).string().not_null())
                    .col(ColumnDef::new(BinsPesaje::Tara).double().not_null())
                    .col(ColumnDef::new(BinsPesaje::PesoBruto).double())
                    .col(ColumnDef::new(BinsPesaje::PesoNeto).double())
                    .col(
                        ColumnDef::new(BinsPesaje::Estado)
                            .string()
                            .not_null()
                            .default("pendiente"),
                    )
                    .col(ColumnDef::new(BinsPesaje::Observaciones).string())
                    .col(
                        ColumnDef::new(BinsPesaje::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bins_pesaje_pesaje")
                            .from(BinsPesaje::Table, BinsPesaje::PesajeId)
                            .to(PesajesEnProceso::Table, PesajesEnProceso::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bins_pesaje_bin")
                            .from(BinsPesaje::Table, BinsPesaje::BinId)
                            .to(Bins::Table, Bins::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // A bin participates at most once per session
        manager
            .create_index(
                Index::create()
                    .name("idx_bins_pesaje_pesaje_bin")
                    .table(BinsPesaje::Table)
                    .col(BinsPesaje::PesajeId)
                    .col(BinsPesaje::BinId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Create pesajes table (finalized records)
        manager
            .create_table(
                Table::create()
                    .table(Pesajes::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Pesajes::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Pesajes::EmbarcacionId).uuid().not_null())
                    .col(ColumnDef::new(Pesajes::BinId).uuid().not_null())
                    .col(ColumnDef::new(Pesajes::UsuarioId).uuid().not_null())
                    .col(ColumnDef::new(Pesajes::ClienteId).uuid().not_null())
                    .col(ColumnDef::new(Pesajes::PesoBruto).double().not_null())
                    .col(ColumnDef::new(Pesajes::PesoNeto).double().not_null())
                    .col(
                        ColumnDef::new(Pesajes::Fecha)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Pesajes::Observaciones).string())
                    .col(
                        ColumnDef::new(Pesajes::Estado)
                            .string()
                            .not_null()
                            .default("pendiente"),
                    )
                    .col(
                        ColumnDef::new(Pesajes::Sincronizado)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Pesajes::FechaSinc).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_pesajes_embarcacion")
                            .from(Pesajes::Table, Pesajes::EmbarcacionId)
                            .to(Embarcaciones::Table, Embarcaciones::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_pesajes_bin")
                            .from(Pesajes::Table, Pesajes::BinId)
                            .to(Bins::Table, Bins::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // History and stats read by client and date
        manager
            .create_index(
                Index::create()
                    .name("idx_pesajes_cliente_fecha")
                    .table(Pesajes::Table)
                    .col(Pesajes::ClienteId)
                    .col(Pesajes::Fecha)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Pesajes::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(BinsPesaje::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(PesajesEnProceso::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Bins::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Embarcaciones::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Embarcaciones {
    Table,
    Id,
    Nombre,
    Matricula,
    Propietario,
    Telefono,
    Observaciones,
    ClienteId,
    Activa,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Bins {
    Table,
    Id,
    Codigo,
    Tara,
    Capacidad,
    ClienteId,
    Activo,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum PesajesEnProceso {
    Table,
    Id,
    EmbarcacionId,
    EmbarcacionNombre,
    Estado,
    FechaInicio,
    FechaCierre,
    UsuarioId,
    ClienteId,
    Observaciones,
}

#[derive(DeriveIden)]
enum BinsPesaje {
    Table,
    Id,
    PesajeId,
    BinId,
    Codigo,
    Tara,
    PesoBruto,
    PesoNeto,
    Estado,
    Observaciones,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Pesajes {
    Table,
    Id,
    EmbarcacionId,
    BinId,
    UsuarioId,
    ClienteId,
    PesoBruto,
    PesoNeto,
    Fecha,
    Observaciones,
    Estado,
    Sincronizado,
    FechaSinc,
}
