use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use uuid::Uuid;

use domain::error::{DomainError, Result};
use domain::session::{BinInSession, BinState, SessionRepository, SessionState, WeighingSession};
use domain::WeighingRecord;

use super::entities::{bins_pesaje, pesajes, pesajes_en_proceso};
use super::{map_db_err, to_offset};

pub struct SeaOrmSessionRepository {
    db: DatabaseConnection,
}

impl SeaOrmSessionRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn state_from_model(model: &pesajes_en_proceso::Model) -> Result<SessionState> {
        match model.estado.as_str() {
            "tara" => Ok(SessionState::Tara),
            "pesaje" => Ok(SessionState::Pesaje),
            "completado" => {
                let closed_at = model.fecha_cierre.ok_or_else(|| {
                    DomainError::Storage(format!(
                        "session {} is completado but has no close timestamp",
                        model.id
                    ))
                })?;
                Ok(SessionState::Completado {
                    closed_at: closed_at.to_utc(),
                })
            }
            other => Err(DomainError::Storage(format!(
                "unknown session state: {other}"
            ))),
        }
    }

    fn bin_to_domain(model: bins_pesaje::Model) -> Result<BinInSession> {
        Ok(BinInSession {
            id: model.id,
            session_id: model.pesaje_id,
            bin_id: model.bin_id,
            code: model.codigo,
            tare: model.tara,
            gross: model.peso_bruto,
            net: model.peso_neto,
            state: BinState::parse(&model.estado)?,
            notes: model.observaciones,
        })
    }

    fn to_domain(
        model: pesajes_en_proceso::Model,
        bin_models: Vec<bins_pesaje::Model>,
    ) -> Result<WeighingSession> {
        let state = Self::state_from_model(&model)?;
        let bins = bin_models
            .into_iter()
            .map(Self::bin_to_domain)
            .collect::<Result<Vec<_>>>()?;
        Ok(WeighingSession {
            id: model.id,
            vessel_id: model.embarcacion_id,
            vessel_name: model.embarcacion_nombre,
            state,
            started_at: model.fecha_inicio.to_utc(),
            operator_id: model.usuario_id,
            client_id: model.cliente_id,
            notes: model.observaciones,
            bins,
        })
    }

    async fn load_bins(&self, session_id: Uuid) -> Result<Vec<bins_pesaje::Model>> {
        bins_pesaje::Entity::find()
            .filter(bins_pesaje::Column::PesajeId.eq(session_id))
            .order_by_asc(bins_pesaje::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(map_db_err)
    }

    async fn with_bins(&self, model: pesajes_en_proceso::Model) -> Result<WeighingSession> {
        let bins = self.load_bins(model.id).await?;
        Self::to_domain(model, bins)
    }

    fn bin_active_model(bin: &BinInSession) -> bins_pesaje::ActiveModel {
        bins_pesaje::ActiveModel {
            id: Set(bin.id),
            pesaje_id: Set(bin.session_id),
            bin_id: Set(bin.bin_id),
            codigo: Set(bin.code.clone()),
            tara: Set(bin.tare),
            peso_bruto: Set(bin.gross),
            peso_neto: Set(bin.net),
            estado: Set(bin.state.as_str().to_string()),
            observaciones: Set(bin.notes.clone()),
            created_at: Set(to_offset(chrono::Utc::now())),
        }
    }
}

#[async_trait]
impl SessionRepository for SeaOrmSessionRepository {
    async fn insert(&self, session: &WeighingSession) -> Result<()> {
        let active_model = pesajes_en_proceso::ActiveModel {
            id: Set(session.id),
            embarcacion_id: Set(session.vessel_id),
            embarcacion_nombre: Set(session.vessel_name.clone()),
            estado: Set(session.state.as_str().to_string()),
            fecha_inicio: Set(to_offset(session.started_at)),
            fecha_cierre: Set(None),
            usuario_id: Set(session.operator_id),
            cliente_id: Set(session.client_id),
            observaciones: Set(session.notes.clone()),
        };
        active_model.insert(&self.db).await.map_err(map_db_err)?;
        Ok(())
    }

    async fn find_by_id(&self, client_id: Uuid, id: Uuid) -> Result<Option<WeighingSession>> {
        let model = pesajes_en_proceso::Entity::find_by_id(id)
            .filter(pesajes_en_proceso::Column::ClienteId.eq(client_id))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        match model {
            Some(m) => Ok(Some(self.with_bins(m).await?)),
            None => Ok(None),
        }
    }

    async fn find_open_by_vessel(
        &self,
        client_id: Uuid,
        vessel_id: Uuid,
    ) -> Result<Option<WeighingSession>> {
        let model = pesajes_en_proceso::Entity::find()
            .filter(pesajes_en_proceso::Column::ClienteId.eq(client_id))
            .filter(pesajes_en_proceso::Column::EmbarcacionId.eq(vessel_id))
            .filter(pesajes_en_proceso::Column::Estado.ne("completado"))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        match model {
            Some(m) => Ok(Some(self.with_bins(m).await?)),
            None => Ok(None),
        }
    }

    async fn list_open(&self, client_id: Uuid) -> Result<Vec<WeighingSession>> {
        let models = pesajes_en_proceso::Entity::find()
            .filter(pesajes_en_proceso::Column::ClienteId.eq(client_id))
            .filter(pesajes_en_proceso::Column::Estado.ne("completado"))
            .order_by_desc(pesajes_en_proceso::Column::FechaInicio)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        let mut sessions = Vec::with_capacity(models.len());
        for model in models {
            sessions.push(self.with_bins(model).await?);
        }
        Ok(sessions)
    }

    async fn list_completed(&self, client_id: Uuid) -> Result<Vec<WeighingSession>> {
        let models = pesajes_en_proceso::Entity::find()
            .filter(pesajes_en_proceso::Column::ClienteId.eq(client_id))
            .filter(pesajes_en_proceso::Column::Estado.eq("completado"))
            .order_by_desc(pesajes_en_proceso::Column::FechaCierre)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        let mut sessions = Vec::with_capacity(models.len());
        for model in models {
            sessions.push(self.with_bins(model).await?);
        }
        Ok(sessions)
    }

    async fn add_bin(&self, bin: &BinInSession) -> Result<()> {
        Self::bin_active_model(bin)
            .insert(&self.db)
            .await
            .map_err(map_db_err)?;
        Ok(())
    }

    async fn update_bin(&self, bin: &BinInSession) -> Result<()> {
        let model = bins_pesaje::Entity::find_by_id(bin.id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?
            .ok_or_else(|| DomainError::NotFound(format!("session bin {} not found", bin.id)))?;

        let mut active_model: bins_pesaje::ActiveModel = model.into();
        active_model.peso_bruto = Set(bin.gross);
        active_model.peso_neto = Set(bin.net);
        active_model.estado = Set(bin.state.as_str().to_string());
        active_model.observaciones = Set(bin.notes.clone());
        active_model.update(&self.db).await.map_err(map_db_err)?;
        Ok(())
    }

    async fn set_state(&self, session_id: Uuid, state: &SessionState) -> Result<()> {
        let model = pesajes_en_proceso::Entity::find_by_id(session_id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?
            .ok_or_else(|| DomainError::NotFound(format!("session {session_id} not found")))?;

        let mut active_model: pesajes_en_proceso::ActiveModel = model.into();
        active_model.estado = Set(state.as_str().to_string());
        if let SessionState::Completado { closed_at } = state {
            active_model.fecha_cierre = Set(Some(to_offset(*closed_at)));
        }
        active_model.update(&self.db).await.map_err(map_db_err)?;
        Ok(())
    }

    /// Closure is all-or-nothing: the finalized records and the terminal
    /// session state land in one transaction.
    async fn finalize(&self, session: &WeighingSession, records: &[WeighingRecord]) -> Result<()> {
        let closed_at = match &session.state {
            SessionState::Completado { closed_at } => *closed_at,
            other => {
                return Err(DomainError::InvalidState(format!(
                    "finalize called on a {other} session"
                )));
            }
        };

        let txn = self.db.begin().await.map_err(map_db_err)?;

        let record_models: Vec<pesajes::ActiveModel> = records
            .iter()
            .map(|r| pesajes::ActiveModel {
                id: Set(r.id),
                embarcacion_id: Set(r.vessel_id),
                bin_id: Set(r.bin_id),
                usuario_id: Set(r.operator_id),
                cliente_id: Set(r.client_id),
                peso_bruto: Set(r.gross),
                peso_neto: Set(r.net),
                fecha: Set(to_offset(r.recorded_at)),
                observaciones: Set(r.notes.clone()),
                estado: Set(r.state.as_str().to_string()),
                sincronizado: Set(r.synced),
                fecha_sinc: Set(r.synced_at.map(to_offset)),
            })
            .collect();
        if !record_models.is_empty() {
            pesajes::Entity::insert_many(record_models)
                .exec(&txn)
                .await
                .map_err(map_db_err)?;
        }

        let model = pesajes_en_proceso::Entity::find_by_id(session.id)
            .one(&txn)
            .await
            .map_err(map_db_err)?
            .ok_or_else(|| DomainError::NotFound(format!("session {} not found", session.id)))?;
        let mut active_model: pesajes_en_proceso::ActiveModel = model.into();
        active_model.estado = Set("completado".to_string());
        active_model.fecha_cierre = Set(Some(to_offset(closed_at)));
        active_model.update(&txn).await.map_err(map_db_err)?;

        txn.commit().await.map_err(map_db_err)?;
        Ok(())
    }
}
