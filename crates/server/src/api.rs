use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use uuid::Uuid;

use application::ExecuteOutcome;
use domain::ActionPayload;

use crate::error::ApiError;
use crate::identity::AuthIdentity;
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/sessions", post(start_session).get(get_open_sessions))
        .route("/api/sessions/{id}", get(get_session))
        .route("/api/sessions/{id}/bins", post(add_bin))
        .route("/api/sessions/{id}/promote", post(promote_session))
        .route(
            "/api/sessions/{id}/bins/{bin_id}/weight",
            post(record_weight),
        )
        .route("/api/sessions/{id}/close", post(close_session))
        .route("/api/history", get(get_history))
        .route("/api/stats", get(get_stats))
        .route("/api/sync/pending", get(get_pending))
        .route("/api/sync/replay", post(replay))
        .layer(cors)
        .with_state(state)
}

#[derive(Deserialize)]
struct StartSessionRequest {
    vessel_id: Uuid,
}

#[derive(Deserialize)]
struct AddBinRequest {
    code: String,
    tare: f64,
    notes: Option<String>,
}

#[derive(Deserialize)]
struct RecordWeightRequest {
    gross: f64,
    notes: Option<String>,
}

/// Runs a mutation through the offline queue. A reachable store answers with
/// the operation result; an unreachable one answers 202 with the queued
/// action so the client can show "pending sync".
async fn dispatch(
    state: &AppState,
    identity: &domain::Identity,
    payload: ActionPayload,
    success: StatusCode,
) -> Result<axum::response::Response, ApiError> {
    match state.queue.execute(identity, payload).await? {
        ExecuteOutcome::Completed(value) => Ok((success, Json(value)).into_response()),
        ExecuteOutcome::AcceptedOffline(action) => Ok((
            StatusCode::ACCEPTED,
            Json(json!({ "queued": true, "action": action })),
        )
            .into_response()),
    }
}

async fn start_session(
    State(state): State<Arc<AppState>>,
    AuthIdentity(identity): AuthIdentity,
    Json(req): Json<StartSessionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    dispatch(
        &state,
        &identity,
        ActionPayload::StartSession {
            vessel_id: req.vessel_id,
        },
        StatusCode::CREATED,
    )
    .await
}

async fn add_bin(
    State(state): State<Arc<AppState>>,
    AuthIdentity(identity): AuthIdentity,
    Path(session_id): Path<Uuid>,
    Json(req): Json<AddBinRequest>,
) -> Result<impl IntoResponse, ApiError> {
    dispatch(
        &state,
        &identity,
        ActionPayload::AddBin {
            session_id,
            code: req.code,
            tare: req.tare,
            notes: req.notes,
        },
        StatusCode::CREATED,
    )
    .await
}

async fn promote_session(
    State(state): State<Arc<AppState>>,
    AuthIdentity(identity): AuthIdentity,
    Path(session_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    dispatch(
        &state,
        &identity,
        ActionPayload::ChangeState { session_id },
        StatusCode::OK,
    )
    .await
}

async fn record_weight(
    State(state): State<Arc<AppState>>,
    AuthIdentity(identity): AuthIdentity,
    Path((session_id, bin_in_session_id)): Path<(Uuid, Uuid)>,
    Json(req): Json<RecordWeightRequest>,
) -> Result<impl IntoResponse, ApiError> {
    dispatch(
        &state,
        &identity,
        ActionPayload::RecordWeight {
            session_id,
            bin_in_session_id,
            gross: req.gross,
            notes: req.notes,
        },
        StatusCode::OK,
    )
    .await
}

async fn close_session(
    State(state): State<Arc<AppState>>,
    AuthIdentity(identity): AuthIdentity,
    Path(session_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    dispatch(
        &state,
        &identity,
        ActionPayload::CloseSession { session_id },
        StatusCode::OK,
    )
    .await
}

async fn get_open_sessions(
    State(state): State<Arc<AppState>>,
    AuthIdentity(identity): AuthIdentity,
) -> Result<impl IntoResponse, ApiError> {
    let sessions = state.engine.open_sessions(&identity).await?;
    Ok(Json(sessions))
}

async fn get_session(
    State(state): State<Arc<AppState>>,
    AuthIdentity(identity): AuthIdentity,
    Path(session_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let session = state.engine.session(&identity, session_id).await?;
    Ok(Json(session))
}

async fn get_history(
    State(state): State<Arc<AppState>>,
    AuthIdentity(identity): AuthIdentity,
) -> Result<impl IntoResponse, ApiError> {
    let history = state.engine.history(&identity).await?;
    Ok(Json(history))
}

async fn get_stats(
    State(state): State<Arc<AppState>>,
    AuthIdentity(identity): AuthIdentity,
) -> Result<impl IntoResponse, ApiError> {
    let stats = state.engine.weigher_stats(&identity).await?;
    Ok(Json(stats))
}

async fn get_pending(
    State(state): State<Arc<AppState>>,
    AuthIdentity(_): AuthIdentity,
) -> Result<impl IntoResponse, ApiError> {
    let pending = state.queue.pending().await?;
    Ok(Json(json!({ "count": pending.len(), "actions": pending })))
}

async fn replay(
    State(state): State<Arc<AppState>>,
    AuthIdentity(_): AuthIdentity,
) -> Result<impl IntoResponse, ApiError> {
    let report = state.queue.replay().await?;
    Ok(Json(json!({
        "synced": report.synced.len(),
        "deferred": report.deferred.len(),
        "failed": report
            .failed
            .iter()
            .map(|(action, error)| json!({
                "id": action.id,
                "type": action.payload.kind(),
                "retries": action.retries,
                "error": error.to_string(),
            }))
            .collect::<Vec<_>>(),
        "exhausted": report.exhausted.len(),
        "remaining": report.remaining,
    })))
}
