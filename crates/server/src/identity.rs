use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    response::Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use domain::Identity;

/// Caller identity resolved from the `x-user-id` and `x-client-id` headers
/// the authenticating proxy injects. Every route requires it; data is always
/// scoped to the caller's client.
pub struct AuthIdentity(pub Identity);

impl<S> FromRequestParts<S> for AuthIdentity
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<Value>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let operator_id = header_uuid(parts, "x-user-id")?;
        let client_id = header_uuid(parts, "x-client-id")?;
        Ok(AuthIdentity(Identity::new(operator_id, client_id)))
    }
}

fn header_uuid(parts: &Parts, name: &str) -> Result<Uuid, (StatusCode, Json<Value>)> {
    let raw = parts
        .headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| reject(name))?;
    Uuid::parse_str(raw).map_err(|_| reject(name))
}

fn reject(name: &str) -> (StatusCode, Json<Value>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "error": format!("missing or invalid {name} header") })),
    )
}
