use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use super::super::ApiError;
use super::super::ApiSuccess;
use super::super::IdentityData;
use super::super::IdentityRequest;
use crate::domain::identity::ports::IdentityServicePort;
use crate::inbound::http::router::AppState;

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<IdentityRequest>,
) -> Result<ApiSuccess<IdentityData>, ApiError> {
    let command = body.try_into_command()?;

    state
        .identity_service
        .register(command)
        .await
        .map_err(ApiError::from)
        .map(|ref identity| ApiSuccess::new(StatusCode::CREATED, identity.into()))
}
