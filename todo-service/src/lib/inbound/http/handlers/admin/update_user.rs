use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use super::super::ApiError;
use super::super::ApiSuccess;
use super::super::IdentityData;
use super::super::IdentityRequest;
use crate::domain::identity::errors::IdentityError;
use crate::domain::identity::models::Username;
use crate::domain::identity::ports::IdentityServicePort;
use crate::inbound::http::router::AppState;

/// Replace every field of a stored identity. The supplied password is hashed before storage.
pub async fn update_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Json(body): Json<IdentityRequest>,
) -> Result<ApiSuccess<IdentityData>, ApiError> {
    let username = Username::new(username).map_err(IdentityError::from)?;
    let command = body.try_into_command()?;

    state
        .identity_service
        .update_identity(&username, command)
        .await
        .map_err(ApiError::from)
        .map(|ref identity| ApiSuccess::new(StatusCode::OK, identity.into()))
}
