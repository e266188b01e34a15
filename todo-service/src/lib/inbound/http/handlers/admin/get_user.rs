use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::super::ApiError;
use super::super::ApiSuccess;
use super::super::IdentityData;
use crate::domain::identity::errors::IdentityError;
use crate::domain::identity::models::Username;
use crate::domain::identity::ports::IdentityServicePort;
use crate::inbound::http::router::AppState;

pub async fn get_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<ApiSuccess<IdentityData>, ApiError> {
    let username = Username::new(username).map_err(IdentityError::from)?;

    state
        .identity_service
        .get_identity_by_username(&username)
        .await
        .map_err(ApiError::from)
        .map(|ref identity| ApiSuccess::new(StatusCode::OK, identity.into()))
}
