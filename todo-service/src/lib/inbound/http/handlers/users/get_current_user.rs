use auth::AuthenticatedContext;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::super::ApiError;
use super::super::ApiSuccess;
use super::super::IdentityData;
use crate::domain::identity::models::IdentityId;
use crate::domain::identity::ports::IdentityServicePort;
use crate::inbound::http::router::AppState;

pub async fn get_current_user(
    State(state): State<AppState>,
    Extension(context): Extension<AuthenticatedContext>,
) -> Result<ApiSuccess<IdentityData>, ApiError> {
    state
        .identity_service
        .get_identity(&IdentityId(context.user_id))
        .await
        .map_err(ApiError::from)
        .map(|ref identity| ApiSuccess::new(StatusCode::OK, identity.into()))
}
