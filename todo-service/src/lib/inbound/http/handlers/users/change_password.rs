use auth::AuthenticatedContext;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::super::ApiError;
use crate::domain::identity::errors::IdentityError;
use crate::domain::identity::models::ChangePasswordCommand;
use crate::domain::identity::models::IdentityId;
use crate::domain::identity::models::Password;
use crate::domain::identity::ports::IdentityServicePort;
use crate::inbound::http::router::AppState;

pub async fn change_password(
    State(state): State<AppState>,
    Extension(context): Extension<AuthenticatedContext>,
    Json(body): Json<ChangePasswordRequest>,
) -> Result<StatusCode, ApiError> {
    let command = body.try_into_command()?;

    state
        .identity_service
        .change_password(&IdentityId(context.user_id), command)
        .await
        .map_err(ApiError::from)
        .map(|_| StatusCode::NO_CONTENT)
}

/// HTTP request body for a password change (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChangePasswordRequest {
    password: String,
    new_password: String,
}

impl ChangePasswordRequest {
    fn try_into_command(self) -> Result<ChangePasswordCommand, IdentityError> {
        Ok(ChangePasswordCommand {
            current_password: self.password,
            new_password: Password::new(self.new_password)?,
        })
    }
}
