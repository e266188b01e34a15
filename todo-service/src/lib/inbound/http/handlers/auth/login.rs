use axum::extract::State;
use axum::http::StatusCode;
use axum::Form;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::super::ApiError;
use super::super::ApiSuccess;
use crate::domain::identity::models::AccessToken;
use crate::domain::identity::ports::IdentityServicePort;
use crate::inbound::http::router::AppState;

/// Exchange a username and password (form-encoded) for a bearer token.
pub async fn login(
    State(state): State<AppState>,
    Form(body): Form<LoginForm>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    state
        .identity_service
        .login(&body.username, &body.password)
        .await
        .map_err(ApiError::from)
        .map(|ref token| ApiSuccess::new(StatusCode::OK, token.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginForm {
    username: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub access_token: String,
    pub token_type: String,
    pub expires_at: DateTime<Utc>,
}

impl From<&AccessToken> for LoginResponseData {
    fn from(token: &AccessToken) -> Self {
        Self {
            access_token: token.token.clone(),
            token_type: AccessToken::TOKEN_TYPE.to_string(),
            expires_at: token.expires_at,
        }
    }
}
