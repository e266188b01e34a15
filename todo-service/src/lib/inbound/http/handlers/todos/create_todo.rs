use auth::AuthenticatedContext;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;

use super::super::ApiError;
use super::super::ApiSuccess;
use super::super::TodoData;
use super::super::TodoRequest;
use crate::domain::identity::models::IdentityId;
use crate::domain::todo::ports::TodoServicePort;
use crate::inbound::http::router::AppState;

pub async fn create_todo(
    State(state): State<AppState>,
    Extension(context): Extension<AuthenticatedContext>,
    Json(body): Json<TodoRequest>,
) -> Result<ApiSuccess<TodoData>, ApiError> {
    let command = body.try_into_command()?;

    state
        .todo_service
        .create_todo(&IdentityId(context.user_id), command)
        .await
        .map_err(ApiError::from)
        .map(|ref todo| ApiSuccess::new(StatusCode::CREATED, todo.into()))
}
