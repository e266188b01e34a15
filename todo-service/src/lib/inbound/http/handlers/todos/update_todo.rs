use auth::AuthenticatedContext;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;

use super::super::ApiError;
use super::super::ApiSuccess;
use super::super::TodoData;
use super::super::TodoRequest;
use crate::domain::identity::models::IdentityId;
use crate::domain::todo::errors::TodoError;
use crate::domain::todo::models::TodoId;
use crate::domain::todo::ports::TodoServicePort;
use crate::inbound::http::router::AppState;

pub async fn update_todo(
    State(state): State<AppState>,
    Extension(context): Extension<AuthenticatedContext>,
    Path(todo_id): Path<i64>,
    Json(body): Json<TodoRequest>,
) -> Result<ApiSuccess<TodoData>, ApiError> {
    let todo_id = TodoId::new(todo_id).map_err(TodoError::from)?;
    let command = body.try_into_command()?;

    state
        .todo_service
        .update_todo(&IdentityId(context.user_id), &todo_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref todo| ApiSuccess::new(StatusCode::OK, todo.into()))
}
