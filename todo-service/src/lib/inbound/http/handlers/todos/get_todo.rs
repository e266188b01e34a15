use auth::AuthenticatedContext;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::super::ApiError;
use super::super::ApiSuccess;
use super::super::TodoData;
use crate::domain::identity::models::IdentityId;
use crate::domain::todo::errors::TodoError;
use crate::domain::todo::models::TodoId;
use crate::domain::todo::ports::TodoServicePort;
use crate::inbound::http::router::AppState;

pub async fn get_todo(
    State(state): State<AppState>,
    Extension(context): Extension<AuthenticatedContext>,
    Path(todo_id): Path<i64>,
) -> Result<ApiSuccess<TodoData>, ApiError> {
    let todo_id = TodoId::new(todo_id).map_err(TodoError::from)?;

    state
        .todo_service
        .get_todo(&IdentityId(context.user_id), &todo_id)
        .await
        .map_err(ApiError::from)
        .map(|ref todo| ApiSuccess::new(StatusCode::OK, todo.into()))
}
