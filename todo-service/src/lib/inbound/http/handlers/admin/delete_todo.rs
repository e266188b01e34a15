use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::super::ApiError;
use crate::domain::todo::errors::TodoError;
use crate::domain::todo::models::TodoId;
use crate::domain::todo::ports::TodoServicePort;
use crate::inbound::http::router::AppState;

pub async fn delete_todo(
    State(state): State<AppState>,
    Path(todo_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let todo_id = TodoId::new(todo_id).map_err(TodoError::from)?;

    state
        .todo_service
        .delete_any_todo(&todo_id)
        .await
        .map_err(ApiError::from)
        .map(|_| StatusCode::NO_CONTENT)
}
