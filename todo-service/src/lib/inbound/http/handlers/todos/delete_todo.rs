use auth::AuthenticatedContext;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::super::ApiError;
use crate::domain::identity::models::IdentityId;
use crate::domain::todo::errors::TodoError;
use crate::domain::todo::models::TodoId;
use crate::domain::todo::ports::TodoServicePort;
use crate::inbound::http::router::AppState;

pub async fn delete_todo(
    State(state): State<AppState>,
    Extension(context): Extension<AuthenticatedContext>,
    Path(todo_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    let todo_id = TodoId::new(todo_id).map_err(TodoError::from)?;

    state
        .todo_service
        .delete_todo(&IdentityId(context.user_id), &todo_id)
        .await
        .map_err(ApiError::from)
        .map(|_| StatusCode::NO_CONTENT)
}
