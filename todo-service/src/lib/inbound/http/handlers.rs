use ::auth::GuardError;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::identity::errors::IdentityError;
use crate::domain::identity::models::EmailAddress;
use crate::domain::identity::models::Identity;
use crate::domain::identity::models::Password;
use crate::domain::identity::models::PersonName;
use crate::domain::identity::models::RegisterIdentityCommand;
use crate::domain::identity::models::Role;
use crate::domain::identity::models::Username;
use crate::domain::todo::errors::TodoError;
use crate::domain::todo::models::Priority;
use crate::domain::todo::models::Todo;
use crate::domain::todo::models::TodoCommand;
use crate::domain::todo::models::TodoDescription;
use crate::domain::todo::models::TodoTitle;

pub mod admin;
pub mod auth;
pub mod todos;
pub mod users;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Unauthorized(String),
    Forbidden(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => {
                tracing::error!(error = %msg, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
        };

        (status, Json(ApiResponseBody::new_error(status, message))).into_response()
    }
}

impl From<IdentityError> for ApiError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::NotFound(_) | IdentityError::NotFoundByUsername(_) => {
                ApiError::NotFound("User not found".to_string())
            }
            IdentityError::UsernameAlreadyExists(_) | IdentityError::EmailAlreadyExists(_) => {
                ApiError::Conflict(err.to_string())
            }
            IdentityError::InvalidCredentials => ApiError::Unauthorized(err.to_string()),
            IdentityError::InvalidUsername(_)
            | IdentityError::InvalidEmail(_)
            | IdentityError::InvalidName(_)
            | IdentityError::InvalidPassword(_) => ApiError::UnprocessableEntity(err.to_string()),
            IdentityError::Password(_)
            | IdentityError::Token(_)
            | IdentityError::DatabaseError(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<TodoError> for ApiError {
    fn from(err: TodoError) -> Self {
        match err {
            TodoError::NotFound(_) => ApiError::NotFound("Todo not found".to_string()),
            TodoError::OwnerNotFound(_) => ApiError::NotFound("User not found".to_string()),
            TodoError::InvalidTodoId(_)
            | TodoError::InvalidTitle(_)
            | TodoError::InvalidDescription(_)
            | TodoError::InvalidPriority(_) => ApiError::UnprocessableEntity(err.to_string()),
            TodoError::DatabaseError(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<GuardError> for ApiError {
    fn from(err: GuardError) -> Self {
        match err {
            GuardError::Unauthorized { .. } => ApiError::Unauthorized(err.to_string()),
            GuardError::Forbidden { .. } => ApiError::Forbidden(err.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { message },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}

/// HTTP request body carrying every identity field (raw JSON).
///
/// Used for registration and for administrative replacement.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IdentityRequest {
    username: String,
    email: String,
    password: String,
    role: String,
    #[serde(default = "default_is_active")]
    is_active: bool,
    first_name: String,
    last_name: String,
}

fn default_is_active() -> bool {
    true
}

impl IdentityRequest {
    pub fn try_into_command(self) -> Result<RegisterIdentityCommand, IdentityError> {
        Ok(RegisterIdentityCommand {
            username: Username::new(self.username)?,
            email: EmailAddress::new(self.email)?,
            password: Password::new(self.password)?,
            role: Role::new(self.role),
            is_active: self.is_active,
            first_name: PersonName::new(self.first_name)?,
            last_name: PersonName::new(self.last_name)?,
        })
    }
}

/// Identity as shown to clients; the password hash is never included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdentityData {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub role: String,
    pub is_active: bool,
    pub first_name: String,
    pub last_name: String,
}

impl From<&Identity> for IdentityData {
    fn from(identity: &Identity) -> Self {
        Self {
            id: identity.id.0,
            username: identity.username.as_str().to_string(),
            email: identity.email.as_str().to_string(),
            role: identity.role.as_str().to_string(),
            is_active: identity.is_active,
            first_name: identity.first_name.as_str().to_string(),
            last_name: identity.last_name.as_str().to_string(),
        }
    }
}

/// HTTP request body for creating or replacing a todo (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TodoRequest {
    title: String,
    description: String,
    priority: i64,
    completed: bool,
}

impl TodoRequest {
    pub fn try_into_command(self) -> Result<TodoCommand, TodoError> {
        Ok(TodoCommand {
            title: TodoTitle::new(self.title)?,
            description: TodoDescription::new(self.description)?,
            priority: Priority::new(self.priority)?,
            completed: self.completed,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TodoData {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub priority: i16,
    pub completed: bool,
    pub owner_id: i64,
}

impl From<&Todo> for TodoData {
    fn from(todo: &Todo) -> Self {
        Self {
            id: todo.id.value(),
            title: todo.title.as_str().to_string(),
            description: todo.description.as_str().to_string(),
            priority: todo.priority.value(),
            completed: todo.completed,
            owner_id: todo.owner_id.0,
        }
    }
}
