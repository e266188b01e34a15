use std::sync::Arc;
use std::time::Duration;

use auth::AccessGuard;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::post;
use axum::routing::put;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::admin::delete_todo::delete_todo as admin_delete_todo;
use super::handlers::admin::delete_user::delete_user;
use super::handlers::admin::get_user::get_user;
use super::handlers::admin::list_todos::list_todos as admin_list_todos;
use super::handlers::admin::list_users::list_users;
use super::handlers::admin::update_user::update_user;
use super::handlers::auth::login::login;
use super::handlers::auth::register::register;
use super::handlers::todos::create_todo::create_todo;
use super::handlers::todos::delete_todo::delete_todo;
use super::handlers::todos::get_todo::get_todo;
use super::handlers::todos::list_todos::list_todos;
use super::handlers::todos::update_todo::update_todo;
use super::handlers::users::change_password::change_password;
use super::handlers::users::get_current_user::get_current_user;
use super::middleware::authenticate as auth_middleware;
use super::middleware::require_admin;
use crate::domain::identity::ports::IdentityServicePort;
use crate::domain::todo::ports::TodoServicePort;

#[derive(Clone)]
pub struct AppState {
    pub identity_service: Arc<dyn IdentityServicePort>,
    pub todo_service: Arc<dyn TodoServicePort>,
    pub access_guard: Arc<AccessGuard>,
}

pub fn create_router(
    identity_service: Arc<dyn IdentityServicePort>,
    todo_service: Arc<dyn TodoServicePort>,
    access_guard: Arc<AccessGuard>,
) -> Router {
    let state = AppState {
        identity_service,
        todo_service,
        access_guard,
    };

    let public_routes = Router::new()
        .route("/auth/token", post(login))
        .route("/auth/create-user", post(register));

    let protected_routes = Router::new()
        .route("/users/me", get(get_current_user))
        .route("/users/me/password", put(change_password))
        .route("/todos", get(list_todos).post(create_todo))
        .route(
            "/todos/:todo_id",
            get(get_todo).put(update_todo).delete(delete_todo),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Layers run outermost-first: authentication, then the role check.
    let admin_routes = Router::new()
        .route("/admin/users", get(list_users))
        .route(
            "/admin/users/:username",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route("/admin/todos", get(admin_list_todos))
        .route("/admin/todos/:todo_id", delete(admin_delete_todo))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .merge(admin_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
