#![allow(dead_code)]

use std::sync::Arc;

use auth::AccessGuard;
use auth::Authenticator;
use auth::Clock;
use auth::FixedClock;
use auth::JwtHandler;
use auth::SigningAlgorithm;
use auth::TokenClaims;
use chrono::Duration;
use chrono::Utc;
use serde_json::json;
use todo_service::domain::identity::service::IdentityService;
use todo_service::domain::todo::service::TodoService;
use todo_service::inbound::http::router::create_router;
use todo_service::outbound::repositories::InMemoryStore;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const TOKEN_LIFETIME_MINUTES: i64 = 30;

/// Test application that spawns a real server over in-memory storage
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub clock: Arc<FixedClock>,
    pub api_client: reqwest::Client,
    pub jwt_handler: JwtHandler,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let clock = Arc::new(FixedClock::new(Utc::now()));
        let authenticator = Arc::new(
            Authenticator::new(
                JWT_SECRET,
                SigningAlgorithm::Hs256,
                Duration::minutes(TOKEN_LIFETIME_MINUTES),
            )
            .with_clock(clock.clone()),
        );
        let access_guard = Arc::new(AccessGuard::new(Arc::clone(&authenticator)));

        let store = Arc::new(InMemoryStore::new());
        let identity_service = Arc::new(IdentityService::new(
            Arc::clone(&store),
            Arc::clone(&authenticator),
        ));
        let todo_service = Arc::new(TodoService::new(store));

        let router = create_router(identity_service, todo_service, access_guard);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            clock,
            api_client: reqwest::Client::builder()
                .cookie_store(true)
                .build()
                .expect("Failed to create reqwest client"),
            jwt_handler: JwtHandler::new(JWT_SECRET, SigningAlgorithm::Hs256),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(&format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(&format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Helper to make PUT request with Bearer token
    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .put(&format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .delete(&format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Register an identity with valid defaults and the given role
    pub async fn register(&self, username: &str, password: &str, role: &str) -> reqwest::Response {
        self.post("/auth/create-user")
            .json(&json!({
                "username": username,
                "email": format!("{}@example.com", username),
                "password": password,
                "role": role,
                "first_name": "Test",
                "last_name": "User"
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Submit the login form
    pub async fn login(&self, username: &str, password: &str) -> reqwest::Response {
        self.post("/auth/token")
            .form(&[("username", username), ("password", password)])
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Register then log in, returning the bearer token
    pub async fn register_and_login(&self, username: &str, password: &str, role: &str) -> String {
        let response = self.register(username, password, role).await;
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let response = self.login(username, password).await;
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["data"]["access_token"]
            .as_str()
            .expect("Missing access token")
            .to_string()
    }

    /// Decode a token issued by this app at the app's current time
    pub fn decode_token(&self, token: &str) -> TokenClaims {
        let now = self.clock.now();
        self.jwt_handler
            .decode(token, now)
            .expect("Failed to decode token")
    }
}
