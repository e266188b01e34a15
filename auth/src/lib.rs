//! Authentication utilities library
//!
//! Provides the credential and token machinery used by the todo service:
//! - Password hashing (Argon2id)
//! - JWT access tokens signed with a declared HMAC algorithm
//! - Authentication coordination with an injectable clock
//! - Access guard for bearer tokens and role checks
//!
//! Persistence stays out of this crate; the service looks identities up and hands
//! the stored hash and subject fields to [`Authenticator::authenticate`].
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("my_password", "not-a-phc-string"));
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use std::sync::Arc;
//!
//! use auth::{AccessGuard, Authenticator, SigningAlgorithm};
//! use chrono::Duration;
//!
//! let auth = Arc::new(Authenticator::new(
//!     b"secret_key_at_least_32_bytes_long!",
//!     SigningAlgorithm::Hs256,
//!     Duration::minutes(30),
//! ));
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and generate token
//! let result = auth
//!     .authenticate("password123", &hash, "alice", 1, "user")
//!     .unwrap();
//!
//! // Later requests: decode the bearer token and check the role
//! let guard = AccessGuard::new(Arc::clone(&auth));
//! let context = guard.authenticate(&result.access_token).unwrap();
//! assert_eq!(context.username, "alice");
//! assert!(guard.require_role(&context, "admin").is_err());
//! ```

pub mod authenticator;
pub mod clock;
pub mod guard;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use authenticator::DEFAULT_TOKEN_LIFETIME_MINUTES;
pub use clock::Clock;
pub use clock::FixedClock;
pub use clock::SystemClock;
pub use guard::AccessGuard;
pub use guard::AuthenticatedContext;
pub use guard::GuardError;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::SigningAlgorithm;
pub use jwt::TokenClaims;
pub use password::PasswordError;
pub use password::PasswordHasher;
