use std::sync::Arc;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::clock::Clock;
use crate::clock::SystemClock;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::jwt::SigningAlgorithm;
use crate::jwt::TokenClaims;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Default lifetime of an issued access token.
pub const DEFAULT_TOKEN_LIFETIME_MINUTES: i64 = 30;

/// Authentication coordinator combining password verification and JWT generation.
///
/// Holds no per-user state; it is shared behind an `Arc` across request handlers.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    token_lifetime: Duration,
    clock: Arc<dyn Clock>,
}

/// Result of successful authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationResult {
    /// JWT access token
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator reading time from the system clock.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for JWT signing
    /// * `algorithm` - HMAC algorithm tokens are signed and accepted with
    /// * `token_lifetime` - How long an issued token stays valid
    pub fn new(jwt_secret: &[u8], algorithm: SigningAlgorithm, token_lifetime: Duration) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::new(jwt_secret, algorithm),
            token_lifetime,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the time source used for issuing and validating tokens.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn token_lifetime(&self) -> Duration {
        self.token_lifetime
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a plaintext password against a stored hash.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> bool {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Verify credentials and issue an access token for the subject.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match (or the stored hash is unreadable)
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        username: &str,
        user_id: i64,
        role: &str,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash) {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.issue_token(username, user_id, role)?)
    }

    /// Issue an access token without password verification.
    ///
    /// The token expires `token_lifetime` after the current clock reading.
    pub fn issue_token(
        &self,
        username: &str,
        user_id: i64,
        role: &str,
    ) -> Result<AuthenticationResult, JwtError> {
        let claims = TokenClaims::for_user(
            username,
            user_id,
            role,
            self.clock.now(),
            self.token_lifetime,
        );
        let access_token = self.jwt_handler.encode(&claims)?;
        let expires_at = claims
            .expires_at()
            .ok_or_else(|| JwtError::EncodingFailed("expiry out of range".to_string()))?;

        Ok(AuthenticationResult {
            access_token,
            expires_at,
        })
    }

    /// Validate a token against the current clock reading and return its claims.
    ///
    /// # Errors
    /// * `InvalidToken` - Signature, algorithm or payload is not acceptable
    /// * `TokenExpired` - Token lifetime has elapsed
    pub fn validate_token(&self, token: &str) -> Result<TokenClaims, JwtError> {
        self.jwt_handler.decode(token, self.clock.now())
    }
}
