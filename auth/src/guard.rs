use std::sync::Arc;

use thiserror::Error;

use crate::authenticator::Authenticator;
use crate::jwt::JwtError;
use crate::jwt::TokenClaims;

/// Identity reconstructed from a valid access token.
///
/// Lives for one request only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedContext {
    pub username: String,
    pub user_id: i64,
    pub role: String,
}

impl AuthenticatedContext {
    /// Flat role check: exact string equality, no hierarchy.
    pub fn has_role(&self, role: &str) -> bool {
        self.role == role
    }
}

impl From<TokenClaims> for AuthenticatedContext {
    fn from(claims: TokenClaims) -> Self {
        Self {
            username: claims.username,
            user_id: claims.user_id,
            role: claims.role,
        }
    }
}

/// Access check failures. Display strings are safe to show to clients.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GuardError {
    #[error("Invalid token")]
    Unauthorized {
        #[source]
        cause: JwtError,
    },

    #[error("You do not have permission to access this resource.")]
    Forbidden { required_role: String },
}

/// Turns bearer tokens into authenticated contexts and enforces role requirements.
pub struct AccessGuard {
    authenticator: Arc<Authenticator>,
}

impl AccessGuard {
    pub fn new(authenticator: Arc<Authenticator>) -> Self {
        Self { authenticator }
    }

    /// Decode a bearer token into an authenticated context.
    ///
    /// # Errors
    /// * `Unauthorized` - Token is forged, malformed, incomplete or expired
    pub fn authenticate(&self, token: &str) -> Result<AuthenticatedContext, GuardError> {
        self.authenticator
            .validate_token(token)
            .map(AuthenticatedContext::from)
            .map_err(|cause| GuardError::Unauthorized { cause })
    }

    /// Reject contexts whose role is not exactly `role`.
    ///
    /// # Errors
    /// * `Forbidden` - Context holds a different role
    pub fn require_role(
        &self,
        context: &AuthenticatedContext,
        role: &str,
    ) -> Result<(), GuardError> {
        if context.has_role(role) {
            Ok(())
        } else {
            Err(GuardError::Forbidden {
                required_role: role.to_string(),
            })
        }
    }
}
