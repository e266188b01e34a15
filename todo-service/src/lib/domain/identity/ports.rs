use async_trait::async_trait;

use super::errors::IdentityError;
use super::models::AccessToken;
use super::models::ChangePasswordCommand;
use super::models::Identity;
use super::models::IdentityId;
use super::models::NewIdentity;
use super::models::RegisterIdentityCommand;
use super::models::UpdateIdentityCommand;
use super::models::Username;

/// Port for identity domain service operations.
#[async_trait]
pub trait IdentityServicePort: Send + Sync + 'static {
    /// Register a new identity.
    ///
    /// # Arguments
    /// * `command` - Validated registration fields, role included verbatim
    ///
    /// # Returns
    /// Created identity
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, command: RegisterIdentityCommand) -> Result<Identity, IdentityError>;

    /// Exchange username and password for an access token.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown username, inactive identity or wrong password
    /// * `DatabaseError` - Database operation failed
    async fn login(&self, username: &str, password: &str) -> Result<AccessToken, IdentityError>;

    /// Retrieve identity by unique identifier.
    ///
    /// # Errors
    /// * `NotFound` - Identity does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_identity(&self, id: &IdentityId) -> Result<Identity, IdentityError>;

    /// Retrieve identity by unique username.
    ///
    /// # Errors
    /// * `NotFoundByUsername` - No identity with this username
    /// * `DatabaseError` - Database operation failed
    async fn get_identity_by_username(
        &self,
        username: &Username,
    ) -> Result<Identity, IdentityError>;

    /// Retrieve every identity.
    async fn list_identities(&self) -> Result<Vec<Identity>, IdentityError>;

    /// Replace every field of the identity named `username`.
    ///
    /// # Errors
    /// * `NotFoundByUsername` - No identity with this username
    /// * `UsernameAlreadyExists` - New username is already taken
    /// * `EmailAlreadyExists` - New email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn update_identity(
        &self,
        username: &Username,
        command: UpdateIdentityCommand,
    ) -> Result<Identity, IdentityError>;

    /// Change an identity's own password after re-checking the current one.
    ///
    /// # Errors
    /// * `NotFound` - Identity does not exist
    /// * `InvalidCredentials` - Current password does not match
    /// * `DatabaseError` - Database operation failed
    async fn change_password(
        &self,
        id: &IdentityId,
        command: ChangePasswordCommand,
    ) -> Result<(), IdentityError>;

    /// Delete the identity named `username` together with the todos it owns.
    ///
    /// # Errors
    /// * `NotFoundByUsername` - No identity with this username
    /// * `DatabaseError` - Database operation failed
    async fn delete_identity(&self, username: &Username) -> Result<(), IdentityError>;
}

/// Persistence operations for identities.
#[async_trait]
pub trait IdentityRepository: Send + Sync + 'static {
    /// Persist a new identity and assign its id.
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, identity: NewIdentity) -> Result<Identity, IdentityError>;

    /// Retrieve identity by identifier.
    ///
    /// # Returns
    /// Optional identity (None if not found)
    async fn find_by_id(&self, id: &IdentityId) -> Result<Option<Identity>, IdentityError>;

    /// Retrieve identity by exact, case-sensitive username.
    ///
    /// # Returns
    /// Optional identity (None if not found)
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Identity>, IdentityError>;

    /// Retrieve all identities ordered by id.
    async fn list_all(&self) -> Result<Vec<Identity>, IdentityError>;

    /// Update an existing identity in storage.
    ///
    /// # Errors
    /// * `NotFound` - Identity does not exist
    /// * `UsernameAlreadyExists` - New username is already taken
    /// * `EmailAlreadyExists` - New email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, identity: Identity) -> Result<Identity, IdentityError>;

    /// Remove an identity and every todo it owns.
    ///
    /// # Errors
    /// * `NotFound` - Identity does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, id: &IdentityId) -> Result<(), IdentityError>;
}
