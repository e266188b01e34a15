use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;

use super::errors::IdentityError;
use super::models::AccessToken;
use super::models::ChangePasswordCommand;
use super::models::Identity;
use super::models::IdentityId;
use super::models::NewIdentity;
use super::models::RegisterIdentityCommand;
use super::models::UpdateIdentityCommand;
use super::models::Username;
use super::ports::IdentityRepository;
use super::ports::IdentityServicePort;

/// Domain service implementation for identity operations.
///
/// Concrete implementation of IdentityServicePort with dependency injection.
pub struct IdentityService<IR>
where
    IR: IdentityRepository,
{
    repository: Arc<IR>,
    authenticator: Arc<Authenticator>,
}

impl<IR> IdentityService<IR>
where
    IR: IdentityRepository,
{
    /// Create a new identity service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Identity persistence implementation
    /// * `authenticator` - Password hashing and token issuing
    pub fn new(repository: Arc<IR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

#[async_trait]
impl<IR> IdentityServicePort for IdentityService<IR>
where
    IR: IdentityRepository,
{
    async fn register(&self, command: RegisterIdentityCommand) -> Result<Identity, IdentityError> {
        if self
            .repository
            .find_by_username(&command.username)
            .await?
            .is_some()
        {
            return Err(IdentityError::UsernameAlreadyExists(
                command.username.to_string(),
            ));
        }

        // Role comes straight from the request body; see DESIGN.md.
        if command.role.is_admin() {
            tracing::warn!(
                username = %command.username,
                role = %command.role,
                "Registering identity with caller-supplied admin role"
            );
        }

        let password_hash = self
            .authenticator
            .hash_password(command.password.as_str())?;

        let identity = NewIdentity {
            username: command.username,
            email: command.email,
            password_hash,
            role: command.role,
            is_active: command.is_active,
            first_name: command.first_name,
            last_name: command.last_name,
        };

        // The store can still report a uniqueness violation raced in since the check above.
        let created = self.repository.create(identity).await?;

        tracing::info!(
            user_id = %created.id,
            username = %created.username,
            "Identity registered"
        );

        Ok(created)
    }

    async fn login(&self, username: &str, password: &str) -> Result<AccessToken, IdentityError> {
        let Ok(username) = Username::new(username.to_string()) else {
            tracing::debug!("Login rejected: malformed username");
            return Err(IdentityError::InvalidCredentials);
        };

        let Some(identity) = self.repository.find_by_username(&username).await? else {
            tracing::debug!(username = %username, "Login rejected: unknown username");
            return Err(IdentityError::InvalidCredentials);
        };

        if !identity.is_active {
            tracing::debug!(username = %username, "Login rejected: inactive identity");
            return Err(IdentityError::InvalidCredentials);
        }

        let result = self
            .authenticator
            .authenticate(
                password,
                &identity.password_hash,
                identity.username.as_str(),
                identity.id.0,
                identity.role.as_str(),
            )
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => {
                    tracing::debug!(username = %username, "Login rejected: wrong password");
                    IdentityError::InvalidCredentials
                }
                AuthenticationError::JwtError(err) => IdentityError::Token(err),
            })?;

        tracing::info!(user_id = %identity.id, "Access token issued");

        Ok(AccessToken {
            token: result.access_token,
            expires_at: result.expires_at,
        })
    }

    async fn get_identity(&self, id: &IdentityId) -> Result<Identity, IdentityError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(IdentityError::NotFound(id.to_string()))
    }

    async fn get_identity_by_username(
        &self,
        username: &Username,
    ) -> Result<Identity, IdentityError> {
        self.repository
            .find_by_username(username)
            .await?
            .ok_or(IdentityError::NotFoundByUsername(username.to_string()))
    }

    async fn list_identities(&self) -> Result<Vec<Identity>, IdentityError> {
        self.repository.list_all().await
    }

    async fn update_identity(
        &self,
        username: &Username,
        command: UpdateIdentityCommand,
    ) -> Result<Identity, IdentityError> {
        let existing = self.get_identity_by_username(username).await?;

        let password_hash = self
            .authenticator
            .hash_password(command.password.as_str())?;

        let identity = Identity {
            id: existing.id,
            username: command.username,
            email: command.email,
            password_hash,
            role: command.role,
            is_active: command.is_active,
            first_name: command.first_name,
            last_name: command.last_name,
        };

        let updated = self.repository.update(identity).await?;

        tracing::info!(user_id = %updated.id, previous_username = %username, "Identity updated");

        Ok(updated)
    }

    async fn change_password(
        &self,
        id: &IdentityId,
        command: ChangePasswordCommand,
    ) -> Result<(), IdentityError> {
        let mut identity = self.get_identity(id).await?;

        if !self
            .authenticator
            .verify_password(&command.current_password, &identity.password_hash)
        {
            return Err(IdentityError::InvalidCredentials);
        }

        identity.password_hash = self
            .authenticator
            .hash_password(command.new_password.as_str())?;

        self.repository.update(identity).await?;

        tracing::info!(user_id = %id, "Password changed");

        Ok(())
    }

    async fn delete_identity(&self, username: &Username) -> Result<(), IdentityError> {
        let identity = self.get_identity_by_username(username).await?;

        self.repository.delete(&identity.id).await?;

        tracing::info!(user_id = %identity.id, username = %username, "Identity deleted");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use auth::FixedClock;
    use auth::SigningAlgorithm;
    use chrono::Duration;
    use chrono::TimeZone;
    use chrono::Utc;
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;
    use crate::domain::identity::models::EmailAddress;
    use crate::domain::identity::models::Password;
    use crate::domain::identity::models::PersonName;
    use crate::domain::identity::models::Role;

    mock! {
        pub TestIdentityRepository {}

        #[async_trait]
        impl IdentityRepository for TestIdentityRepository {
            async fn create(&self, identity: NewIdentity) -> Result<Identity, IdentityError>;
            async fn find_by_id(&self, id: &IdentityId) -> Result<Option<Identity>, IdentityError>;
            async fn find_by_username(&self, username: &Username) -> Result<Option<Identity>, IdentityError>;
            async fn list_all(&self) -> Result<Vec<Identity>, IdentityError>;
            async fn update(&self, identity: Identity) -> Result<Identity, IdentityError>;
            async fn delete(&self, id: &IdentityId) -> Result<(), IdentityError>;
        }
    }

    fn authenticator() -> Arc<Authenticator> {
        let clock = Arc::new(FixedClock::new(
            Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap(),
        ));
        Arc::new(
            Authenticator::new(
                b"test_secret_key_at_least_32_bytes!",
                SigningAlgorithm::Hs256,
                Duration::minutes(30),
            )
            .with_clock(clock),
        )
    }

    fn register_command(username: &str, password: &str, role: &str) -> RegisterIdentityCommand {
        RegisterIdentityCommand {
            username: Username::new(username.to_string()).unwrap(),
            email: EmailAddress::new(format!("{}@example.com", username)).unwrap(),
            password: Password::new(password.to_string()).unwrap(),
            role: Role::new(role),
            is_active: true,
            first_name: PersonName::new("Robert".to_string()).unwrap(),
            last_name: PersonName::new("Builder".to_string()).unwrap(),
        }
    }

    fn stored_identity(
        authenticator: &Authenticator,
        username: &str,
        password: &str,
        role: &str,
        is_active: bool,
    ) -> Identity {
        Identity {
            id: IdentityId(7),
            username: Username::new(username.to_string()).unwrap(),
            email: EmailAddress::new(format!("{}@example.com", username)).unwrap(),
            password_hash: authenticator.hash_password(password).unwrap(),
            role: Role::new(role),
            is_active,
            first_name: PersonName::new("Robert".to_string()).unwrap(),
            last_name: PersonName::new("Builder".to_string()).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_register_success() {
        let mut repository = MockTestIdentityRepository::new();

        repository
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(None));
        repository
            .expect_create()
            .withf(|identity| {
                identity.username.as_str() == "bob"
                    && identity.role.as_str() == "user"
                    && identity.password_hash.starts_with("$argon2")
                    && identity.password_hash != "pw12345"
            })
            .times(1)
            .returning(|identity| Ok(identity.with_id(IdentityId(1))));

        let service = IdentityService::new(Arc::new(repository), authenticator());

        let identity = service
            .register(register_command("bob", "pw12345", "user"))
            .await
            .unwrap();

        assert_eq!(identity.id, IdentityId(1));
        assert_eq!(identity.username.as_str(), "bob");
        assert!(identity.is_active);
    }

    #[tokio::test]
    async fn test_register_accepts_caller_supplied_admin_role() {
        let mut repository = MockTestIdentityRepository::new();

        repository
            .expect_find_by_username()
            .returning(|_| Ok(None));
        repository
            .expect_create()
            .returning(|identity| Ok(identity.with_id(IdentityId(2))));

        let service = IdentityService::new(Arc::new(repository), authenticator());

        let identity = service
            .register(register_command("mallory", "pw12345", "admin"))
            .await
            .unwrap();

        assert!(identity.role.is_admin());
    }

    #[tokio::test]
    async fn test_register_duplicate_username() {
        let auth = authenticator();
        let existing = stored_identity(&auth, "bob", "pw12345", "user", true);
        let mut repository = MockTestIdentityRepository::new();

        repository
            .expect_find_by_username()
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));
        repository.expect_create().times(0);

        let service = IdentityService::new(Arc::new(repository), auth);

        let result = service
            .register(register_command("bob", "another-password", "user"))
            .await;

        assert!(matches!(
            result,
            Err(IdentityError::UsernameAlreadyExists(name)) if name == "bob"
        ));
    }

    #[tokio::test]
    async fn test_register_late_uniqueness_violation() {
        let mut repository = MockTestIdentityRepository::new();

        repository
            .expect_find_by_username()
            .returning(|_| Ok(None));
        repository.expect_create().times(1).returning(|identity| {
            Err(IdentityError::EmailAlreadyExists(
                identity.email.as_str().to_string(),
            ))
        });

        let service = IdentityService::new(Arc::new(repository), authenticator());

        let result = service
            .register(register_command("bob", "pw12345", "user"))
            .await;

        assert!(matches!(result, Err(IdentityError::EmailAlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_login_success() {
        let auth = authenticator();
        let existing = stored_identity(&auth, "bob", "pw12345", "user", true);
        let mut repository = MockTestIdentityRepository::new();

        repository
            .expect_find_by_username()
            .withf(|username| username.as_str() == "bob")
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));

        let service = IdentityService::new(Arc::new(repository), Arc::clone(&auth));

        let token = service.login("bob", "pw12345").await.unwrap();

        let claims = auth.validate_token(&token.token).unwrap();
        assert_eq!(claims.username, "bob");
        assert_eq!(claims.user_id, 7);
        assert_eq!(claims.role, "user");
        assert_eq!(
            token.expires_at,
            Utc.with_ymd_and_hms(2024, 6, 1, 8, 30, 0).unwrap()
        );
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let auth = authenticator();
        let existing = stored_identity(&auth, "alice", "correct-password", "user", true);
        let mut repository = MockTestIdentityRepository::new();

        repository
            .expect_find_by_username()
            .returning(move |username| {
                if username.as_str() == "alice" {
                    Ok(Some(existing.clone()))
                } else {
                    Ok(None)
                }
            });

        let service = IdentityService::new(Arc::new(repository), auth);

        let wrong_password = service.login("alice", "wrongpass").await.unwrap_err();
        let unknown_user = service.login("nosuchuser", "anything").await.unwrap_err();
        let malformed = service.login("a b", "anything").await.unwrap_err();

        assert!(matches!(wrong_password, IdentityError::InvalidCredentials));
        assert!(matches!(unknown_user, IdentityError::InvalidCredentials));
        assert!(matches!(malformed, IdentityError::InvalidCredentials));
        assert_eq!(wrong_password.to_string(), unknown_user.to_string());
        assert_eq!(unknown_user.to_string(), "Incorrect username or password");
    }

    #[tokio::test]
    async fn test_login_inactive_identity() {
        let auth = authenticator();
        let existing = stored_identity(&auth, "bob", "pw12345", "user", false);
        let mut repository = MockTestIdentityRepository::new();

        repository
            .expect_find_by_username()
            .returning(move |_| Ok(Some(existing.clone())));

        let service = IdentityService::new(Arc::new(repository), auth);

        let result = service.login("bob", "pw12345").await;
        assert!(matches!(result, Err(IdentityError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_update_identity_rehashes_password() {
        let auth = authenticator();
        let existing = stored_identity(&auth, "bob", "pw12345", "user", true);
        let mut repository = MockTestIdentityRepository::new();

        repository
            .expect_find_by_username()
            .returning(move |_| Ok(Some(existing.clone())));
        repository
            .expect_update()
            .withf(|identity| {
                identity.id == IdentityId(7)
                    && identity.username.as_str() == "robert"
                    && identity.password_hash.starts_with("$argon2")
            })
            .times(1)
            .returning(|identity| Ok(identity));

        let service = IdentityService::new(Arc::new(repository), Arc::clone(&auth));

        let updated = service
            .update_identity(
                &Username::new("bob".to_string()).unwrap(),
                register_command("robert", "new-password", "admin"),
            )
            .await
            .unwrap();

        assert!(auth.verify_password("new-password", &updated.password_hash));
        assert!(updated.role.is_admin());
    }

    #[tokio::test]
    async fn test_update_identity_not_found() {
        let mut repository = MockTestIdentityRepository::new();

        repository
            .expect_find_by_username()
            .returning(|_| Ok(None));
        repository.expect_update().times(0);

        let service = IdentityService::new(Arc::new(repository), authenticator());

        let result = service
            .update_identity(
                &Username::new("ghost".to_string()).unwrap(),
                register_command("ghost", "pw12345", "user"),
            )
            .await;

        assert!(matches!(result, Err(IdentityError::NotFoundByUsername(_))));
    }

    #[tokio::test]
    async fn test_change_password_requires_current_password() {
        let auth = authenticator();
        let existing = stored_identity(&auth, "bob", "pw12345", "user", true);
        let mut repository = MockTestIdentityRepository::new();

        repository
            .expect_find_by_id()
            .with(eq(IdentityId(7)))
            .returning(move |_| Ok(Some(existing.clone())));
        repository.expect_update().times(0);

        let service = IdentityService::new(Arc::new(repository), auth);

        let result = service
            .change_password(
                &IdentityId(7),
                ChangePasswordCommand {
                    current_password: "not-it".to_string(),
                    new_password: Password::new("new-password".to_string()).unwrap(),
                },
            )
            .await;

        assert!(matches!(result, Err(IdentityError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_change_password_success() {
        let auth = authenticator();
        let existing = stored_identity(&auth, "bob", "pw12345", "user", true);
        let verifier = Arc::clone(&auth);
        let mut repository = MockTestIdentityRepository::new();

        repository
            .expect_find_by_id()
            .returning(move |_| Ok(Some(existing.clone())));
        repository
            .expect_update()
            .withf(move |identity| verifier.verify_password("new-password", &identity.password_hash))
            .times(1)
            .returning(|identity| Ok(identity));

        let service = IdentityService::new(Arc::new(repository), auth);

        let result = service
            .change_password(
                &IdentityId(7),
                ChangePasswordCommand {
                    current_password: "pw12345".to_string(),
                    new_password: Password::new("new-password".to_string()).unwrap(),
                },
            )
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_delete_identity() {
        let auth = authenticator();
        let existing = stored_identity(&auth, "bob", "pw12345", "user", true);
        let mut repository = MockTestIdentityRepository::new();

        repository
            .expect_find_by_username()
            .returning(move |_| Ok(Some(existing.clone())));
        repository
            .expect_delete()
            .with(eq(IdentityId(7)))
            .times(1)
            .returning(|_| Ok(()));

        let service = IdentityService::new(Arc::new(repository), auth);

        let result = service
            .delete_identity(&Username::new("bob".to_string()).unwrap())
            .await;

        assert!(result.is_ok());
    }
}
