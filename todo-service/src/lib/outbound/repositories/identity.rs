use async_trait::async_trait;
use sqlx::FromRow;
use sqlx::PgPool;

use crate::domain::identity::errors::IdentityError;
use crate::domain::identity::models::EmailAddress;
use crate::domain::identity::models::Identity;
use crate::domain::identity::models::IdentityId;
use crate::domain::identity::models::NewIdentity;
use crate::domain::identity::models::PersonName;
use crate::domain::identity::models::Role;
use crate::domain::identity::models::Username;
use crate::domain::identity::ports::IdentityRepository;

const SELECT_COLUMNS: &str =
    "SELECT id, username, email, password_hash, role, is_active, first_name, last_name FROM users";

pub struct PostgresIdentityRepository {
    pool: PgPool,
}

impl PostgresIdentityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct IdentityRow {
    id: i64,
    username: String,
    email: String,
    password_hash: String,
    role: String,
    is_active: bool,
    first_name: String,
    last_name: String,
}

impl TryFrom<IdentityRow> for Identity {
    type Error = IdentityError;

    fn try_from(r: IdentityRow) -> Result<Self, Self::Error> {
        Ok(Identity {
            id: IdentityId(r.id),
            username: Username::new(r.username)?,
            email: EmailAddress::new(r.email)?,
            password_hash: r.password_hash,
            role: Role::new(r.role),
            is_active: r.is_active,
            first_name: PersonName::new(r.first_name)?,
            last_name: PersonName::new(r.last_name)?,
        })
    }
}

/// Map unique-constraint violations on `users` to domain conflicts.
fn map_write_error(e: sqlx::Error, username: &Username, email: &EmailAddress) -> IdentityError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            if db_err.constraint() == Some("users_username_key") {
                return IdentityError::UsernameAlreadyExists(username.as_str().to_string());
            }
            if db_err.constraint() == Some("users_email_key") {
                return IdentityError::EmailAlreadyExists(email.as_str().to_string());
            }
        }
    }
    IdentityError::DatabaseError(e.to_string())
}

#[async_trait]
impl IdentityRepository for PostgresIdentityRepository {
    async fn create(&self, identity: NewIdentity) -> Result<Identity, IdentityError> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO users (username, email, password_hash, role, is_active, first_name, last_name)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(identity.username.as_str())
        .bind(identity.email.as_str())
        .bind(identity.password_hash.as_str())
        .bind(identity.role.as_str())
        .bind(identity.is_active)
        .bind(identity.first_name.as_str())
        .bind(identity.last_name.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &identity.username, &identity.email))?;

        Ok(identity.with_id(IdentityId(id)))
    }

    async fn find_by_id(&self, id: &IdentityId) -> Result<Option<Identity>, IdentityError> {
        sqlx::query_as::<_, IdentityRow>(&format!("{} WHERE id = $1", SELECT_COLUMNS))
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| IdentityError::DatabaseError(e.to_string()))?
            .map(Identity::try_from)
            .transpose()
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Identity>, IdentityError> {
        sqlx::query_as::<_, IdentityRow>(&format!("{} WHERE username = $1", SELECT_COLUMNS))
            .bind(username.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| IdentityError::DatabaseError(e.to_string()))?
            .map(Identity::try_from)
            .transpose()
    }

    async fn list_all(&self) -> Result<Vec<Identity>, IdentityError> {
        let rows = sqlx::query_as::<_, IdentityRow>(&format!("{} ORDER BY id", SELECT_COLUMNS))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| IdentityError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Identity::try_from).collect()
    }

    async fn update(&self, identity: Identity) -> Result<Identity, IdentityError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET username = $2, email = $3, password_hash = $4, role = $5,
                is_active = $6, first_name = $7, last_name = $8
            WHERE id = $1
            "#,
        )
        .bind(identity.id.0)
        .bind(identity.username.as_str())
        .bind(identity.email.as_str())
        .bind(identity.password_hash.as_str())
        .bind(identity.role.as_str())
        .bind(identity.is_active)
        .bind(identity.first_name.as_str())
        .bind(identity.last_name.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &identity.username, &identity.email))?;

        if result.rows_affected() == 0 {
            return Err(IdentityError::NotFound(identity.id.to_string()));
        }

        Ok(identity)
    }

    async fn delete(&self, id: &IdentityId) -> Result<(), IdentityError> {
        // Owned todos go with the row via ON DELETE CASCADE.
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| IdentityError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(IdentityError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
