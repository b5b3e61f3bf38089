use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;

use crate::identity::errors::AuthError;
use crate::identity::models::EmailAddress;
use crate::identity::models::Identity;
use crate::identity::models::IdentityId;
use crate::identity::models::NewIdentity;
use crate::identity::models::SessionSalt;
use crate::identity::ports::IdentityRepository;

const SELECT_IDENTITY: &str = r#"
    SELECT id, email, password_hash, salt, status, active, created_at
    FROM users
"#;

#[derive(FromRow)]
struct IdentityRow {
    id: i64,
    email: String,
    password_hash: String,
    salt: Option<String>,
    status: Option<String>,
    active: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<IdentityRow> for Identity {
    type Error = AuthError;

    fn try_from(row: IdentityRow) -> Result<Self, Self::Error> {
        let email = EmailAddress::new(row.email).map_err(|e| {
            AuthError::DatabaseError(format!("Identity {} has a malformed email: {}", row.id, e))
        })?;

        Ok(Identity {
            id: IdentityId(row.id),
            email,
            password_hash: row.password_hash,
            session_salt: row.salt.map(SessionSalt::new),
            status: row.status,
            active: row.active,
            created_at: row.created_at,
        })
    }
}

fn database_error(e: sqlx::Error) -> AuthError {
    tracing::error!("Identity store failure: {}", e);
    AuthError::DatabaseError(e.to_string())
}

pub struct PostgresIdentityRepository {
    pool: PgPool,
}

impl PostgresIdentityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IdentityRepository for PostgresIdentityRepository {
    async fn create(&self, identity: NewIdentity) -> Result<Identity, AuthError> {
        let row = sqlx::query_as::<_, IdentityRow>(
            r#"
            INSERT INTO users (email, password_hash, status, active)
            VALUES ($1, $2, $3, $4)
            RETURNING id, email, password_hash, salt, status, active, created_at
            "#,
        )
        .bind(identity.email.as_str())
        .bind(&identity.password_hash)
        .bind(identity.status.as_deref())
        .bind(identity.active)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AuthError::EmailAlreadyExists(identity.email.to_string());
                }
            }
            database_error(e)
        })?;

        row.try_into()
    }

    async fn find_by_id(&self, id: IdentityId) -> Result<Option<Identity>, AuthError> {
        let row = sqlx::query_as::<_, IdentityRow>(&format!("{SELECT_IDENTITY} WHERE id = $1"))
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error)?;

        row.map(Identity::try_from).transpose()
    }

    async fn find_by_email_ci(&self, email: &str) -> Result<Option<Identity>, AuthError> {
        let row = sqlx::query_as::<_, IdentityRow>(&format!(
            "{SELECT_IDENTITY} WHERE LOWER(email) = LOWER($1)"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.map(Identity::try_from).transpose()
    }

    async fn rotate_salt(&self, id: IdentityId, salt: &SessionSalt) -> Result<(), AuthError> {
        let result = sqlx::query("UPDATE users SET salt = $2 WHERE id = $1")
            .bind(id.0)
            .bind(salt.as_str())
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(AuthError::UserNotFound);
        }

        Ok(())
    }

    async fn set_active(&self, id: IdentityId, active: bool) -> Result<(), AuthError> {
        let result = sqlx::query("UPDATE users SET active = $2 WHERE id = $1")
            .bind(id.0)
            .bind(active)
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(AuthError::UserNotFound);
        }

        Ok(())
    }
}
