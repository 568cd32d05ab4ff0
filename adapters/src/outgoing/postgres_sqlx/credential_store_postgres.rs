use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::{debug, instrument};
use uuid::Uuid;

use domain::auth::{UserId, UserPublic};
use planhive_application::{
    error::{AppError, AppResult},
    ports::outgoing::user_store::CredentialStorePort,
};

use super::utils::PostgresExecutor;

/// Credential persistence per the storage contract: one nullable
/// `password_hash` text column on `users`, salt embedded in the value.
/// Queries are runtime-checked, so builds need no live database.
pub struct PostgresCredentialStoreAdapter {
    pool: PgPool,
    executor: PostgresExecutor,
}

impl PostgresCredentialStoreAdapter {
    pub fn new(pool: PgPool, query_timeout_secs: u64) -> Self {
        Self {
            pool,
            executor: PostgresExecutor::new(query_timeout_secs),
        }
    }

    fn row_to_user(row: &PgRow) -> Result<UserPublic, sqlx::Error> {
        Ok(UserPublic {
            id: UserId::from_uuid(row.try_get("id")?),
            email: row.try_get("email")?,
            username: row.try_get("username")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

#[async_trait::async_trait]
impl CredentialStorePort for PostgresCredentialStoreAdapter {
    #[instrument(skip(self, password_hash))]
    async fn create_user_with_password(
        &self,
        email: &str,
        username: &str,
        password_hash: &str,
    ) -> AppResult<UserPublic> {
        let user_id = Uuid::new_v4();

        let row = self
            .executor
            .execute_with_timeout(
                || {
                    sqlx::query(
                        "INSERT INTO users (id, email, username, password_hash) \
                         VALUES ($1, $2, $3, $4) \
                         RETURNING id, email, username, created_at",
                    )
                    .bind(user_id)
                    .bind(email)
                    .bind(username)
                    .bind(password_hash)
                    .fetch_one(&self.pool)
                },
                &format!("Failed to create user with email {}", email),
            )
            .await?;

        debug!(user_id = %user_id, "created user");
        Self::row_to_user(&row).map_err(sqlx_to_app)
    }

    #[instrument(skip(self))]
    async fn find_user_by_email(
        &self,
        email: &str,
    ) -> AppResult<Option<(Uuid, String, String, Option<String>)>> {
        let row = self
            .executor
            .execute_with_timeout(
                || {
                    sqlx::query(
                        "SELECT id, email, username, password_hash FROM users WHERE email = $1",
                    )
                    .bind(email)
                    .fetch_optional(&self.pool)
                },
                &format!("Failed to find user by email {}", email),
            )
            .await?;

        row.map(|row| {
            Ok((
                row.try_get("id").map_err(sqlx_to_app)?,
                row.try_get("email").map_err(sqlx_to_app)?,
                row.try_get("username").map_err(sqlx_to_app)?,
                row.try_get("password_hash").map_err(sqlx_to_app)?,
            ))
        })
        .transpose()
    }

    #[instrument(skip(self))]
    async fn find_user_by_username(&self, username: &str) -> AppResult<Option<UserPublic>> {
        let row = self
            .executor
            .execute_with_timeout(
                || {
                    sqlx::query(
                        "SELECT id, email, username, created_at FROM users WHERE username = $1",
                    )
                    .bind(username)
                    .fetch_optional(&self.pool)
                },
                &format!("Failed to find user by username {}", username),
            )
            .await?;

        row.map(|row| Self::row_to_user(&row).map_err(sqlx_to_app))
            .transpose()
    }

    #[instrument(skip(self))]
    async fn find_user_by_id(&self, id: Uuid) -> AppResult<Option<UserPublic>> {
        let row = self
            .executor
            .execute_with_timeout(
                || {
                    sqlx::query(
                        "SELECT id, email, username, created_at FROM users WHERE id = $1",
                    )
                    .bind(id)
                    .fetch_optional(&self.pool)
                },
                &format!("Failed to find user by id {}", id),
            )
            .await?;

        row.map(|row| Self::row_to_user(&row).map_err(sqlx_to_app))
            .transpose()
    }

    #[instrument(skip(self))]
    async fn find_password_hash_by_user_id(&self, id: Uuid) -> AppResult<Option<String>> {
        let row = self
            .executor
            .execute_with_timeout(
                || {
                    sqlx::query("SELECT password_hash FROM users WHERE id = $1")
                        .bind(id)
                        .fetch_optional(&self.pool)
                },
                &format!("Failed to load credential for user {}", id),
            )
            .await?;

        match row {
            Some(row) => row.try_get("password_hash").map_err(sqlx_to_app),
            None => Ok(None),
        }
    }

    #[instrument(skip(self, password_hash))]
    async fn update_password_hash(&self, id: Uuid, password_hash: &str) -> AppResult<()> {
        self.executor
            .execute_with_timeout(
                || {
                    sqlx::query("UPDATE users SET password_hash = $2 WHERE id = $1")
                        .bind(id)
                        .bind(password_hash)
                        .execute(&self.pool)
                },
                &format!("Failed to update credential for user {}", id),
            )
            .await?;

        debug!(user_id = %id, "updated stored credential");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_legacy_credentials(&self) -> AppResult<Vec<(Uuid, String)>> {
        let rows = self
            .executor
            .execute_with_timeout(
                || {
                    sqlx::query(
                        "SELECT id, password_hash FROM users \
                         WHERE password_hash IS NOT NULL \
                         AND strpos(password_hash, '.') = 0",
                    )
                    .fetch_all(&self.pool)
                },
                "Failed to list legacy credentials",
            )
            .await?;

        rows.into_iter()
            .map(|row| {
                Ok((
                    row.try_get("id").map_err(sqlx_to_app)?,
                    row.try_get("password_hash").map_err(sqlx_to_app)?,
                ))
            })
            .collect()
    }
}

fn sqlx_to_app(e: sqlx::Error) -> AppError {
    AppError::DatabaseError {
        message: format!("row decode failed: {e}"),
    }
}
