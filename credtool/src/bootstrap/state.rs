use std::sync::Arc;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use planhive_adapters::outgoing::passwords::argon2::Argon2PasswordHasher;
use planhive_adapters::outgoing::postgres_sqlx::credential_store_postgres::PostgresCredentialStoreAdapter;
use planhive_adapters::outgoing::tokio_spawn::blocking_hash_tokio::TokioBlockingHashAdapter;
use planhive_application::auth::password_validator::PasswordValidator;
use planhive_application::auth::service::CredentialService;
use planhive_application::error::{AppError, AppResult};
use planhive_application::infrastructure_config::Config;
use planhive_application::ports::incoming::credentials::DynCredentialUseCase;
use planhive_application::ports::incoming::maintenance::DynMaintenanceUseCase;

pub struct AppState {
    pub pool: PgPool,
    pub credentials: DynCredentialUseCase,
    pub maintenance: DynMaintenanceUseCase,
}

impl AppState {
    /// Wire adapters to use cases. The pool connects lazily, so commands
    /// that never touch the database do not require one.
    pub fn new(config: &Config) -> AppResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.db.pool_size)
            .connect_lazy(config.db.database_url.expose_secret())
            .map_err(|e| AppError::DatabaseError {
                message: format!("Failed to configure database pool: {e}"),
            })?;

        let hasher = Arc::new(Argon2PasswordHasher::from_config(&config.credentials.argon2)?);
        let hashing = Arc::new(TokioBlockingHashAdapter::new(hasher));
        let store = Arc::new(PostgresCredentialStoreAdapter::new(
            pool.clone(),
            config.db.query_timeout_secs,
        ));

        let service = Arc::new(
            CredentialService::new(store, hashing).with_password_validator(
                PasswordValidator::from_min_score(config.credentials.min_password_score),
            ),
        );

        Ok(Self {
            pool,
            credentials: Arc::clone(&service) as DynCredentialUseCase,
            maintenance: service,
        })
    }
}
