use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::password_validator::PasswordValidator;
use crate::error::{AppError, AppResult};
use crate::ports::incoming::credentials::CredentialUseCase;
use crate::ports::incoming::maintenance::MaintenanceUseCase;
use crate::ports::outgoing::blocking_hash::DynBlockingHashPort;
use crate::ports::outgoing::user_store::DynCredentialStorePort;
use domain::auth::UserPublic;
use domain::credential::StoredSecret;

pub struct CredentialService {
    user_store: DynCredentialStorePort,
    hashing: DynBlockingHashPort,
    password_validator: PasswordValidator,
}

impl CredentialService {
    pub fn new(user_store: DynCredentialStorePort, hashing: DynBlockingHashPort) -> Self {
        Self {
            user_store,
            hashing,
            password_validator: PasswordValidator::new(),
        }
    }

    #[must_use]
    pub fn with_password_validator(mut self, password_validator: PasswordValidator) -> Self {
        self.password_validator = password_validator;
        self
    }

    /// One failure for unknown email, missing hash and wrong password, so the
    /// response never reveals which element was wrong.
    fn invalid_credentials() -> AppError {
        AppError::ValidationError {
            message: "Invalid email or password".to_string(),
        }
    }
}

#[async_trait::async_trait]
impl CredentialUseCase for CredentialService {
    async fn register_local(
        &self,
        email: String,
        username: String,
        password: String,
    ) -> AppResult<UserPublic> {
        self.password_validator.validate(&password)?;

        if (self.user_store.find_user_by_email(&email).await?).is_some() {
            return Err(AppError::ValidationError {
                message: "User with this email already exists".to_string(),
            });
        }
        if (self.user_store.find_user_by_username(&username).await?).is_some() {
            return Err(AppError::ValidationError {
                message: "Username already exists".to_string(),
            });
        }

        let password_hash = self.hashing.hash(password).await?;

        let user = self
            .user_store
            .create_user_with_password(&email, &username, &password_hash)
            .await?;

        info!(user_id = %user.id.as_uuid(), "registered local user");
        Ok(user)
    }

    async fn login_local(&self, email: String, password: String) -> AppResult<UserPublic> {
        let (user_id, _email, _username, password_hash) = self
            .user_store
            .find_user_by_email(&email)
            .await?
            .ok_or_else(Self::invalid_credentials)?;

        let stored_secret = password_hash.ok_or_else(Self::invalid_credentials)?;

        let matched = self
            .hashing
            .verify(password.clone(), stored_secret.clone())
            .await?;
        if !matched {
            return Err(Self::invalid_credentials());
        }

        if StoredSecret::parse(&stored_secret).is_legacy() {
            // Telemetry flag for the compatibility path; the record is
            // rewritten in salted form now that the plaintext is known good.
            warn!(user_id = %user_id, "legacy unsalted credential matched; rehashing");
            let upgraded = self.hashing.hash(password).await?;
            self.user_store
                .update_password_hash(user_id, &upgraded)
                .await?;
        }

        self.user_store
            .find_user_by_id(user_id)
            .await?
            .ok_or(AppError::InternalServerError)
    }

    async fn change_password(
        &self,
        user_id: Uuid,
        current_password: String,
        new_password: String,
    ) -> AppResult<()> {
        let stored_secret = self
            .user_store
            .find_password_hash_by_user_id(user_id)
            .await?
            .ok_or(AppError::Unauthorized)?;

        let matched = self.hashing.verify(current_password, stored_secret).await?;
        if !matched {
            return Err(AppError::Unauthorized);
        }

        self.password_validator.validate(&new_password)?;

        let password_hash = self.hashing.hash(new_password).await?;
        self.user_store
            .update_password_hash(user_id, &password_hash)
            .await?;

        info!(user_id = %user_id, "password changed");
        Ok(())
    }
}

#[async_trait::async_trait]
impl MaintenanceUseCase for CredentialService {
    async fn rehash_legacy_credentials(&self) -> AppResult<u64> {
        let legacy = self.user_store.list_legacy_credentials().await?;

        let mut migrated = 0u64;
        for (user_id, plaintext) in legacy {
            let password_hash = self.hashing.hash(plaintext).await?;
            self.user_store
                .update_password_hash(user_id, &password_hash)
                .await?;
            migrated += 1;
        }

        info!(migrated, "rehashed legacy credentials");
        Ok(migrated)
    }
}
