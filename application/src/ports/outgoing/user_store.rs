use std::sync::Arc;

use uuid::Uuid;

use crate::error::AppResult;
use domain::auth::UserPublic;

#[async_trait::async_trait]
pub trait CredentialStorePort: Send + Sync {
    async fn create_user_with_password(
        &self,
        email: &str,
        username: &str,
        password_hash: &str,
    ) -> AppResult<UserPublic>;

    /// Returns `(id, email, username, password_hash)` for a user, if any.
    async fn find_user_by_email(
        &self,
        email: &str,
    ) -> AppResult<Option<(Uuid, String, String, Option<String>)>>;

    async fn find_user_by_username(&self, username: &str) -> AppResult<Option<UserPublic>>;

    async fn find_user_by_id(&self, id: Uuid) -> AppResult<Option<UserPublic>>;

    async fn find_password_hash_by_user_id(&self, id: Uuid) -> AppResult<Option<String>>;

    async fn update_password_hash(&self, id: Uuid, password_hash: &str) -> AppResult<()>;

    /// Returns `(id, stored_value)` for every credential with no embedded salt.
    async fn list_legacy_credentials(&self) -> AppResult<Vec<(Uuid, String)>>;
}

pub type DynCredentialStorePort = Arc<dyn CredentialStorePort>;
