use std::sync::Arc;

use uuid::Uuid;

use crate::error::AppResult;
use domain::auth::UserPublic;

#[async_trait::async_trait]
pub trait CredentialUseCase: Send + Sync {
    async fn register_local(
        &self,
        email: String,
        username: String,
        password: String,
    ) -> AppResult<UserPublic>;

    async fn login_local(&self, email: String, password: String) -> AppResult<UserPublic>;

    async fn change_password(
        &self,
        user_id: Uuid,
        current_password: String,
        new_password: String,
    ) -> AppResult<()>;
}

pub type DynCredentialUseCase = Arc<dyn CredentialUseCase>;
