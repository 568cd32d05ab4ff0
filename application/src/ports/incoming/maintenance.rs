use std::sync::Arc;

use crate::error::AppResult;

#[async_trait::async_trait]
pub trait MaintenanceUseCase: Send + Sync {
    /// Rewrite every legacy plaintext credential in salted form.
    /// Returns the number of records migrated.
    async fn rehash_legacy_credentials(&self) -> AppResult<u64>;
}

pub type DynMaintenanceUseCase = Arc<dyn MaintenanceUseCase>;
