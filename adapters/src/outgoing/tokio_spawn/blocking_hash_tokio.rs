use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tokio::task::spawn_blocking;

use planhive_application::error::{AppError, AppResult};
use planhive_application::ports::outgoing::{
    blocking_hash::BlockingHashPort,
    password_hasher::DynPasswordHasherPort,
};

/// Runs key derivation on the blocking thread pool so login and
/// registration never stall the async runtime.
pub struct TokioBlockingHashAdapter {
    hasher: DynPasswordHasherPort,
}

impl TokioBlockingHashAdapter {
    pub fn new(hasher: DynPasswordHasherPort) -> Self {
        Self { hasher }
    }
}

impl BlockingHashPort for TokioBlockingHashAdapter {
    fn hash(
        &self,
        password: String,
    ) -> Pin<Box<dyn Future<Output = AppResult<String>> + Send + 'static>> {
        let hasher = Arc::clone(&self.hasher);

        Box::pin(async move {
            spawn_blocking(move || hasher.hash(&password))
                .await
                .map_err(|e| AppError::TaskError {
                    message: format!("hashing task failed: {e}"),
                })?
        })
    }

    fn verify(
        &self,
        password: String,
        stored_secret: String,
    ) -> Pin<Box<dyn Future<Output = AppResult<bool>> + Send + 'static>> {
        let hasher = Arc::clone(&self.hasher);

        Box::pin(async move {
            spawn_blocking(move || hasher.verify(&password, &stored_secret))
                .await
                .map_err(|e| AppError::TaskError {
                    message: format!("verification task failed: {e}"),
                })?
        })
    }
}
