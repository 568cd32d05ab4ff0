use std::{future::Future, time::Duration};
use tokio::time::timeout;

use planhive_application::error::{AppError, AppResult};

pub struct PostgresExecutor {
    timeout_secs: u64,
}

impl PostgresExecutor {
    pub fn new(timeout_secs: u64) -> Self {
        Self { timeout_secs }
    }

    pub async fn execute_with_timeout<T, F, Fut>(
        &self,
        operation: F,
        error_context: &str,
    ) -> AppResult<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, sqlx::Error>>,
    {
        timeout(Duration::from_secs(self.timeout_secs), operation())
            .await
            .map_err(|_| AppError::DatabaseError {
                message: "DB timeout".to_string(),
            })?
            .map_err(|e| AppError::DatabaseError {
                message: format!("{}: {}", error_context, e),
            })
    }
}
