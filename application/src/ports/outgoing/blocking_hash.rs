use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::error::AppResult;

/// Key derivation is deliberately expensive; async call sites consume it
/// through this port so adapters can decide where the blocking work runs.
pub trait BlockingHashPort: Send + Sync {
    fn hash(
        &self,
        password: String,
    ) -> Pin<Box<dyn Future<Output = AppResult<String>> + Send + 'static>>;

    fn verify(
        &self,
        password: String,
        stored_secret: String,
    ) -> Pin<Box<dyn Future<Output = AppResult<bool>> + Send + 'static>>;
}

pub type DynBlockingHashPort = Arc<dyn BlockingHashPort>;
