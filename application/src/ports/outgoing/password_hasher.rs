use std::sync::Arc;

use crate::error::AppResult;

/// In-process credential hashing contract.
///
/// `hash` fails loudly when the random source or the key derivation is
/// unavailable. `verify` is infallible by contract: a malformed stored
/// secret is a mismatch, never an error, so a corrupt record can never
/// crash a login path or leak detail about itself.
pub trait PasswordHasherPort: Send + Sync {
    fn hash(&self, password: &str) -> AppResult<String>;
    fn verify(&self, password: &str, stored_secret: &str) -> AppResult<bool>;
}

pub type DynPasswordHasherPort = Arc<dyn PasswordHasherPort>;
