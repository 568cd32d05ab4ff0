use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid stored secret: {0}")]
    InvalidSecretFormat(String),
}

pub type DomainResult<T> = Result<T, DomainError>;
