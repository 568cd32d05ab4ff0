use std::io;
use thiserror::Error;

use domain::error::DomainError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Password hashing failed: {message}")]
    HashingError { message: String },

    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Task error: {message}")]
    TaskError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Database error: {message}")]
    DatabaseError { message: String },

    #[error("Internal server error")]
    InternalServerError,

    #[error("Unauthorized")]
    Unauthorized,
}

pub type AppResult<T> = Result<T, AppError>;
