pub mod passwords;
pub mod postgres_sqlx;
pub mod tokio_spawn;
