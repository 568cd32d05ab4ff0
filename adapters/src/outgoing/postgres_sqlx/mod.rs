pub mod credential_store_postgres;
pub mod utils;
