pub mod blocking_hash_tokio;
