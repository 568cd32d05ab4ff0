//! End-to-end flow through the blocking-offload adapter: derivation runs on
//! the blocking pool, concurrent calls stay independent, salts stay unique.

#![allow(clippy::unwrap_used)]

use std::collections::HashSet;
use std::sync::Arc;

use planhive_adapters::outgoing::passwords::argon2::Argon2PasswordHasher;
use planhive_adapters::outgoing::tokio_spawn::blocking_hash_tokio::TokioBlockingHashAdapter;
use planhive_application::infrastructure_config::Argon2Config;
use planhive_application::ports::outgoing::blocking_hash::BlockingHashPort;

fn offload_port() -> TokioBlockingHashAdapter {
    let hasher = Argon2PasswordHasher::from_config(&Argon2Config {
        memory_cost: 16,
        time_cost: 1,
        parallelism: 1,
        output_length: None,
    })
    .unwrap();
    TokioBlockingHashAdapter::new(Arc::new(hasher))
}

#[tokio::test]
async fn offloaded_hash_and_verify_round_trip() {
    let port = offload_port();

    let stored = port.hash("P@ssw0rd!".to_string()).await.unwrap();
    assert!(
        port.verify("P@ssw0rd!".to_string(), stored.clone())
            .await
            .unwrap()
    );
    assert!(!port.verify("P@ssw0rd".to_string(), stored).await.unwrap());
}

#[tokio::test]
async fn offloaded_verify_swallows_garbage() {
    let port = offload_port();
    assert!(
        !port
            .verify("password".to_string(), "not.a.real.record".to_string())
            .await
            .unwrap()
    );
}

#[tokio::test]
async fn concurrent_hashing_yields_distinct_verifiable_secrets() {
    let port = Arc::new(offload_port());

    let mut handles = Vec::new();
    for _ in 0..8 {
        let port = Arc::clone(&port);
        handles.push(tokio::spawn(async move {
            port.hash("correct horse".to_string()).await
        }));
    }

    let mut salts = HashSet::new();
    for handle in handles {
        let stored = handle.await.unwrap().unwrap();
        let (_, salt_hex) = stored.split_once('.').unwrap();
        salts.insert(salt_hex.to_string());
        assert!(
            port.verify("correct horse".to_string(), stored)
                .await
                .unwrap()
        );
    }
    assert_eq!(salts.len(), 8);
}
