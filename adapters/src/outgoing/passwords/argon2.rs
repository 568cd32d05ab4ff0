//! Salted credential hashing over Argon2id.
//!
//! Stored form is `"<hex derived-key>.<hex salt>"`; the salt travels inside
//! the credential column, there is no separate salt field. All primitives
//! come from audited RustCrypto crates; nothing here rolls its own crypto.

use argon2::{Algorithm, Argon2, Params, Version};
use password_hash::Output;
use password_hash::rand_core::{OsRng, RngCore};

use domain::credential::{DERIVED_KEY_LEN, SALT_LEN, StoredSecret, encode_secret};
use planhive_application::error::{AppError, AppResult};
use planhive_application::infrastructure_config::Argon2Config;
use planhive_application::ports::outgoing::password_hasher::PasswordHasherPort;

pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
    output_length: usize,
}

impl Argon2PasswordHasher {
    pub fn from_config(config: &Argon2Config) -> AppResult<Self> {
        let output_length = config.output_length.unwrap_or(DERIVED_KEY_LEN);

        let params = Params::new(
            config.memory_cost,
            config.time_cost,
            config.parallelism,
            Some(output_length),
        )
        .map_err(|e| AppError::ConfigError {
            message: format!("Invalid Argon2 parameters: {e}"),
        })?;

        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

        Ok(Self {
            argon2,
            output_length,
        })
    }

    fn derive(&self, password: &str, salt_hex: &str) -> Result<Vec<u8>, argon2::Error> {
        let mut derived = vec![0u8; self.output_length];
        self.argon2
            .hash_password_into(password.as_bytes(), salt_hex.as_bytes(), &mut derived)?;
        Ok(derived)
    }
}

impl PasswordHasherPort for Argon2PasswordHasher {
    /// Fresh 16-byte salt per call, so hashing the same plaintext twice
    /// yields two different stored secrets. An unavailable random source or
    /// a failed derivation is an error; there is no weaker fallback.
    fn hash(&self, password: &str) -> AppResult<String> {
        let mut salt = [0u8; SALT_LEN];
        OsRng
            .try_fill_bytes(&mut salt)
            .map_err(|e| AppError::HashingError {
                message: format!("system random source unavailable: {e}"),
            })?;
        let salt_hex = hex::encode(salt);

        let derived = self
            .derive(password, &salt_hex)
            .map_err(|e| AppError::HashingError {
                message: format!("key derivation failed: {e}"),
            })?;

        Ok(encode_secret(&derived, &salt))
    }

    /// Pure predicate; never errors. Wrong password and corrupt record are
    /// indistinguishable in the result, and the salted comparison runs in
    /// constant time (`password_hash::Output` equality).
    fn verify(&self, password: &str, stored_secret: &str) -> AppResult<bool> {
        match StoredSecret::parse(stored_secret) {
            StoredSecret::Legacy(value) => Ok(value == password),
            StoredSecret::Salted(parts) => {
                let Ok(stored_key) = parts.key_bytes() else {
                    return Ok(false);
                };
                // Re-derivation uses the same parameters as `hash`; a stored
                // key of any other width can never compare equal.
                if stored_key.len() != self.output_length {
                    return Ok(false);
                }
                let Ok(derived) = self.derive(password, parts.salt_hex()) else {
                    return Ok(false);
                };

                let Ok(stored_output) = Output::new(&stored_key) else {
                    return Ok(false);
                };
                let Ok(derived_output) = Output::new(&derived) else {
                    return Ok(false);
                };
                Ok(stored_output == derived_output)
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::{Argon2Config, Argon2PasswordHasher, PasswordHasherPort};
    use domain::credential::SEPARATOR;

    // Cheap cost profile; the format and the contract do not depend on it.
    fn test_hasher() -> Argon2PasswordHasher {
        Argon2PasswordHasher::from_config(&Argon2Config {
            memory_cost: 16,
            time_cost: 1,
            parallelism: 1,
            output_length: None,
        })
        .unwrap()
    }

    #[test]
    fn hash_then_verify_round_trip() {
        let hasher = test_hasher();
        let stored = hasher.hash("P@ssw0rd!").unwrap();
        assert!(hasher.verify("P@ssw0rd!", &stored).unwrap());
    }

    #[test]
    fn near_miss_candidate_is_rejected() {
        let hasher = test_hasher();
        let stored = hasher.hash("P@ssw0rd!").unwrap();
        assert!(!hasher.verify("P@ssw0rd", &stored).unwrap());
        assert!(!hasher.verify("", &stored).unwrap());
    }

    #[test]
    fn repeated_hashing_salts_differently() {
        let hasher = test_hasher();
        let first = hasher.hash("correct horse").unwrap();
        let second = hasher.hash("correct horse").unwrap();

        assert_ne!(first, second);
        assert!(hasher.verify("correct horse", &first).unwrap());
        assert!(hasher.verify("correct horse", &second).unwrap());
    }

    #[test]
    fn stored_secret_has_expected_shape() {
        let hasher = test_hasher();
        let stored = hasher.hash("P@ssw0rd!").unwrap();

        assert_eq!(stored.chars().filter(|c| *c == SEPARATOR).count(), 1);
        let (key_hex, salt_hex) = stored.split_once(SEPARATOR).unwrap();
        assert_eq!(key_hex.len(), 128);
        assert_eq!(salt_hex.len(), 32);
        assert!(key_hex.chars().all(|c| c.is_ascii_hexdigit()));
        assert!(salt_hex.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn verify_swallows_garbage_stored_values() {
        let hasher = test_hasher();
        for stored in [
            "",
            "garbage",
            "a.b.c",
            "..",
            "deadbeef.",
            ".deadbeef",
            "zz!!.c0ffee",
            "abc.c0ffee",
            "deadbeef.c0ffee",
        ] {
            assert!(
                !hasher.verify("password", stored).unwrap(),
                "stored = {stored:?}"
            );
        }
    }

    #[test]
    fn legacy_plaintext_record_compares_directly() {
        let hasher = test_hasher();
        assert!(hasher.verify("secret123", "secret123").unwrap());
        assert!(!hasher.verify("wrong", "secret123").unwrap());
    }

    #[test]
    fn corrupted_key_hex_is_a_mismatch() {
        let hasher = test_hasher();
        let stored = hasher.hash("P@ssw0rd!").unwrap();
        let corrupted = format!("zz{}", stored.get(2..).unwrap());
        assert!(!hasher.verify("P@ssw0rd!", &corrupted).unwrap());
    }

    #[test]
    fn custom_output_length_changes_key_width() {
        let hasher = Argon2PasswordHasher::from_config(&Argon2Config {
            memory_cost: 16,
            time_cost: 1,
            parallelism: 1,
            output_length: Some(32),
        })
        .unwrap();

        let stored = hasher.hash("P@ssw0rd!").unwrap();
        let (key_hex, _) = stored.split_once(SEPARATOR).unwrap();
        assert_eq!(key_hex.len(), 64);
        assert!(hasher.verify("P@ssw0rd!", &stored).unwrap());
    }

    #[test]
    fn hashes_from_a_wider_profile_never_match_a_narrower_one() {
        let wide = test_hasher();
        let narrow = Argon2PasswordHasher::from_config(&Argon2Config {
            memory_cost: 16,
            time_cost: 1,
            parallelism: 1,
            output_length: Some(32),
        })
        .unwrap();

        let stored = wide.hash("P@ssw0rd!").unwrap();
        assert!(!narrow.verify("P@ssw0rd!", &stored).unwrap());
    }

    #[test]
    fn rejects_unusable_cost_parameters() {
        let result = Argon2PasswordHasher::from_config(&Argon2Config {
            memory_cost: 1,
            time_cost: 0,
            parallelism: 0,
            output_length: Some(64),
        });
        assert!(result.is_err());
    }
}
