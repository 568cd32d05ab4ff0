//! Wire format of stored credentials: `"<hex derived-key>.<hex salt>"`.

use crate::error::{DomainError, DomainResult};

pub const SEPARATOR: char = '.';
pub const SALT_LEN: usize = 16;
pub const DERIVED_KEY_LEN: usize = 64;

/// A salted stored secret, split into its hex-encoded halves.
///
/// Both halves are guaranteed non-empty; hex validity is not checked here.
/// A structurally salted value with bad hex must fail key decoding (and so
/// mismatch) rather than degrade to a plaintext comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaltedSecret<'a> {
    key_hex: &'a str,
    salt_hex: &'a str,
}

impl<'a> SaltedSecret<'a> {
    pub fn key_hex(&self) -> &'a str {
        self.key_hex
    }

    pub fn salt_hex(&self) -> &'a str {
        self.salt_hex
    }

    /// Decode the stored derived key into raw bytes.
    pub fn key_bytes(&self) -> DomainResult<Vec<u8>> {
        hex::decode(self.key_hex)
            .map_err(|e| DomainError::InvalidSecretFormat(format!("derived key is not hex: {e}")))
    }
}

/// Classification of a raw credential column value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoredSecret<'a> {
    Salted(SaltedSecret<'a>),
    /// Pre-salting record holding the plaintext itself. Compared by direct
    /// string equality; never written for new credentials.
    Legacy(&'a str),
}

impl<'a> StoredSecret<'a> {
    /// Classify a raw stored value. Salted iff splitting on the separator
    /// yields exactly two non-empty parts; everything else is legacy.
    pub fn parse(raw: &'a str) -> Self {
        let mut parts = raw.split(SEPARATOR);
        match (parts.next(), parts.next(), parts.next()) {
            (Some(key_hex), Some(salt_hex), None)
                if !key_hex.is_empty() && !salt_hex.is_empty() =>
            {
                Self::Salted(SaltedSecret { key_hex, salt_hex })
            }
            _ => Self::Legacy(raw),
        }
    }

    pub fn is_legacy(&self) -> bool {
        matches!(self, Self::Legacy(_))
    }
}

/// Render the canonical stored form for a freshly derived key and salt.
pub fn encode_secret(key: &[u8], salt: &[u8]) -> String {
    format!("{}{}{}", hex::encode(key), SEPARATOR, hex::encode(salt))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::{DERIVED_KEY_LEN, SALT_LEN, SEPARATOR, StoredSecret, encode_secret};

    #[test]
    fn well_formed_value_parses_as_salted() {
        let parsed = StoredSecret::parse("deadbeef.c0ffee");
        match parsed {
            StoredSecret::Salted(parts) => {
                assert_eq!(parts.key_hex(), "deadbeef");
                assert_eq!(parts.salt_hex(), "c0ffee");
            }
            StoredSecret::Legacy(_) => panic!("expected salted"),
        }
    }

    #[test]
    fn values_without_structure_are_legacy() {
        for raw in ["secret123", "", "a.b.c", "..", ".salt", "key.", "."] {
            assert!(StoredSecret::parse(raw).is_legacy(), "raw = {raw:?}");
        }
    }

    #[test]
    fn bad_hex_stays_salted_and_fails_decoding() {
        let parsed = StoredSecret::parse("not-hex.c0ffee");
        let StoredSecret::Salted(parts) = parsed else {
            panic!("structurally salted value must not demote to legacy");
        };
        assert!(parts.key_bytes().is_err());
    }

    #[test]
    fn encode_produces_expected_shape() {
        let key = vec![0xabu8; DERIVED_KEY_LEN];
        let salt = vec![0x01u8; SALT_LEN];
        let encoded = encode_secret(&key, &salt);

        assert_eq!(encoded.chars().filter(|c| *c == SEPARATOR).count(), 1);
        let (key_hex, salt_hex) = encoded.split_once(SEPARATOR).unwrap();
        assert_eq!(key_hex.len(), DERIVED_KEY_LEN * 2);
        assert_eq!(salt_hex.len(), SALT_LEN * 2);
        assert!(encoded.chars().all(|c| c.is_ascii_hexdigit() || c == SEPARATOR));
    }

    #[test]
    fn encode_round_trips_through_parse() {
        let encoded = encode_secret(&[0xde, 0xad], &[0xbe, 0xef]);
        let StoredSecret::Salted(parts) = StoredSecret::parse(&encoded) else {
            panic!("expected salted");
        };
        assert_eq!(parts.key_bytes().unwrap(), vec![0xde, 0xad]);
        assert_eq!(parts.salt_hex(), "beef");
    }
}
