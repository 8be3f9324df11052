//! Hashing, encoding and password helpers. Thin wrappers over the RustCrypto
//! digests, `base64`, `uuid` and the OS random source.

use crate::domain::model::PasswordHash;
use crate::utils::error::{Result, UtilkitError};
use base64::engine::general_purpose;
use base64::Engine;
use hmac::{Hmac, Mac};
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256, Sha512};

pub const DEFAULT_ITERATIONS: u32 = 100_000;
pub const DEFAULT_KEY_LENGTH: usize = 64;
pub const DEFAULT_SALT_LENGTH: usize = 16;

/// Parameters for [`hash_password`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashOptions {
    pub iterations: u32,
    pub key_length: usize,
    pub salt_length: usize,
}

impl Default for HashOptions {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            key_length: DEFAULT_KEY_LENGTH,
            salt_length: DEFAULT_SALT_LENGTH,
        }
    }
}

pub fn md5_hex(input: &str) -> String {
    format!("{:x}", md5::compute(input.as_bytes()))
}

pub fn sha256_hex(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}

pub fn sha512_hex(input: &str) -> String {
    hex::encode(Sha512::digest(input.as_bytes()))
}

pub fn hmac_sha256_hex(key: &str, message: &str) -> Result<String> {
    let mut mac = <Hmac<Sha256> as Mac>::new_from_slice(key.as_bytes())
        .map_err(|e| UtilkitError::invalid_input("key", e.to_string()))?;
    mac.update(message.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

pub fn base64_encode(input: &str) -> String {
    general_purpose::STANDARD.encode(input.as_bytes())
}

/// Decodes standard base64 into UTF-8 text; `None` when either step fails.
pub fn base64_decode(input: &str) -> Option<String> {
    let bytes = match general_purpose::STANDARD.decode(input.trim()) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::debug!("base64 decode failed: {}", e);
            return None;
        }
    };
    String::from_utf8(bytes).ok()
}

fn random_bytes(len: usize) -> Vec<u8> {
    let mut buf = vec![0u8; len];
    OsRng.fill_bytes(&mut buf);
    buf
}

/// `len` random bytes, hex encoded (so `2 * len` characters).
pub fn random_bytes_hex(len: usize) -> String {
    hex::encode(random_bytes(len))
}

/// URL-safe token built from `len` random bytes.
pub fn random_token(len: usize) -> String {
    general_purpose::URL_SAFE_NO_PAD.encode(random_bytes(len))
}

pub fn uuid_v4() -> String {
    uuid::Uuid::new_v4().to_string()
}

fn derive_key(password: &str, salt: &str, iterations: u32, key_length: usize) -> Vec<u8> {
    let mut key = vec![0u8; key_length];
    pbkdf2::pbkdf2_hmac::<Sha512>(password.as_bytes(), salt.as_bytes(), iterations, &mut key);
    key
}

/// PBKDF2-HMAC-SHA512 with a fresh random salt.
pub fn hash_password(password: &str, options: HashOptions) -> Result<PasswordHash> {
    if options.iterations == 0 {
        return Err(UtilkitError::invalid_input("iterations", "must be at least 1"));
    }
    if options.key_length == 0 {
        return Err(UtilkitError::invalid_input("key_length", "must be at least 1"));
    }
    if options.salt_length == 0 {
        return Err(UtilkitError::invalid_input("salt_length", "must be at least 1"));
    }

    let salt = random_bytes_hex(options.salt_length);
    let key = derive_key(password, &salt, options.iterations, options.key_length);
    tracing::debug!(
        iterations = options.iterations,
        key_length = options.key_length,
        "Derived password hash"
    );

    Ok(PasswordHash {
        salt,
        hash: hex::encode(key),
        iterations: options.iterations,
        key_length: options.key_length,
    })
}

/// Recomputes the key with the stored salt and parameters and compares in
/// constant time. A malformed record never verifies.
pub fn verify_password(password: &str, stored: &PasswordHash) -> bool {
    if stored.iterations == 0 || stored.key_length == 0 {
        return false;
    }
    let expected = match hex::decode(&stored.hash) {
        Ok(bytes) if bytes.len() == stored.key_length => bytes,
        _ => return false,
    };
    let actual = derive_key(password, &stored.salt, stored.iterations, stored.key_length);
    actual
        .iter()
        .zip(expected.iter())
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast() -> HashOptions {
        HashOptions {
            iterations: 1_000,
            ..HashOptions::default()
        }
    }

    #[test]
    fn digests_match_known_vectors() {
        assert_eq!(md5_hex("hello"), "5d41402abc4b2a76b9719d911017c592");
        assert_eq!(
            sha256_hex("hello"),
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
        assert!(sha512_hex("hello").starts_with("9b71d224bd62f378"));
        assert_eq!(sha512_hex("").len(), 128);
    }

    #[test]
    fn hmac_known_vector() {
        // RFC 4231 test case 2
        assert_eq!(
            hmac_sha256_hex("Jefe", "what do ya want for nothing?").unwrap(),
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }

    #[test]
    fn base64_round_trip_and_failure() {
        assert_eq!(base64_encode("hello world"), "aGVsbG8gd29ybGQ=");
        assert_eq!(base64_decode("aGVsbG8gd29ybGQ=").as_deref(), Some("hello world"));
        assert_eq!(base64_decode("%%%"), None);
    }

    #[test]
    fn random_values_have_expected_shape() {
        assert_eq!(random_bytes_hex(16).len(), 32);
        assert_ne!(random_bytes_hex(16), random_bytes_hex(16));
        assert!(random_token(24)
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
        let id = uuid_v4();
        assert_eq!(id.len(), 36);
        assert_eq!(id.chars().nth(14), Some('4'));
    }

    #[test]
    fn password_hash_verifies() {
        let record = hash_password("correct horse", fast()).unwrap();
        assert_eq!(record.salt.len(), 32);
        assert_eq!(record.hash.len(), 128);
        assert_eq!(record.iterations, 1_000);
        assert!(verify_password("correct horse", &record));
        assert!(!verify_password("battery staple", &record));
    }

    #[test]
    fn password_hash_salts_differ() {
        let a = hash_password("same", fast()).unwrap();
        let b = hash_password("same", fast()).unwrap();
        assert_ne!(a.salt, b.salt);
        assert_ne!(a.hash, b.hash);
    }

    #[test]
    fn rejects_bad_parameters_and_records() {
        let zero = HashOptions {
            iterations: 0,
            ..HashOptions::default()
        };
        assert!(hash_password("x", zero).is_err());

        let mut record = hash_password("x", fast()).unwrap();
        record.hash = "zz".to_string();
        assert!(!verify_password("x", &record));
    }

    #[test]
    fn record_serializes_with_camel_case() {
        let record = hash_password("x", fast()).unwrap();
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["keyLength"], 64);
        assert_eq!(json["iterations"], 1_000);
    }
}
