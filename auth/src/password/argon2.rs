use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::Error as HashError;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;

use super::errors::PasswordError;

/// Memory cost in KiB (19 MiB, the RFC 9106 low-memory recommendation).
const MEMORY_KIB: u32 = 19_456;
/// Number of passes over memory.
const ITERATIONS: u32 = 2;
/// Degree of parallelism.
const PARALLELISM: u32 = 1;

/// Password hashing implementation.
///
/// Uses Argon2id with fixed cost parameters and a random per-hash salt. The
/// parameters are embedded in the PHC output string, so hashes stay
/// verifiable across process restarts and future parameter changes.
#[derive(Debug, Clone, Default)]
pub struct PasswordHasher;

impl PasswordHasher {
    pub fn new() -> Self {
        Self
    }

    fn argon2() -> Result<Argon2<'static>, PasswordError> {
        let params = Params::new(MEMORY_KIB, ITERATIONS, PARALLELISM, None)
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))?;
        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }

    /// Hash a plaintext password securely.
    ///
    /// Any byte sequence is accepted, including the empty string; rejecting
    /// empty passwords is a caller policy, not a hashing concern.
    ///
    /// # Errors
    /// * `HashingFailed` - The hashing primitive failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        Self::argon2()?
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored PHC-format hash.
    ///
    /// Cost parameters are taken from the hash string itself. The comparison
    /// is constant time with respect to the password.
    ///
    /// # Errors
    /// * `VerificationFailed` - The hash string is structurally invalid
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| PasswordError::VerificationFailed(e.to_string()))?;

        match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(HashError::Password) => Ok(false),
            Err(e) => Err(PasswordError::VerificationFailed(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasswordHasher::new();
        let password = "Secret123!";

        let hash = hasher.hash(password).expect("Failed to hash password");

        assert!(hasher
            .verify(password, &hash)
            .expect("Failed to verify password"));
        assert!(!hasher
            .verify("wrong", &hash)
            .expect("Failed to verify password"));
    }

    #[test]
    fn test_hash_empty_password() {
        let hasher = PasswordHasher::new();

        let hash = hasher.hash("").expect("Failed to hash empty password");

        assert!(hasher.verify("", &hash).expect("Failed to verify"));
        assert!(!hasher.verify("x", &hash).expect("Failed to verify"));
    }

    #[test]
    fn test_hash_long_password() {
        let hasher = PasswordHasher::new();
        let password = "a".repeat(256);

        let hash = hasher.hash(&password).expect("Failed to hash password");

        assert!(hasher.verify(&password, &hash).expect("Failed to verify"));
    }

    #[test]
    fn test_hashes_are_salted() {
        let hasher = PasswordHasher::new();

        let first = hasher.hash("same_password").unwrap();
        let second = hasher.hash("same_password").unwrap();

        assert_ne!(first, second);
    }

    #[test]
    fn test_parameters_embedded_in_hash() {
        let hasher = PasswordHasher::new();

        let hash = hasher.hash("password").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(hash.contains("m=19456,t=2,p=1"));
    }

    #[test]
    fn test_verify_invalid_hash() {
        let hasher = PasswordHasher::new();

        let result = hasher.verify("password", "not_a_phc_string");
        assert!(matches!(result, Err(PasswordError::VerificationFailed(_))));
    }
}
