use thiserror::Error;

/// Error type for password operations.
///
/// A wrong password is never an error; it is an `Ok(false)` verification
/// result. These variants cover primitive failures and malformed hashes only.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Password verification failed: {0}")]
    VerificationFailed(String),
}
