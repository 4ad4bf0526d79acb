//! Credential and token lifecycle library
//!
//! Provides the authentication building blocks for the chirp service:
//! - Password hashing and verification (Argon2id)
//! - Signed session token issuance and validation (HS256 JWT)
//! - Opaque refresh token generation, lookup, and revocation
//! - Bearer credential extraction from Authorization header values
//!
//! Refresh token persistence is delegated through the [`RefreshTokenStore`]
//! port so storage stays an external collaborator; everything else here is
//! stateless apart from the signing secret bound at construction.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! assert!(!hasher.verify("wrong", &hash).unwrap());
//! ```
//!
//! ## Session Tokens
//! ```
//! use auth::SessionTokenSigner;
//! use chrono::Duration;
//! use uuid::Uuid;
//!
//! let signer = SessionTokenSigner::new(b"secret_key_at_least_32_bytes_long!");
//! let user_id = Uuid::new_v4();
//! let token = signer.issue(user_id, Duration::minutes(60)).unwrap();
//! assert_eq!(signer.validate(&token).unwrap(), user_id);
//! ```
//!
//! ## Bearer Extraction
//! ```
//! use auth::extract_bearer_token;
//!
//! let token = extract_bearer_token(Some("Bearer abc123")).unwrap();
//! assert_eq!(token, "abc123");
//! ```

pub mod bearer;
pub mod password;
pub mod refresh;
pub mod session;

// Re-export commonly used items
pub use bearer::extract_bearer_token;
pub use bearer::BearerError;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use refresh::RefreshTokenError;
pub use refresh::RefreshTokenManager;
pub use refresh::RefreshTokenStore;
pub use session::SessionClaims;
pub use session::SessionTokenError;
pub use session::SessionTokenSigner;
pub use session::TOKEN_ISSUER;
