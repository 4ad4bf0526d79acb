use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Issuer claim stamped into every session token.
pub const TOKEN_ISSUER: &str = "chirpy";

/// Registered claims carried by a session token.
///
/// A session token is self-contained and stateless: validity is determined
/// entirely by the signature and these embedded timestamps, never by a
/// server-side lookup. Claims are immutable after issuance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Issuer, always [`TOKEN_ISSUER`]
    pub iss: String,

    /// Subject (user identifier as a UUID string)
    pub sub: String,

    /// Issued at (Unix timestamp, UTC)
    pub iat: i64,

    /// Expiration time (Unix timestamp, UTC)
    pub exp: i64,
}

impl SessionClaims {
    /// Build claims for a user with the given time to live.
    ///
    /// `ttl` must be positive; callers validate that at the configuration
    /// boundary before any token is issued.
    pub fn for_user(user_id: Uuid, ttl: Duration) -> Self {
        let now = Utc::now();

        Self {
            iss: TOKEN_ISSUER.to_string(),
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        }
    }

    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.iat, 0)
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}
