use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use super::errors::RefreshTokenError;

/// Persistence port for refresh token state.
///
/// The store owns all token state transitions and must evaluate its
/// check-then-act sequences atomically: "exists AND not expired AND not
/// revoked" has to come from a single consistent read. Concurrent revoke and
/// lookup of the same token may race; the guarantee is only that once a
/// revoke is durably visible, every later lookup observes `Revoked`.
#[async_trait]
pub trait RefreshTokenStore: Send + Sync + 'static {
    /// Persist a newly generated token for a user.
    ///
    /// Token strings are globally unique; the store's uniqueness constraint
    /// is the backstop behind the generator's 256 bits of entropy.
    ///
    /// # Errors
    /// * `Store` - Persistence failed
    async fn insert(
        &self,
        token: &str,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> Result<(), RefreshTokenError>;

    /// Resolve a token to its user, if the token is still active.
    ///
    /// # Errors
    /// * `NotFound` - No such token was ever persisted
    /// * `Revoked` - The token has been revoked, regardless of expiry
    /// * `Expired` - The token's expiry has passed
    /// * `Store` - Persistence failed
    async fn find_active(&self, token: &str) -> Result<Uuid, RefreshTokenError>;

    /// Mark a token revoked.
    ///
    /// Revoking an already-revoked token succeeds silently so retries are
    /// safe; revoking an unknown token is `NotFound` so typos and probing
    /// are not masked. Implementations must preserve this asymmetry.
    ///
    /// # Errors
    /// * `NotFound` - No such token was ever persisted
    /// * `Store` - Persistence failed
    async fn mark_revoked(&self, token: &str) -> Result<(), RefreshTokenError>;
}
