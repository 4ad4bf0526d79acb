use std::sync::Arc;

use chrono::DateTime;
use chrono::Utc;
use rand::rngs::OsRng;
use rand::RngCore;
use uuid::Uuid;

use super::errors::RefreshTokenError;
use super::store::RefreshTokenStore;

/// Number of random bytes in an opaque refresh token (256 bits).
const TOKEN_BYTES: usize = 32;

/// Generates opaque long-lived tokens and drives their persisted state
/// through a [`RefreshTokenStore`] collaborator.
///
/// The manager holds no token state itself and performs no caching, so it
/// provides no ordering guarantees beyond what the store gives it.
pub struct RefreshTokenManager<S>
where
    S: RefreshTokenStore,
{
    store: Arc<S>,
}

impl<S> RefreshTokenManager<S>
where
    S: RefreshTokenStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Produce a fresh opaque token: 32 bytes from the OS CSPRNG,
    /// hex-encoded. Independent of any caller input.
    pub fn generate(&self) -> String {
        let mut bytes = [0u8; TOKEN_BYTES];
        OsRng.fill_bytes(&mut bytes);
        hex::encode(bytes)
    }

    /// Persist a generated token bound to a user and expiry.
    ///
    /// Callers treat a generate-persist pair as one logical unit and retry
    /// it as a whole on store failure.
    pub async fn persist(
        &self,
        token: &str,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> Result<(), RefreshTokenError> {
        self.store.insert(token, user_id, expires_at).await
    }

    /// Resolve an active token to its user.
    ///
    /// # Errors
    /// * `NotFound` / `Expired` / `Revoked` - Token is not usable, with the
    ///   specific reason preserved for diagnostics
    /// * `Store` - Persistence failed
    pub async fn lookup(&self, token: &str) -> Result<Uuid, RefreshTokenError> {
        self.store.find_active(token).await
    }

    /// Revoke a token.
    ///
    /// Idempotent for already-revoked tokens; `NotFound` for unknown ones.
    pub async fn revoke(&self, token: &str) -> Result<(), RefreshTokenError> {
        self.store.mark_revoked(token).await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::collections::HashSet;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::Duration;

    use super::*;

    struct TokenRow {
        user_id: Uuid,
        expires_at: DateTime<Utc>,
        revoked_at: Option<DateTime<Utc>>,
    }

    /// In-memory store mirroring the Postgres adapter's semantics.
    #[derive(Default)]
    struct MemoryStore {
        rows: Mutex<HashMap<String, TokenRow>>,
    }

    #[async_trait]
    impl RefreshTokenStore for MemoryStore {
        async fn insert(
            &self,
            token: &str,
            user_id: Uuid,
            expires_at: DateTime<Utc>,
        ) -> Result<(), RefreshTokenError> {
            let mut rows = self.rows.lock().unwrap();
            if rows.contains_key(token) {
                return Err(RefreshTokenError::Store("duplicate token".to_string()));
            }
            rows.insert(
                token.to_string(),
                TokenRow {
                    user_id,
                    expires_at,
                    revoked_at: None,
                },
            );
            Ok(())
        }

        async fn find_active(&self, token: &str) -> Result<Uuid, RefreshTokenError> {
            let rows = self.rows.lock().unwrap();
            let row = rows.get(token).ok_or(RefreshTokenError::NotFound)?;
            if row.revoked_at.is_some() {
                return Err(RefreshTokenError::Revoked);
            }
            if Utc::now() > row.expires_at {
                return Err(RefreshTokenError::Expired);
            }
            Ok(row.user_id)
        }

        async fn mark_revoked(&self, token: &str) -> Result<(), RefreshTokenError> {
            let mut rows = self.rows.lock().unwrap();
            let row = rows.get_mut(token).ok_or(RefreshTokenError::NotFound)?;
            if row.revoked_at.is_none() {
                row.revoked_at = Some(Utc::now());
            }
            Ok(())
        }
    }

    fn manager() -> RefreshTokenManager<MemoryStore> {
        RefreshTokenManager::new(Arc::new(MemoryStore::default()))
    }

    #[test]
    fn test_generate_shape() {
        let token = manager().generate();

        assert_eq!(token.len(), 64);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_generate_unique() {
        let manager = manager();
        let tokens: HashSet<String> = (0..1000).map(|_| manager.generate()).collect();

        assert_eq!(tokens.len(), 1000);
    }

    #[tokio::test]
    async fn test_persist_and_lookup() {
        let manager = manager();
        let user_id = Uuid::new_v4();

        let token = manager.generate();
        manager
            .persist(&token, user_id, Utc::now() + Duration::days(60))
            .await
            .expect("Failed to persist token");

        assert_eq!(manager.lookup(&token).await, Ok(user_id));
    }

    #[tokio::test]
    async fn test_lookup_unknown_token() {
        let manager = manager();

        assert_eq!(
            manager.lookup("never_persisted").await,
            Err(RefreshTokenError::NotFound)
        );
    }

    #[tokio::test]
    async fn test_lookup_expired_token() {
        let manager = manager();

        let token = manager.generate();
        manager
            .persist(&token, Uuid::new_v4(), Utc::now() - Duration::seconds(1))
            .await
            .unwrap();

        assert_eq!(
            manager.lookup(&token).await,
            Err(RefreshTokenError::Expired)
        );
    }

    #[tokio::test]
    async fn test_revoke_then_lookup() {
        let manager = manager();

        let token = manager.generate();
        manager
            .persist(&token, Uuid::new_v4(), Utc::now() + Duration::days(60))
            .await
            .unwrap();

        manager.revoke(&token).await.expect("Failed to revoke");

        // Revoked wins even though expiry has not passed
        assert_eq!(
            manager.lookup(&token).await,
            Err(RefreshTokenError::Revoked)
        );
    }

    #[tokio::test]
    async fn test_revoke_is_idempotent() {
        let manager = manager();

        let token = manager.generate();
        manager
            .persist(&token, Uuid::new_v4(), Utc::now() + Duration::days(60))
            .await
            .unwrap();

        assert_eq!(manager.revoke(&token).await, Ok(()));
        assert_eq!(manager.revoke(&token).await, Ok(()));
    }

    #[tokio::test]
    async fn test_revoke_unknown_token() {
        let manager = manager();

        assert_eq!(
            manager.revoke("never_persisted").await,
            Err(RefreshTokenError::NotFound)
        );
    }
}
