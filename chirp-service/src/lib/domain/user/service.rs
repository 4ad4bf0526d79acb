use std::sync::Arc;

use async_trait::async_trait;
use auth::PasswordHasher;
use auth::RefreshTokenManager;
use auth::RefreshTokenStore;
use auth::SessionTokenSigner;
use chrono::Duration;
use chrono::Utc;

use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::LoginResult;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::models::EmailAddress;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user and credential operations.
///
/// Coordinates the auth library's components: password verification, session
/// token issuance, and refresh token lifecycle. Argon2 hashing is memory-hard
/// and blocks for a non-trivial time, so it runs on the tokio blocking pool;
/// that pool's bound is the backpressure mechanism that keeps login bursts
/// from starving lighter request handling.
pub struct UserService<UR, RS>
where
    UR: UserRepository,
    RS: RefreshTokenStore,
{
    repository: Arc<UR>,
    password_hasher: PasswordHasher,
    session_signer: Arc<SessionTokenSigner>,
    refresh_tokens: RefreshTokenManager<RS>,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl<UR, RS> UserService<UR, RS>
where
    UR: UserRepository,
    RS: RefreshTokenStore,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `session_signer` - Session token signer bound to the process secret
    /// * `refresh_store` - Refresh token persistence implementation
    /// * `access_ttl` - Session token lifetime (positive, config-validated)
    /// * `refresh_ttl` - Refresh token lifetime (positive, config-validated)
    pub fn new(
        repository: Arc<UR>,
        session_signer: Arc<SessionTokenSigner>,
        refresh_store: Arc<RS>,
        access_ttl: Duration,
        refresh_ttl: Duration,
    ) -> Self {
        Self {
            repository,
            password_hasher: PasswordHasher::new(),
            session_signer,
            refresh_tokens: RefreshTokenManager::new(refresh_store),
            access_ttl,
            refresh_ttl,
        }
    }

    async fn hash_password(&self, password: String) -> Result<String, UserError> {
        let hasher = self.password_hasher.clone();
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| UserError::Unknown(format!("Hashing task failed: {}", e)))?
            .map_err(UserError::from)
    }

    async fn verify_password(&self, password: String, hash: String) -> Result<bool, UserError> {
        let hasher = self.password_hasher.clone();
        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| UserError::Unknown(format!("Verification task failed: {}", e)))?
            .map_err(UserError::from)
    }
}

#[async_trait]
impl<UR, RS> UserServicePort for UserService<UR, RS>
where
    UR: UserRepository,
    RS: RefreshTokenStore,
{
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError> {
        let password_hash = self.hash_password(command.password).await?;

        let now = Utc::now();
        let user = User {
            id: UserId::new(),
            email: command.email,
            password_hash,
            created_at: now,
            updated_at: now,
        };

        self.repository.create(user).await
    }

    async fn login(
        &self,
        email: &EmailAddress,
        password: String,
    ) -> Result<LoginResult, UserError> {
        let user = self
            .repository
            .find_by_email(email)
            .await?
            .ok_or_else(|| UserError::NotFoundByEmail(email.to_string()))?;

        let matched = self
            .verify_password(password, user.password_hash.clone())
            .await?;
        if !matched {
            return Err(UserError::InvalidCredentials);
        }

        let access_token = self.session_signer.issue(user.id.0, self.access_ttl)?;

        // Generate + persist form one logical unit; on store failure the
        // caller retries the pair as a whole.
        let refresh_token = self.refresh_tokens.generate();
        self.refresh_tokens
            .persist(&refresh_token, user.id.0, Utc::now() + self.refresh_ttl)
            .await?;

        Ok(LoginResult {
            user,
            access_token,
            refresh_token,
        })
    }

    async fn refresh_session(&self, refresh_token: &str) -> Result<String, UserError> {
        let user_id = self.refresh_tokens.lookup(refresh_token).await?;

        Ok(self.session_signer.issue(user_id, self.access_ttl)?)
    }

    async fn revoke_session(&self, refresh_token: &str) -> Result<(), UserError> {
        Ok(self.refresh_tokens.revoke(refresh_token).await?)
    }

    async fn delete_all_users(&self) -> Result<(), UserError> {
        self.repository.delete_all().await
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use auth::RefreshTokenError;
    use chrono::DateTime;
    use mockall::mock;
    use mockall::predicate::*;
    use uuid::Uuid;

    use super::*;

    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, user: User) -> Result<User, UserError>;
            async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError>;
            async fn delete_all(&self) -> Result<(), UserError>;
        }
    }

    mock! {
        pub TestRefreshTokenStore {}

        #[async_trait]
        impl RefreshTokenStore for TestRefreshTokenStore {
            async fn insert(&self, token: &str, user_id: Uuid, expires_at: DateTime<Utc>) -> Result<(), RefreshTokenError>;
            async fn find_active(&self, token: &str) -> Result<Uuid, RefreshTokenError>;
            async fn mark_revoked(&self, token: &str) -> Result<(), RefreshTokenError>;
        }
    }

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    fn service(
        repository: MockTestUserRepository,
        store: MockTestRefreshTokenStore,
    ) -> UserService<MockTestUserRepository, MockTestRefreshTokenStore> {
        UserService::new(
            Arc::new(repository),
            Arc::new(SessionTokenSigner::new(SECRET)),
            Arc::new(store),
            Duration::minutes(60),
            Duration::days(60),
        )
    }

    fn stored_user(email: &str, password: &str) -> User {
        let now = Utc::now();
        User {
            id: UserId::new(),
            email: EmailAddress::new(email.to_string()).unwrap(),
            password_hash: PasswordHasher::new().hash(password).unwrap(),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_create_user_hashes_password() {
        let mut repository = MockTestUserRepository::new();
        repository
            .expect_create()
            .withf(|user| {
                user.email.as_str() == "test@example.com"
                    && user.password_hash.starts_with("$argon2id$")
            })
            .times(1)
            .returning(Ok);

        let service = service(repository, MockTestRefreshTokenStore::new());

        let command = CreateUserCommand {
            email: EmailAddress::new("test@example.com".to_string()).unwrap(),
            password: "Secret123!".to_string(),
        };

        let user = service.create_user(command).await.unwrap();
        assert!(user.password_hash.starts_with("$argon2id$"));
        assert_eq!(user.created_at, user.updated_at);
    }

    #[tokio::test]
    async fn test_login_success() {
        let user = stored_user("test@example.com", "Secret123!");
        let user_id = user.id;

        let mut repository = MockTestUserRepository::new();
        let returned_user = user.clone();
        repository
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(returned_user.clone())));

        let mut store = MockTestRefreshTokenStore::new();
        store
            .expect_insert()
            .withf(move |token, uid, expires_at| {
                token.len() == 64 && *uid == user_id.0 && *expires_at > Utc::now()
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        let service = service(repository, store);

        let result = service
            .login(&user.email, "Secret123!".to_string())
            .await
            .unwrap();

        assert_eq!(result.user.id, user_id);
        assert_eq!(result.refresh_token.len(), 64);

        let signer = SessionTokenSigner::new(SECRET);
        assert_eq!(signer.validate(&result.access_token).unwrap(), user_id.0);
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let user = stored_user("test@example.com", "Secret123!");
        let email = user.email.clone();

        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let mut store = MockTestRefreshTokenStore::new();
        store.expect_insert().times(0);

        let service = service(repository, store);

        let result = service.login(&email, "wrong".to_string()).await;
        assert!(matches!(result, Err(UserError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_unknown_email() {
        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));

        let service = service(repository, MockTestRefreshTokenStore::new());

        let email = EmailAddress::new("nobody@example.com".to_string()).unwrap();
        let result = service.login(&email, "whatever".to_string()).await;
        assert!(matches!(result, Err(UserError::NotFoundByEmail(_))));
    }

    #[tokio::test]
    async fn test_refresh_session_issues_new_token() {
        let user_id = Uuid::new_v4();

        let mut store = MockTestRefreshTokenStore::new();
        store
            .expect_find_active()
            .with(eq("some_refresh_token"))
            .times(1)
            .returning(move |_| Ok(user_id));

        let service = service(MockTestUserRepository::new(), store);

        let token = service.refresh_session("some_refresh_token").await.unwrap();

        let signer = SessionTokenSigner::new(SECRET);
        assert_eq!(signer.validate(&token).unwrap(), user_id);
    }

    #[tokio::test]
    async fn test_refresh_session_revoked_token() {
        let mut store = MockTestRefreshTokenStore::new();
        store
            .expect_find_active()
            .times(1)
            .returning(|_| Err(RefreshTokenError::Revoked));

        let service = service(MockTestUserRepository::new(), store);

        let result = service.refresh_session("revoked_token").await;
        assert!(matches!(
            result,
            Err(UserError::RefreshToken(RefreshTokenError::Revoked))
        ));
    }

    #[tokio::test]
    async fn test_revoke_session_unknown_token() {
        let mut store = MockTestRefreshTokenStore::new();
        store
            .expect_mark_revoked()
            .times(1)
            .returning(|_| Err(RefreshTokenError::NotFound));

        let service = service(MockTestUserRepository::new(), store);

        let result = service.revoke_session("never_persisted").await;
        assert!(matches!(
            result,
            Err(UserError::RefreshToken(RefreshTokenError::NotFound))
        ));
    }

    #[tokio::test]
    async fn test_revoke_session_success() {
        let mut store = MockTestRefreshTokenStore::new();
        store
            .expect_mark_revoked()
            .with(eq("active_token"))
            .times(1)
            .returning(|_| Ok(()));

        let service = service(MockTestUserRepository::new(), store);

        assert!(service.revoke_session("active_token").await.is_ok());
    }
}
