use async_trait::async_trait;

use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::LoginResult;
use crate::domain::user::models::User;
use crate::user::errors::UserError;
use crate::user::models::EmailAddress;

/// Port for user domain service operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Create new user with a freshly hashed password.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `Password` - Hashing primitive failed
    /// * `DatabaseError` - Database operation failed
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError>;

    /// Verify credentials and mint a session token plus a refresh token.
    ///
    /// # Errors
    /// * `NotFoundByEmail` - No account with this email
    /// * `InvalidCredentials` - Password does not match
    /// * `SessionToken` / `RefreshToken` / `Password` - Token or hashing
    ///   machinery failed
    /// * `DatabaseError` - Database operation failed
    async fn login(&self, email: &EmailAddress, password: String)
        -> Result<LoginResult, UserError>;

    /// Exchange an active refresh token for a new session token.
    ///
    /// # Errors
    /// * `RefreshToken` - Token unknown, expired, or revoked (distinct
    ///   variants preserved), or the store failed
    /// * `SessionToken` - Issuance failed
    async fn refresh_session(&self, refresh_token: &str) -> Result<String, UserError>;

    /// Revoke a refresh token. Idempotent for already-revoked tokens.
    ///
    /// # Errors
    /// * `RefreshToken` - Token unknown, or the store failed
    async fn revoke_session(&self, refresh_token: &str) -> Result<(), UserError>;

    /// Remove every user (cascades chirps and refresh tokens). Dev-only
    /// reset; the HTTP layer gates it on the platform setting.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn delete_all_users(&self) -> Result<(), UserError>;
}

/// Persistence operations for the user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: User) -> Result<User, UserError>;

    /// Retrieve user by email address.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError>;

    /// Remove all users from storage.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn delete_all(&self) -> Result<(), UserError>;
}
