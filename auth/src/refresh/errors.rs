use thiserror::Error;

/// Error type for refresh token operations.
///
/// `NotFound`, `Expired`, and `Revoked` stay distinct so callers can log
/// which check failed, even though all three become the same generic
/// unauthorized response at the HTTP boundary.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RefreshTokenError {
    #[error("Refresh token not found")]
    NotFound,

    #[error("Refresh token is expired")]
    Expired,

    #[error("Refresh token has been revoked")]
    Revoked,

    #[error("Refresh token store failed: {0}")]
    Store(String),
}
