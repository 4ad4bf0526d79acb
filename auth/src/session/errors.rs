use thiserror::Error;

/// Error type for session token operations.
///
/// Validation failures stay distinguishable here for diagnostics; the HTTP
/// boundary collapses them all into one generic unauthorized response.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionTokenError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token signature is invalid")]
    SignatureInvalid,

    #[error("Token is expired")]
    Expired,

    #[error("Token is malformed: {0}")]
    Malformed(String),

    #[error("Token subject is not a valid user ID: {0}")]
    SubjectInvalid(String),
}
