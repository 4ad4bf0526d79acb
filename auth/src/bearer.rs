use thiserror::Error;

/// Error type for bearer credential extraction.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BearerError {
    #[error("Authorization header missing")]
    HeaderMissing,

    #[error("Authorization header is not of the form 'Bearer <token>'")]
    MalformedHeader,
}

/// Extract the opaque credential from an Authorization header value.
///
/// Accepts exactly the two-token form `Bearer <token>` separated by a single
/// space, where the token is a non-empty run of non-whitespace characters.
/// The token's content is not validated here; that is the caller's job,
/// delegating to the session signer or refresh token manager.
///
/// # Errors
/// * `HeaderMissing` - Header absent or empty
/// * `MalformedHeader` - Wrong scheme, missing token, or extra whitespace
pub fn extract_bearer_token(header_value: Option<&str>) -> Result<&str, BearerError> {
    let header_value = match header_value {
        Some(value) if !value.is_empty() => value,
        _ => return Err(BearerError::HeaderMissing),
    };

    let (scheme, token) = header_value
        .split_once(' ')
        .ok_or(BearerError::MalformedHeader)?;

    if scheme != "Bearer" || token.is_empty() || token.contains(char::is_whitespace) {
        return Err(BearerError::MalformedHeader);
    }

    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_valid_header() {
        assert_eq!(extract_bearer_token(Some("Bearer abc123")), Ok("abc123"));
    }

    #[test]
    fn test_extract_missing_header() {
        assert_eq!(extract_bearer_token(None), Err(BearerError::HeaderMissing));
        assert_eq!(
            extract_bearer_token(Some("")),
            Err(BearerError::HeaderMissing)
        );
    }

    #[test]
    fn test_extract_wrong_scheme() {
        assert_eq!(
            extract_bearer_token(Some("Basic abc")),
            Err(BearerError::MalformedHeader)
        );
    }

    #[test]
    fn test_extract_no_token_portion() {
        assert_eq!(
            extract_bearer_token(Some("Bearer")),
            Err(BearerError::MalformedHeader)
        );
        assert_eq!(
            extract_bearer_token(Some("Bearer ")),
            Err(BearerError::MalformedHeader)
        );
    }

    #[test]
    fn test_extract_token_with_whitespace() {
        assert_eq!(
            extract_bearer_token(Some("Bearer abc def")),
            Err(BearerError::MalformedHeader)
        );
    }

    #[test]
    fn test_extract_case_sensitive_scheme() {
        assert_eq!(
            extract_bearer_token(Some("bearer abc123")),
            Err(BearerError::MalformedHeader)
        );
    }
}
