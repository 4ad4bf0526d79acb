use chrono::Duration;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use uuid::Uuid;

use super::claims::SessionClaims;
use super::claims::TOKEN_ISSUER;
use super::errors::SessionTokenError;

/// Issues and validates short-lived signed session tokens.
///
/// Uses HS256 (HMAC with SHA-256) keyed by a process-wide secret bound at
/// construction. The signer is stateless across calls and holds no revocation
/// list; a short TTL is the sole compromise mitigation, which is why refresh
/// tokens exist as the revocable layer.
pub struct SessionTokenSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl SessionTokenSigner {
    /// Create a signer from a secret key.
    ///
    /// The secret should be at least 256 bits for HS256, live in the
    /// environment or a vault, and never appear in logs.
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Issue a signed session token for a user.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token signing failed
    pub fn issue(&self, user_id: Uuid, ttl: Duration) -> Result<String, SessionTokenError> {
        let claims = SessionClaims::for_user(user_id, ttl);
        let header = Header::new(self.algorithm);

        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| SessionTokenError::EncodingFailed(e.to_string()))
    }

    /// Validate a session token and return the user it was issued to.
    ///
    /// Checks run in order: signature, expiry (strict, zero leeway), then
    /// subject parse. Each failure keeps its own variant.
    ///
    /// # Errors
    /// * `SignatureInvalid` - Signature does not match the secret
    /// * `Expired` - Current time is past the embedded expiry
    /// * `Malformed` - Token structure or issuer is wrong
    /// * `SubjectInvalid` - Subject claim is not a UUID
    pub fn validate(&self, token: &str) -> Result<Uuid, SessionTokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.set_issuer(&[TOKEN_ISSUER]);

        let token_data = decode::<SessionClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => SessionTokenError::Expired,
                ErrorKind::InvalidSignature => SessionTokenError::SignatureInvalid,
                _ => SessionTokenError::Malformed(e.to_string()),
            })?;

        Uuid::parse_str(&token_data.claims.sub)
            .map_err(|e| SessionTokenError::SubjectInvalid(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    #[test]
    fn test_issue_and_validate() {
        let signer = SessionTokenSigner::new(SECRET);
        let user_id = Uuid::new_v4();

        let token = signer
            .issue(user_id, Duration::minutes(60))
            .expect("Failed to issue token");

        let validated = signer.validate(&token).expect("Failed to validate token");
        assert_eq!(validated, user_id);
    }

    #[test]
    fn test_validate_with_wrong_secret() {
        let signer = SessionTokenSigner::new(SECRET);
        let other = SessionTokenSigner::new(b"another_secret_at_least_32_bytes!");

        let token = signer
            .issue(Uuid::new_v4(), Duration::minutes(60))
            .expect("Failed to issue token");

        assert_eq!(
            other.validate(&token),
            Err(SessionTokenError::SignatureInvalid)
        );
    }

    #[test]
    fn test_validate_expired_token() {
        let signer = SessionTokenSigner::new(SECRET);

        let token = signer
            .issue(Uuid::new_v4(), Duration::seconds(1))
            .expect("Failed to issue token");

        std::thread::sleep(std::time::Duration::from_secs(2));

        assert_eq!(signer.validate(&token), Err(SessionTokenError::Expired));
    }

    #[test]
    fn test_validate_garbage_token() {
        let signer = SessionTokenSigner::new(SECRET);

        assert!(matches!(
            signer.validate("not.a.token"),
            Err(SessionTokenError::Malformed(_))
        ));
    }

    #[test]
    fn test_validate_non_uuid_subject() {
        let signer = SessionTokenSigner::new(SECRET);

        let claims = SessionClaims {
            iss: TOKEN_ISSUER.to_string(),
            sub: "not-a-uuid".to_string(),
            iat: chrono::Utc::now().timestamp(),
            exp: chrono::Utc::now().timestamp() + 3600,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        assert!(matches!(
            signer.validate(&token),
            Err(SessionTokenError::SubjectInvalid(_))
        ));
    }

    #[test]
    fn test_validate_wrong_issuer() {
        let signer = SessionTokenSigner::new(SECRET);

        let claims = SessionClaims {
            iss: "someone-else".to_string(),
            sub: Uuid::new_v4().to_string(),
            iat: chrono::Utc::now().timestamp(),
            exp: chrono::Utc::now().timestamp() + 3600,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        assert!(matches!(
            signer.validate(&token),
            Err(SessionTokenError::Malformed(_))
        ));
    }
}
