use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::chirp::errors::ChirpBodyError;
use crate::chirp::errors::ChirpIdError;
use crate::domain::user::models::UserId;

/// Chirp aggregate entity.
#[derive(Debug, Clone)]
pub struct Chirp {
    pub id: ChirpId,
    pub body: ChirpBody,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Chirp unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChirpId(pub Uuid);

impl ChirpId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a chirp ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, ChirpIdError> {
        Uuid::parse_str(s)
            .map(ChirpId)
            .map_err(|e| ChirpIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for ChirpId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ChirpId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Chirp body value type
///
/// Enforces the 140-character limit and masks profane words on construction,
/// so a `ChirpBody` is always publishable as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChirpBody(String);

impl ChirpBody {
    const MAX_LENGTH: usize = 140;
    const PROFANE_WORDS: [&'static str; 3] = ["kerfuffle", "sharbert", "fornax"];

    /// Create a validated, cleaned chirp body.
    ///
    /// # Errors
    /// * `TooLong` - Body exceeds 140 characters
    pub fn new(body: String) -> Result<Self, ChirpBodyError> {
        let length = body.len();
        if length > Self::MAX_LENGTH {
            return Err(ChirpBodyError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        Ok(Self(Self::mask_profanity(&body)))
    }

    // Whole-word, case-insensitive match; punctuation-adjacent forms pass.
    fn mask_profanity(body: &str) -> String {
        body.split_whitespace()
            .map(|word| {
                let lowered = word.to_lowercase();
                if Self::PROFANE_WORDS.contains(&lowered.as_str()) {
                    "****"
                } else {
                    word
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChirpBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Command to publish a new chirp with domain types
#[derive(Debug)]
pub struct PublishChirpCommand {
    pub body: ChirpBody,
    pub user_id: UserId,
}

impl PublishChirpCommand {
    pub fn new(body: ChirpBody, user_id: UserId) -> Self {
        Self { body, user_id }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_within_limit() {
        let body = ChirpBody::new("Hello, world!".to_string()).unwrap();
        assert_eq!(body.as_str(), "Hello, world!");
    }

    #[test]
    fn test_body_too_long() {
        let result = ChirpBody::new("a".repeat(141));
        assert!(matches!(
            result,
            Err(ChirpBodyError::TooLong { max: 140, actual: 141 })
        ));
    }

    #[test]
    fn test_body_at_limit() {
        assert!(ChirpBody::new("a".repeat(140)).is_ok());
    }

    #[test]
    fn test_profanity_masked() {
        let body = ChirpBody::new("This is a kerfuffle opinion I need to share".to_string())
            .unwrap();
        assert_eq!(body.as_str(), "This is a **** opinion I need to share");
    }

    #[test]
    fn test_profanity_masked_case_insensitive() {
        let body = ChirpBody::new("Sharbert! no wait, SHARBERT".to_string()).unwrap();
        // "Sharbert!" is not a whole-word match
        assert_eq!(body.as_str(), "Sharbert! no wait, ****");
    }

    #[test]
    fn test_clean_body_untouched() {
        let body = ChirpBody::new("I had something interesting for breakfast".to_string())
            .unwrap();
        assert_eq!(body.as_str(), "I had something interesting for breakfast");
    }
}
