use async_trait::async_trait;

use crate::chirp::errors::ChirpError;
use crate::chirp::models::Chirp;
use crate::chirp::models::ChirpId;
use crate::chirp::models::PublishChirpCommand;

/// Port for chirp domain service operations.
#[async_trait]
pub trait ChirpServicePort: Send + Sync + 'static {
    /// Publish a new chirp for an authenticated user.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn publish_chirp(&self, command: PublishChirpCommand) -> Result<Chirp, ChirpError>;

    /// Retrieve a chirp by identifier.
    ///
    /// # Errors
    /// * `NotFound` - Chirp does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_chirp(&self, id: &ChirpId) -> Result<Chirp, ChirpError>;

    /// Retrieve all chirps, oldest first.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_chirps(&self) -> Result<Vec<Chirp>, ChirpError>;
}

/// Persistence operations for the chirp aggregate.
#[async_trait]
pub trait ChirpRepository: Send + Sync + 'static {
    /// Persist new chirp to storage.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, chirp: Chirp) -> Result<Chirp, ChirpError>;

    /// Retrieve chirp by identifier.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &ChirpId) -> Result<Option<Chirp>, ChirpError>;

    /// Retrieve all chirps ordered by creation time ascending.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_all(&self) -> Result<Vec<Chirp>, ChirpError>;
}
