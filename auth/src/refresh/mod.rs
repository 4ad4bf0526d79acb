pub mod errors;
pub mod manager;
pub mod store;

pub use errors::RefreshTokenError;
pub use manager::RefreshTokenManager;
pub use store::RefreshTokenStore;
