pub mod claims;
pub mod errors;
pub mod signer;

pub use claims::SessionClaims;
pub use claims::TOKEN_ISSUER;
pub use errors::SessionTokenError;
pub use signer::SessionTokenSigner;
