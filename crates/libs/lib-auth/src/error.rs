//! # Authentication Errors

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Salt generation or hashing failed.
    #[error("Failed to hash password: {0}")]
    Hash(String),

    /// Token could not be signed.
    #[error("Failed to encode JWT: {0}")]
    TokenEncode(String),

    /// Signature mismatch, malformed structure, or expired token.
    #[error("Invalid token: {0}")]
    TokenInvalid(String),
}
