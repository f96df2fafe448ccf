//! # Authentication Library
//!
//! Password hashing and JWT identity tokens.
//!
//! - [`pwd`]: one-way Argon2 password hashes with random salts
//! - [`token`]: HS256 tokens carrying the account id and username, valid for a
//!   fixed window and never revocable early

pub mod error;
pub mod pwd;
pub mod token;

// Re-export commonly used types
pub use error::{Error, Result};
pub use pwd::{hash_password, verify_password};
pub use token::{Claims, encode_jwt, decode_jwt};
