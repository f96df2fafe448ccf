//! # JWT Token Management
//!
//! Issue and verify signed identity tokens.
//!
//! A token is either valid (correct signature, not yet expired) or invalid.
//! There is no revocation state: a token stays valid until `exp`.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// JWT Claims structure containing the authenticated identity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (account ID)
    pub sub: String,
    /// Username
    pub username: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at time (Unix timestamp)
    pub iat: i64,
}

/// Encode a JWT token for an account, valid for `ttl` from now.
pub fn encode_jwt(
    account_id: &str,
    username: &str,
    secret: &str,
    ttl: Duration,
) -> Result<String> {
    let now = Utc::now();
    let exp = now + ttl;

    let claims = Claims {
        sub: account_id.to_string(),
        username: username.to_string(),
        exp: exp.timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| Error::TokenEncode(e.to_string()))
}

/// Decode and validate a JWT token.
///
/// Checks the HS256 signature and `exp` with no leeway. Audience and issuer
/// are not checked.
pub fn decode_jwt(token: &str, secret: &str) -> Result<Claims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| Error::TokenInvalid(e.to_string()))?;

    Ok(token_data.claims)
}
