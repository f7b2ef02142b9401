//! JWT token generation and validation

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

/// JWT claims payload
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// User ID
    pub sub: String,
    /// Expiration timestamp
    pub exp: u64,
}

/// Generate a JWT token for a user
pub fn generate_token(user_id: String, secret: &str, lifetime_seconds: u64) -> anyhow::Result<String> {
    let now = semainier_shared::now() as u64;

    let claims = Claims {
        sub: user_id,
        exp: now + lifetime_seconds,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    Ok(token)
}

/// Validate and decode a JWT token, returning the user id it names
pub fn validate_token(token: &str, secret: &str) -> anyhow::Result<String> {
    let validation = Validation::default();

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )?;

    Ok(token_data.claims.sub)
}
