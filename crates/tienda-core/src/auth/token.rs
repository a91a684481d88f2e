//! Bearer tokens
//!
//! HS256-signed JWTs carrying the user's id, email and role, valid for the
//! configured window (24 hours by default). The token is opaque to clients;
//! they present it back in the `Authorization: Bearer` header.

use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::core::config::AuthConfig;
use crate::types::{Result, Role, User};

/// The claims encoded in a bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: u64,
    /// User email at issuance time
    pub email: String,
    /// User role at issuance time
    pub role: Role,
    /// Expiry as a unix timestamp
    pub exp: i64,
}

/// Issues and verifies bearer tokens.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_secs: u64,
}

impl TokenService {
    /// Build a token service from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(config.token_secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.token_secret.as_bytes()),
            ttl_secs: config.token_ttl_secs,
        }
    }

    /// Issue a token for a user, expiring after the configured TTL.
    pub fn issue(&self, user: &User) -> Result<String> {
        let claims = Claims {
            sub: user.id,
            email: user.email.clone(),
            role: user.role,
            exp: Utc::now().timestamp() + self.ttl_secs as i64,
        };
        Ok(encode(&Header::default(), &claims, &self.encoding)?)
    }

    /// Verify a token's signature and expiry, returning its claims.
    pub fn verify(&self, token: &str) -> Result<Claims> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default())?;
        Ok(data.claims)
    }
}
