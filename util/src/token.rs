//! Bearer token issuance and verification.
//!
//! Tokens are stateless HS256 JWTs carrying the user id and an expiry. Nothing is
//! stored server side, so a token stays valid until it expires.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Claims embedded in every issued token.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    pub sub: i64,
    pub iat: i64,
    pub exp: i64,
}

/// A freshly signed token together with its expiry.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Error)]
pub enum TokenError {
    /// Bad signature, malformed token or past expiry. Deliberately one variant.
    #[error("Token is invalid or expired")]
    Invalid,
    #[error("Token signing failed: {0}")]
    Signing(String),
}

/// Signs and verifies bearer tokens for a user id.
pub trait TokenSigner: Send + Sync {
    fn sign(&self, user_id: i64) -> Result<IssuedToken, TokenError>;
    fn verify(&self, token: &str) -> Result<Claims, TokenError>;
}

/// HMAC-SHA256 JWT implementation of [`TokenSigner`].
#[derive(Clone)]
pub struct JwtSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl JwtSigner {
    /// A lifetime too large to represent falls back to the seven-day default.
    pub fn new(secret: &str, ttl_minutes: u64) -> Self {
        let ttl = i64::try_from(ttl_minutes)
            .ok()
            .and_then(Duration::try_minutes)
            .unwrap_or_else(|| {
                tracing::warn!(ttl_minutes, "Token lifetime out of range, using default");
                Duration::days(7)
            });

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    /// Builds a signer from the global configuration.
    pub fn from_config() -> Self {
        Self::new(&crate::config::jwt_secret(), crate::config::jwt_duration_minutes())
    }

    fn sign_at(&self, user_id: i64, now: DateTime<Utc>) -> Result<IssuedToken, TokenError> {
        let expires_at = now
            .checked_add_signed(self.ttl)
            .ok_or_else(|| TokenError::Signing("Token expiry out of range".into()))?;
        let claims = Claims {
            sub: user_id,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| TokenError::Signing(e.to_string()))?;

        Ok(IssuedToken { token, expires_at })
    }
}

impl TokenSigner for JwtSigner {
    fn sign(&self, user_id: i64) -> Result<IssuedToken, TokenError> {
        self.sign_at(user_id, Utc::now())
    }

    fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(error = %e, "Rejected bearer token");
                TokenError::Invalid
            })
    }
}
