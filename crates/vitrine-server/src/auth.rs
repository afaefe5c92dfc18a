//! Bearer-token verification
//!
//! The identity provider is external; this server only verifies the JWTs
//! it mints and exposes the stable subject id to handlers. Decoded tokens
//! are memoized in a short-lived cache to avoid repeated signature checks.

use std::sync::LazyLock;
use std::time::Duration;

use actix_web::{HttpMessage, HttpRequest};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use moka::sync::Cache;
use serde::{Deserialize, Serialize};

use vitrine_common::VitrineError;

/// Claims carried by an identity-provider token
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Stable external subject id
    pub sub: String,
    pub exp: i64,
}

/// Per-request authentication context inserted by the middleware
#[derive(Clone, Debug, Default)]
pub struct AuthContext {
    pub token_provided: bool,
    pub subject: Option<String>,
}

/// Token cache to avoid repeated validation of the same token
static TOKEN_CACHE: LazyLock<Cache<String, Claims>> = LazyLock::new(|| {
    Cache::builder()
        .max_capacity(10_000)
        .time_to_live(Duration::from_secs(300))
        .build()
});

/// Decode and validate a token with caching
pub fn decode_token_cached(token: &str, secret_key: &str) -> jsonwebtoken::errors::Result<Claims> {
    if let Some(cached) = TOKEN_CACHE.get(token) {
        if cached.exp > chrono::Utc::now().timestamp() {
            return Ok(cached);
        }
        // Expired in cache, invalidate it
        TOKEN_CACHE.invalidate(token);
    }

    let claims = decode_token(token, secret_key)?;
    TOKEN_CACHE.insert(token.to_string(), claims.clone());

    Ok(claims)
}

/// Decode and validate a token without caching
pub fn decode_token(token: &str, secret_key: &str) -> jsonwebtoken::errors::Result<Claims> {
    let decoding_key = DecodingKey::from_secret(secret_key.as_bytes());
    decode::<Claims>(token, &decoding_key, &Validation::default()).map(|data| data.claims)
}

/// Encode a token for the given subject
pub fn encode_token(
    subject: &str,
    secret_key: &str,
    expire_seconds: i64,
) -> jsonwebtoken::errors::Result<String> {
    let exp = chrono::Utc::now()
        .checked_add_signed(chrono::Duration::seconds(expire_seconds))
        .unwrap_or_else(chrono::Utc::now)
        .timestamp();

    let claims = Claims {
        sub: subject.to_string(),
        exp,
    };
    let encoding_key = EncodingKey::from_secret(secret_key.as_bytes());
    encode(&Header::new(Algorithm::HS256), &claims, &encoding_key)
}

/// The authenticated subject for a request, or `Unauthenticated`
pub fn require_subject(req: &HttpRequest) -> Result<String, VitrineError> {
    req.extensions()
        .get::<AuthContext>()
        .and_then(|ctx| ctx.subject.clone())
        .ok_or(VitrineError::Unauthenticated)
}
