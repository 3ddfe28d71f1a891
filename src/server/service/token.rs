//! Access and refresh token issuance and validation.
//!
//! Tokens are HS256 JWTs carrying the user's email as subject, an expiry,
//! and a `type` claim distinguishing access tokens from refresh tokens so
//! the refresh endpoint cannot be driven with an access token (and vice
//! versa for protected endpoints).

use std::sync::Arc;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::server::{
    config::Config,
    error::{auth::AuthError, AppError},
};

pub const TOKEN_TYPE_ACCESS: &str = "access";
pub const TOKEN_TYPE_REFRESH: &str = "refresh";

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User email.
    pub sub: String,
    /// Expiry as a unix timestamp.
    pub exp: i64,
    /// Issued-at as a unix timestamp.
    pub iat: i64,
    /// Token type: `access` or `refresh`.
    #[serde(rename = "type")]
    pub token_type: String,
}

struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

/// Signs and validates bearer tokens. Cheap to clone; the keys live behind
/// an `Arc` shared with every request handler.
#[derive(Clone)]
pub struct TokenService {
    keys: Arc<TokenKeys>,
}

impl TokenService {
    pub fn new(secret: &str, access_ttl: Duration, refresh_ttl: Duration) -> Self {
        Self {
            keys: Arc::new(TokenKeys {
                encoding: EncodingKey::from_secret(secret.as_bytes()),
                decoding: DecodingKey::from_secret(secret.as_bytes()),
                access_ttl,
                refresh_ttl,
            }),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            &config.secret_key,
            Duration::minutes(config.access_token_expire_minutes),
            Duration::days(config.refresh_token_expire_days),
        )
    }

    /// Issues an access token for the given user email.
    pub fn issue_access_token(&self, email: &str) -> Result<String, AppError> {
        self.issue(email, TOKEN_TYPE_ACCESS, self.keys.access_ttl)
    }

    /// Issues a refresh token for the given user email.
    pub fn issue_refresh_token(&self, email: &str) -> Result<String, AppError> {
        self.issue(email, TOKEN_TYPE_REFRESH, self.keys.refresh_ttl)
    }

    fn issue(&self, email: &str, token_type: &str, ttl: Duration) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: email.to_string(),
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
            token_type: token_type.to_string(),
        };

        encode(&Header::default(), &claims, &self.keys.encoding)
            .map_err(|e| AppError::InternalError(format!("Failed to sign token: {}", e)))
    }

    /// Validates a token's signature and expiry and checks that it carries
    /// the expected `type` claim.
    pub fn validate(&self, token: &str, expected_type: &str) -> Result<Claims, AuthError> {
        let data = decode::<Claims>(token, &self.keys.decoding, &Validation::default())
            .map_err(|_| AuthError::InvalidToken)?;

        if data.claims.token_type != expected_type {
            return Err(AuthError::InvalidToken);
        }

        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new("test-secret", Duration::minutes(30), Duration::days(7))
    }

    #[test]
    fn issues_and_validates_access_token() {
        let tokens = service();

        let token = tokens.issue_access_token("researcher@grants.edu").unwrap();
        let claims = tokens.validate(&token, TOKEN_TYPE_ACCESS).unwrap();

        assert_eq!(claims.sub, "researcher@grants.edu");
        assert_eq!(claims.token_type, TOKEN_TYPE_ACCESS);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn rejects_access_token_used_as_refresh() {
        let tokens = service();

        let token = tokens.issue_access_token("researcher@grants.edu").unwrap();

        assert!(tokens.validate(&token, TOKEN_TYPE_REFRESH).is_err());
    }

    #[test]
    fn rejects_token_signed_with_different_secret() {
        let tokens = service();
        let other = TokenService::new("other-secret", Duration::minutes(30), Duration::days(7));

        let token = other.issue_access_token("researcher@grants.edu").unwrap();

        assert!(tokens.validate(&token, TOKEN_TYPE_ACCESS).is_err());
    }

    #[test]
    fn rejects_expired_token() {
        let tokens = TokenService::new("test-secret", Duration::minutes(-5), Duration::days(7));

        let token = tokens.issue_access_token("researcher@grants.edu").unwrap();

        assert!(tokens.validate(&token, TOKEN_TYPE_ACCESS).is_err());
    }
}
