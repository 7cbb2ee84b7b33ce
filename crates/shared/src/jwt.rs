//! Admin session token generation and validation.
//!
//! Admin access uses a server-issued, signed session token rather than a
//! client-side flag. Tokens are short-lived and validated on every admin
//! request.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Claims carried by an admin session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminClaims {
    /// Subject, always `"admin"`.
    pub sub: String,
    /// Issued at timestamp.
    pub iat: i64,
    /// Expiration timestamp.
    pub exp: i64,
}

/// Errors that can occur during token operations.
#[derive(Debug, Error)]
pub enum JwtError {
    /// Token encoding failed.
    #[error("failed to encode token: {0}")]
    EncodingError(String),

    /// Token decoding failed.
    #[error("failed to decode token: {0}")]
    DecodingError(String),

    /// Token has expired.
    #[error("token has expired")]
    Expired,
}

/// Service issuing and validating admin session tokens.
#[derive(Clone)]
pub struct AdminTokenService {
    expiry_minutes: i64,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl std::fmt::Debug for AdminTokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminTokenService")
            .field("expiry_minutes", &self.expiry_minutes)
            .field("encoding_key", &"[hidden]")
            .field("decoding_key", &"[hidden]")
            .finish()
    }
}

impl AdminTokenService {
    /// Creates a new token service.
    #[must_use]
    pub fn new(secret: &str, expiry_minutes: i64) -> Self {
        Self {
            expiry_minutes,
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Issues a new admin session token.
    ///
    /// # Errors
    ///
    /// Returns `JwtError::EncodingError` if token generation fails.
    pub fn issue(&self) -> Result<String, JwtError> {
        let now = Utc::now();
        let claims = AdminClaims {
            sub: "admin".to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::minutes(self.expiry_minutes)).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingError(e.to_string()))
    }

    /// Validates a session token and returns its claims.
    ///
    /// # Errors
    ///
    /// Returns `JwtError::Expired` if the token has expired, or
    /// `JwtError::DecodingError` if it is malformed or wrongly signed.
    pub fn validate(&self, token: &str) -> Result<AdminClaims, JwtError> {
        let validation = Validation::default();

        decode::<AdminClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
                _ => JwtError::DecodingError(e.to_string()),
            })
    }

    /// Returns the session expiry in seconds.
    #[must_use]
    pub const fn expires_in(&self) -> i64 {
        self.expiry_minutes * 60
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> AdminTokenService {
        AdminTokenService::new("test-secret-at-least-this-long", 60)
    }

    #[test]
    fn test_issue_and_validate_roundtrip() {
        let svc = service();
        let token = svc.issue().expect("token should encode");
        let claims = svc.validate(&token).expect("token should validate");
        assert_eq!(claims.sub, "admin");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = service().issue().expect("token should encode");
        let other = AdminTokenService::new("a-completely-different-secret", 60);
        assert!(matches!(
            other.validate(&token),
            Err(JwtError::DecodingError(_))
        ));
    }

    #[test]
    fn test_garbage_token_rejected() {
        assert!(service().validate("not-a-token").is_err());
    }

    #[test]
    fn test_expires_in() {
        assert_eq!(service().expires_in(), 3600);
    }
}
