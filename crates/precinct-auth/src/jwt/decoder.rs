//! Session token validation.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use precinct_core::config::AuthConfig;
use precinct_core::error::AppError;

use super::claims::Claims;

/// Verifies session tokens.
#[derive(Clone)]
pub struct JwtDecoder {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Build the decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5;

        Self {
            decoding_key: DecodingKey::from_secret(config.token_secret.as_bytes()),
            validation,
        }
    }

    /// Verify signature and expiry and return the claims.
    pub fn decode(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::authentication("Session has expired")
                }
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    AppError::authentication("Invalid session signature")
                }
                _ => AppError::authentication("Invalid session token"),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::JwtEncoder;

    #[test]
    fn test_issue_then_decode() {
        let config = AuthConfig::default();
        let (token, _) = JwtEncoder::new(&config).issue("I-204").unwrap();
        let claims = JwtDecoder::new(&config).decode(&token).unwrap();
        assert_eq!(claims.officer_id(), "I-204");
    }

    #[test]
    fn test_foreign_secret_rejected() {
        let (token, _) = JwtEncoder::new(&AuthConfig::default()).issue("I-204").unwrap();
        let other = AuthConfig {
            token_secret: "another-secret".to_string(),
            ..AuthConfig::default()
        };
        let err = JwtDecoder::new(&other).decode(&token).unwrap_err();
        assert_eq!(err.kind, precinct_core::error::ErrorKind::Authentication);
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(JwtDecoder::new(&AuthConfig::default()).decode("not.a.token").is_err());
    }
}
