/// Token signing and verification
///
/// Free functions over the auth settings, one issue/verify pair per token
/// class. All tokens are HS256; each class uses its own secret, so tokens
/// never cross class boundaries. Verification failures of any kind (bad
/// signature, expired, malformed) map to `Forbidden`.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::auth::claims::{AccessClaims, RefreshClaims, ResetClaims};
use crate::configuration::AuthSettings;
use crate::error::AppError;

/// Issue a signed access token
///
/// # Arguments
/// * `email` - Account email embedded in the claims
/// * `roles` - Current roles, read from the store at issue time
/// * `config` - Auth settings carrying secrets and expiries
///
/// # Errors
/// Returns `Internal` if signing fails
pub fn issue_access_token(
    email: &str,
    roles: &[String],
    config: &AuthSettings,
) -> Result<String, AppError> {
    let claims = AccessClaims::new(
        email.to_string(),
        roles.to_vec(),
        config.access_token_expiry,
    );

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.access_token_secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Token generation failed: {}", e)))
}

/// Verify an access token and extract its claims
///
/// # Errors
/// Returns `Forbidden` if the token is invalid, expired or tampered with
pub fn verify_access_token(token: &str, config: &AuthSettings) -> Result<AccessClaims, AppError> {
    decode::<AccessClaims>(
        token,
        &DecodingKey::from_secret(config.access_token_secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map(|data| data.claims)
    .map_err(|e| {
        tracing::warn!("Access token validation error: {}", e);
        AppError::Forbidden("invalid or expired access token".to_string())
    })
}

/// Issue a signed refresh token
///
/// # Errors
/// Returns `Internal` if signing fails
pub fn issue_refresh_token(email: &str, config: &AuthSettings) -> Result<String, AppError> {
    let claims = RefreshClaims::new(email.to_string(), config.refresh_token_expiry);

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.refresh_token_secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Token generation failed: {}", e)))
}

/// Verify a refresh token and extract its claims
///
/// # Errors
/// Returns `Forbidden` if the token is invalid, expired or tampered with
pub fn decode_refresh_token(token: &str, config: &AuthSettings) -> Result<RefreshClaims, AppError> {
    decode::<RefreshClaims>(
        token,
        &DecodingKey::from_secret(config.refresh_token_secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map(|data| data.claims)
    .map_err(|e| {
        tracing::warn!("Refresh token validation error: {}", e);
        AppError::Forbidden("invalid or expired refresh token".to_string())
    })
}

/// Issue a password reset token
///
/// # Errors
/// Returns `Internal` if signing fails
pub fn issue_reset_token(email: &str, config: &AuthSettings) -> Result<String, AppError> {
    let claims = ResetClaims::new(email.to_string(), config.reset_token_expiry);

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.reset_token_secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Token generation failed: {}", e)))
}

/// Verify a password reset token and extract its claims
///
/// # Errors
/// Returns `Forbidden` if the token is invalid, expired or tampered with
pub fn verify_reset_token(token: &str, config: &AuthSettings) -> Result<ResetClaims, AppError> {
    decode::<ResetClaims>(
        token,
        &DecodingKey::from_secret(config.reset_token_secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map(|data| data.claims)
    .map_err(|e| {
        tracing::warn!("Reset token validation error: {}", e);
        AppError::Forbidden("invalid or expired reset token".to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::claims::UserInfo;

    fn test_settings() -> AuthSettings {
        AuthSettings {
            access_token_secret: "access-test-secret-with-enough-length!".to_string(),
            refresh_token_secret: "refresh-test-secret-with-enough-length".to_string(),
            reset_token_secret: "reset-test-secret-with-enough-length!!".to_string(),
            access_token_expiry: 900,
            refresh_token_expiry: 604800,
            reset_token_expiry: 3600,
        }
    }

    #[test]
    fn access_token_round_trip_preserves_identity() {
        let config = test_settings();
        let roles = vec!["Client".to_string(), "Admin".to_string()];

        let token =
            issue_access_token("a@x.com", &roles, &config).expect("Failed to issue token");
        let claims = verify_access_token(&token, &config).expect("Failed to verify token");

        assert_eq!(claims.user_info.email, "a@x.com");
        assert_eq!(claims.user_info.roles, roles);
    }

    #[test]
    fn access_token_expiry_matches_configuration() {
        let config = test_settings();

        let before = chrono::Utc::now().timestamp();
        let token = issue_access_token("a@x.com", &["Client".to_string()], &config)
            .expect("Failed to issue token");
        let after = chrono::Utc::now().timestamp();

        let claims = verify_access_token(&token, &config).expect("Failed to verify token");
        assert_eq!(claims.exp - claims.iat, 900);
        assert!(claims.iat >= before && claims.iat <= after);
    }

    #[test]
    fn expired_access_token_is_rejected() {
        let config = test_settings();

        // Expired well past the 60 second leeway jsonwebtoken allows
        let now = chrono::Utc::now().timestamp();
        let claims = AccessClaims {
            user_info: UserInfo {
                email: "a@x.com".to_string(),
                roles: vec!["Client".to_string()],
            },
            iat: now - 1_000,
            exp: now - 120,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.access_token_secret.as_bytes()),
        )
        .expect("Failed to encode token");

        let result = verify_access_token(&token, &config);
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[test]
    fn tampered_access_token_is_rejected() {
        let config = test_settings();
        let token = issue_access_token("a@x.com", &["Client".to_string()], &config)
            .expect("Failed to issue token");

        let tampered = format!("{}X", token);
        assert!(verify_access_token(&tampered, &config).is_err());
    }

    #[test]
    fn refresh_token_round_trip() {
        let config = test_settings();

        let token = issue_refresh_token("a@x.com", &config).expect("Failed to issue token");
        let claims = decode_refresh_token(&token, &config).expect("Failed to verify token");

        assert_eq!(claims.email, "a@x.com");
        assert_eq!(claims.exp - claims.iat, 604800);
    }

    #[test]
    fn refresh_token_signed_with_wrong_secret_is_rejected() {
        let config = test_settings();
        let mut other = test_settings();
        other.refresh_token_secret = "a-completely-different-refresh-secret!".to_string();

        let token = issue_refresh_token("a@x.com", &other).expect("Failed to issue token");
        let result = decode_refresh_token(&token, &config);
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[test]
    fn access_token_does_not_verify_as_refresh_token() {
        let config = test_settings();

        let token = issue_access_token("a@x.com", &["Client".to_string()], &config)
            .expect("Failed to issue token");
        assert!(decode_refresh_token(&token, &config).is_err());
    }

    #[test]
    fn refresh_claims_signed_with_the_access_secret_are_rejected() {
        let config = test_settings();

        let claims = RefreshClaims::new("a@x.com".to_string(), config.refresh_token_expiry);
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.access_token_secret.as_bytes()),
        )
        .expect("Failed to encode token");

        let result = decode_refresh_token(&token, &config);
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[test]
    fn reset_token_round_trip_and_class_isolation() {
        let config = test_settings();

        let token = issue_reset_token("a@x.com", &config).expect("Failed to issue token");
        let claims = verify_reset_token(&token, &config).expect("Failed to verify token");
        assert_eq!(claims.email, "a@x.com");
        assert_eq!(claims.exp - claims.iat, 3600);

        // A reset token must not pass as a refresh token
        assert!(decode_refresh_token(&token, &config).is_err());
    }
}
