/// Credential session operations
///
/// Login and refresh against the user store. Both hand back signed tokens
/// only; no session state is recorded server-side, so a refresh token
/// stays valid until its claim expires.

use crate::auth::password::verify_password;
use crate::auth::tokens::{decode_refresh_token, issue_access_token, issue_refresh_token};
use crate::configuration::AuthSettings;
use crate::error::AppError;
use crate::users::UserStore;

/// Access and refresh tokens minted together at login.
#[derive(Debug)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Authenticate a user by email and password
///
/// An absent account, an inactive account and a wrong password all fail
/// identically, so the response never reveals which check rejected the
/// attempt.
///
/// # Errors
/// - `Unauthorized` if the account is missing or inactive, or the password
///   does not match
/// - `Unavailable` if the store lookup fails
pub async fn authenticate(
    store: &dyn UserStore,
    email: &str,
    password: &str,
    config: &AuthSettings,
) -> Result<TokenPair, AppError> {
    let user = match store.find_by_email(email).await? {
        Some(user) if user.active => user,
        _ => {
            tracing::warn!(email = %email, "Login rejected: unknown or inactive account");
            return Err(AppError::Unauthorized("invalid credentials".to_string()));
        }
    };

    if !verify_password(password, &user.password_hash)? {
        tracing::warn!(email = %email, "Login rejected: password mismatch");
        return Err(AppError::Unauthorized("invalid credentials".to_string()));
    }

    let access_token = issue_access_token(&user.email, &user.roles, config)?;
    let refresh_token = issue_refresh_token(&user.email, config)?;

    Ok(TokenPair {
        access_token,
        refresh_token,
    })
}

/// Exchange a refresh token for a fresh access token
///
/// Roles are re-read from the store, so changes made after login show up
/// in the next access token. The refresh token itself is never reissued
/// here; the cookie set at login runs out on its own schedule.
///
/// # Errors
/// - `Forbidden` if the refresh token fails verification
/// - `Unauthorized` if no account matches the embedded email
pub async fn verify_and_refresh(
    store: &dyn UserStore,
    refresh_token: &str,
    config: &AuthSettings,
) -> Result<String, AppError> {
    let claims = decode_refresh_token(refresh_token, config)?;

    let user = store.find_by_email(&claims.email).await?.ok_or_else(|| {
        tracing::warn!(email = %claims.email, "Refresh rejected: unknown account");
        AppError::Unauthorized("unknown account".to_string())
    })?;

    issue_access_token(&user.email, &user.roles, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::password::hash_password;
    use crate::auth::tokens::verify_access_token;
    use crate::users::{InMemoryUserStore, NewUser};

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

    async fn store_with_user(email: &str, password: &str, roles: Vec<&str>) -> InMemoryUserStore {
        let store = InMemoryUserStore::new();
        store
            .create(NewUser {
                name: "Ada".to_string(),
                last_name: "Lovelace".to_string(),
                email: email.to_string(),
                password_hash: hash_password(password).expect("Failed to hash password"),
                roles: roles.into_iter().map(String::from).collect(),
            })
            .await
            .expect("Failed to seed user");
        store
    }

    #[tokio::test]
    async fn authenticate_returns_both_tokens_for_valid_credentials() {
        let config = test_settings();
        let store = store_with_user("a@x.com", "hunter22", vec!["Client"]).await;

        let pair = authenticate(&store, "a@x.com", "hunter22", &config)
            .await
            .expect("Authentication failed");

        let claims =
            verify_access_token(&pair.access_token, &config).expect("Invalid access token");
        assert_eq!(claims.user_info.email, "a@x.com");
        assert_eq!(claims.user_info.roles, vec!["Client".to_string()]);

        let refresh =
            decode_refresh_token(&pair.refresh_token, &config).expect("Invalid refresh token");
        assert_eq!(refresh.email, "a@x.com");
    }

    #[tokio::test]
    async fn authenticate_rejects_unknown_account() {
        let config = test_settings();
        let store = InMemoryUserStore::new();

        let result = authenticate(&store, "a@x.com", "hunter22", &config).await;
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn authenticate_rejects_inactive_account_with_correct_password() {
        let config = test_settings();
        let store = store_with_user("a@x.com", "hunter22", vec!["Client"]).await;

        let mut user = store.find_by_email("a@x.com").await.unwrap().unwrap();
        user.active = false;
        store.save(user).await.expect("Failed to deactivate user");

        let result = authenticate(&store, "a@x.com", "hunter22", &config).await;
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn authenticate_rejects_wrong_password() {
        let config = test_settings();
        let store = store_with_user("a@x.com", "hunter22", vec!["Client"]).await;

        let result = authenticate(&store, "a@x.com", "wrong-password", &config).await;
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn refresh_reflects_role_changes_made_after_login() {
        let config = test_settings();
        let store = store_with_user("a@x.com", "hunter22", vec!["Client"]).await;

        let pair = authenticate(&store, "a@x.com", "hunter22", &config)
            .await
            .expect("Authentication failed");

        let mut user = store.find_by_email("a@x.com").await.unwrap().unwrap();
        user.roles = vec!["Client".to_string(), "Admin".to_string()];
        store.save(user).await.expect("Failed to update roles");

        let access_token = verify_and_refresh(&store, &pair.refresh_token, &config)
            .await
            .expect("Refresh failed");
        let claims = verify_access_token(&access_token, &config).expect("Invalid access token");
        assert_eq!(
            claims.user_info.roles,
            vec!["Client".to_string(), "Admin".to_string()]
        );
    }

    #[tokio::test]
    async fn refresh_rejects_token_for_deleted_account() {
        let config = test_settings();
        let store = InMemoryUserStore::new();

        let token = issue_refresh_token("ghost@x.com", &config).expect("Failed to issue token");
        let result = verify_and_refresh(&store, &token, &config).await;
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn refresh_rejects_token_signed_with_wrong_secret() {
        let config = test_settings();
        let mut other = test_settings();
        other.refresh_token_secret = "a-completely-different-refresh-secret!".to_string();
        let store = store_with_user("a@x.com", "hunter22", vec!["Client"]).await;

        let token = issue_refresh_token("a@x.com", &other).expect("Failed to issue token");
        let result = verify_and_refresh(&store, &token, &config).await;
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }
}
