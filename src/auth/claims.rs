/// Token claim payloads
///
/// Three token classes, each with its own claims shape (RFC 7519 for the
/// registered fields). Access tokens carry the identity under a `UserInfo`
/// object; refresh and reset tokens carry only the account email.

use serde::{Deserialize, Serialize};

/// Identity payload embedded in access tokens.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct UserInfo {
    pub email: String,
    pub roles: Vec<String>,
}

/// Claims for short-lived access tokens.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AccessClaims {
    #[serde(rename = "UserInfo")]
    pub user_info: UserInfo,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl AccessClaims {
    /// Create access claims for a user
    ///
    /// # Arguments
    /// * `email` - Account email
    /// * `roles` - Roles as stored at issue time
    /// * `expiry_seconds` - Token expiration in seconds from now
    pub fn new(email: String, roles: Vec<String>, expiry_seconds: i64) -> Self {
        let now = chrono::Utc::now().timestamp();
        Self {
            user_info: UserInfo { email, roles },
            iat: now,
            exp: now + expiry_seconds,
        }
    }
}

/// Claims for long-lived refresh tokens.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RefreshClaims {
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

impl RefreshClaims {
    pub fn new(email: String, expiry_seconds: i64) -> Self {
        let now = chrono::Utc::now().timestamp();
        Self {
            email,
            iat: now,
            exp: now + expiry_seconds,
        }
    }
}

/// Claims for single-purpose password reset tokens.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ResetClaims {
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

impl ResetClaims {
    pub fn new(email: String, expiry_seconds: i64) -> Self {
        let now = chrono::Utc::now().timestamp();
        Self {
            email,
            iat: now,
            exp: now + expiry_seconds,
        }
    }
}
