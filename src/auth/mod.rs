/// Authentication module
///
/// Token issuance and verification for the three token classes, password
/// hashing, the session operations built on the user store, and the
/// refresh cookie policy.

mod claims;
mod cookie;
mod password;
mod session;
mod tokens;

pub use claims::{AccessClaims, RefreshClaims, ResetClaims, UserInfo};
pub use cookie::{refresh_cookie, removal_cookie, REFRESH_COOKIE_NAME};
pub use password::{hash_password, validate_password_strength, verify_password};
pub use session::{authenticate, verify_and_refresh, TokenPair};
pub use tokens::{
    decode_refresh_token, issue_access_token, issue_refresh_token, issue_reset_token,
    verify_access_token, verify_reset_token,
};
