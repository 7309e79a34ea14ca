/// Refresh session cookie policy
///
/// The refresh token rides exclusively in an httpOnly cookie named `jwt`:
/// HttpOnly, Secure, SameSite=None, Path=/. Its max-age comes from the
/// same setting as the refresh claim expiry, so the two lifetimes cannot
/// drift apart. The removal cookie echoes the same attribute set with a
/// zeroed age.

use actix_web::cookie::{time::Duration, Cookie, SameSite};

use crate::configuration::AuthSettings;

/// Name of the refresh session cookie.
pub const REFRESH_COOKIE_NAME: &str = "jwt";

/// Build the refresh session cookie.
pub fn refresh_cookie(refresh_token: String, config: &AuthSettings) -> Cookie<'static> {
    Cookie::build(REFRESH_COOKIE_NAME, refresh_token)
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::None)
        .max_age(Duration::seconds(config.refresh_token_expiry))
        .finish()
}

/// Build the cookie that clears the refresh session.
pub fn removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build(REFRESH_COOKIE_NAME, "")
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::None)
        .finish();
    cookie.make_removal();
    cookie
}

#[cfg(test)]
mod tests {
    use super::*;

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
    fn refresh_cookie_carries_the_full_attribute_set() {
        let config = test_settings();
        let cookie = refresh_cookie("token-value".to_string(), &config);

        assert_eq!(cookie.name(), "jwt");
        assert_eq!(cookie.value(), "token-value");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::None));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), Some(Duration::seconds(604800)));
    }

    #[test]
    fn cookie_age_tracks_the_refresh_expiry_setting() {
        let mut config = test_settings();
        config.refresh_token_expiry = 1_234;

        let cookie = refresh_cookie("t".to_string(), &config);
        assert_eq!(cookie.max_age(), Some(Duration::seconds(1_234)));
    }

    #[test]
    fn removal_cookie_clears_with_matching_attributes() {
        let cookie = removal_cookie();

        assert_eq!(cookie.name(), "jwt");
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::None));
        assert_eq!(cookie.max_age(), Some(Duration::ZERO));
    }
}
