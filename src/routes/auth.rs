/// Authentication Routes
///
/// Login, token refresh and logout. Login answers with a short-lived
/// access token in the body while the refresh token travels only in the
/// `jwt` cookie. Refresh reads that cookie back and logout clears it.

use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::auth::{
    authenticate, refresh_cookie, removal_cookie, verify_and_refresh, REFRESH_COOKIE_NAME,
};
use crate::configuration::Settings;
use crate::error::{AppError, ErrorContext, ValidationError};
use crate::users::UserStore;

/// User login request
#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body carrying a freshly minted access token
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessTokenResponse {
    pub access_token: String,
}

/// POST /auth
///
/// Authenticate with email and password. On success the body carries the
/// access token and the refresh token is set as an httpOnly cookie whose
/// age equals the token's lifetime.
///
/// # Errors
/// - 400: Missing or empty fields
/// - 401: Unknown account, inactive account or wrong password
///
/// # Security Notes
/// - Uses the same error message for "not found", "inactive" and
///   "wrong password"
/// - Prevents user enumeration attacks
pub async fn login(
    form: web::Json<LoginRequest>,
    store: web::Data<dyn UserStore>,
    settings: web::Data<Settings>,
) -> Result<HttpResponse, AppError> {
    let context = ErrorContext::new("user_login");

    if form.email.trim().is_empty() {
        return Err(ValidationError::MissingField("email").into());
    }
    if form.password.is_empty() {
        return Err(ValidationError::MissingField("password").into());
    }

    let tokens = authenticate(
        store.get_ref(),
        &form.email,
        &form.password,
        &settings.auth,
    )
    .await?;

    tracing::info!(
        request_id = %context.request_id,
        email = %form.email,
        "User logged in successfully"
    );

    let cookie = refresh_cookie(tokens.refresh_token, &settings.auth);
    Ok(HttpResponse::Ok().cookie(cookie).json(AccessTokenResponse {
        access_token: tokens.access_token,
    }))
}

/// GET /auth/refresh
///
/// Exchange the refresh cookie for a new access token. The cookie itself
/// is left untouched and expires on its original schedule.
///
/// # Errors
/// - 401: No refresh cookie, or no account matches the token's email
/// - 403: Cookie holds an invalid or expired token
pub async fn refresh(
    req: HttpRequest,
    store: web::Data<dyn UserStore>,
    settings: web::Data<Settings>,
) -> Result<HttpResponse, AppError> {
    let cookie = req
        .cookie(REFRESH_COOKIE_NAME)
        .ok_or_else(|| AppError::Unauthorized("refresh cookie missing".to_string()))?;

    let access_token =
        verify_and_refresh(store.get_ref(), cookie.value(), &settings.auth).await?;

    Ok(HttpResponse::Ok().json(AccessTokenResponse { access_token }))
}

/// POST /auth/logout
///
/// Clear the refresh cookie. Safe to call repeatedly: without a cookie
/// the reply is an empty 204.
pub async fn logout(req: HttpRequest) -> HttpResponse {
    match req.cookie(REFRESH_COOKIE_NAME) {
        None => HttpResponse::NoContent().finish(),
        Some(_) => {
            tracing::debug!("Clearing refresh cookie");
            HttpResponse::Ok()
                .cookie(removal_cookie())
                .json(serde_json::json!({ "message": "Cookie cleared" }))
        }
    }
}
