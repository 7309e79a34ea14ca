/// Password Reset Routes
///
/// Two-step email flow: request a reset link, then confirm with the token
/// from that link. The request endpoint answers 200 whether or not the
/// email matches an account, so responses never reveal account existence.

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::auth::{
    hash_password, issue_reset_token, validate_password_strength, verify_reset_token,
};
use crate::configuration::Settings;
use crate::email_client::EmailClient;
use crate::error::{AppError, ErrorContext, ValidationError};
use crate::users::UserStore;
use crate::validators::validate_email;

/// Reset request body
#[derive(Deserialize)]
pub struct PasswordResetRequest {
    pub email: String,
}

/// Reset confirmation body
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmResetRequest {
    pub token: String,
    pub password: String,
    pub confirm_password: String,
}

/// POST /password-reset
///
/// Request a password reset email. Always answers 200 for a well-formed
/// email. The send itself runs in a spawned task, so delivery neither
/// delays nor fails the response; its outcome lands in the logs.
///
/// # Errors
/// - 400: Malformed email
pub async fn request_password_reset(
    form: web::Json<PasswordResetRequest>,
    store: web::Data<dyn UserStore>,
    email_client: web::Data<EmailClient>,
    settings: web::Data<Settings>,
) -> Result<HttpResponse, AppError> {
    let context = ErrorContext::new("password_reset_request");

    let email = validate_email(&form.email)?;

    match store.find_by_email(&email).await? {
        Some(user) if user.active => {
            let token = issue_reset_token(&user.email, &settings.auth)?;
            let reset_link = format!(
                "{}/password-reset/confirm?token={}",
                settings.application.base_url, token
            );
            let html = format!(
                "Hello {},<br />A password reset was requested for your account. \
                 <a href=\"{}\">Click here to choose a new password.</a><br />\
                 The link expires in one hour. If you did not request this, you can \
                 ignore this email.",
                user.name, reset_link
            );

            let client = email_client.get_ref().clone();
            let recipient = user.email.clone();
            let request_id = context.request_id.clone();
            tokio::spawn(async move {
                match client.send_email(&recipient, "Password reset", &html).await {
                    Ok(()) => tracing::info!(
                        request_id = %request_id,
                        email = %recipient,
                        "Password reset email sent"
                    ),
                    Err(e) => tracing::error!(
                        request_id = %request_id,
                        email = %recipient,
                        error = %e,
                        "Failed to send password reset email"
                    ),
                }
            });
        }
        Some(_) => {
            tracing::warn!(
                request_id = %context.request_id,
                email = %email,
                "Password reset requested for inactive account"
            );
        }
        None => {
            tracing::info!(
                request_id = %context.request_id,
                "Password reset requested for unknown email"
            );
        }
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "If the account exists, a reset email has been sent"
    })))
}

/// POST /password-reset/confirm
///
/// Set a new password using a reset token.
///
/// # Errors
/// - 400: Missing fields, mismatched passwords, weak password
/// - 401: The token's account no longer exists
/// - 403: Invalid or expired token
pub async fn confirm_password_reset(
    form: web::Json<ConfirmResetRequest>,
    store: web::Data<dyn UserStore>,
    settings: web::Data<Settings>,
) -> Result<HttpResponse, AppError> {
    let context = ErrorContext::new("password_reset_confirm");

    if form.token.is_empty() {
        return Err(ValidationError::MissingField("token").into());
    }
    if form.password.is_empty() {
        return Err(ValidationError::MissingField("password").into());
    }
    if form.password != form.confirm_password {
        return Err(ValidationError::PasswordMismatch.into());
    }
    validate_password_strength(&form.password)?;

    let claims = verify_reset_token(&form.token, &settings.auth)?;

    let mut user = store
        .find_by_email(&claims.email)
        .await?
        .ok_or_else(|| AppError::Unauthorized("unknown account".to_string()))?;

    user.password_hash = hash_password(&form.password)?;
    let user = store.save(user).await?;

    tracing::info!(
        request_id = %context.request_id,
        user_id = %user.id,
        "Password updated via reset token"
    );

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Password updated"
    })))
}
