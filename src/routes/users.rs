/// User Management Routes
///
/// CRUD over user accounts, all behind the access-token guard. Request
/// and response bodies follow the public API's camelCase convention and
/// never expose password hashes.

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::{hash_password, validate_password_strength, AccessClaims};
use crate::configuration::Settings;
use crate::error::{AppError, ErrorContext, ValidationError};
use crate::users::{NewUser, User, UserStore};
use crate::validators::{validate_email, validate_name};

/// User representation returned by the API
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub last_name: String,
    pub email: String,
    pub roles: Vec<String>,
    pub active: bool,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            roles: user.roles.clone(),
            active: user.active,
        }
    }
}

/// New user request
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub roles: Option<Vec<String>>,
}

/// User update request. `id`, `email` and `roles` are required; the rest
/// only change when present.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub id: String,
    pub email: String,
    pub roles: Vec<String>,
    pub password: Option<String>,
    pub name: Option<String>,
    pub last_name: Option<String>,
    pub active: Option<bool>,
}

/// User delete request
#[derive(Deserialize)]
pub struct DeleteUserRequest {
    pub id: String,
}

fn parse_user_id(id: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat("id").into())
}

/// GET /users
///
/// List all accounts.
///
/// # Errors
/// - 400: The store holds no users at all
pub async fn list_users(store: web::Data<dyn UserStore>) -> Result<HttpResponse, AppError> {
    let users = store.list().await?;

    if users.is_empty() {
        return Err(ValidationError::NotFound("users").into());
    }

    let body: Vec<UserResponse> = users.iter().map(UserResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// POST /users
///
/// Create a new account. Checks run in order: field presence, email not
/// already taken, password confirmation, password strength. Roles default
/// to the configured role when omitted; an explicitly empty roles array
/// is rejected.
///
/// # Errors
/// - 400: Missing fields, empty roles, mismatched passwords, weak password
/// - 409: Email already registered
pub async fn create_user(
    form: web::Json<CreateUserRequest>,
    store: web::Data<dyn UserStore>,
    settings: web::Data<Settings>,
) -> Result<HttpResponse, AppError> {
    let context = ErrorContext::new("create_user");

    let name = validate_name("name", &form.name)?;
    let last_name = validate_name("lastName", &form.last_name)?;
    let email = validate_email(&form.email)?;
    if form.password.is_empty() {
        return Err(ValidationError::MissingField("password").into());
    }
    if form.confirm_password.is_empty() {
        return Err(ValidationError::MissingField("confirmPassword").into());
    }
    let roles = match &form.roles {
        Some(roles) if roles.is_empty() => {
            return Err(ValidationError::MissingField("roles").into())
        }
        Some(roles) => roles.clone(),
        None => vec![settings.application.default_role.clone()],
    };

    if store.find_by_email(&email).await?.is_some() {
        return Err(AppError::Conflict("email already exists".to_string()));
    }

    if form.password != form.confirm_password {
        return Err(ValidationError::PasswordMismatch.into());
    }

    validate_password_strength(&form.password)?;
    let password_hash = hash_password(&form.password)?;

    let user = store
        .create(NewUser {
            name,
            last_name,
            email,
            password_hash,
            roles,
        })
        .await?;

    tracing::info!(
        request_id = %context.request_id,
        user_id = %user.id,
        "User created successfully"
    );

    Ok(HttpResponse::Created().json(serde_json::json!({
        "message": format!("New user {} {} created", user.name, user.last_name)
    })))
}

/// PATCH /users
///
/// Update an account. Email and roles are always rewritten; name, last
/// name, active flag and password only change when provided. A new
/// password is strength-checked and rehashed.
///
/// # Errors
/// - 400: Missing fields, empty roles, unknown id, weak password
/// - 409: Email belongs to a different account
pub async fn update_user(
    form: web::Json<UpdateUserRequest>,
    store: web::Data<dyn UserStore>,
) -> Result<HttpResponse, AppError> {
    let context = ErrorContext::new("update_user");

    let id = parse_user_id(&form.id)?;
    let email = validate_email(&form.email)?;
    if form.roles.is_empty() {
        return Err(ValidationError::MissingField("roles").into());
    }

    let mut user = store
        .find_by_id(id)
        .await?
        .ok_or(ValidationError::NotFound("user"))?;

    if let Some(holder) = store.find_by_email(&email).await? {
        if holder.id != user.id {
            return Err(AppError::Conflict("email already exists".to_string()));
        }
    }

    user.email = email;
    user.roles = form.roles.clone();

    if let Some(name) = &form.name {
        user.name = validate_name("name", name)?;
    }
    if let Some(last_name) = &form.last_name {
        user.last_name = validate_name("lastName", last_name)?;
    }
    if let Some(active) = form.active {
        user.active = active;
    }
    if let Some(password) = form.password.as_deref().filter(|p| !p.is_empty()) {
        validate_password_strength(password)?;
        user.password_hash = hash_password(password)?;
    }

    let updated = store.save(user).await?;

    tracing::info!(
        request_id = %context.request_id,
        user_id = %updated.id,
        "User updated successfully"
    );

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": format!("{} updated", updated.email)
    })))
}

/// DELETE /users
///
/// Remove an account by id. The reply body is a bare JSON string naming
/// the removed account, the shape existing clients parse.
///
/// # Errors
/// - 400: Malformed or unknown id
pub async fn delete_user(
    form: web::Json<DeleteUserRequest>,
    claims: web::ReqData<AccessClaims>,
    store: web::Data<dyn UserStore>,
) -> Result<HttpResponse, AppError> {
    let context = ErrorContext::new("delete_user");

    let id = parse_user_id(&form.id)?;

    let deleted = store
        .delete(id)
        .await?
        .ok_or(ValidationError::NotFound("user"))?;

    tracing::info!(
        request_id = %context.request_id,
        user_id = %deleted.id,
        deleted_by = %claims.user_info.email,
        "User deleted successfully"
    );

    let reply = format!("email {} with ID {} deleted", deleted.email, deleted.id);
    Ok(HttpResponse::Ok().json(reply))
}
