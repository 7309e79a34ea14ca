use sqlx::FromRow;
use uuid::Uuid;

/// A user account record.
///
/// `email` is unique across the store and `roles` is never empty. The
/// password is only ever held as a bcrypt hash.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub roles: Vec<String>,
    pub active: bool,
}

/// Data for an account about to be created. The store assigns the id and
/// new accounts start out active.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub roles: Vec<String>,
}
