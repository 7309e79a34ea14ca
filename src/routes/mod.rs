mod auth;
mod health_check;
mod password_reset;
mod users;

pub use auth::{login, logout, refresh};
pub use health_check::health_check;
pub use password_reset::{confirm_password_reset, request_password_reset};
pub use users::{create_user, delete_user, list_users, update_user};
