use async_trait::async_trait;
use uuid::Uuid;

use super::model::{NewUser, User};
use crate::error::AppError;

/// Storage contract for user accounts.
///
/// Implemented by the Postgres store in production and by an in-memory
/// store in the test suites. Handlers hold it as `Arc<dyn UserStore>` and
/// stay storage-agnostic.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Look up a user by email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Look up a user by id.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError>;

    /// All stored users.
    async fn list(&self) -> Result<Vec<User>, AppError>;

    /// Insert a new user. Fails with `Conflict` when the email is taken.
    async fn create(&self, new_user: NewUser) -> Result<User, AppError>;

    /// Persist changes to an existing user.
    async fn save(&self, user: User) -> Result<User, AppError>;

    /// Delete by id, returning the removed record if it existed.
    async fn delete(&self, id: Uuid) -> Result<Option<User>, AppError>;
}
