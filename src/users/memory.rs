use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::model::{NewUser, User};
use super::store::UserStore;
use crate::error::AppError;

/// In-memory user store.
///
/// Backs the test suites so they run without a database. Mirrors the
/// Postgres store's behavior, including the unique-email conflict and the
/// email-ordered listing.
pub struct InMemoryUserStore {
    users: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<User>, AppError> {
        let users = self.users.read().await;
        let mut all: Vec<User> = users.values().cloned().collect();
        all.sort_by(|a, b| a.email.cmp(&b.email));
        Ok(all)
    }

    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let mut users = self.users.write().await;

        if users.values().any(|u| u.email == new_user.email) {
            return Err(AppError::Conflict("email already exists".to_string()));
        }

        let user = User {
            id: Uuid::new_v4(),
            name: new_user.name,
            last_name: new_user.last_name,
            email: new_user.email,
            password_hash: new_user.password_hash,
            roles: new_user.roles,
            active: true,
        };
        users.insert(user.id, user.clone());

        Ok(user)
    }

    async fn save(&self, user: User) -> Result<User, AppError> {
        let mut users = self.users.write().await;
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let mut users = self.users.write().await;
        Ok(users.remove(&id))
    }
}
