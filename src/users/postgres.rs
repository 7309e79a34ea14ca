use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::model::{NewUser, User};
use super::store::UserStore;
use crate::error::AppError;

/// Postgres-backed user store.
///
/// `roles` maps onto a TEXT[] column; everything else is scalar. Unique
/// email violations surface as `Conflict` through the sqlx error
/// conversion.
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, last_name, email, password_hash, roles, active \
             FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, last_name, email, password_hash, roles, active \
             FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn list(&self) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>(
            "SELECT id, name, last_name, email, password_hash, roles, active \
             FROM users ORDER BY email",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let user = User {
            id: Uuid::new_v4(),
            name: new_user.name,
            last_name: new_user.last_name,
            email: new_user.email,
            password_hash: new_user.password_hash,
            roles: new_user.roles,
            active: true,
        };

        sqlx::query(
            "INSERT INTO users (id, name, last_name, email, password_hash, roles, active) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.roles)
        .bind(user.active)
        .execute(&self.pool)
        .await?;

        Ok(user)
    }

    async fn save(&self, user: User) -> Result<User, AppError> {
        sqlx::query(
            "UPDATE users \
             SET name = $2, last_name = $3, email = $4, password_hash = $5, roles = $6, active = $7 \
             WHERE id = $1",
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.roles)
        .bind(user.active)
        .execute(&self.pool)
        .await?;

        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let user = self.find_by_id(id).await?;

        if user.is_some() {
            sqlx::query("DELETE FROM users WHERE id = $1")
                .bind(id)
                .execute(&self.pool)
                .await?;
        }

        Ok(user)
    }
}
