use sqlx::PgPool;

use crate::dto::user::UserWithPoints;
use crate::error::{Result, StorageError};
use crate::models::User;

/// Repository for User database operations
pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: i64) -> Result<User> {
        sqlx::query_as::<_, User>(
            "SELECT id, username, full_name, is_admin, is_active, created_at \
             FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    /// Create the user if unseen, otherwise refresh the profile fields the
    /// chat platform may have changed.
    pub async fn upsert(&self, id: i64, username: Option<&str>, full_name: &str) -> Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, username, full_name)
            VALUES ($1, $2, $3)
            ON CONFLICT (id) DO UPDATE
            SET username = EXCLUDED.username,
                full_name = EXCLUDED.full_name
            RETURNING id, username, full_name, is_admin, is_active, created_at
            "#,
        )
        .bind(id)
        .bind(username)
        .bind(full_name)
        .fetch_one(self.pool)
        .await?;

        Ok(user)
    }

    pub async fn list_with_points(&self) -> Result<Vec<UserWithPoints>> {
        let users = sqlx::query_as::<_, UserWithPoints>(
            r#"
            SELECT u.id, u.username, u.full_name, u.is_admin, u.is_active, u.created_at,
                   COALESCE(SUM(pa.points), 0) AS points
            FROM users u
            LEFT JOIN point_awards pa ON pa.user_id = u.id
            GROUP BY u.id, u.username, u.full_name, u.is_admin, u.is_active, u.created_at
            ORDER BY u.full_name
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(users)
    }

    pub async fn update_flags(
        &self,
        id: i64,
        is_admin: Option<bool>,
        is_active: Option<bool>,
    ) -> Result<User> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET is_admin = COALESCE($2, is_admin),
                is_active = COALESCE($3, is_active)
            WHERE id = $1
            RETURNING id, username, full_name, is_admin, is_active, created_at
            "#,
        )
        .bind(id)
        .bind(is_admin)
        .bind(is_active)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }
}
