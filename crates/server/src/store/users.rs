//! User accounts table.

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use tracing::info;

use crate::auth::password;
use crate::models::User;

/// Queries over the `users` table.
#[derive(Clone)]
pub struct UserStore {
    pool: SqlitePool,
}

impl UserStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a user with a freshly hashed password.
    ///
    /// Returns `Ok(None)` when the username is already taken.
    pub async fn create(&self, username: &str, password: &str, email: &str) -> Result<Option<User>> {
        let existing: Option<(i64,)> = sqlx::query_as("SELECT id FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .context("failed to check username")?;
        if existing.is_some() {
            return Ok(None);
        }

        let password_hash = password::hash(password).context("failed to hash password")?;
        let result = sqlx::query("INSERT INTO users (username, password_hash, email) VALUES (?, ?, ?)")
            .bind(username)
            .bind(&password_hash)
            .bind(email)
            .execute(&self.pool)
            .await
            .context("failed to insert user")?;

        let id = result.last_insert_rowid();
        info!("[store] User created: {} (id {})", username, id);
        Ok(Some(User {
            id,
            username: username.to_string(),
            password_hash,
            email: email.to_string(),
        }))
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let row: Option<(i64, String, String, String)> =
            sqlx::query_as("SELECT id, username, password_hash, email FROM users WHERE username = ?")
                .bind(username)
                .fetch_optional(&self.pool)
                .await
                .context("failed to query user by username")?;
        Ok(row.map(|(id, username, password_hash, email)| User {
            id,
            username,
            password_hash,
            email,
        }))
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        let row: Option<(i64, String, String, String)> =
            sqlx::query_as("SELECT id, username, password_hash, email FROM users WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .context("failed to query user by id")?;
        Ok(row.map(|(id, username, password_hash, email)| User {
            id,
            username,
            password_hash,
            email,
        }))
    }

    pub async fn list_all(&self) -> Result<Vec<User>> {
        let rows: Vec<(i64, String, String, String)> =
            sqlx::query_as("SELECT id, username, password_hash, email FROM users ORDER BY id")
                .fetch_all(&self.pool)
                .await
                .context("failed to list users")?;
        Ok(rows
            .into_iter()
            .map(|(id, username, password_hash, email)| User {
                id,
                username,
                password_hash,
                email,
            })
            .collect())
    }

    /// Replace the user's profile fields, rehashing the new password.
    pub async fn update(
        &self,
        id: i64,
        username: &str,
        new_password: &str,
        email: &str,
    ) -> Result<()> {
        let password_hash = password::hash(new_password).context("failed to hash password")?;
        sqlx::query("UPDATE users SET username = ?, password_hash = ?, email = ? WHERE id = ?")
            .bind(username)
            .bind(&password_hash)
            .bind(email)
            .bind(id)
            .execute(&self.pool)
            .await
            .context("failed to update user")?;
        info!("[store] User {} updated", id);
        Ok(())
    }

    /// Delete the user and every post they authored, atomically.
    pub async fn delete_cascading(&self, id: i64) -> Result<()> {
        let mut tx = self.pool.begin().await.context("failed to open transaction")?;
        sqlx::query("DELETE FROM posts WHERE user_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .context("failed to delete user posts")?;
        sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .context("failed to delete user")?;
        tx.commit().await.context("failed to commit user deletion")?;
        info!("[store] User {} deleted with their posts", id);
        Ok(())
    }
}
