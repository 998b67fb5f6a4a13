//! Posts table.

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use tracing::info;

use crate::models::{Post, PostAuthor, PostDisplay};

/// Queries over the `posts` table.
#[derive(Clone)]
pub struct PostStore {
    pool: SqlitePool,
}

impl PostStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        title: &str,
        content: &str,
        published: bool,
        user_id: i64,
    ) -> Result<Post> {
        let result =
            sqlx::query("INSERT INTO posts (title, content, published, user_id) VALUES (?, ?, ?, ?)")
                .bind(title)
                .bind(content)
                .bind(published)
                .bind(user_id)
                .execute(&self.pool)
                .await
                .context("failed to insert post")?;

        let id = result.last_insert_rowid();
        info!("[store] Post created: {} (id {})", title, id);
        Ok(Post {
            id,
            title: title.to_string(),
            content: content.to_string(),
            published,
            user_id,
        })
    }

    pub async fn get(&self, id: i64) -> Result<Option<Post>> {
        let row: Option<(i64, String, String, bool, i64)> =
            sqlx::query_as("SELECT id, title, content, published, user_id FROM posts WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .context("failed to query post")?;
        Ok(row.map(|(id, title, content, published, user_id)| Post {
            id,
            title,
            content,
            published,
            user_id,
        }))
    }

    /// Fetch a post joined with its author's username.
    pub async fn get_display(&self, id: i64) -> Result<Option<PostDisplay>> {
        let row: Option<(i64, String, String, bool, String)> = sqlx::query_as(
            "SELECT p.id, p.title, p.content, p.published, u.username
             FROM posts p JOIN users u ON u.id = p.user_id
             WHERE p.id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("failed to query post with author")?;
        Ok(row.map(|(id, title, content, published, username)| PostDisplay {
            id,
            title,
            content,
            published,
            author: PostAuthor { username },
        }))
    }

    pub async fn list_for_user(&self, user_id: i64) -> Result<Vec<PostDisplay>> {
        let rows: Vec<(i64, String, String, bool, String)> = sqlx::query_as(
            "SELECT p.id, p.title, p.content, p.published, u.username
             FROM posts p JOIN users u ON u.id = p.user_id
             WHERE p.user_id = ?
             ORDER BY p.id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .context("failed to list posts")?;
        Ok(rows
            .into_iter()
            .map(|(id, title, content, published, username)| PostDisplay {
                id,
                title,
                content,
                published,
                author: PostAuthor { username },
            })
            .collect())
    }

    /// Returns false when no post has this id.
    pub async fn update(&self, id: i64, title: &str, content: &str, published: bool) -> Result<bool> {
        let result = sqlx::query("UPDATE posts SET title = ?, content = ?, published = ? WHERE id = ?")
            .bind(title)
            .bind(content)
            .bind(published)
            .bind(id)
            .execute(&self.pool)
            .await
            .context("failed to update post")?;
        Ok(result.rows_affected() > 0)
    }

    /// Returns false when no post has this id.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM posts WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("failed to delete post")?;
        Ok(result.rows_affected() > 0)
    }
}
