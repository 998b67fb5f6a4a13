//! Domain models and request/response types.

use serde::{Deserialize, Serialize};

fn default_published() -> bool {
    true
}

/// User record stored in database
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub email: String,
}

/// Public user profile (no sensitive data)
#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    pub username: String,
    pub email: String,
    pub posts: Vec<PostDisplay>,
}

/// Post record stored in database
#[derive(Debug, Clone, Serialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub published: bool,
    pub user_id: i64,
}

/// Post as exposed by the API, author folded in
#[derive(Debug, Clone, Serialize)]
pub struct PostDisplay {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub published: bool,
    pub author: PostAuthor,
}

#[derive(Debug, Clone, Serialize)]
pub struct PostAuthor {
    pub username: String,
}

impl PostDisplay {
    pub fn from_post(post: Post, username: String) -> Self {
        Self {
            id: post.id,
            title: post.title,
            content: post.content,
            published: post.published,
            author: PostAuthor { username },
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Password change request. The old password re-authenticates the caller.
#[derive(Debug, Deserialize)]
pub struct UpdateUser {
    pub username: String,
    pub password: String,
    pub new_password: String,
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    #[serde(default = "default_published")]
    pub published: bool,
    pub user_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePost {
    pub title: String,
    pub content: String,
    pub published: bool,
}

#[derive(Debug, Deserialize)]
pub struct ProductPayload {
    pub title: String,
    pub description: String,
    pub price: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}
