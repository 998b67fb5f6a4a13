//! Post handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::json;
use tracing::info;

use crate::auth::Ctx;
use crate::config::AppState;
use crate::error::{Error, Result};
use crate::handlers::users::profile_for;
use crate::models::{NewPost, PostDisplay, UpdatePost};

/// POST /posts
///
/// Creates a post for an existing user.
pub async fn create_post(
    State(state): State<AppState>,
    Json(req): Json<NewPost>,
) -> Result<(StatusCode, Json<PostDisplay>)> {
    info!("POST /posts - {} (user {})", req.title, req.user_id);

    let author = state
        .users
        .find_by_id(req.user_id)
        .await?
        .ok_or(Error::UserNotFound)?;
    let post = state
        .posts
        .create(&req.title, &req.content, req.published, req.user_id)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(PostDisplay::from_post(post, author.username)),
    ))
}

/// GET /posts/{user_id}
///
/// Lists a user's posts, newest last.
pub async fn list_user_posts(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<PostDisplay>>> {
    info!("GET /posts/{}", user_id);

    state
        .users
        .find_by_id(user_id)
        .await?
        .ok_or(Error::UserNotFound)?;
    let posts = state.posts.list_for_user(user_id).await?;
    Ok(Json(posts))
}

/// GET /posts/post/{post_id}
///
/// Returns one post plus the caller's own profile. Requires a bearer
/// token.
pub async fn read_post(
    ctx: Ctx,
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
) -> Result<Json<serde_json::Value>> {
    info!("GET /posts/post/{} - {}", post_id, ctx.user().username);

    let post = state
        .posts
        .get_display(post_id)
        .await?
        .ok_or(Error::PostNotFound)?;
    let profile = profile_for(&state, ctx.user()).await?;
    Ok(Json(json!({ "post": post, "user": profile })))
}

/// PUT /posts/post/{post_id}
///
/// Replaces a post's title, content, and published flag.
pub async fn update_post(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
    Json(req): Json<UpdatePost>,
) -> Result<Json<PostDisplay>> {
    info!("PUT /posts/post/{}", post_id);

    let updated = state
        .posts
        .update(post_id, &req.title, &req.content, req.published)
        .await?;
    if !updated {
        return Err(Error::PostNotFound);
    }
    let post = state
        .posts
        .get_display(post_id)
        .await?
        .ok_or(Error::PostNotFound)?;
    Ok(Json(post))
}

/// DELETE /posts/post/{post_id}
pub async fn delete_post(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
) -> Result<Json<serde_json::Value>> {
    info!("DELETE /posts/post/{}", post_id);

    let deleted = state.posts.delete(post_id).await?;
    if !deleted {
        return Err(Error::PostNotFound);
    }
    Ok(Json(json!({ "message": "Post has been deleted successfully" })))
}
