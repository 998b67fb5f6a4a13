//! User account handlers

use axum::{extract::State, http::StatusCode, Json};
use serde_json::json;
use tracing::info;

use crate::config::AppState;
use crate::error::{Error, Result};
use crate::models::{Credentials, NewUser, UpdateUser, User, UserProfile};

/// Assemble the profile view of a user: public fields plus their posts.
pub(crate) async fn profile_for(state: &AppState, user: &User) -> Result<UserProfile> {
    let posts = state.posts.list_for_user(user.id).await?;
    Ok(UserProfile {
        username: user.username.clone(),
        email: user.email.clone(),
        posts,
    })
}

/// POST /user
///
/// Registers a new account. The password is hashed before storage.
pub async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<NewUser>,
) -> Result<(StatusCode, Json<UserProfile>)> {
    info!("POST /user - {}", req.username);

    let user = state
        .users
        .create(&req.username, &req.password, &req.email)
        .await?
        .ok_or(Error::UsernameTaken)?;

    Ok((
        StatusCode::CREATED,
        Json(UserProfile {
            username: user.username,
            email: user.email,
            posts: Vec::new(),
        }),
    ))
}

/// POST /user/login
///
/// Checks credentials and returns the account's profile.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<Credentials>,
) -> Result<Json<UserProfile>> {
    info!("POST /user/login - {}", req.username);

    let user = state
        .tokens
        .authenticate(&state.users, &req.username, &req.password)
        .await?;
    let profile = profile_for(&state, &user).await?;
    Ok(Json(profile))
}

/// GET /user
///
/// Lists every account with its posts.
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserProfile>>> {
    info!("GET /user");

    let users = state.users.list_all().await?;
    let mut profiles = Vec::with_capacity(users.len());
    for user in &users {
        profiles.push(profile_for(&state, user).await?);
    }
    Ok(Json(profiles))
}

/// PUT /user
///
/// Updates the account identified by the current credentials. The new
/// password takes effect immediately; the old one stops working.
pub async fn update_user(
    State(state): State<AppState>,
    Json(req): Json<UpdateUser>,
) -> Result<Json<UserProfile>> {
    info!("PUT /user - {}", req.username);

    let user = state
        .tokens
        .authenticate(&state.users, &req.username, &req.password)
        .await?;
    state
        .users
        .update(user.id, &req.username, &req.new_password, &req.email)
        .await?;
    let updated = state
        .users
        .find_by_id(user.id)
        .await?
        .ok_or(Error::UserNotFound)?;
    let profile = profile_for(&state, &updated).await?;
    Ok(Json(profile))
}

/// DELETE /user
///
/// Deletes the account identified by the credentials, along with all
/// of its posts.
pub async fn delete_user(
    State(state): State<AppState>,
    Json(req): Json<Credentials>,
) -> Result<Json<serde_json::Value>> {
    info!("DELETE /user - {}", req.username);

    let user = state
        .tokens
        .authenticate(&state.users, &req.username, &req.password)
        .await?;
    state.users.delete_cascading(user.id).await?;
    Ok(Json(json!({ "status": "User deleted successfully" })))
}
