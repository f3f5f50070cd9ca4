use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::error::Result;
use crate::models::{CreateUserRequest, UpdateUserRequest, User};
use crate::routes::AppState;
use crate::store::{FilmStore, UserStore};

// GET /users
pub async fn get_users<F, U>(State(state): State<Arc<AppState<F, U>>>) -> Result<Json<Vec<User>>>
where
    F: FilmStore,
    U: UserStore,
{
    tracing::info!("Listing all users");
    let users = state.user_service.find_all().await?;
    Ok(Json(users))
}

// GET /users/:id
pub async fn get_user<F, U>(
    State(state): State<Arc<AppState<F, U>>>,
    Path(id): Path<u64>,
) -> Result<Json<User>>
where
    F: FilmStore,
    U: UserStore,
{
    tracing::info!("Fetching user id={}", id);
    let user = state.user_service.get_user_by_id(id).await?;
    Ok(Json(user))
}

// POST /users
pub async fn create_user<F, U>(
    State(state): State<Arc<AppState<F, U>>>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>)>
where
    F: FilmStore,
    U: UserStore,
{
    tracing::info!("Creating user email={}", payload.email);
    let user = state.user_service.create(payload).await?;
    tracing::info!("User created with id={}", user.id);
    Ok((StatusCode::CREATED, Json(user)))
}

// PUT /users
pub async fn update_user<F, U>(
    State(state): State<Arc<AppState<F, U>>>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<Json<User>>
where
    F: FilmStore,
    U: UserStore,
{
    tracing::info!("Updating user id={}", payload.id);
    let user = state.user_service.update(payload).await?;
    Ok(Json(user))
}

// PUT /users/:id/friends/:friend_id
pub async fn add_friend<F, U>(
    State(state): State<Arc<AppState<F, U>>>,
    Path((user_id, friend_id)): Path<(u64, u64)>,
) -> Result<Json<serde_json::Value>>
where
    F: FilmStore,
    U: UserStore,
{
    tracing::info!("User id={} befriends user id={}", user_id, friend_id);
    state.user_service.add_friend(user_id, friend_id).await?;
    Ok(Json(serde_json::json!({ "message": "Friend added" })))
}

// DELETE /users/:id/friends/:friend_id
pub async fn remove_friend<F, U>(
    State(state): State<Arc<AppState<F, U>>>,
    Path((user_id, friend_id)): Path<(u64, u64)>,
) -> Result<Json<serde_json::Value>>
where
    F: FilmStore,
    U: UserStore,
{
    tracing::info!("User id={} unfriends user id={}", user_id, friend_id);
    state.user_service.remove_friend(user_id, friend_id).await?;
    Ok(Json(serde_json::json!({ "message": "Friend removed" })))
}

// GET /users/:id/friends
pub async fn get_friends<F, U>(
    State(state): State<Arc<AppState<F, U>>>,
    Path(id): Path<u64>,
) -> Result<Json<Vec<User>>>
where
    F: FilmStore,
    U: UserStore,
{
    tracing::info!("Listing friends of user id={}", id);
    let friends = state.user_service.get_friends(id).await?;
    Ok(Json(friends))
}

// GET /users/:id/friends/common/:other_id
pub async fn get_common_friends<F, U>(
    State(state): State<Arc<AppState<F, U>>>,
    Path((id, other_id)): Path<(u64, u64)>,
) -> Result<Json<Vec<User>>>
where
    F: FilmStore,
    U: UserStore,
{
    tracing::info!("Listing common friends of user id={} and id={}", id, other_id);
    let friends = state.user_service.get_common_friends(id, other_id).await?;
    Ok(Json(friends))
}
