use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::error::Result;
use crate::models::{CreateFilmRequest, Film, PopularFilmsQuery, UpdateFilmRequest};
use crate::routes::AppState;
use crate::store::{FilmStore, UserStore};

// GET /films
pub async fn get_films<F, U>(State(state): State<Arc<AppState<F, U>>>) -> Result<Json<Vec<Film>>>
where
    F: FilmStore,
    U: UserStore,
{
    tracing::info!("Listing all films");
    let films = state.film_service.find_all().await?;
    Ok(Json(films))
}

// GET /films/:id
pub async fn get_film<F, U>(
    State(state): State<Arc<AppState<F, U>>>,
    Path(id): Path<u64>,
) -> Result<Json<Film>>
where
    F: FilmStore,
    U: UserStore,
{
    tracing::info!("Fetching film id={}", id);
    let film = state.film_service.get_film_by_id(id).await?;
    Ok(Json(film))
}

// POST /films
pub async fn create_film<F, U>(
    State(state): State<Arc<AppState<F, U>>>,
    Json(payload): Json<CreateFilmRequest>,
) -> Result<(StatusCode, Json<Film>)>
where
    F: FilmStore,
    U: UserStore,
{
    tracing::info!("Creating film name={}", payload.name);
    let film = state.film_service.create(payload).await?;
    tracing::info!("Film created with id={}", film.id);
    Ok((StatusCode::CREATED, Json(film)))
}

// PUT /films
pub async fn update_film<F, U>(
    State(state): State<Arc<AppState<F, U>>>,
    Json(payload): Json<UpdateFilmRequest>,
) -> Result<Json<Film>>
where
    F: FilmStore,
    U: UserStore,
{
    tracing::info!("Updating film id={}", payload.id);
    let film = state.film_service.update(payload).await?;
    Ok(Json(film))
}

// PUT /films/:id/like/:user_id
pub async fn add_like<F, U>(
    State(state): State<Arc<AppState<F, U>>>,
    Path((film_id, user_id)): Path<(u64, u64)>,
) -> Result<Json<serde_json::Value>>
where
    F: FilmStore,
    U: UserStore,
{
    tracing::info!("User id={} likes film id={}", user_id, film_id);
    state.film_service.add_like(film_id, user_id).await?;
    Ok(Json(serde_json::json!({ "message": "Like added" })))
}

// DELETE /films/:id/like/:user_id
pub async fn remove_like<F, U>(
    State(state): State<Arc<AppState<F, U>>>,
    Path((film_id, user_id)): Path<(u64, u64)>,
) -> Result<Json<serde_json::Value>>
where
    F: FilmStore,
    U: UserStore,
{
    tracing::info!("User id={} unlikes film id={}", user_id, film_id);
    state.film_service.remove_like(film_id, user_id).await?;
    Ok(Json(serde_json::json!({ "message": "Like removed" })))
}

// GET /films/popular?count=N
pub async fn get_popular_films<F, U>(
    State(state): State<Arc<AppState<F, U>>>,
    Query(params): Query<PopularFilmsQuery>,
) -> Result<Json<Vec<Film>>>
where
    F: FilmStore,
    U: UserStore,
{
    tracing::info!("Listing popular films, count={:?}", params.count);
    let films = state.film_service.get_popular_films(params.count).await?;
    Ok(Json(films))
}
