use axum::{
    extract::Request,
    middleware,
    routing::{get, put},
    Router,
};
use log::{info, warn};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::handlers::{
    film_handlers::{
        add_like, create_film, get_film, get_films, get_popular_films, remove_like, update_film,
    },
    user_handlers::{
        add_friend, create_user, get_common_friends, get_friends, get_user, get_users,
        remove_friend, update_user,
    },
};
use crate::services::{FilmService, UserService};
use crate::store::memory::{InMemoryFilmStore, InMemoryUserStore};
use crate::store::{FilmStore, UserStore};

/// Shared application state: the two services, each generic over its store.
pub struct AppState<F: FilmStore, U: UserStore> {
    pub film_service: FilmService<F, U>,
    pub user_service: UserService<U>,
}

/// Creates a router backed by fresh in-memory stores
pub fn create_router() -> Router {
    info!("Creating router with in-memory stores");

    let film_store = Arc::new(InMemoryFilmStore::new());
    let user_store = Arc::new(InMemoryUserStore::new());

    let user_service = UserService::new(user_store);
    let film_service = FilmService::new(film_store, user_service.clone());

    create_router_with_state(Arc::new(AppState {
        film_service,
        user_service,
    }))
}

/// Creates a router over the given application state
pub fn create_router_with_state<F, U>(state: Arc<AppState<F, U>>) -> Router
where
    F: FilmStore,
    U: UserStore,
{
    info!("Setting up API routes");

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Logging middleware to trace all requests
    async fn logging_middleware(
        req: Request,
        next: axum::middleware::Next,
    ) -> impl axum::response::IntoResponse {
        info!(
            "Router received request: method={}, uri={}",
            req.method(),
            req.uri()
        );
        next.run(req).await
    }

    let router = Router::new()
        .route(
            "/films",
            get(get_films).post(create_film).put(update_film),
        )
        .route("/films/popular", get(get_popular_films))
        .route("/films/:id", get(get_film))
        .route("/films/:id/like/:user_id", put(add_like).delete(remove_like))
        .route(
            "/users",
            get(get_users).post(create_user).put(update_user),
        )
        .route("/users/:id", get(get_user))
        .route("/users/:id/friends", get(get_friends))
        .route(
            "/users/:id/friends/common/:other_id",
            get(get_common_friends),
        )
        .route(
            "/users/:id/friends/:friend_id",
            put(add_friend).delete(remove_friend),
        )
        .with_state(state)
        .layer(cors)
        .layer(middleware::from_fn(logging_middleware));

    // Add a fallback handler for 404s
    router.fallback(|req: Request| async move {
        warn!("No route matched for: {} {}", req.method(), req.uri());
        (
            axum::http::StatusCode::NOT_FOUND,
            "The requested resource was not found".to_string(),
        )
    })
}
