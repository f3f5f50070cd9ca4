use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::NaiveDate;
use once_cell::sync::Lazy;

use crate::error::{AppError, Result};
use crate::models::{CreateFilmRequest, Film, UpdateFilmRequest};
use crate::services::UserService;
use crate::store::{FilmStore, UserStore};

/// Date of the first public film screening; nothing can predate it.
static MIN_RELEASE_DATE: Lazy<NaiveDate> =
    Lazy::new(|| NaiveDate::from_ymd_opt(1895, 12, 28).expect("valid calendar date"));

const DESCRIPTION_MAX_LEN: usize = 200;
const DEFAULT_POPULAR_COUNT: usize = 10;

/// Business rules over the film store: validation, like bookkeeping, and the
/// popularity ranking. User existence for likes is checked through the user
/// service, generic over its store so tests can substitute one.
pub struct FilmService<F: FilmStore, U: UserStore> {
    store: Arc<F>,
    user_service: UserService<U>,
}

impl<F: FilmStore, U: UserStore> Clone for FilmService<F, U> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            user_service: self.user_service.clone(),
        }
    }
}

impl<F: FilmStore, U: UserStore> FilmService<F, U> {
    pub fn new(store: Arc<F>, user_service: UserService<U>) -> Self {
        Self {
            store,
            user_service,
        }
    }

    pub async fn create(&self, request: CreateFilmRequest) -> Result<Film> {
        let film = Film {
            id: 0,
            name: request.name,
            description: request.description,
            release_date: request.release_date,
            duration: request.duration,
            likes: BTreeSet::new(),
        };

        validate_film(&film)?;

        self.store.create(film).await
    }

    pub async fn update(&self, request: UpdateFilmRequest) -> Result<Film> {
        let mut film = self.get_film_by_id(request.id).await?;

        // Partial update: absent fields keep their stored values; the like
        // set rides along untouched (the store refuses to replace it anyway)
        if let Some(name) = request.name {
            film.name = name;
        }
        if let Some(description) = request.description {
            film.description = description;
        }
        if let Some(release_date) = request.release_date {
            film.release_date = release_date;
        }
        if let Some(duration) = request.duration {
            film.duration = duration;
        }

        validate_film(&film)?;

        self.store.update(film).await
    }

    pub async fn find_all(&self) -> Result<Vec<Film>> {
        self.store.find_all().await
    }

    pub async fn get_film_by_id(&self, id: u64) -> Result<Film> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Film with id={} not found", id)))
    }

    pub async fn add_like(&self, film_id: u64, user_id: u64) -> Result<()> {
        self.get_film_by_id(film_id).await?;
        self.user_service.get_user_by_id(user_id).await?;

        // Set insert, so liking twice is a no-op
        self.store.add_like(film_id, user_id).await?;
        Ok(())
    }

    pub async fn remove_like(&self, film_id: u64, user_id: u64) -> Result<()> {
        self.get_film_by_id(film_id).await?;
        self.user_service.get_user_by_id(user_id).await?;

        self.store.remove_like(film_id, user_id).await?;
        Ok(())
    }

    pub async fn get_popular_films(&self, count: Option<i64>) -> Result<Vec<Film>> {
        let limit = match count {
            Some(count) if count > 0 => count as usize,
            _ => DEFAULT_POPULAR_COUNT,
        };

        let mut films = self.store.find_all().await?;
        // Stable sort keeps store iteration order (creation order) for ties
        films.sort_by(|a, b| b.likes.len().cmp(&a.likes.len()));
        films.truncate(limit);
        Ok(films)
    }
}

fn validate_film(film: &Film) -> Result<()> {
    if film.name.trim().is_empty() {
        return Err(AppError::validation("Film name must not be empty"));
    }
    if film.description.trim().is_empty() {
        return Err(AppError::validation("Film description must not be empty"));
    }
    if film.description.chars().count() > DESCRIPTION_MAX_LEN {
        return Err(AppError::validation(
            "Film description must not exceed 200 characters",
        ));
    }
    if film.release_date < *MIN_RELEASE_DATE {
        return Err(AppError::validation(
            "Release date cannot be earlier than 28 December 1895",
        ));
    }
    if film.duration <= 0 {
        return Err(AppError::validation(
            "Film duration must be a positive number",
        ));
    }
    Ok(())
}
