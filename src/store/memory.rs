use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{Entity, FilmStore, UserStore};
use crate::error::{AppError, Result};
use crate::models::{Film, User};

/// Keyed in-memory storage with a monotonic id counter, shared by the film
/// and user stores. The map and the counter sit behind one mutex so every
/// operation is a single critical section.
pub struct EntityMap<T: Entity> {
    inner: Mutex<Inner<T>>,
}

struct Inner<T> {
    records: BTreeMap<u64, T>,
    next_id: u64,
}

impl<T: Entity> EntityMap<T> {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                records: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Inner<T>>> {
        self.inner
            .lock()
            .map_err(|_| AppError::Internal("Failed to acquire store lock".into()))
    }

    pub fn create(&self, mut entity: T) -> Result<T> {
        let mut inner = self.lock()?;

        // Ids are never reused, even after a delete
        let id = inner.next_id;
        inner.next_id += 1;

        entity.set_id(id);
        inner.records.insert(id, entity.clone());
        Ok(entity)
    }

    pub fn update(&self, mut entity: T, not_found: impl FnOnce(u64) -> String) -> Result<T> {
        let mut inner = self.lock()?;

        let stored = inner
            .records
            .get(&entity.id())
            .ok_or_else(|| AppError::NotFound(not_found(entity.id())))?;

        entity.carry_relations_from(stored);
        inner.records.insert(entity.id(), entity.clone());
        Ok(entity)
    }

    pub fn find_all(&self) -> Result<Vec<T>> {
        let inner = self.lock()?;
        Ok(inner.records.values().cloned().collect())
    }

    pub fn find_by_id(&self, id: u64) -> Result<Option<T>> {
        let inner = self.lock()?;
        Ok(inner.records.get(&id).cloned())
    }

    pub fn delete(&self, id: u64) -> Result<()> {
        let mut inner = self.lock()?;
        inner.records.remove(&id);
        Ok(())
    }

    /// Applies an in-place mutation to one record and returns the new value.
    /// Relationship-set changes go through here rather than `update`, which
    /// deliberately refuses to touch relations.
    pub fn modify(
        &self,
        id: u64,
        not_found: impl FnOnce(u64) -> String,
        f: impl FnOnce(&mut T),
    ) -> Result<T> {
        let mut inner = self.lock()?;
        let record = inner
            .records
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(not_found(id)))?;
        f(record);
        Ok(record.clone())
    }
}

impl<T: Entity> Default for EntityMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// In-memory implementation of FilmStore
pub struct InMemoryFilmStore {
    films: EntityMap<Film>,
}

impl InMemoryFilmStore {
    pub fn new() -> Self {
        Self {
            films: EntityMap::new(),
        }
    }
}

impl Default for InMemoryFilmStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FilmStore for InMemoryFilmStore {
    async fn create(&self, film: Film) -> Result<Film> {
        self.films.create(film)
    }

    async fn update(&self, film: Film) -> Result<Film> {
        self.films.update(film, film_not_found)
    }

    async fn find_all(&self) -> Result<Vec<Film>> {
        self.films.find_all()
    }

    async fn find_by_id(&self, id: u64) -> Result<Option<Film>> {
        self.films.find_by_id(id)
    }

    async fn delete(&self, id: u64) -> Result<()> {
        self.films.delete(id)
    }

    async fn add_like(&self, film_id: u64, user_id: u64) -> Result<Film> {
        self.films
            .modify(film_id, film_not_found, |film| {
                film.likes.insert(user_id);
            })
    }

    async fn remove_like(&self, film_id: u64, user_id: u64) -> Result<Film> {
        self.films
            .modify(film_id, film_not_found, |film| {
                film.likes.remove(&user_id);
            })
    }
}

/// In-memory implementation of UserStore
pub struct InMemoryUserStore {
    users: EntityMap<User>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self {
            users: EntityMap::new(),
        }
    }
}

impl Default for InMemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn create(&self, user: User) -> Result<User> {
        self.users.create(user)
    }

    async fn update(&self, user: User) -> Result<User> {
        self.users.update(user, user_not_found)
    }

    async fn find_all(&self) -> Result<Vec<User>> {
        self.users.find_all()
    }

    async fn find_by_id(&self, id: u64) -> Result<Option<User>> {
        self.users.find_by_id(id)
    }

    async fn delete(&self, id: u64) -> Result<()> {
        self.users.delete(id)
    }

    async fn add_friend(&self, user_id: u64, friend_id: u64) -> Result<User> {
        self.users.modify(user_id, user_not_found, |user| {
            user.friends.insert(friend_id);
        })
    }

    async fn remove_friend(&self, user_id: u64, friend_id: u64) -> Result<User> {
        self.users.modify(user_id, user_not_found, |user| {
            user.friends.remove(&friend_id);
        })
    }
}

fn film_not_found(id: u64) -> String {
    format!("Film with id={} not found", id)
}

fn user_not_found(id: u64) -> String {
    format!("User with id={} not found", id)
}
