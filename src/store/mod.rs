use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Film, User};

// Expose the in-memory store module
pub mod memory;

/// An entity with a store-assigned integer identity and a relationship set
/// (likes for films, friends for users) that updates must carry over.
pub trait Entity: Clone + Send + 'static {
    fn id(&self) -> u64;

    fn set_id(&mut self, id: u64);

    /// Copies the relationship set from the stored record onto `self`, so an
    /// update issued through any path cannot silently drop likes/friends.
    fn carry_relations_from(&mut self, stored: &Self);
}

impl Entity for Film {
    fn id(&self) -> u64 {
        self.id
    }

    fn set_id(&mut self, id: u64) {
        self.id = id;
    }

    fn carry_relations_from(&mut self, stored: &Self) {
        self.likes = stored.likes.clone();
    }
}

impl Entity for User {
    fn id(&self) -> u64 {
        self.id
    }

    fn set_id(&mut self, id: u64) {
        self.id = id;
    }

    fn carry_relations_from(&mut self, stored: &Self) {
        self.friends = stored.friends.clone();
    }
}

/// FilmStore trait defining the interface for film storage implementations
#[async_trait]
pub trait FilmStore: Send + Sync + 'static {
    /// Creates a new film, assigning the next free id
    async fn create(&self, film: Film) -> Result<Film>;

    /// Updates a film's scalar fields, preserving its like set
    async fn update(&self, film: Film) -> Result<Film>;

    /// Gets all films as a snapshot
    async fn find_all(&self) -> Result<Vec<Film>>;

    /// Gets a film by id, `None` when absent
    async fn find_by_id(&self, id: u64) -> Result<Option<Film>>;

    /// Deletes a film; no-op when absent
    async fn delete(&self, id: u64) -> Result<()>;

    /// Adds a user id to a film's like set; idempotent
    async fn add_like(&self, film_id: u64, user_id: u64) -> Result<Film>;

    /// Removes a user id from a film's like set; idempotent
    async fn remove_like(&self, film_id: u64, user_id: u64) -> Result<Film>;
}

/// UserStore trait defining the interface for user storage implementations
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Creates a new user, assigning the next free id
    async fn create(&self, user: User) -> Result<User>;

    /// Updates a user's scalar fields, preserving their friend set
    async fn update(&self, user: User) -> Result<User>;

    /// Gets all users as a snapshot
    async fn find_all(&self) -> Result<Vec<User>>;

    /// Gets a user by id, `None` when absent
    async fn find_by_id(&self, id: u64) -> Result<Option<User>>;

    /// Deletes a user; no-op when absent
    async fn delete(&self, id: u64) -> Result<()>;

    /// Adds `friend_id` to `user_id`'s friend set, one side only; the service
    /// issues the mirror call for the other side
    async fn add_friend(&self, user_id: u64, friend_id: u64) -> Result<User>;

    /// Removes `friend_id` from `user_id`'s friend set, one side only
    async fn remove_friend(&self, user_id: u64, friend_id: u64) -> Result<User>;
}
