use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::Utc;

use crate::error::{AppError, Result};
use crate::models::{CreateUserRequest, UpdateUserRequest, User};
use crate::store::UserStore;

/// Business rules over the user store: field validation, case-insensitive
/// email uniqueness, and symmetric friendship bookkeeping.
pub struct UserService<S: UserStore> {
    store: Arc<S>,
}

// Manual Clone: `S` itself need not be Clone behind the Arc
impl<S: UserStore> Clone for UserService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: UserStore> UserService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub async fn create(&self, request: CreateUserRequest) -> Result<User> {
        // Blank or absent display name falls back to the login
        let name = match request.name {
            Some(name) if !name.trim().is_empty() => name,
            _ => request.login.clone(),
        };

        let user = User {
            id: 0,
            email: request.email,
            login: request.login,
            name,
            birthday: request.birthday,
            friends: BTreeSet::new(),
        };

        validate_user(&user)?;
        self.ensure_email_free(&user.email, None).await?;

        self.store.create(user).await
    }

    pub async fn update(&self, request: UpdateUserRequest) -> Result<User> {
        let mut user = self.get_user_by_id(request.id).await?;

        // Partial update: absent fields keep their stored values
        if let Some(email) = request.email {
            user.email = email;
        }
        if let Some(login) = request.login {
            user.login = login;
        }
        if let Some(name) = request.name {
            user.name = name;
        }
        if let Some(birthday) = request.birthday {
            user.birthday = birthday;
        }

        validate_user(&user)?;
        // Colliding with one's own unchanged email is allowed
        self.ensure_email_free(&user.email, Some(user.id)).await?;

        self.store.update(user).await
    }

    pub async fn find_all(&self) -> Result<Vec<User>> {
        self.store.find_all().await
    }

    pub async fn get_user_by_id(&self, id: u64) -> Result<User> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User with id={} not found", id)))
    }

    pub async fn add_friend(&self, user_id: u64, friend_id: u64) -> Result<()> {
        self.get_user_by_id(user_id).await?;
        self.get_user_by_id(friend_id).await?;

        // Two single-sided updates, no enclosing transaction: an interleaving
        // between them can briefly leave the friendship one-sided.
        self.store.add_friend(user_id, friend_id).await?;
        self.store.add_friend(friend_id, user_id).await?;

        Ok(())
    }

    pub async fn remove_friend(&self, user_id: u64, friend_id: u64) -> Result<()> {
        self.get_user_by_id(user_id).await?;
        self.get_user_by_id(friend_id).await?;

        self.store.remove_friend(user_id, friend_id).await?;
        self.store.remove_friend(friend_id, user_id).await?;

        Ok(())
    }

    pub async fn get_friends(&self, user_id: u64) -> Result<Vec<User>> {
        let user = self.get_user_by_id(user_id).await?;

        let mut friends = Vec::with_capacity(user.friends.len());
        for friend_id in &user.friends {
            // A dangling id is only reachable through an out-of-band store
            // delete, and surfaces as NotFound
            friends.push(self.get_user_by_id(*friend_id).await?);
        }
        Ok(friends)
    }

    pub async fn get_common_friends(&self, user_id: u64, other_id: u64) -> Result<Vec<User>> {
        let user = self.get_user_by_id(user_id).await?;
        let other = self.get_user_by_id(other_id).await?;

        let mut common = Vec::new();
        for friend_id in &user.friends {
            if other.friends.contains(friend_id) {
                common.push(self.get_user_by_id(*friend_id).await?);
            }
        }
        Ok(common)
    }

    async fn ensure_email_free(&self, email: &str, own_id: Option<u64>) -> Result<()> {
        let taken = self
            .store
            .find_all()
            .await?
            .iter()
            .filter(|u| own_id != Some(u.id))
            .any(|u| u.email.eq_ignore_ascii_case(email));

        if taken {
            return Err(AppError::validation("Email already in use"));
        }
        Ok(())
    }
}

fn validate_user(user: &User) -> Result<()> {
    if user.email.trim().is_empty() || !user.email.contains('@') {
        return Err(AppError::validation("Email must contain the @ symbol"));
    }
    if user.login.is_empty() || user.login.chars().any(char::is_whitespace) {
        return Err(AppError::validation(
            "Login must be non-empty and contain no whitespace",
        ));
    }
    if user.birthday > Utc::now().date_naive() {
        return Err(AppError::validation("Birthday cannot be in the future"));
    }
    Ok(())
}
