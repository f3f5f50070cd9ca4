use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A film in the catalog. `likes` holds the ids of users who liked it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Film {
    pub id: u64,
    pub name: String,
    pub description: String,
    #[serde(rename = "releaseDate")]
    pub release_date: NaiveDate,
    pub duration: i32,
    #[serde(default)]
    pub likes: BTreeSet<u64>,
}

/// A registered user. `friends` is kept symmetric by the user service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub email: String,
    pub login: String,
    pub name: String,
    pub birthday: NaiveDate,
    #[serde(default)]
    pub friends: BTreeSet<u64>,
}

// Request DTOs
#[derive(Deserialize, Debug)]
pub struct CreateFilmRequest {
    pub name: String,
    pub description: String,
    #[serde(rename = "releaseDate")]
    pub release_date: NaiveDate,
    pub duration: i32,
}

/// Partial update: absent fields keep their stored values.
#[derive(Deserialize, Debug)]
pub struct UpdateFilmRequest {
    pub id: u64,
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "releaseDate")]
    pub release_date: Option<NaiveDate>,
    pub duration: Option<i32>,
}

#[derive(Deserialize, Debug)]
pub struct CreateUserRequest {
    pub email: String,
    pub login: String,
    pub name: Option<String>,
    pub birthday: NaiveDate,
}

/// Partial update: absent fields keep their stored values.
#[derive(Deserialize, Debug)]
pub struct UpdateUserRequest {
    pub id: u64,
    pub email: Option<String>,
    pub login: Option<String>,
    pub name: Option<String>,
    pub birthday: Option<NaiveDate>,
}

#[derive(Deserialize, Debug)]
pub struct PopularFilmsQuery {
    pub count: Option<i64>,
}
