use axum::{body::Body, Router};
use http::Request;
use serde_json::{json, Value};

use crate::routes;

/// Builds a router backed by fresh, empty in-memory stores
pub fn test_app() -> Router {
    routes::create_router()
}

/// Builds an HTTP request with an optional JSON body
pub fn request(method: &str, path: &str, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(path);

    if body.is_some() {
        builder = builder.header("content-type", "application/json");
    }

    match body {
        Some(json_body) => builder.body(Body::from(json_body.to_string())).unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Extracts the JSON body from a response
pub async fn response_to_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn valid_film_body() -> Value {
    json!({
        "name": "The Arrival of a Train",
        "description": "A train pulls into La Ciotat station",
        "releaseDate": "1896-01-25",
        "duration": 1
    })
}

pub fn valid_user_body(email: &str, login: &str) -> Value {
    json!({
        "email": email,
        "login": login,
        "name": "Test User",
        "birthday": "1990-01-01"
    })
}
