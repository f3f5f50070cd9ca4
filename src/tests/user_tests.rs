use axum::{http::StatusCode, Router};
use serde_json::json;
use tower::ServiceExt;

use super::utils::{request, response_to_json, test_app, valid_user_body};

async fn create_user(app: &Router, body: serde_json::Value) -> axum::response::Response {
    app.clone()
        .oneshot(request("POST", "/users", Some(body)))
        .await
        .unwrap()
}

#[tokio::test]
async fn test_create_user_assigns_id_and_empty_friends() {
    let app = test_app();

    let response = create_user(&app, valid_user_body("alice@example.com", "alice")).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = response_to_json(response).await;
    assert_eq!(body["id"], 1);
    assert_eq!(body["email"], "alice@example.com");
    assert_eq!(body["friends"], json!([]));
}

#[tokio::test]
async fn test_blank_name_defaults_to_login() {
    let app = test_app();

    let mut body = valid_user_body("bob@example.com", "bob");
    body["name"] = json!("   ");
    let response = create_user(&app, body).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = response_to_json(response).await;
    assert_eq!(body["name"], "bob");
}

#[tokio::test]
async fn test_absent_name_defaults_to_login() {
    let app = test_app();

    let response = create_user(
        &app,
        json!({
            "email": "bob@example.com",
            "login": "bob",
            "birthday": "1990-01-01"
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = response_to_json(response).await;
    assert_eq!(body["name"], "bob");
}

#[tokio::test]
async fn test_duplicate_email_is_rejected_case_insensitively() {
    let app = test_app();
    create_user(&app, valid_user_body("x@y.com", "first")).await;

    let response = create_user(&app, valid_user_body("X@Y.COM", "second")).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_to_json(response).await;
    assert_eq!(body["error"], "Email already in use");
}

#[tokio::test]
async fn test_email_must_contain_at_symbol() {
    let app = test_app();

    let response = create_user(&app, valid_user_body("not-an-email", "alice")).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_must_not_contain_whitespace() {
    let app = test_app();

    let response = create_user(&app, valid_user_body("alice@example.com", "al ice")).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_birthday_must_not_be_in_the_future() {
    let app = test_app();

    let mut body = valid_user_body("alice@example.com", "alice");
    body["birthday"] = json!("2999-01-01");
    let response = create_user(&app, body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_missing_user_returns_404() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(request("GET", "/users/42", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = response_to_json(response).await;
    assert_eq!(body["error"], "User with id=42 not found");
}

#[tokio::test]
async fn test_partial_update_preserves_unset_fields() {
    let app = test_app();
    create_user(&app, valid_user_body("alice@example.com", "alice")).await;

    let response = app
        .clone()
        .oneshot(request(
            "PUT",
            "/users",
            Some(json!({ "id": 1, "name": "Alice Renamed" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_to_json(response).await;
    assert_eq!(body["name"], "Alice Renamed");
    assert_eq!(body["email"], "alice@example.com");
    assert_eq!(body["login"], "alice");
    assert_eq!(body["birthday"], "1990-01-01");
}

#[tokio::test]
async fn test_update_keeping_own_email_is_allowed() {
    let app = test_app();
    create_user(&app, valid_user_body("alice@example.com", "alice")).await;

    let response = app
        .clone()
        .oneshot(request(
            "PUT",
            "/users",
            Some(json!({ "id": 1, "email": "alice@example.com" })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_update_to_another_users_email_is_rejected() {
    let app = test_app();
    create_user(&app, valid_user_body("alice@example.com", "alice")).await;
    create_user(&app, valid_user_body("bob@example.com", "bob")).await;

    let response = app
        .clone()
        .oneshot(request(
            "PUT",
            "/users",
            Some(json!({ "id": 2, "email": "Alice@Example.com" })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_missing_user_returns_404() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(request(
            "PUT",
            "/users",
            Some(json!({ "id": 9, "name": "Ghost" })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_friendship_is_symmetric() {
    let app = test_app();
    create_user(&app, valid_user_body("alice@example.com", "alice")).await;
    create_user(&app, valid_user_body("bob@example.com", "bob")).await;

    let response = app
        .clone()
        .oneshot(request("PUT", "/users/1/friends/2", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let friends_of_1 = response_to_json(
        app.clone()
            .oneshot(request("GET", "/users/1/friends", None))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(friends_of_1[0]["id"], 2);

    let friends_of_2 = response_to_json(
        app.clone()
            .oneshot(request("GET", "/users/2/friends", None))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(friends_of_2[0]["id"], 1);
}

#[tokio::test]
async fn test_add_friend_requires_both_users() {
    let app = test_app();
    create_user(&app, valid_user_body("alice@example.com", "alice")).await;

    let response = app
        .clone()
        .oneshot(request("PUT", "/users/1/friends/9", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .clone()
        .oneshot(request("PUT", "/users/9/friends/1", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_remove_friend_clears_both_sides() {
    let app = test_app();
    create_user(&app, valid_user_body("alice@example.com", "alice")).await;
    create_user(&app, valid_user_body("bob@example.com", "bob")).await;

    app.clone()
        .oneshot(request("PUT", "/users/1/friends/2", None))
        .await
        .unwrap();
    let response = app
        .clone()
        .oneshot(request("DELETE", "/users/1/friends/2", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    for id in [1, 2] {
        let friends = response_to_json(
            app.clone()
                .oneshot(request("GET", &format!("/users/{}/friends", id), None))
                .await
                .unwrap(),
        )
        .await;
        assert_eq!(friends, json!([]));
    }
}

#[tokio::test]
async fn test_user_update_preserves_friends() {
    let app = test_app();
    create_user(&app, valid_user_body("alice@example.com", "alice")).await;
    create_user(&app, valid_user_body("bob@example.com", "bob")).await;

    app.clone()
        .oneshot(request("PUT", "/users/1/friends/2", None))
        .await
        .unwrap();

    let updated = response_to_json(
        app.clone()
            .oneshot(request(
                "PUT",
                "/users",
                Some(json!({ "id": 1, "name": "Renamed" })),
            ))
            .await
            .unwrap(),
    )
    .await;

    assert_eq!(updated["friends"], json!([2]));
}

#[tokio::test]
async fn test_common_friends_is_the_intersection() {
    let app = test_app();
    // users 1..=6; user 1 befriends {2,3,4}, user 6 befriends {3,4,5}
    for login in ["alice", "bob", "carol", "dave", "erin", "frank"] {
        create_user(
            &app,
            valid_user_body(&format!("{}@example.com", login), login),
        )
        .await;
    }

    for friend in [2, 3, 4] {
        app.clone()
            .oneshot(request("PUT", &format!("/users/1/friends/{}", friend), None))
            .await
            .unwrap();
    }
    for friend in [3, 4, 5] {
        app.clone()
            .oneshot(request("PUT", &format!("/users/6/friends/{}", friend), None))
            .await
            .unwrap();
    }

    let common = response_to_json(
        app.clone()
            .oneshot(request("GET", "/users/1/friends/common/6", None))
            .await
            .unwrap(),
    )
    .await;

    let ids: Vec<u64> = common
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids, vec![3, 4]);
}

#[tokio::test]
async fn test_common_friends_requires_both_users() {
    let app = test_app();
    create_user(&app, valid_user_body("alice@example.com", "alice")).await;

    let response = app
        .clone()
        .oneshot(request("GET", "/users/1/friends/common/9", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
