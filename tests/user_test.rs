//! Integration tests for the user CRUD surface.

mod helpers;

use http::StatusCode;
use uuid::Uuid;

use userhub_database::repositories::session::SessionRepository;

#[tokio::test]
async fn create_user_returns_201_without_password_hash() {
    let app = helpers::TestApp::new();

    let response = app
        .request(
            "POST",
            "/user",
            Some(serde_json::json!({
                "username": "alice",
                "email": "alice@example.com",
                "password": "password123",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let body = response.json();
    assert_eq!(body.get("username").and_then(|v| v.as_str()), Some("alice"));
    assert_eq!(
        body.get("email").and_then(|v| v.as_str()),
        Some("alice@example.com")
    );
    assert!(body.get("id").is_some());
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn create_user_with_duplicate_email_is_a_conflict() {
    let app = helpers::TestApp::new();
    app.create_test_user("alice", "alice@example.com", "password123")
        .await;

    let response = app
        .request(
            "POST",
            "/user",
            Some(serde_json::json!({
                "username": "another",
                "email": "alice@example.com",
                "password": "password456",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn create_user_with_invalid_email_is_rejected() {
    let app = helpers::TestApp::new();

    let response = app
        .request(
            "POST",
            "/user",
            Some(serde_json::json!({
                "username": "alice",
                "email": "not-an-email",
                "password": "password123",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn get_user_is_public() {
    let app = helpers::TestApp::new();
    let id = app
        .create_test_user("alice", "alice@example.com", "password123")
        .await;

    let response = app.request("GET", &format!("/user/{id}"), None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.json().get("id").and_then(|v| v.as_str()),
        Some(id.to_string().as_str())
    );
}

#[tokio::test]
async fn get_unknown_user_is_404() {
    let app = helpers::TestApp::new();

    let response = app
        .request("GET", &format!("/user/{}", Uuid::new_v4()), None, None)
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_users_is_public() {
    let app = helpers::TestApp::new();
    app.create_test_user("alice", "alice@example.com", "pw-alice-1")
        .await;
    app.create_test_user("bob", "bob@example.com", "pw-bob-12")
        .await;

    let response = app.request("GET", "/users", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    let body = response.json();
    let users = body.as_array().expect("array body");
    assert_eq!(users.len(), 2);
}

#[tokio::test]
async fn update_user_requires_a_session() {
    let app = helpers::TestApp::new();
    let id = app
        .create_test_user("alice", "alice@example.com", "password123")
        .await;

    let response = app
        .request(
            "PUT",
            &format!("/user/{id}"),
            Some(serde_json::json!({ "username": "renamed" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.text, "Unauthorized");
}

#[tokio::test]
async fn update_user_with_session_renames() {
    let app = helpers::TestApp::new();
    let id = app
        .create_test_user("alice", "alice@example.com", "password123")
        .await;
    let token = app.login("alice@example.com", "password123").await;

    let response = app
        .request(
            "PUT",
            &format!("/user/{id}"),
            Some(serde_json::json!({ "username": "renamed" })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.json().get("username").and_then(|v| v.as_str()),
        Some("renamed")
    );
}

#[tokio::test]
async fn delete_user_requires_a_session() {
    let app = helpers::TestApp::new();
    let id = app
        .create_test_user("alice", "alice@example.com", "password123")
        .await;

    let response = app
        .request("DELETE", &format!("/user/{id}"), None, None)
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn delete_user_cascades_their_sessions() {
    let app = helpers::TestApp::new();
    app.create_test_user("admin", "admin@example.com", "password123")
        .await;
    let victim_id = app
        .create_test_user("victim", "victim@example.com", "password456")
        .await;

    let admin_token = app.login("admin@example.com", "password123").await;
    let victim_token = app.login("victim@example.com", "password456").await;

    let response = app
        .request(
            "DELETE",
            &format!("/user/{victim_id}"),
            None,
            Some(&admin_token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.json().get("message").and_then(|v| v.as_str()),
        Some("User deleted successfully")
    );

    // The victim's session went with the row.
    assert!(
        app.session_repo
            .find_by_token(&victim_token)
            .await
            .unwrap()
            .is_none()
    );

    let lookup = app
        .request("GET", &format!("/user/{victim_id}"), None, None)
        .await;
    assert_eq!(lookup.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_unknown_user_is_404() {
    let app = helpers::TestApp::new();
    app.create_test_user("alice", "alice@example.com", "password123")
        .await;
    let token = app.login("alice@example.com", "password123").await;

    let response = app
        .request(
            "DELETE",
            &format!("/user/{}", Uuid::new_v4()),
            None,
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
