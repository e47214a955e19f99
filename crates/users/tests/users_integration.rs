//! Integration tests for the user service.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;
use users::auth::TokenAuthority;
use users::store::UserStore;

const TEST_SECRET: &str = "integration-test-secret";

async fn seeded_app() -> axum::Router {
    let store = UserStore::new();
    store.seed_demo_users().await.unwrap();
    users::create_app(users::AppState {
        store,
        tokens: TokenAuthority::new(TEST_SECRET),
    })
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let app = seeded_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["service"], "users");
}

#[tokio::test]
async fn test_get_seeded_user() {
    let app = seeded_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/users/1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let user = body_json(response).await;
    assert_eq!(user["id"], 1);
    assert_eq!(user["role"], "admin");
    // The hash must never appear in responses.
    assert!(user.get("password_hash").is_none());
}

#[tokio::test]
async fn test_get_unknown_user_returns_404() {
    let app = seeded_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/users/999")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_register_then_login_and_fetch() {
    let app = seeded_app().await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/v1/users/register",
            serde_json::json!({
                "name": "New Buyer",
                "email": "buyer@example.com",
                "password": "hunter2!"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    // Four seeded users occupy IDs 1-4.
    assert_eq!(created["user_id"], 5);

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/v1/users/login",
            serde_json::json!({"email": "buyer@example.com", "password": "hunter2!"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let login = body_json(response).await;
    assert_eq!(login["user_id"], 5);
    assert_eq!(login["role"], "customer");
    let token = login["token"].as_str().unwrap();

    let claims = TokenAuthority::new(TEST_SECRET).verify(token).unwrap();
    assert_eq!(claims.user_id, 5);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/users/5")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_register_duplicate_email_conflicts() {
    let app = seeded_app().await;

    let response = app
        .oneshot(post_json(
            "/api/v1/users/register",
            serde_json::json!({
                "name": "Impostor",
                "email": "user1@test.com",
                "password": "whatever"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("user1@test.com"));
}

#[tokio::test]
async fn test_register_missing_field_is_bad_request() {
    let app = seeded_app().await;

    let response = app
        .oneshot(post_json(
            "/api/v1/users/register",
            serde_json::json!({"name": "No Email", "password": "pw"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("email"));
}

#[tokio::test]
async fn test_login_with_seeded_demo_password() {
    let app = seeded_app().await;

    let response = app
        .oneshot(post_json(
            "/api/v1/users/login",
            serde_json::json!({"email": "user1@test.com", "password": "password"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let login = body_json(response).await;
    assert_eq!(login["user_id"], 2);
}

#[tokio::test]
async fn test_login_wrong_password_unauthorized() {
    let app = seeded_app().await;

    let response = app
        .oneshot(post_json(
            "/api/v1/users/login",
            serde_json::json!({"email": "user1@test.com", "password": "nope"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_unknown_email_same_error_as_wrong_password() {
    let app = seeded_app().await;

    let wrong_password = app
        .clone()
        .oneshot(post_json(
            "/api/v1/users/login",
            serde_json::json!({"email": "user1@test.com", "password": "nope"}),
        ))
        .await
        .unwrap();
    let unknown_email = app
        .oneshot(post_json(
            "/api/v1/users/login",
            serde_json::json!({"email": "ghost@test.com", "password": "password"}),
        ))
        .await
        .unwrap();

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);
    let a = body_json(wrong_password).await;
    let b = body_json(unknown_email).await;
    assert_eq!(a["error"], b["error"]);
}
