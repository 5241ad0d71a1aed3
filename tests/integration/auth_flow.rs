//! Integration tests for signup, login, and logout.

use actix_web::test;
use serde_json::json;
use tempfile::TempDir;

use crate::helpers::{login, signup, test_app, try_login};

#[actix_rt::test]
async fn test_signup_then_login() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir).await;

    let (status, body) = signup(&app, "alice", "password1").await;
    assert_eq!(status, 201);
    assert_eq!(body["username"], "alice");

    let token = login(&app, "alice", "password1").await;
    assert!(token.starts_with("sbd_"));
}

#[actix_rt::test]
async fn test_duplicate_signup_conflicts_and_keeps_original_password() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir).await;

    let (status, _) = signup(&app, "alice", "password1").await;
    assert_eq!(status, 201);

    let (status, body) = signup(&app, "alice", "different-pass").await;
    assert_eq!(status, 409);
    assert_eq!(body["error"], "DUPLICATE_USERNAME");

    // The original password still works; the attempted one does not
    let (status, _) = try_login(&app, "alice", "password1").await;
    assert_eq!(status, 200);
    let (status, _) = try_login(&app, "alice", "different-pass").await;
    assert_eq!(status, 401);
}

#[actix_rt::test]
async fn test_wrong_password_and_unknown_user_are_indistinct() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir).await;

    signup(&app, "alice", "password1").await;

    let (status, wrong_pw) = try_login(&app, "alice", "nope-nope").await;
    assert_eq!(status, 401);
    let (status, unknown) = try_login(&app, "mallory", "nope-nope").await;
    assert_eq!(status, 401);
    assert_eq!(wrong_pw["message"], unknown["message"]);
}

#[actix_rt::test]
async fn test_signup_rejects_weak_password_and_bad_username() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir).await;

    let (status, body) = signup(&app, "alice", "short").await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "INVALID_INPUT");

    let (status, _) = signup(&app, "../alice", "password1").await;
    assert_eq!(status, 400);
}

#[actix_rt::test]
async fn test_logout_invalidates_the_session() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir).await;

    signup(&app, "alice", "password1").await;
    let token = login(&app, "alice", "password1").await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/logout")
        .insert_header(("X-Session-Token", token.clone()))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status().as_u16(), 204);

    // Token no longer grants access
    let req = test::TestRequest::get()
        .uri("/api/v1/uploads")
        .insert_header(("X-Session-Token", token))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status().as_u16(), 401);
}

#[actix_rt::test]
async fn test_protected_routes_require_a_token() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir).await;

    for uri in ["/api/v1/uploads", "/api/v1/dashboard"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status().as_u16(), 401, "no 401 for {}", uri);
    }

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/logout")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status().as_u16(), 401);
}

#[actix_rt::test]
async fn test_login_rejects_malformed_body() {
    let dir = TempDir::new().unwrap();
    let app = test_app(&dir).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({"username": "alice"}))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status().as_u16(), 400);
}
