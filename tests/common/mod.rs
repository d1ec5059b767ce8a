//! Test helpers for web integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::{TestResponse, TestServer};

use corkboard::web::handlers::AppState;
use corkboard::web::router::create_router;
use corkboard::{Database, SessionStore};

/// Admin email configured for the test server.
pub const ADMIN_EMAIL: &str = "admin@example.com";

/// Create a test server with an in-memory database.
///
/// The server saves cookies between requests, so a login carries over
/// to subsequent requests like a browser session.
pub async fn create_test_server() -> (TestServer, Database) {
    let db = Database::open_in_memory()
        .await
        .expect("Failed to create test database");

    let sessions = Arc::new(SessionStore::new("test-secret-key"));
    let app_state = Arc::new(AppState::new(db.clone(), sessions, ADMIN_EMAIL));

    let router = create_router(app_state);

    let mut server = TestServer::new(router).expect("Failed to create test server");
    server.save_cookies();

    (server, db)
}

/// Register an account through the signup form.
pub async fn signup(server: &TestServer, username: &str, email: &str, password: &str) {
    let response = server
        .post("/signup")
        .form(&[
            ("username", username),
            ("email", email),
            ("password", password),
        ])
        .await;
    response.assert_status(StatusCode::SEE_OTHER);
}

/// Log in through the login form.
pub async fn login(server: &TestServer, email: &str, password: &str) -> TestResponse {
    server
        .post("/login")
        .form(&[("email", email), ("password", password)])
        .await
}

/// Register and log in a fresh user.
pub async fn signup_and_login(server: &TestServer, username: &str, email: &str, password: &str) {
    signup(server, username, email, password).await;
    let response = login(server, email, password).await;
    response.assert_status(StatusCode::SEE_OTHER);
}

/// Create a post through the board form.
pub async fn create_post(
    server: &TestServer,
    title: &str,
    content: &str,
    post_type: &str,
) -> TestResponse {
    server
        .post("/posts")
        .form(&[("title", title), ("content", content), ("type", post_type)])
        .await
}

/// Fetch a post's view counter straight from the database.
pub async fn post_views(db: &Database, id: i64) -> i64 {
    sqlx::query_scalar("SELECT views FROM posts WHERE id = ?")
        .bind(id)
        .fetch_one(db.pool())
        .await
        .unwrap()
}

/// ID of the most recently created post.
pub async fn latest_post_id(db: &Database) -> i64 {
    sqlx::query_scalar("SELECT MAX(id) FROM posts")
        .fetch_one(db.pool())
        .await
        .unwrap()
}

/// Number of user rows in the database.
pub async fn user_count(db: &Database) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(db.pool())
        .await
        .unwrap()
}

/// Number of post rows in the database.
pub async fn post_count(db: &Database) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM posts")
        .fetch_one(db.pool())
        .await
        .unwrap()
}

/// Count non-overlapping occurrences of a needle in a haystack.
pub fn count_occurrences(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}
