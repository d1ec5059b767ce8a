//! Router configuration for CORKBOARD.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::handlers::{self, AppState};
use super::middleware::{session_auth, AuthState};

/// Create the main application router.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    let auth_state = Arc::new(AuthState {
        sessions: app_state.sessions.clone(),
        admin_email: app_state.admin_email.clone(),
    });

    // Identity routes (no guard)
    let identity_routes = Router::new()
        .route("/", get(handlers::login_page))
        .route("/signup", get(handlers::signup_page).post(handlers::signup))
        .route("/login", post(handlers::login))
        .route("/logout", get(handlers::logout));

    // Admin panel (guarded per-handler by the AdminUser extractor)
    let admin_routes = Router::new()
        .route("/", get(handlers::list_users))
        .route("/add", post(handlers::add_user))
        .route("/update/:id", post(handlers::update_user))
        .route("/delete/:id", get(handlers::delete_user));

    // Board (guarded per-handler by the CurrentUser extractor)
    let board_routes = Router::new()
        .route("/", get(handlers::list_posts).post(handlers::create_post))
        .route("/:id", get(handlers::show_post))
        .route("/new/create", get(handlers::new_post_form))
        .route("/edit/:id", get(handlers::edit_post_form))
        .route("/update/:id", post(handlers::update_post))
        .route("/delete/:id", post(handlers::delete_post));

    // Clone auth_state for the middleware closure
    let auth_state_for_middleware = auth_state.clone();

    Router::new()
        .merge(identity_routes)
        .nest("/admin", admin_routes)
        .nest("/posts", board_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn(move |req, next| {
                    let state = auth_state_for_middleware.clone();
                    session_auth(state, req, next)
                })),
        )
        .with_state(app_state)
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}
