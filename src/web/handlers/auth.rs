//! Identity handlers: login, signup and logout.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::Deserialize;

use crate::auth::AuthContext;
use crate::db::{NewUser, UserRepository};
use crate::web::middleware::SESSION_COOKIE;
use crate::web::views;

use super::AppState;

/// Login form fields.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Signup form fields.
#[derive(Debug, Deserialize)]
pub struct SignupForm {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// GET / - login view.
pub async fn login_page() -> Html<String> {
    Html(views::login_page(None))
}

/// GET /signup - signup view.
pub async fn signup_page() -> Html<String> {
    Html(views::signup_page(None))
}

/// POST /login - authenticate and open a session.
///
/// On success the session cookie is set and the user lands on the admin
/// panel (admin email) or the board. On failure the login view is
/// re-rendered with an inline error; there is no redirect.
pub async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Response {
    let repo = UserRepository::new(state.db.pool());
    let user = match repo.get_by_email(&form.email).await {
        Ok(user) => user,
        Err(e) => {
            tracing::error!(error = %e, "login lookup failed");
            return Html(views::login_page(Some("Database error occurred."))).into_response();
        }
    };

    let Some(user) = user else {
        return Html(views::login_page(Some("Invalid email or password"))).into_response();
    };

    if crate::verify_password(&form.password, &user.password).is_err() {
        return Html(views::login_page(Some("Invalid email or password"))).into_response();
    }

    let context = AuthContext {
        user_id: user.user_id,
        user_name: user.user_name.clone(),
        email: user.email.clone(),
    };
    let cookie_value = state.sessions.create(context);
    let jar = jar.add(
        Cookie::build((SESSION_COOKIE, cookie_value))
            .path("/")
            .http_only(true)
            .build(),
    );

    tracing::info!(user_id = user.user_id, "user logged in");
    let target = if user.email == state.admin_email {
        "/admin"
    } else {
        "/posts"
    };
    (jar, Redirect::to(target)).into_response()
}

/// POST /signup - register a new account.
///
/// A duplicate email re-renders the signup view with an inline error;
/// any other failure is a generic server error. Success redirects to
/// the login page.
pub async fn signup(State(state): State<Arc<AppState>>, Form(form): Form<SignupForm>) -> Response {
    let password_hash = match crate::hash_password(&form.password) {
        Ok(hash) => hash,
        Err(e) => {
            tracing::error!(error = %e, "password hashing failed");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Signup failed due to server error.",
            )
                .into_response();
        }
    };

    let repo = UserRepository::new(state.db.pool());
    let new_user = NewUser::new(&form.username, &form.email, password_hash);

    match repo.create(&new_user).await {
        Ok(user) => {
            tracing::info!(user_id = user.user_id, "user registered");
            Redirect::to("/").into_response()
        }
        Err(e) if e.to_string().contains("UNIQUE") => {
            Html(views::signup_page(Some("This email is already registered."))).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "signup failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Signup failed due to server error.",
            )
                .into_response()
        }
    }
}

/// GET /logout - destroy the session and clear the cookie.
///
/// If session teardown itself fails the user is sent back to the board
/// instead of the login page.
pub async fn logout(State(state): State<Arc<AppState>>, jar: CookieJar) -> Response {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        if let Err(e) = state.sessions.destroy(cookie.value()) {
            tracing::error!(error = %e, "session teardown failed");
            return Redirect::to("/posts").into_response();
        }
    }

    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/").build());
    (jar, Redirect::to("/")).into_response()
}
