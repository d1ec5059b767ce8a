//! Session middleware and route guards for CORKBOARD.
//!
//! The middleware resolves the session cookie once per request and
//! attaches the result as an extension. The `CurrentUser` and
//! `AdminUser` extractors are the two guards; their only failure signal
//! is a redirect to the login page.

use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, Request},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;

use crate::auth::{AuthContext, SessionStore};

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "corkboard_sid";

/// State shared with the session middleware.
pub struct AuthState {
    /// The session store backing cookie resolution.
    pub sessions: Arc<SessionStore>,
    /// Email address granted access to the admin panel.
    pub admin_email: String,
}

/// Resolved session for the current request, attached as an extension.
#[derive(Debug, Clone)]
pub struct SessionUser(pub Option<AuthContext>);

/// Resolve the session cookie and attach the result to the request.
pub async fn session_auth(state: Arc<AuthState>, mut request: Request, next: Next) -> Response {
    let jar = CookieJar::from_headers(request.headers());
    let context = jar
        .get(SESSION_COOKIE)
        .and_then(|cookie| state.sessions.resolve(cookie.value()));

    request.extensions_mut().insert(SessionUser(context));
    request.extensions_mut().insert(state);

    next.run(request).await
}

/// Rejection that silently redirects to the login page.
#[derive(Debug)]
pub struct GuardRedirect;

impl IntoResponse for GuardRedirect {
    fn into_response(self) -> Response {
        Redirect::to("/").into_response()
    }
}

/// Extractor for authenticated users.
///
/// Use this extractor to require a live session for a handler. Requests
/// without one are redirected to `/` with no error body.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub AuthContext);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = GuardRedirect;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            parts
                .extensions
                .get::<SessionUser>()
                .and_then(|session| session.0.clone())
                .map(CurrentUser)
                .ok_or(GuardRedirect)
        })
    }
}

/// Extractor for the admin user.
///
/// Passes when the session user's email equals the configured admin
/// address. This is an email-equality check, not a role lookup: whoever
/// registers that exact email is admin. Everyone else is redirected to
/// `/`.
#[derive(Debug, Clone)]
pub struct AdminUser(pub AuthContext);

impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
{
    type Rejection = GuardRedirect;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let context = parts
                .extensions
                .get::<SessionUser>()
                .and_then(|session| session.0.clone())
                .ok_or(GuardRedirect)?;

            let auth_state = parts
                .extensions
                .get::<Arc<AuthState>>()
                .ok_or(GuardRedirect)?;

            if context.email == auth_state.admin_email {
                Ok(AdminUser(context))
            } else {
                Err(GuardRedirect)
            }
        })
    }
}
