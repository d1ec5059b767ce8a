//! HTTP handlers for CORKBOARD.

mod admin;
mod auth;
mod board;

pub use admin::{
    add_user, delete_user, list_users, update_user, AddUserForm, AdminListQuery, UpdateUserForm,
    USERS_PER_PAGE,
};
pub use auth::{login, login_page, logout, signup, signup_page, LoginForm, SignupForm};
pub use board::{
    create_post, delete_post, edit_post_form, list_posts, new_post_form, show_post, update_post,
    CreatePostForm, EditPostForm, ListQuery, TypeQuery,
};

use std::sync::Arc;

use crate::auth::SessionStore;
use crate::Database;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database handle.
    pub db: Database,
    /// Session store.
    pub sessions: Arc<SessionStore>,
    /// Email address granted access to the admin panel.
    pub admin_email: String,
}

impl AppState {
    /// Create a new application state.
    pub fn new(db: Database, sessions: Arc<SessionStore>, admin_email: impl Into<String>) -> Self {
        Self {
            db,
            sessions,
            admin_email: admin_email.into(),
        }
    }
}
