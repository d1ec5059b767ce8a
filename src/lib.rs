//! CORKBOARD - a session-authenticated bulletin board web application.
//!
//! User signup/login, an admin user-management panel, and a two-category
//! (notice/free) paginated, searchable post board with per-author
//! edit/delete permissions. All responses are rendered HTML views or
//! redirects.

pub mod auth;
pub mod board;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod web;

pub use auth::{hash_password, verify_password, AuthContext, PasswordError, SessionStore};
pub use board::{BoardService, PageInfo, PostRepository, PostType, POSTS_PER_PAGE};
pub use config::Config;
pub use db::{Database, UserRepository};
pub use error::{BoardError, Result};
pub use web::WebServer;
