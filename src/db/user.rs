//! User model for CORKBOARD.

/// User entity representing a registered account.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    /// Unique user ID.
    pub user_id: i64,
    /// Display name.
    pub user_name: String,
    /// Email address (unique, doubles as the login name).
    pub email: String,
    /// Password hash (Argon2).
    pub password: String,
    /// Account creation timestamp.
    pub created_at: String,
}

/// Data for creating a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Display name.
    pub user_name: String,
    /// Email address.
    pub email: String,
    /// Password hash (should be pre-hashed with Argon2).
    pub password: String,
}

impl NewUser {
    /// Create a new user record.
    pub fn new(
        user_name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            user_name: user_name.into(),
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Data for updating an existing user.
///
/// The admin panel edits name and email only; the password is not
/// touchable through this path.
#[derive(Debug, Clone)]
pub struct UserUpdate {
    /// New display name.
    pub user_name: String,
    /// New email address.
    pub email: String,
}
