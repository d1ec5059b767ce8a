//! Post model for CORKBOARD.

use std::fmt;

/// Category tab for posts.
///
/// Every post belongs to exactly one of the two tabs. Client input that
/// is not exactly `notice` coerces to `Free`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PostType {
    /// Announcements tab.
    Notice,
    /// Free board tab.
    #[default]
    Free,
}

impl PostType {
    /// Convert the type to its database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            PostType::Notice => "notice",
            PostType::Free => "free",
        }
    }

    /// Coerce arbitrary client input into a valid type.
    pub fn coerce(s: &str) -> Self {
        if s == "notice" {
            PostType::Notice
        } else {
            PostType::Free
        }
    }

    /// Coerce an optional query/form parameter into a valid type.
    pub fn coerce_opt(s: Option<&str>) -> Self {
        s.map(Self::coerce).unwrap_or_default()
    }
}

impl fmt::Display for PostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Post entity as stored.
#[derive(Debug, Clone)]
pub struct Post {
    /// Unique post ID.
    pub id: i64,
    /// Post title.
    pub title: String,
    /// Post body.
    pub content: String,
    /// Owning user's ID.
    pub user_id: i64,
    /// Category tab.
    pub post_type: PostType,
    /// View counter.
    pub views: i64,
    /// Creation timestamp.
    pub created_at: String,
}

/// Listing row joined with the author's display name.
#[derive(Debug, Clone)]
pub struct PostSummary {
    pub id: i64,
    pub title: String,
    pub views: i64,
    pub created_at: String,
    pub post_type: PostType,
    /// Author's display name.
    pub author: String,
}

/// Full post joined with the author's display name.
#[derive(Debug, Clone)]
pub struct PostDetail {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub user_id: i64,
    pub post_type: PostType,
    pub views: i64,
    pub created_at: String,
    /// Author's display name.
    pub author: String,
}

/// Data for creating a new post.
#[derive(Debug, Clone)]
pub struct NewPost {
    /// Post title.
    pub title: String,
    /// Post body.
    pub content: String,
    /// Owning user's ID (taken from the session).
    pub user_id: i64,
    /// Category tab.
    pub post_type: PostType,
}

impl NewPost {
    /// Create a new post record.
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        user_id: i64,
        post_type: PostType,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            user_id,
            post_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_type_as_str() {
        assert_eq!(PostType::Notice.as_str(), "notice");
        assert_eq!(PostType::Free.as_str(), "free");
    }

    #[test]
    fn test_coerce_exact_notice_only() {
        assert_eq!(PostType::coerce("notice"), PostType::Notice);
        assert_eq!(PostType::coerce("free"), PostType::Free);
        assert_eq!(PostType::coerce("NOTICE"), PostType::Free);
        assert_eq!(PostType::coerce("Notice"), PostType::Free);
        assert_eq!(PostType::coerce("announcement"), PostType::Free);
        assert_eq!(PostType::coerce(""), PostType::Free);
    }

    #[test]
    fn test_coerce_opt_defaults_to_free() {
        assert_eq!(PostType::coerce_opt(None), PostType::Free);
        assert_eq!(PostType::coerce_opt(Some("notice")), PostType::Notice);
        assert_eq!(PostType::coerce_opt(Some("garbage")), PostType::Free);
    }

    #[test]
    fn test_display() {
        assert_eq!(PostType::Notice.to_string(), "notice");
        assert_eq!(PostType::Free.to_string(), "free");
    }
}
