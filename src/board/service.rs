//! Board service for CORKBOARD.
//!
//! High-level board operations: pagination math, input validation and
//! ownership enforcement on top of the post repository.

use crate::db::Database;
use crate::{BoardError, Result};

use super::post::{NewPost, Post, PostDetail, PostSummary, PostType};
use super::repository::PostRepository;

/// Posts shown per listing page.
pub const POSTS_PER_PAGE: i64 = 10;

/// Normalize a raw page query parameter.
///
/// Unparseable input and values below 1 fall back to page 1.
pub fn normalize_page(raw: Option<&str>) -> i64 {
    raw.and_then(|s| s.parse::<i64>().ok())
        .filter(|page| *page >= 1)
        .unwrap_or(1)
}

/// Pagination metadata for a listing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    /// Current page number (1-based).
    pub page: i64,
    /// Total number of pages: ceil(total / per_page).
    pub total_pages: i64,
    /// Total number of items across all pages.
    pub total: i64,
}

impl PageInfo {
    /// Compute pagination metadata for a total item count.
    pub fn compute(total: i64, per_page: i64, page: i64) -> Self {
        let total_pages = (total + per_page - 1) / per_page;
        Self {
            page,
            total_pages,
            total,
        }
    }

    /// Whether a previous page exists.
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    /// Whether a next page exists.
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// View model for the post listing.
#[derive(Debug, Clone)]
pub struct PostListing {
    /// The rows of the current page.
    pub posts: Vec<PostSummary>,
    /// Pagination metadata.
    pub page: PageInfo,
    /// The search term echoed back to the view.
    pub search: String,
    /// The active tab.
    pub post_type: PostType,
}

/// Service for board operations with ownership enforcement.
pub struct BoardService<'a> {
    db: &'a Database,
}

impl<'a> BoardService<'a> {
    /// Create a new BoardService with the given database reference.
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// List a page of posts for one tab, optionally filtered by a title
    /// search, newest first.
    pub async fn list_posts(
        &self,
        page: i64,
        search: &str,
        post_type: PostType,
    ) -> Result<PostListing> {
        let repo = PostRepository::new(self.db.pool());

        let total = repo.count(post_type, search).await?;
        let offset = (page - 1) * POSTS_PER_PAGE;
        let posts = repo
            .list_page(post_type, search, offset, POSTS_PER_PAGE)
            .await?;

        Ok(PostListing {
            posts,
            page: PageInfo::compute(total, POSTS_PER_PAGE, page),
            search: search.to_string(),
            post_type,
        })
    }

    /// Fetch a post for the detail view, counting the view first.
    ///
    /// The increment and the fetch are two independent statements; a
    /// concurrent delete in between yields a 404 after a counted view.
    pub async fn get_post(&self, id: i64) -> Result<PostDetail> {
        let repo = PostRepository::new(self.db.pool());

        repo.increment_views(id).await?;
        repo.get_with_author(id)
            .await?
            .ok_or_else(|| BoardError::NotFound("Post".to_string()))
    }

    /// Create a post owned by the given user.
    ///
    /// Returns the assigned ID.
    pub async fn create_post(
        &self,
        user_id: i64,
        title: &str,
        content: &str,
        post_type: PostType,
    ) -> Result<i64> {
        validate_post_input(title, content)?;

        let repo = PostRepository::new(self.db.pool());
        let id = repo
            .create(&NewPost::new(title, content, user_id, post_type))
            .await?;

        tracing::info!(post_id = id, user_id, post_type = post_type.as_str(), "post created");
        Ok(id)
    }

    /// Fetch a post for the edit form.
    ///
    /// Distinguishes a missing post (not found) from someone else's post
    /// (permission denied) - unlike the write paths, which collapse both.
    pub async fn post_for_edit(&self, id: i64, user_id: i64) -> Result<Post> {
        let repo = PostRepository::new(self.db.pool());
        let post = repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| BoardError::NotFound("Post".to_string()))?;

        if post.user_id != user_id {
            return Err(BoardError::Permission(
                "You are not the author of this post.".to_string(),
            ));
        }

        Ok(post)
    }

    /// Update a post's title and content as its owner.
    ///
    /// The statement is scoped by both the post ID and the acting user's
    /// ID; zero affected rows means the post is missing or owned by
    /// someone else, and the two cases are indistinguishable to the
    /// caller.
    pub async fn update_post(
        &self,
        id: i64,
        user_id: i64,
        title: &str,
        content: &str,
    ) -> Result<()> {
        validate_post_input(title, content)?;

        let repo = PostRepository::new(self.db.pool());
        let affected = repo.update_owned(id, user_id, title, content).await?;

        if affected == 0 {
            return Err(BoardError::Permission(
                "No permission to modify, or the post does not exist.".to_string(),
            ));
        }

        tracing::info!(post_id = id, user_id, "post updated");
        Ok(())
    }

    /// Delete a post as its owner. Same scoping as [`update_post`].
    ///
    /// [`update_post`]: BoardService::update_post
    pub async fn delete_post(&self, id: i64, user_id: i64) -> Result<()> {
        let repo = PostRepository::new(self.db.pool());
        let affected = repo.delete_owned(id, user_id).await?;

        if affected == 0 {
            return Err(BoardError::Permission(
                "No permission to delete, or the post does not exist.".to_string(),
            ));
        }

        tracing::info!(post_id = id, user_id, "post deleted");
        Ok(())
    }
}

/// Require a non-empty title and content.
fn validate_post_input(title: &str, content: &str) -> Result<()> {
    if title.is_empty() || content.is_empty() {
        return Err(BoardError::Validation(
            "Title and content are required.".to_string(),
        ));
    }
    Ok(())
}
