//! Post repository for CORKBOARD.
//!
//! This module provides CRUD operations for posts in the database. The
//! update and delete statements are owner-scoped: their filters include
//! both the post ID and the acting user's ID, so a mismatch yields zero
//! affected rows rather than an error.

use sqlx::SqlitePool;

use super::post::{NewPost, Post, PostDetail, PostSummary, PostType};
use crate::{BoardError, Result};

/// Raw post row; the stored type string is mapped to `PostType`.
#[derive(sqlx::FromRow)]
struct PostRow {
    id: i64,
    title: String,
    content: String,
    user_id: i64,
    post_type: String,
    views: i64,
    created_at: String,
}

impl PostRow {
    fn into_post(self) -> Post {
        Post {
            id: self.id,
            title: self.title,
            content: self.content,
            user_id: self.user_id,
            post_type: PostType::coerce(&self.post_type),
            views: self.views,
            created_at: self.created_at,
        }
    }
}

/// Raw listing row joined with the author name.
#[derive(sqlx::FromRow)]
struct SummaryRow {
    id: i64,
    title: String,
    views: i64,
    created_at: String,
    post_type: String,
    author: String,
}

impl SummaryRow {
    fn into_summary(self) -> PostSummary {
        PostSummary {
            id: self.id,
            title: self.title,
            views: self.views,
            created_at: self.created_at,
            post_type: PostType::coerce(&self.post_type),
            author: self.author,
        }
    }
}

/// Raw detail row joined with the author name.
#[derive(sqlx::FromRow)]
struct DetailRow {
    id: i64,
    title: String,
    content: String,
    user_id: i64,
    post_type: String,
    views: i64,
    created_at: String,
    author: String,
}

impl DetailRow {
    fn into_detail(self) -> PostDetail {
        PostDetail {
            id: self.id,
            title: self.title,
            content: self.content,
            user_id: self.user_id,
            post_type: PostType::coerce(&self.post_type),
            views: self.views,
            created_at: self.created_at,
            author: self.author,
        }
    }
}

/// Repository for post CRUD operations.
pub struct PostRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> PostRepository<'a> {
    /// Create a new PostRepository with the given database pool reference.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new post.
    ///
    /// Returns the assigned ID.
    pub async fn create(&self, new_post: &NewPost) -> Result<i64> {
        let result = sqlx::query(
            "INSERT INTO posts (title, content, user_id, type) VALUES (?, ?, ?, ?)",
        )
        .bind(&new_post.title)
        .bind(&new_post.content)
        .bind(new_post.user_id)
        .bind(new_post.post_type.as_str())
        .execute(self.pool)
        .await
        .map_err(|e| BoardError::Database(e.to_string()))?;

        Ok(result.last_insert_rowid())
    }

    /// Get a post by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Post>> {
        let row = sqlx::query_as::<_, PostRow>(
            "SELECT id, title, content, user_id, type AS post_type, views, created_at
             FROM posts WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| BoardError::Database(e.to_string()))?;

        Ok(row.map(PostRow::into_post))
    }

    /// Get a post joined with its author's display name.
    pub async fn get_with_author(&self, id: i64) -> Result<Option<PostDetail>> {
        let row = sqlx::query_as::<_, DetailRow>(
            "SELECT p.id, p.title, p.content, p.user_id, p.type AS post_type,
                    p.views, p.created_at, u.user_name AS author
             FROM posts p
             JOIN users u ON p.user_id = u.user_id
             WHERE p.id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| BoardError::Database(e.to_string()))?;

        Ok(row.map(DetailRow::into_detail))
    }

    /// Increment the view counter of a post.
    ///
    /// Returns the number of affected rows (zero when the post is gone).
    pub async fn increment_views(&self, id: i64) -> Result<u64> {
        let result = sqlx::query("UPDATE posts SET views = views + 1 WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| BoardError::Database(e.to_string()))?;

        Ok(result.rows_affected())
    }

    /// Count posts of the given type, optionally filtered by a title search.
    pub async fn count(&self, post_type: PostType, search: &str) -> Result<i64> {
        let count: i64 = if search.is_empty() {
            sqlx::query_scalar("SELECT COUNT(*) FROM posts WHERE type = ?")
                .bind(post_type.as_str())
                .fetch_one(self.pool)
                .await
        } else {
            sqlx::query_scalar("SELECT COUNT(*) FROM posts WHERE type = ? AND title LIKE ?")
                .bind(post_type.as_str())
                .bind(format!("%{search}%"))
                .fetch_one(self.pool)
                .await
        }
        .map_err(|e| BoardError::Database(e.to_string()))?;

        Ok(count)
    }

    /// List a page of posts of the given type, newest first, joined with
    /// the author's display name. The title search is a case-insensitive
    /// substring match.
    pub async fn list_page(
        &self,
        post_type: PostType,
        search: &str,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<PostSummary>> {
        let rows = if search.is_empty() {
            sqlx::query_as::<_, SummaryRow>(
                "SELECT p.id, p.title, p.views, p.created_at, p.type AS post_type,
                        u.user_name AS author
                 FROM posts p
                 JOIN users u ON p.user_id = u.user_id
                 WHERE p.type = ?
                 ORDER BY p.created_at DESC, p.id DESC LIMIT ? OFFSET ?",
            )
            .bind(post_type.as_str())
            .bind(limit)
            .bind(offset)
            .fetch_all(self.pool)
            .await
        } else {
            sqlx::query_as::<_, SummaryRow>(
                "SELECT p.id, p.title, p.views, p.created_at, p.type AS post_type,
                        u.user_name AS author
                 FROM posts p
                 JOIN users u ON p.user_id = u.user_id
                 WHERE p.type = ? AND p.title LIKE ?
                 ORDER BY p.created_at DESC, p.id DESC LIMIT ? OFFSET ?",
            )
            .bind(post_type.as_str())
            .bind(format!("%{search}%"))
            .bind(limit)
            .bind(offset)
            .fetch_all(self.pool)
            .await
        }
        .map_err(|e| BoardError::Database(e.to_string()))?;

        Ok(rows.into_iter().map(SummaryRow::into_summary).collect())
    }

    /// Update a post's title and content, scoped to its owner.
    ///
    /// Returns the number of affected rows: zero when the post does not
    /// exist or belongs to someone else.
    pub async fn update_owned(
        &self,
        id: i64,
        user_id: i64,
        title: &str,
        content: &str,
    ) -> Result<u64> {
        let result = sqlx::query(
            "UPDATE posts SET title = ?, content = ? WHERE id = ? AND user_id = ?",
        )
        .bind(title)
        .bind(content)
        .bind(id)
        .bind(user_id)
        .execute(self.pool)
        .await
        .map_err(|e| BoardError::Database(e.to_string()))?;

        Ok(result.rows_affected())
    }

    /// Delete a post, scoped to its owner.
    ///
    /// Returns the number of affected rows: zero when the post does not
    /// exist or belongs to someone else.
    pub async fn delete_owned(&self, id: i64, user_id: i64) -> Result<u64> {
        let result = sqlx::query("DELETE FROM posts WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(self.pool)
            .await
            .map_err(|e| BoardError::Database(e.to_string()))?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{NewUser, UserRepository};
    use crate::Database;

    async fn test_db_with_user() -> (Database, i64) {
        let db = Database::open_in_memory().await.unwrap();
        let user = UserRepository::new(db.pool())
            .create(&NewUser::new("alice", "alice@example.com", "hash"))
            .await
            .unwrap();
        (db, user.user_id)
    }

    #[tokio::test]
    async fn test_create_and_get_post() {
        let (db, user_id) = test_db_with_user().await;
        let repo = PostRepository::new(db.pool());

        let id = repo
            .create(&NewPost::new("Hello", "First post", user_id, PostType::Free))
            .await
            .unwrap();

        let post = repo.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(post.title, "Hello");
        assert_eq!(post.content, "First post");
        assert_eq!(post.user_id, user_id);
        assert_eq!(post.post_type, PostType::Free);
        assert_eq!(post.views, 0);

        let detail = repo.get_with_author(id).await.unwrap().unwrap();
        assert_eq!(detail.author, "alice");
    }

    #[tokio::test]
    async fn test_increment_views() {
        let (db, user_id) = test_db_with_user().await;
        let repo = PostRepository::new(db.pool());

        let id = repo
            .create(&NewPost::new("Hello", "Body", user_id, PostType::Free))
            .await
            .unwrap();

        assert_eq!(repo.increment_views(id).await.unwrap(), 1);
        assert_eq!(repo.increment_views(id).await.unwrap(), 1);

        let post = repo.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(post.views, 2);

        // Missing post: no rows affected
        assert_eq!(repo.increment_views(9999).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_count_and_list_filter_by_type() {
        let (db, user_id) = test_db_with_user().await;
        let repo = PostRepository::new(db.pool());

        for i in 0..3 {
            repo.create(&NewPost::new(
                format!("free {i}"),
                "body",
                user_id,
                PostType::Free,
            ))
            .await
            .unwrap();
        }
        repo.create(&NewPost::new("notice 0", "body", user_id, PostType::Notice))
            .await
            .unwrap();

        assert_eq!(repo.count(PostType::Free, "").await.unwrap(), 3);
        assert_eq!(repo.count(PostType::Notice, "").await.unwrap(), 1);

        let free = repo.list_page(PostType::Free, "", 0, 10).await.unwrap();
        assert_eq!(free.len(), 3);
        assert!(free.iter().all(|p| p.post_type == PostType::Free));

        let notices = repo.list_page(PostType::Notice, "", 0, 10).await.unwrap();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].title, "notice 0");
        assert_eq!(notices[0].author, "alice");
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_substring() {
        let (db, user_id) = test_db_with_user().await;
        let repo = PostRepository::new(db.pool());

        repo.create(&NewPost::new("Weekly Report", "body", user_id, PostType::Free))
            .await
            .unwrap();
        repo.create(&NewPost::new("Daily notes", "body", user_id, PostType::Free))
            .await
            .unwrap();

        assert_eq!(repo.count(PostType::Free, "report").await.unwrap(), 1);
        let found = repo.list_page(PostType::Free, "report", 0, 10).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "Weekly Report");

        assert_eq!(repo.count(PostType::Free, "zzz").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_list_page_pagination() {
        let (db, user_id) = test_db_with_user().await;
        let repo = PostRepository::new(db.pool());

        for i in 0..12 {
            repo.create(&NewPost::new(
                format!("post {i}"),
                "body",
                user_id,
                PostType::Free,
            ))
            .await
            .unwrap();
        }

        let first = repo.list_page(PostType::Free, "", 0, 10).await.unwrap();
        assert_eq!(first.len(), 10);
        // Newest first
        assert_eq!(first[0].title, "post 11");

        let second = repo.list_page(PostType::Free, "", 10, 10).await.unwrap();
        assert_eq!(second.len(), 2);
        assert_eq!(second[1].title, "post 0");
    }

    #[tokio::test]
    async fn test_update_owned_scoping() {
        let (db, user_id) = test_db_with_user().await;
        let repo = PostRepository::new(db.pool());

        let id = repo
            .create(&NewPost::new("Original", "body", user_id, PostType::Free))
            .await
            .unwrap();

        // Wrong owner: zero rows
        assert_eq!(
            repo.update_owned(id, user_id + 1, "Hacked", "nope").await.unwrap(),
            0
        );
        let post = repo.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(post.title, "Original");

        // Right owner
        assert_eq!(
            repo.update_owned(id, user_id, "Edited", "new body").await.unwrap(),
            1
        );
        let post = repo.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(post.title, "Edited");
        assert_eq!(post.content, "new body");
    }

    #[tokio::test]
    async fn test_delete_owned_scoping() {
        let (db, user_id) = test_db_with_user().await;
        let repo = PostRepository::new(db.pool());

        let id = repo
            .create(&NewPost::new("Doomed", "body", user_id, PostType::Free))
            .await
            .unwrap();

        assert_eq!(repo.delete_owned(id, user_id + 1).await.unwrap(), 0);
        assert!(repo.get_by_id(id).await.unwrap().is_some());

        assert_eq!(repo.delete_owned(id, user_id).await.unwrap(), 1);
        assert!(repo.get_by_id(id).await.unwrap().is_none());
    }
}
