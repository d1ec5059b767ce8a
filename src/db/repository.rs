//! User repository for CORKBOARD.
//!
//! This module provides CRUD operations for users in the database.

use sqlx::SqlitePool;

use super::user::{NewUser, User, UserUpdate};
use crate::{BoardError, Result};

/// Repository for user CRUD operations.
pub struct UserRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    /// Create a new UserRepository with the given database pool reference.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new user in the database.
    ///
    /// Returns the created user with the assigned ID. A duplicate email
    /// surfaces as a database error whose message contains `UNIQUE`.
    pub async fn create(&self, new_user: &NewUser) -> Result<User> {
        let result = sqlx::query(
            "INSERT INTO users (user_name, email, password) VALUES (?, ?, ?)",
        )
        .bind(&new_user.user_name)
        .bind(&new_user.email)
        .bind(&new_user.password)
        .execute(self.pool)
        .await
        .map_err(|e| BoardError::Database(e.to_string()))?;

        let id = result.last_insert_rowid();
        self.get_by_id(id)
            .await?
            .ok_or_else(|| BoardError::NotFound("user".to_string()))
    }

    /// Get a user by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<User>> {
        let result = sqlx::query_as::<_, User>(
            "SELECT user_id, user_name, email, password, created_at
             FROM users WHERE user_id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| BoardError::Database(e.to_string()))?;

        Ok(result)
    }

    /// Get a user by email address.
    pub async fn get_by_email(&self, email: &str) -> Result<Option<User>> {
        let result = sqlx::query_as::<_, User>(
            "SELECT user_id, user_name, email, password, created_at
             FROM users WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| BoardError::Database(e.to_string()))?;

        Ok(result)
    }

    /// Count all users.
    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(self.pool)
            .await
            .map_err(|e| BoardError::Database(e.to_string()))?;

        Ok(count)
    }

    /// List a page of users, newest first.
    pub async fn list_page(&self, offset: i64, limit: i64) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            "SELECT user_id, user_name, email, password, created_at
             FROM users ORDER BY created_at DESC, user_id DESC LIMIT ? OFFSET ?",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool)
        .await
        .map_err(|e| BoardError::Database(e.to_string()))?;

        Ok(users)
    }

    /// Update a user's name and email by ID.
    ///
    /// Returns the number of affected rows (zero when no row matched).
    pub async fn update(&self, id: i64, update: &UserUpdate) -> Result<u64> {
        let result = sqlx::query(
            "UPDATE users SET user_name = ?, email = ? WHERE user_id = ?",
        )
        .bind(&update.user_name)
        .bind(&update.email)
        .bind(id)
        .execute(self.pool)
        .await
        .map_err(|e| BoardError::Database(e.to_string()))?;

        Ok(result.rows_affected())
    }

    /// Delete a user by ID.
    ///
    /// Returns the number of affected rows (zero when no row matched).
    pub async fn delete(&self, id: i64) -> Result<u64> {
        let result = sqlx::query("DELETE FROM users WHERE user_id = ?")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| BoardError::Database(e.to_string()))?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;

    async fn test_db() -> Database {
        Database::open_in_memory().await.unwrap()
    }

    #[tokio::test]
    async fn test_create_and_get_user() {
        let db = test_db().await;
        let repo = UserRepository::new(db.pool());

        let user = repo
            .create(&NewUser::new("alice", "alice@example.com", "hash"))
            .await
            .unwrap();

        assert_eq!(user.user_name, "alice");
        assert_eq!(user.email, "alice@example.com");
        assert!(!user.created_at.is_empty());

        let fetched = repo.get_by_id(user.user_id).await.unwrap().unwrap();
        assert_eq!(fetched.email, "alice@example.com");

        let by_email = repo.get_by_email("alice@example.com").await.unwrap().unwrap();
        assert_eq!(by_email.user_id, user.user_id);
    }

    #[tokio::test]
    async fn test_get_missing_user() {
        let db = test_db().await;
        let repo = UserRepository::new(db.pool());

        assert!(repo.get_by_id(999).await.unwrap().is_none());
        assert!(repo.get_by_email("nobody@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_error_mentions_unique() {
        let db = test_db().await;
        let repo = UserRepository::new(db.pool());

        repo.create(&NewUser::new("alice", "a@example.com", "hash"))
            .await
            .unwrap();

        let err = repo
            .create(&NewUser::new("bob", "a@example.com", "hash"))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("UNIQUE"));
    }

    #[tokio::test]
    async fn test_update_changes_name_and_email_only() {
        let db = test_db().await;
        let repo = UserRepository::new(db.pool());

        let user = repo
            .create(&NewUser::new("alice", "a@example.com", "hash"))
            .await
            .unwrap();

        let affected = repo
            .update(
                user.user_id,
                &UserUpdate {
                    user_name: "alicia".to_string(),
                    email: "alicia@example.com".to_string(),
                },
            )
            .await
            .unwrap();
        assert_eq!(affected, 1);

        let updated = repo.get_by_id(user.user_id).await.unwrap().unwrap();
        assert_eq!(updated.user_name, "alicia");
        assert_eq!(updated.email, "alicia@example.com");
        assert_eq!(updated.password, "hash");
    }

    #[tokio::test]
    async fn test_update_missing_user_affects_no_rows() {
        let db = test_db().await;
        let repo = UserRepository::new(db.pool());

        let affected = repo
            .update(
                42,
                &UserUpdate {
                    user_name: "ghost".to_string(),
                    email: "ghost@example.com".to_string(),
                },
            )
            .await
            .unwrap();

        assert_eq!(affected, 0);
    }

    #[tokio::test]
    async fn test_delete_user() {
        let db = test_db().await;
        let repo = UserRepository::new(db.pool());

        let user = repo
            .create(&NewUser::new("alice", "a@example.com", "hash"))
            .await
            .unwrap();

        assert_eq!(repo.delete(user.user_id).await.unwrap(), 1);
        assert!(repo.get_by_id(user.user_id).await.unwrap().is_none());
        assert_eq!(repo.delete(user.user_id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_count_and_list_page() {
        let db = test_db().await;
        let repo = UserRepository::new(db.pool());

        for i in 0..7 {
            repo.create(&NewUser::new(
                format!("user{i}"),
                format!("user{i}@example.com"),
                "hash",
            ))
            .await
            .unwrap();
        }

        assert_eq!(repo.count().await.unwrap(), 7);

        let first_page = repo.list_page(0, 5).await.unwrap();
        assert_eq!(first_page.len(), 5);
        // Newest first: equal timestamps fall back to descending IDs
        assert_eq!(first_page[0].user_name, "user6");

        let second_page = repo.list_page(5, 5).await.unwrap();
        assert_eq!(second_page.len(), 2);
        assert_eq!(second_page[1].user_name, "user0");
    }
}
