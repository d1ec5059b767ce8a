//! Database schema and migrations for CORKBOARD.
//!
//! This module contains all database migrations that will be applied
//! sequentially when the database is first opened or upgraded.

/// Database migrations.
///
/// Each migration is a SQL script that will be executed in order.
/// The schema_version table tracks which migrations have been applied.
pub const MIGRATIONS: &[&str] = &[
    // v1: Initial schema - users table
    r#"
-- Users table for authentication and member management
CREATE TABLE users (
    user_id     INTEGER PRIMARY KEY AUTOINCREMENT,
    user_name   TEXT NOT NULL,
    email       TEXT NOT NULL UNIQUE,
    password    TEXT NOT NULL,           -- Argon2 hash
    created_at  TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX idx_users_created_at ON users(created_at);
"#,
    // v2: Posts table for the two-category board
    r#"
-- Posts table; type partitions the board into its two tabs
CREATE TABLE posts (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    title       TEXT NOT NULL,
    content     TEXT NOT NULL,
    user_id     INTEGER NOT NULL REFERENCES users(user_id),
    type        TEXT NOT NULL DEFAULT 'free',   -- 'notice' or 'free'
    views       INTEGER NOT NULL DEFAULT 0,
    created_at  TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX idx_posts_type ON posts(type);
CREATE INDEX idx_posts_user_id ON posts(user_id);
CREATE INDEX idx_posts_created_at ON posts(created_at);
"#,
];
