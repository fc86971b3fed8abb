//! Database row types, read positionally from SQLite rows.
//! Distinct from gazette-types entities so a NULL timestamp is caught here
//! instead of leaking out as a zero time.

use chrono::{DateTime, Utc};
use gazette_types::models::{Article, Comment};
use rusqlite::Row;

use crate::error::{DbError, DbResult};

/// Column list matching [`ArticleRow::from_row`].
pub(crate) const ARTICLE_COLUMNS: &str = "article_id, title, contents, username, nice, created_at";

/// Column list matching [`CommentRow::from_row`].
pub(crate) const COMMENT_COLUMNS: &str = "comment_id, article_id, message, created_at";

#[derive(Debug)]
pub struct ArticleRow {
    pub id: i64,
    pub title: String,
    pub contents: String,
    pub username: String,
    pub nice: u32,
    pub created_at: Option<DateTime<Utc>>,
}

impl ArticleRow {
    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            title: row.get(1)?,
            contents: row.get(2)?,
            username: row.get(3)?,
            nice: row.get(4)?,
            created_at: row.get(5)?,
        })
    }

    pub fn into_article(self) -> DbResult<Article> {
        let created_at = self.created_at.ok_or(DbError::MissingTimestamp {
            entity: "article",
            id: self.id,
        })?;

        Ok(Article {
            id: self.id,
            title: self.title,
            contents: self.contents,
            user_name: self.username,
            nice_num: self.nice,
            created_at,
        })
    }
}

#[derive(Debug)]
pub struct CommentRow {
    pub id: i64,
    pub article_id: i64,
    pub message: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl CommentRow {
    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            article_id: row.get(1)?,
            message: row.get(2)?,
            created_at: row.get(3)?,
        })
    }

    pub fn into_comment(self) -> DbResult<Comment> {
        let created_at = self.created_at.ok_or(DbError::MissingTimestamp {
            entity: "comment",
            id: self.id,
        })?;

        Ok(Comment {
            id: self.id,
            article_id: self.article_id,
            message: self.message,
            created_at,
        })
    }
}
