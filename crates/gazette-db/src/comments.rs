use gazette_types::models::{Comment, NewComment};
use rusqlite::{Connection, params};
use tracing::debug;

use crate::error::DbResult;
use crate::models::{COMMENT_COLUMNS, CommentRow};

pub fn insert_comment(conn: &Connection, comment: &NewComment) -> DbResult<Comment> {
    conn.execute(
        "INSERT INTO comments (article_id, message, created_at) VALUES (?1, ?2, ?3)",
        params![comment.article_id, comment.message, comment.created_at],
    )?;
    let id = conn.last_insert_rowid();

    debug!(comment_id = id, article_id = comment.article_id, "Inserted comment");
    Ok(comment.clone().with_id(id))
}

/// All comments on one article, in storage order. An article without
/// comments (or one that does not exist) yields an empty list.
pub fn list_comments(conn: &Connection, article_id: i64) -> DbResult<Vec<Comment>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM comments WHERE article_id = ?1",
        COMMENT_COLUMNS
    ))?;

    let rows = stmt
        .query_map([article_id], CommentRow::from_row)?
        .collect::<Result<Vec<_>, _>>()?;

    rows.into_iter().map(CommentRow::into_comment).collect()
}
