pub mod articles;
pub mod comments;
pub mod error;
pub mod migrations;
pub mod models;

#[cfg(test)]
mod test_support;

use anyhow::Result;
use gazette_types::models::{Article, Comment, NewArticle, NewComment};
use rusqlite::{Connection, OpenFlags};
use std::path::Path;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tracing::info;

pub use articles::PAGE_SIZE;
pub use error::{DbError, DbResult, ErrorKind};

#[derive(Debug, Clone)]
pub struct DbOptions {
    /// Read-only connections opened next to the writer.
    pub readers: usize,
    /// How long a statement waits on a locked database before failing.
    pub busy_timeout: Duration,
}

impl Default for DbOptions {
    fn default() -> Self {
        Self {
            readers: 4,
            busy_timeout: Duration::from_secs(5),
        }
    }
}

/// Connection holder with a reader/writer split: one writer connection and a
/// small round-robin pool of read-only connections.
pub struct Database {
    writer: Mutex<Connection>,
    readers: Vec<Mutex<Connection>>,
    reader_idx: AtomicUsize,
}

impl Database {
    pub fn open(path: &Path, options: &DbOptions) -> Result<Self> {
        let writer = Connection::open(path)?;

        // WAL mode for concurrent reads
        writer.pragma_update(None, "journal_mode", "WAL")?;
        writer.pragma_update(None, "foreign_keys", "ON")?;
        writer.busy_timeout(options.busy_timeout)?;

        migrations::run(&writer)?;

        let mut readers = Vec::with_capacity(options.readers);
        for _ in 0..options.readers {
            let conn = Connection::open_with_flags(
                path,
                OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
            )?;
            conn.busy_timeout(options.busy_timeout)?;
            readers.push(Mutex::new(conn));
        }

        info!(
            "Database opened at {} (1 writer + {} readers)",
            path.display(),
            options.readers
        );
        Ok(Self {
            writer: Mutex::new(writer),
            readers,
            reader_idx: AtomicUsize::new(0),
        })
    }

    /// Private in-memory database. Reads go through the writer.
    pub fn open_in_memory() -> Result<Self> {
        let writer = Connection::open_in_memory()?;
        writer.pragma_update(None, "foreign_keys", "ON")?;
        migrations::run(&writer)?;

        Ok(Self {
            writer: Mutex::new(writer),
            readers: Vec::new(),
            reader_idx: AtomicUsize::new(0),
        })
    }

    pub fn with_conn<F, T>(&self, f: F) -> DbResult<T>
    where
        F: FnOnce(&Connection) -> DbResult<T>,
    {
        if self.readers.is_empty() {
            return self.with_conn_mut(f);
        }

        let idx = self.reader_idx.fetch_add(1, Ordering::Relaxed) % self.readers.len();
        let conn = self.readers[idx].lock().map_err(|_| DbError::LockPoisoned)?;
        f(&conn)
    }

    pub fn with_conn_mut<F, T>(&self, f: F) -> DbResult<T>
    where
        F: FnOnce(&Connection) -> DbResult<T>,
    {
        let conn = self.writer.lock().map_err(|_| DbError::LockPoisoned)?;
        f(&conn)
    }

    // -- Articles --

    pub fn insert_article(&self, article: &NewArticle) -> DbResult<Article> {
        self.with_conn_mut(|conn| articles::insert_article(conn, article))
    }

    pub fn list_articles(&self, page: i64) -> DbResult<Vec<Article>> {
        self.with_conn(|conn| articles::list_articles(conn, page))
    }

    pub fn get_article(&self, article_id: i64) -> DbResult<Article> {
        self.with_conn(|conn| articles::get_article(conn, article_id))
    }

    pub fn increment_nice(&self, article_id: i64) -> DbResult<u32> {
        self.with_conn_mut(|conn| articles::increment_nice(conn, article_id))
    }

    // -- Comments --

    pub fn insert_comment(&self, comment: &NewComment) -> DbResult<Comment> {
        self.with_conn_mut(|conn| comments::insert_comment(conn, comment))
    }

    pub fn list_comments(&self, article_id: i64) -> DbResult<Vec<Comment>> {
        self.with_conn(|conn| comments::list_comments(conn, article_id))
    }
}
