//! Article storage: insert, paginated listing, detail lookup and the nice
//! counter. Every function takes the connection it runs on; none of them
//! hold state between calls.

use gazette_types::models::{Article, NewArticle};
use rusqlite::{Connection, OptionalExtension, Transaction, TransactionBehavior, params};
use tracing::{debug, warn};

use crate::error::{DbError, DbResult};
use crate::models::{ARTICLE_COLUMNS, ArticleRow};

/// Number of articles returned by one [`list_articles`] page.
pub const PAGE_SIZE: i64 = 5;

pub fn insert_article(conn: &Connection, article: &NewArticle) -> DbResult<Article> {
    conn.execute(
        "INSERT INTO articles (title, contents, username, nice, created_at) VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            article.title,
            article.contents,
            article.user_name,
            article.nice_num,
            article.created_at
        ],
    )?;
    let id = conn.last_insert_rowid();

    debug!(article_id = id, "Inserted article");
    Ok(article.clone().with_id(id))
}

/// Fetch one page of articles in storage order. Pages start at 1; anything
/// below that is rejected rather than clamped.
pub fn list_articles(conn: &Connection, page: i64) -> DbResult<Vec<Article>> {
    let offset = page_offset(page)?;

    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM articles LIMIT ?1 OFFSET ?2",
        ARTICLE_COLUMNS
    ))?;

    let rows = stmt
        .query_map(params![PAGE_SIZE, offset], ArticleRow::from_row)?
        .collect::<Result<Vec<_>, _>>()?;

    let articles = rows
        .into_iter()
        .map(ArticleRow::into_article)
        .collect::<DbResult<Vec<_>>>()?;

    debug!(page, count = articles.len(), "Listed articles");
    Ok(articles)
}

pub fn get_article(conn: &Connection, article_id: i64) -> DbResult<Article> {
    let row = conn
        .query_row(
            &format!("SELECT {} FROM articles WHERE article_id = ?1", ARTICLE_COLUMNS),
            [article_id],
            ArticleRow::from_row,
        )
        .optional()?
        .ok_or(DbError::NotFound {
            entity: "article",
            id: article_id,
        })?;

    row.into_article()
}

/// Add one to an article's nice counter and return the new value.
///
/// The read and the write happen inside one IMMEDIATE transaction, which takes
/// SQLite's write lock before the read. A second incrementer on another
/// connection waits (up to the busy timeout) instead of reading a stale count.
/// Must not be called on a connection that already has a transaction open.
pub fn increment_nice(conn: &Connection, article_id: i64) -> DbResult<u32> {
    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)?;

    let current: Option<u32> = tx
        .query_row(
            "SELECT nice FROM articles WHERE article_id = ?1",
            [article_id],
            |row| row.get(0),
        )
        .optional()?;

    let Some(current) = current else {
        tx.rollback()?;
        warn!(article_id, "Nice on missing article, rolled back");
        return Err(DbError::NotFound {
            entity: "article",
            id: article_id,
        });
    };

    let Some(next) = current.checked_add(1) else {
        tx.rollback()?;
        warn!(article_id, "Nice counter overflow, rolled back");
        return Err(DbError::CounterOverflow(article_id));
    };

    // Dropping `tx` on any `?` below rolls it back.
    tx.execute(
        "UPDATE articles SET nice = ?1 WHERE article_id = ?2",
        params![next, article_id],
    )?;
    tx.commit()?;

    debug!(article_id, nice = next, "Incremented nice");
    Ok(next)
}

fn page_offset(page: i64) -> DbResult<i64> {
    if page < 1 {
        return Err(DbError::InvalidPage(page));
    }
    (page - 1)
        .checked_mul(PAGE_SIZE)
        .ok_or(DbError::InvalidPage(page))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::migrations;
    use crate::test_support::{article_at, open_shared_file};
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::sync::Barrier;
    use std::thread;

    fn setup() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        migrations::run(&conn).unwrap();
        conn
    }

    #[test]
    fn test_insert_then_get_round_trip() {
        let conn = setup();
        let new = article_at("hello", 2);

        let inserted = insert_article(&conn, &new).unwrap();
        assert!(inserted.id > 0);

        let fetched = get_article(&conn, inserted.id).unwrap();
        assert_eq!(fetched, inserted);
        assert_eq!(fetched.title, new.title);
        assert_eq!(fetched.contents, new.contents);
        assert_eq!(fetched.user_name, new.user_name);
        assert_eq!(fetched.nice_num, 2);
        assert_eq!(fetched.created_at, new.created_at);
    }

    #[test]
    fn test_insert_assigns_distinct_ids() {
        let conn = setup();
        let a = insert_article(&conn, &article_at("a", 0)).unwrap();
        let b = insert_article(&conn, &article_at("b", 0)).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_pagination_covers_every_article_once() {
        let conn = setup();
        let total = 13;
        for i in 0..total {
            insert_article(&conn, &article_at(&format!("article {}", i), 0)).unwrap();
        }

        let mut seen = HashSet::new();
        let pages = (total + PAGE_SIZE - 1) / PAGE_SIZE;
        for page in 1..=pages {
            let articles = list_articles(&conn, page).unwrap();
            assert!(articles.len() as i64 <= PAGE_SIZE);
            for article in articles {
                assert!(seen.insert(article.id), "duplicate article {}", article.id);
            }
        }
        assert_eq!(seen.len() as i64, total);

        let last = list_articles(&conn, pages).unwrap();
        assert_eq!(last.len(), 3);
    }

    #[test]
    fn test_page_past_end_is_empty() {
        let conn = setup();
        insert_article(&conn, &article_at("only", 0)).unwrap();
        assert!(list_articles(&conn, 2).unwrap().is_empty());
        assert!(list_articles(&conn, 1_000).unwrap().is_empty());
    }

    #[test]
    fn test_non_positive_page_rejected() {
        let conn = setup();
        for page in [0, -1, i64::MIN] {
            match list_articles(&conn, page) {
                Err(DbError::InvalidPage(p)) => assert_eq!(p, page),
                other => panic!("expected InvalidPage for {}, got {:?}", page, other),
            }
        }
    }

    #[test]
    fn test_overflowing_page_rejected() {
        let conn = setup();
        assert!(matches!(
            list_articles(&conn, i64::MAX),
            Err(DbError::InvalidPage(_))
        ));
    }

    #[test]
    fn test_get_missing_article() {
        let conn = setup();
        match get_article(&conn, 99) {
            Err(DbError::NotFound { entity, id }) => {
                assert_eq!(entity, "article");
                assert_eq!(id, 99);
            }
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_increment_nice() {
        let conn = setup();
        let article = insert_article(&conn, &article_at("liked", 0)).unwrap();

        assert_eq!(increment_nice(&conn, article.id).unwrap(), 1);
        assert_eq!(increment_nice(&conn, article.id).unwrap(), 2);
        assert_eq!(get_article(&conn, article.id).unwrap().nice_num, 2);
    }

    #[test]
    fn test_increment_missing_article_rolls_back() {
        let conn = setup();
        assert!(matches!(
            increment_nice(&conn, 404),
            Err(DbError::NotFound { id: 404, .. })
        ));
        // The transaction must be closed, otherwise this would fail with
        // "cannot start a transaction within a transaction".
        assert!(conn.is_autocommit());
        let article = insert_article(&conn, &article_at("after", 0)).unwrap();
        assert_eq!(increment_nice(&conn, article.id).unwrap(), 1);
    }

    #[test]
    fn test_increment_overflow() {
        let conn = setup();
        let article = insert_article(&conn, &article_at("max", u32::MAX)).unwrap();

        assert!(matches!(
            increment_nice(&conn, article.id),
            Err(DbError::CounterOverflow(id)) if id == article.id
        ));
        assert!(conn.is_autocommit());
        assert_eq!(get_article(&conn, article.id).unwrap().nice_num, u32::MAX);
    }

    #[test]
    fn test_failed_update_rolls_back() {
        let conn = setup();
        let article = insert_article(&conn, &article_at("guarded", 3)).unwrap();
        conn.execute_batch(
            "CREATE TRIGGER block_nice BEFORE UPDATE ON articles
             BEGIN SELECT RAISE(ABORT, 'blocked'); END;",
        )
        .unwrap();

        assert!(matches!(
            increment_nice(&conn, article.id),
            Err(DbError::Storage(_))
        ));
        assert!(conn.is_autocommit());
        assert_eq!(get_article(&conn, article.id).unwrap().nice_num, 3);

        conn.execute_batch("DROP TRIGGER block_nice;").unwrap();
        assert_eq!(increment_nice(&conn, article.id).unwrap(), 4);
    }

    #[test]
    fn test_concurrent_increments_lose_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nice.db");

        let conn = open_shared_file(&path);
        migrations::run(&conn).unwrap();
        let article = insert_article(&conn, &article_at("popular", 0)).unwrap();

        let workers = 8;
        let per_worker = 25;
        let barrier = Arc::new(Barrier::new(workers));

        let handles: Vec<_> = (0..workers)
            .map(|_| {
                let path = path.clone();
                let barrier = barrier.clone();
                thread::spawn(move || {
                    let conn = open_shared_file(&path);
                    barrier.wait();
                    for _ in 0..per_worker {
                        increment_nice(&conn, article.id).unwrap();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let expected = (workers * per_worker) as u32;
        assert_eq!(get_article(&conn, article.id).unwrap().nice_num, expected);
    }
}
