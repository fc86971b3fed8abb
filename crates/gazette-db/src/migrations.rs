use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

const SCHEMA_VERSION: i64 = 1;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch("CREATE TABLE IF NOT EXISTS schema_version (version INTEGER NOT NULL);")?;

    let version: i64 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |r| r.get(0),
    )?;

    if version < 1 {
        info!("Running migration v1 (articles, comments)");
        // Rolled back on drop if any statement fails.
        let tx = conn.unchecked_transaction()?;
        tx.execute_batch(
            "
            CREATE TABLE articles (
                article_id  INTEGER PRIMARY KEY AUTOINCREMENT,
                title       TEXT NOT NULL,
                contents    TEXT NOT NULL,
                username    TEXT NOT NULL,
                nice        INTEGER NOT NULL DEFAULT 0 CHECK (nice >= 0),
                created_at  TEXT NOT NULL
            );

            CREATE TABLE comments (
                comment_id  INTEGER PRIMARY KEY AUTOINCREMENT,
                article_id  INTEGER NOT NULL REFERENCES articles(article_id),
                message     TEXT NOT NULL,
                created_at  TEXT NOT NULL
            );

            CREATE INDEX idx_comments_article ON comments(article_id);

            INSERT INTO schema_version (version) VALUES (1);
            ",
        )?;
        tx.commit()?;
        info!("Database schema at version {}", SCHEMA_VERSION);
    }

    Ok(())
}
