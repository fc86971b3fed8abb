use std::path::Path;
use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use gazette_types::models::{NewArticle, NewComment};
use rusqlite::Connection;

pub fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap() + chrono::Duration::milliseconds(250)
}

pub fn article_at(title: &str, nice_num: u32) -> NewArticle {
    NewArticle {
        title: title.to_string(),
        contents: format!("contents of {}", title),
        user_name: "tester".to_string(),
        nice_num,
        created_at: fixed_time(),
    }
}

pub fn comment_on(article_id: i64, message: &str) -> NewComment {
    NewComment {
        article_id,
        message: message.to_string(),
        created_at: fixed_time(),
    }
}

/// Open a WAL connection to a file other connections share.
pub fn open_shared_file(path: &Path) -> Connection {
    let conn = Connection::open(path).unwrap();
    conn.pragma_update(None, "journal_mode", "WAL").unwrap();
    conn.busy_timeout(Duration::from_secs(30)).unwrap();
    conn
}
