use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    #[serde(rename = "article_id")]
    pub id: i64,
    pub title: String,
    pub contents: String,
    pub user_name: String,
    #[serde(rename = "nice")]
    pub nice_num: u32,
    pub created_at: DateTime<Utc>,
}

/// An article that has not been stored yet. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewArticle {
    pub title: String,
    pub contents: String,
    pub user_name: String,
    pub nice_num: u32,
    pub created_at: DateTime<Utc>,
}

impl NewArticle {
    pub fn with_id(self, id: i64) -> Article {
        Article {
            id,
            title: self.title,
            contents: self.contents,
            user_name: self.user_name,
            nice_num: self.nice_num,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    #[serde(rename = "comment_id")]
    pub id: i64,
    pub article_id: i64,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub article_id: i64,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl NewComment {
    pub fn with_id(self, id: i64) -> Comment {
        Comment {
            id,
            article_id: self.article_id,
            message: self.message,
            created_at: self.created_at,
        }
    }
}
