use serde::{Deserialize, Serialize};

use crate::models::{Article, Comment};

// -- Articles --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PostArticleRequest {
    pub title: String,
    pub contents: String,
    pub user_name: String,
}

#[derive(Debug, Deserialize)]
pub struct ArticleListQuery {
    #[serde(default = "default_page")]
    pub page: i64,
}

fn default_page() -> i64 {
    1
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NiceRequest {
    pub article_id: i64,
}

/// Article detail: the article itself plus every comment attached to it.
#[derive(Debug, Serialize, Deserialize)]
pub struct ArticleDetailResponse {
    #[serde(flatten)]
    pub article: Article,
    pub comments: Vec<Comment>,
}

// -- Comments --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PostCommentRequest {
    pub article_id: i64,
    pub message: String,
}

// -- Errors --

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub status: u16,
}
