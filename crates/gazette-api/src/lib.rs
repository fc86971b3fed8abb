pub mod articles;
pub mod comments;
pub mod error;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use gazette_db::{Database, DbResult};

use crate::error::ApiResult;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/article", post(articles::post_article))
        .route("/article/list", get(articles::list_articles))
        .route("/article/nice", post(articles::post_nice))
        .route("/article/{article_id}", get(articles::get_article))
        .route("/article/{article_id}/comments", get(comments::list_comments))
        .route("/comment", post(comments::post_comment))
        .with_state(state)
}

/// Run a store call off the async runtime.
pub(crate) async fn with_db<F, T>(state: &AppState, f: F) -> ApiResult<T>
where
    F: FnOnce(&Database) -> DbResult<T> + Send + 'static,
    T: Send + 'static,
{
    let state = state.clone();
    let value = tokio::task::spawn_blocking(move || f(&state.db)).await??;
    Ok(value)
}
