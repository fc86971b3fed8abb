use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use tracing::info;

use gazette_types::api::PostCommentRequest;
use gazette_types::models::NewComment;

use crate::error::{ApiError, ApiResult};
use crate::{AppState, with_db};

/// Comments for an unknown article fail the foreign key check and come back
/// as 400.
pub async fn post_comment(
    State(state): State<AppState>,
    Json(req): Json<PostCommentRequest>,
) -> ApiResult<impl IntoResponse> {
    if req.message.trim().is_empty() {
        return Err(ApiError::BadRequest("message must not be empty".into()));
    }

    let new = NewComment {
        article_id: req.article_id,
        message: req.message,
        created_at: Utc::now(),
    };
    let comment = with_db(&state, move |db| db.insert_comment(&new)).await?;

    info!(comment_id = comment.id, article_id = comment.article_id, "Comment posted");
    Ok((StatusCode::CREATED, Json(comment)))
}

pub async fn list_comments(
    State(state): State<AppState>,
    Path(article_id): Path<i64>,
) -> ApiResult<impl IntoResponse> {
    let comments = with_db(&state, move |db| db.list_comments(article_id)).await?;
    Ok(Json(comments))
}
