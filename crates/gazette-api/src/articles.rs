use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use tracing::info;

use gazette_types::api::{ArticleDetailResponse, ArticleListQuery, NiceRequest, PostArticleRequest};
use gazette_types::models::NewArticle;

use crate::error::{ApiError, ApiResult};
use crate::{AppState, with_db};

pub async fn post_article(
    State(state): State<AppState>,
    Json(req): Json<PostArticleRequest>,
) -> ApiResult<impl IntoResponse> {
    if req.title.trim().is_empty() {
        return Err(ApiError::BadRequest("title must not be empty".into()));
    }
    if req.user_name.trim().is_empty() {
        return Err(ApiError::BadRequest("user_name must not be empty".into()));
    }

    let new = NewArticle {
        title: req.title,
        contents: req.contents,
        user_name: req.user_name,
        nice_num: 0,
        created_at: Utc::now(),
    };
    let article = with_db(&state, move |db| db.insert_article(&new)).await?;

    info!(article_id = article.id, "Article posted");
    Ok((StatusCode::CREATED, Json(article)))
}

pub async fn list_articles(
    State(state): State<AppState>,
    Query(query): Query<ArticleListQuery>,
) -> ApiResult<impl IntoResponse> {
    let page = query.page;
    let articles = with_db(&state, move |db| db.list_articles(page)).await?;
    Ok(Json(articles))
}

pub async fn get_article(
    State(state): State<AppState>,
    Path(article_id): Path<i64>,
) -> ApiResult<impl IntoResponse> {
    let detail = with_db(&state, move |db| {
        let article = db.get_article(article_id)?;
        let comments = db.list_comments(article_id)?;
        Ok(ArticleDetailResponse { article, comments })
    })
    .await?;

    Ok(Json(detail))
}

pub async fn post_nice(
    State(state): State<AppState>,
    Json(req): Json<NiceRequest>,
) -> ApiResult<impl IntoResponse> {
    let article_id = req.article_id;
    let article = with_db(&state, move |db| {
        db.increment_nice(article_id)?;
        db.get_article(article_id)
    })
    .await?;

    Ok(Json(article))
}
