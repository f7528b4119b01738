use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use std::sync::Arc;

use super::auth::AuthUser;
use super::types::{CreatePostRequest, MessageResponse, PostDto, UpdatePostRequest};
use super::{ApiError, AppState};
use crate::db::NewPost;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

/// GET /api/posts?category=
pub async fn list_posts(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<PostDto>>, ApiError> {
    let posts = state.post_service.list(query.category.as_deref()).await?;

    Ok(Json(posts.into_iter().map(PostDto::from).collect()))
}

/// GET /api/search?q=
pub async fn search_posts(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<PostDto>>, ApiError> {
    let posts = state.post_service.search(query.q.as_deref()).await?;

    Ok(Json(posts.into_iter().map(PostDto::from).collect()))
}

/// GET /api/posts/{id}
/// Fetching a post counts as one view
pub async fn get_post(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<PostDto>, ApiError> {
    let post = state.post_service.get(id).await?;

    Ok(Json(post.into()))
}

/// POST /api/posts (protected)
pub async fn create_post(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<CreatePostRequest>,
) -> Result<Json<PostDto>, ApiError> {
    // The author is bound to the token identity, never to the body.
    let post = state
        .post_service
        .create(NewPost {
            title: payload.title,
            content: payload.content,
            category: payload.category,
            author: user.0,
        })
        .await?;

    Ok(Json(post.into()))
}

/// PUT /api/posts/{id} (protected, author only)
pub async fn update_post(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<UpdatePostRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .post_service
        .update_content(id, &payload.content, &user.0)
        .await?;

    Ok(Json(MessageResponse {
        message: "Updated".to_string(),
    }))
}

/// DELETE /api/posts/{id} (protected, author only)
pub async fn delete_post(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.post_service.delete(id, &user.0).await?;

    Ok(Json(MessageResponse {
        message: "Deleted".to_string(),
    }))
}
