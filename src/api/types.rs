use serde::{Deserialize, Serialize};

use crate::db::Post;

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct PostDto {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub author: String,
    pub category: String,
    pub created_at: String,
    pub views: i32,
}

impl From<Post> for PostDto {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            content: post.content,
            author: post.author,
            category: post.category,
            created_at: post.created_at,
            views: post.views,
        }
    }
}

/// Register/login payload. Fields default to empty so that missing fields
/// reach the validation layer as a 400 instead of a deserialization error.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CredentialsRequest {
    pub username: String,
    pub password: String,
}

/// Create-post payload. There is deliberately no `author` field: the
/// author is always taken from the verified token identity.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
    pub category: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdatePostRequest {
    pub content: String,
}
