//! Domain service for the post board: listing, search, view counting,
//! and author-gated mutation.

use thiserror::Error;

use crate::db::{NewPost, Post};

/// Errors specific to post operations.
#[derive(Debug, Error)]
pub enum PostError {
    #[error("Post not found")]
    NotFound,

    #[error("Not authorized")]
    Forbidden,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for PostError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for PostError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Domain service trait for posts.
#[async_trait::async_trait]
pub trait PostService: Send + Sync {
    /// Lists posts newest first, optionally filtered by exact category.
    async fn list(&self, category: Option<&str>) -> Result<Vec<Post>, PostError>;

    /// Case-insensitive substring search over title and content, newest
    /// first. An absent or empty query yields an empty list, never the
    /// whole board.
    async fn search(&self, query: Option<&str>) -> Result<Vec<Post>, PostError>;

    /// Fetches a single post, counting the fetch as one view. The
    /// increment is issued before the read, so the returned `views`
    /// includes the current fetch whenever the increment succeeded;
    /// callers should only rely on the +1-per-fetch guarantee.
    async fn get(&self, id: i32) -> Result<Post, PostError>;

    /// Creates a post. `post.author` must be the verified identity of the
    /// caller, never client input.
    async fn create(&self, post: NewPost) -> Result<Post, PostError>;

    /// Replaces a post's content. Only the original author may do this.
    ///
    /// # Errors
    ///
    /// Returns [`PostError::NotFound`] for a missing id and
    /// [`PostError::Forbidden`] when `requesting_user` is not the author.
    async fn update_content(
        &self,
        id: i32,
        content: &str,
        requesting_user: &str,
    ) -> Result<(), PostError>;

    /// Deletes a post under the same ownership rule as `update_content`.
    async fn delete(&self, id: i32, requesting_user: &str) -> Result<(), PostError>;
}
