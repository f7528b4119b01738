//! `SeaORM` implementation of the `PostService` trait.

use async_trait::async_trait;
use tracing::{info, warn};

use crate::db::{NewPost, Post, Store};
use crate::services::post_service::{PostError, PostService};

pub struct SeaOrmPostService {
    store: Store,
}

impl SeaOrmPostService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl PostService for SeaOrmPostService {
    async fn list(&self, category: Option<&str>) -> Result<Vec<Post>, PostError> {
        Ok(self.store.list_posts(category).await?)
    }

    async fn search(&self, query: Option<&str>) -> Result<Vec<Post>, PostError> {
        let Some(query) = query else {
            return Ok(Vec::new());
        };
        if query.is_empty() {
            return Ok(Vec::new());
        }

        Ok(self.store.search_posts(query).await?)
    }

    async fn get(&self, id: i32) -> Result<Post, PostError> {
        // View counting is best effort: a failed increment must not block
        // returning the post.
        if let Err(e) = self.store.record_post_view(id).await {
            warn!("Failed to record view for post {}: {}", id, e);
        }

        self.store.get_post(id).await?.ok_or(PostError::NotFound)
    }

    async fn create(&self, post: NewPost) -> Result<Post, PostError> {
        Ok(self.store.create_post(&post).await?)
    }

    async fn update_content(
        &self,
        id: i32,
        content: &str,
        requesting_user: &str,
    ) -> Result<(), PostError> {
        let post = self.store.get_post(id).await?.ok_or(PostError::NotFound)?;

        if post.author != requesting_user {
            return Err(PostError::Forbidden);
        }

        self.store.update_post_content(id, content).await?;
        Ok(())
    }

    async fn delete(&self, id: i32, requesting_user: &str) -> Result<(), PostError> {
        let post = self.store.get_post(id).await?.ok_or(PostError::NotFound)?;

        if post.author != requesting_user {
            return Err(PostError::Forbidden);
        }

        let removed = self.store.delete_post(id).await?;
        if !removed {
            return Err(PostError::NotFound);
        }

        info!("Deleted post {} by {}", id, requesting_user);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn service() -> SeaOrmPostService {
        let store = Store::with_pool_options("sqlite::memory:", 1, 1)
            .await
            .expect("in-memory store");
        SeaOrmPostService::new(store)
    }

    fn new_post(title: &str, content: &str, category: &str, author: &str) -> NewPost {
        NewPost {
            title: title.to_string(),
            content: content.to_string(),
            category: category.to_string(),
            author: author.to_string(),
        }
    }

    #[tokio::test]
    async fn test_list_filters_by_category() {
        let svc = service().await;

        svc.create(new_post("a", "x", "general", "alice"))
            .await
            .unwrap();
        svc.create(new_post("b", "y", "trades", "alice"))
            .await
            .unwrap();

        let all = svc.list(None).await.unwrap();
        assert_eq!(all.len(), 2);

        let general = svc.list(Some("general")).await.unwrap();
        assert_eq!(general.len(), 1);
        assert_eq!(general[0].title, "a");

        let none = svc.list(Some("nope")).await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let svc = service().await;

        let first = svc
            .create(new_post("first", "x", "general", "alice"))
            .await
            .unwrap();
        let second = svc
            .create(new_post("second", "y", "general", "alice"))
            .await
            .unwrap();
        assert!(second.id > first.id);

        let all = svc.list(None).await.unwrap();
        assert_eq!(all[0].id, second.id);
        assert_eq!(all[1].id, first.id);
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_and_covers_content() {
        let svc = service().await;

        svc.create(new_post(
            "Welcome to BaseballUSA!",
            "Introduce yourself here.",
            "general",
            "alice",
        ))
        .await
        .unwrap();

        let by_title = svc.search(Some("welcome")).await.unwrap();
        assert_eq!(by_title.len(), 1);

        let by_content = svc.search(Some("INTRODUCE")).await.unwrap();
        assert_eq!(by_content.len(), 1);

        let miss = svc.search(Some("basketball")).await.unwrap();
        assert!(miss.is_empty());
    }

    #[tokio::test]
    async fn test_search_empty_query_returns_nothing() {
        let svc = service().await;

        svc.create(new_post("a", "x", "general", "alice"))
            .await
            .unwrap();

        assert!(svc.search(None).await.unwrap().is_empty());
        assert!(svc.search(Some("")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_counts_each_fetch_as_a_view() {
        let svc = service().await;

        let post = svc
            .create(new_post("a", "x", "general", "alice"))
            .await
            .unwrap();
        assert_eq!(post.views, 0);

        for expected in 1..=3 {
            let fetched = svc.get(post.id).await.unwrap();
            assert_eq!(fetched.views, expected);
        }
    }

    #[tokio::test]
    async fn test_get_missing_post() {
        let svc = service().await;
        assert!(matches!(svc.get(42).await, Err(PostError::NotFound)));
    }

    #[tokio::test]
    async fn test_update_content_enforces_ownership() {
        let svc = service().await;

        let post = svc
            .create(new_post("a", "old", "general", "alice"))
            .await
            .unwrap();

        assert!(matches!(
            svc.update_content(post.id, "new", "bob").await,
            Err(PostError::Forbidden)
        ));

        svc.update_content(post.id, "new", "alice").await.unwrap();

        let updated = svc.get(post.id).await.unwrap();
        assert_eq!(updated.content, "new");
        assert_eq!(updated.title, "a");
        assert_eq!(updated.category, "general");
        assert_eq!(updated.author, "alice");
        assert_eq!(updated.created_at, post.created_at);
    }

    #[tokio::test]
    async fn test_update_preserves_embedded_newlines() {
        let svc = service().await;

        let post = svc
            .create(new_post("a", "one", "general", "alice"))
            .await
            .unwrap();

        svc.update_content(post.id, "line one\nline two\n", "alice")
            .await
            .unwrap();

        let updated = svc.get(post.id).await.unwrap();
        assert_eq!(updated.content, "line one\nline two\n");
    }

    #[tokio::test]
    async fn test_delete_enforces_ownership_and_is_terminal() {
        let svc = service().await;

        let post = svc
            .create(new_post("a", "x", "general", "alice"))
            .await
            .unwrap();

        assert!(matches!(
            svc.delete(post.id, "bob").await,
            Err(PostError::Forbidden)
        ));

        svc.delete(post.id, "alice").await.unwrap();

        assert!(matches!(
            svc.delete(post.id, "alice").await,
            Err(PostError::NotFound)
        ));
        assert!(matches!(svc.get(post.id).await, Err(PostError::NotFound)));
    }

    #[tokio::test]
    async fn test_delete_missing_post() {
        let svc = service().await;
        assert!(matches!(
            svc.delete(42, "alice").await,
            Err(PostError::NotFound)
        ));
    }
}
