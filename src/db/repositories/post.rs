use anyhow::{Context, Result};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use tracing::info;

use crate::entities::posts;
use crate::entities::prelude::Posts;

#[derive(Debug, Clone)]
pub struct Post {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub author: String,
    pub category: String,
    pub created_at: String,
    pub views: i32,
}

impl From<posts::Model> for Post {
    fn from(model: posts::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            content: model.content,
            author: model.author,
            category: model.category,
            created_at: model.created_at,
            views: model.views,
        }
    }
}

/// Input for creating a post. `author` must already be the verified
/// identity of the caller.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub category: String,
    pub author: String,
}

pub struct PostRepository {
    conn: DatabaseConnection,
}

impl PostRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// List posts, newest first. Ties on `created_at` fall back to id
    /// order so same-instant inserts stay deterministic.
    pub async fn list(&self, category: Option<&str>) -> Result<Vec<Post>> {
        let mut query = Posts::find();

        if let Some(category) = category {
            query = query.filter(posts::Column::Category.eq(category));
        }

        let rows = query
            .order_by_desc(posts::Column::CreatedAt)
            .order_by_desc(posts::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list posts")?;

        Ok(rows.into_iter().map(Post::from).collect())
    }

    /// Substring match on title or content, newest first. SQLite's LIKE
    /// is case-insensitive for ASCII, which is the matching contract here.
    pub async fn search(&self, query: &str) -> Result<Vec<Post>> {
        let rows = Posts::find()
            .filter(
                Condition::any()
                    .add(posts::Column::Title.contains(query))
                    .add(posts::Column::Content.contains(query)),
            )
            .order_by_desc(posts::Column::CreatedAt)
            .order_by_desc(posts::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to search posts")?;

        Ok(rows.into_iter().map(Post::from).collect())
    }

    pub async fn get(&self, id: i32) -> Result<Option<Post>> {
        let post = Posts::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query post by id")?;

        Ok(post.map(Post::from))
    }

    /// Issue the atomic `views = views + 1` update for a post.
    /// Returns the number of rows touched (0 when the id does not exist).
    pub async fn record_view(&self, id: i32) -> Result<u64> {
        let result = Posts::update_many()
            .col_expr(
                posts::Column::Views,
                Expr::col(posts::Column::Views).add(1),
            )
            .filter(posts::Column::Id.eq(id))
            .exec(&self.conn)
            .await
            .context("Failed to increment views")?;

        Ok(result.rows_affected)
    }

    pub async fn create(&self, post: &NewPost) -> Result<Post> {
        let active = posts::ActiveModel {
            title: Set(post.title.clone()),
            content: Set(post.content.clone()),
            author: Set(post.author.clone()),
            category: Set(post.category.clone()),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            views: Set(0),
            ..Default::default()
        };

        let model = active
            .insert(&self.conn)
            .await
            .context("Failed to insert post")?;

        info!("Created post {} by {}", model.id, model.author);
        Ok(Post::from(model))
    }

    /// Replace the content column only. Title, category, author,
    /// created_at and views are untouched.
    pub async fn update_content(&self, id: i32, content: &str) -> Result<()> {
        Posts::update_many()
            .col_expr(posts::Column::Content, Expr::value(content))
            .filter(posts::Column::Id.eq(id))
            .exec(&self.conn)
            .await
            .context("Failed to update post content")?;

        Ok(())
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = Posts::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete post")?;

        let removed = result.rows_affected > 0;
        if removed {
            info!("Removed post with ID: {}", id);
        }
        Ok(removed)
    }
}
