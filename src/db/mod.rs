use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

pub use repositories::post::{NewPost, Post};
pub use repositories::user::User;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn post_repo(&self) -> repositories::post::PostRepository {
        repositories::post::PostRepository::new(self.conn.clone())
    }

    // ========== User Repository Methods ==========

    pub async fn create_user(&self, username: &str, password_hash: &str) -> Result<User> {
        self.user_repo().create(username, password_hash).await
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.user_repo().get_by_username(username).await
    }

    pub async fn get_user_by_username_with_password(
        &self,
        username: &str,
    ) -> Result<Option<(User, String)>> {
        self.user_repo()
            .get_by_username_with_password(username)
            .await
    }

    // ========== Post Repository Methods ==========

    pub async fn list_posts(&self, category: Option<&str>) -> Result<Vec<Post>> {
        self.post_repo().list(category).await
    }

    pub async fn search_posts(&self, query: &str) -> Result<Vec<Post>> {
        self.post_repo().search(query).await
    }

    pub async fn get_post(&self, id: i32) -> Result<Option<Post>> {
        self.post_repo().get(id).await
    }

    pub async fn record_post_view(&self, id: i32) -> Result<u64> {
        self.post_repo().record_view(id).await
    }

    pub async fn create_post(&self, post: &NewPost) -> Result<Post> {
        self.post_repo().create(post).await
    }

    pub async fn update_post_content(&self, id: i32, content: &str) -> Result<()> {
        self.post_repo().update_content(id, content).await
    }

    pub async fn delete_post(&self, id: i32) -> Result<bool> {
        self.post_repo().delete(id).await
    }
}
