use axum::{
    Router,
    http::HeaderValue,
    middleware,
    routing::{delete, get, post, put},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::db::Store;
use crate::services::{AuthService, PostService, SeaOrmAuthService, SeaOrmPostService};

pub mod auth;
mod error;
mod posts;
mod types;

pub use error::ApiError;
pub use types::*;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,

    pub store: Store,

    pub auth_service: Arc<dyn AuthService>,

    pub post_service: Arc<dyn PostService>,
}

pub async fn create_app_state_from_config(config: Config) -> anyhow::Result<Arc<AppState>> {
    let store = Store::with_pool_options(
        &config.general.database_path,
        config.general.max_db_connections,
        config.general.min_db_connections,
    )
    .await?;

    let auth_service =
        Arc::new(SeaOrmAuthService::new(store.clone(), config.auth.clone())) as Arc<dyn AuthService>;
    let post_service = Arc::new(SeaOrmPostService::new(store.clone())) as Arc<dyn PostService>;

    Ok(Arc::new(AppState {
        config,
        store,
        auth_service,
        post_service,
    }))
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors_origins = state.config.server.cors_allowed_origins.clone();

    let protected_routes = Router::new()
        .route("/posts", post(posts::create_post))
        .route("/posts/{id}", put(posts::update_post))
        .route("/posts/{id}", delete(posts::delete_post))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::auth_middleware,
        ));

    let api_router = Router::new()
        .merge(protected_routes)
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/posts", get(posts::list_posts))
        .route("/posts/{id}", get(posts::get_post))
        .route("/search", get(posts::search_posts))
        .with_state(state);

    let cors_layer = if cors_origins.contains(&"*".to_string()) {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .nest("/api", api_router)
        .route("/health", get(health))
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
}

async fn health() -> &'static str {
    "Server is healthy"
}
