//! `SeaORM` implementation of the `AuthService` trait.

use async_trait::async_trait;
use sea_orm::SqlErr;
use tokio::task;
use tracing::info;

use crate::config::AuthConfig;
use crate::db::Store;
use crate::db::repositories::user::{hash_password, verify_password};
use crate::services::auth_service::{AuthError, AuthService, LoginResult, PublicUser};
use crate::services::token::TokenSigner;

pub struct SeaOrmAuthService {
    store: Store,
    signer: TokenSigner,
    config: AuthConfig,
}

impl SeaOrmAuthService {
    #[must_use]
    pub fn new(store: Store, config: AuthConfig) -> Self {
        let signer = TokenSigner::new(&config.token_secret);
        Self {
            store,
            signer,
            config,
        }
    }
}

fn is_unique_violation(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<sea_orm::DbErr>().and_then(|e| e.sql_err()),
        Some(SqlErr::UniqueConstraintViolation(_))
    )
}

#[async_trait]
impl AuthService for SeaOrmAuthService {
    async fn register(&self, username: &str, password: &str) -> Result<PublicUser, AuthError> {
        if username.is_empty() || password.is_empty() {
            return Err(AuthError::Validation("Missing fields".to_string()));
        }

        // Hashing is CPU-heavy, run it off the async runtime.
        let config = self.config.clone();
        let password = password.to_string();
        let hash = task::spawn_blocking(move || hash_password(&password, &config))
            .await
            .map_err(|e| AuthError::Internal(format!("Password hashing task panicked: {e}")))??;

        // No existence pre-check: the UNIQUE constraint on username decides,
        // so concurrent registrations of the same name cannot race past it.
        match self.store.create_user(username, &hash).await {
            Ok(user) => {
                info!("Registered user: {}", user.username);
                Ok(PublicUser {
                    username: user.username,
                })
            }
            Err(err) if is_unique_violation(&err) => Err(AuthError::UsernameTaken),
            Err(err) => Err(err.into()),
        }
    }

    async fn login(&self, username: &str, password: &str) -> Result<LoginResult, AuthError> {
        let Some((user, stored_hash)) = self
            .store
            .get_user_by_username_with_password(username)
            .await?
        else {
            return Err(AuthError::UserNotFound);
        };

        if !verify_password(&stored_hash, password).await? {
            return Err(AuthError::InvalidPassword);
        }

        let token = self
            .signer
            .sign(&user.username)
            .map_err(|e| AuthError::Internal(format!("Failed to sign token: {e}")))?;

        Ok(LoginResult {
            token,
            user: PublicUser {
                username: user.username,
            },
        })
    }

    fn verify_token(&self, token: &str) -> Result<String, AuthError> {
        let claims = self
            .signer
            .verify(token)
            .map_err(|_| AuthError::InvalidToken)?;
        Ok(claims.username)
    }
}
