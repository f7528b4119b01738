//! Domain service for registration, login, and token verification.

use serde::Serialize;
use thiserror::Error;

/// Errors specific to authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Username already exists")]
    UsernameTaken,

    #[error("User not found")]
    UserNotFound,

    #[error("Invalid password")]
    InvalidPassword,

    #[error("Missing bearer token")]
    Unauthenticated,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for AuthError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Public view of a user. The password hash never crosses this boundary.
#[derive(Debug, Clone, Serialize)]
pub struct PublicUser {
    pub username: String,
}

/// Login result: the signed bearer token plus the public user view.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResult {
    pub token: String,
    pub user: PublicUser,
}

/// Domain service trait for authentication.
#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Creates a new account with a freshly hashed password.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Validation`] on empty username or password and
    /// [`AuthError::UsernameTaken`] when the name is already registered.
    async fn register(&self, username: &str, password: &str) -> Result<PublicUser, AuthError>;

    /// Verifies credentials and issues a signed bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::UserNotFound`] for unknown usernames and
    /// [`AuthError::InvalidPassword`] when the password does not match.
    async fn login(&self, username: &str, password: &str) -> Result<LoginResult, AuthError>;

    /// Resolves the acting identity embedded in a bearer token.
    fn verify_token(&self, token: &str) -> Result<String, AuthError>;
}
