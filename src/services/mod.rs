pub mod auth_service;
pub mod auth_service_impl;
pub use auth_service::{AuthError, AuthService, LoginResult, PublicUser};
pub use auth_service_impl::SeaOrmAuthService;

pub mod post_service;
pub mod post_service_impl;
pub use post_service::{PostError, PostService};
pub use post_service_impl::SeaOrmPostService;

pub mod token;
pub use token::{Claims, TokenSigner};
