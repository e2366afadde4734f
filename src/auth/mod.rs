//! # Auth Module
//!
//! Username/password accounts and bearer-token authentication for the
//! dataset endpoints.

pub mod api;
pub mod crypto;
pub mod errors;
pub mod jwt;
pub mod user;

pub use api::AuthService;
pub use errors::{AuthError, AuthResult};
pub use jwt::{JwtClaims, JwtConfig, JwtManager};
pub use user::{Credentials, InMemoryUserRepository, User, UserRepository};
