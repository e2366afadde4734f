//! # Auth Service
//!
//! Registration, login and token validation over a [`UserRepository`].

use std::sync::Arc;

use uuid::Uuid;

use super::errors::{AuthError, AuthResult};
use super::jwt::{JwtClaims, JwtConfig, JwtManager};
use super::user::{Credentials, InMemoryUserRepository, User, UserRepository};

/// Auth service combining the user repository and token manager
pub struct AuthService {
    user_repo: Arc<dyn UserRepository>,
    jwt_manager: JwtManager,
}

impl AuthService {
    pub fn new(user_repo: Arc<dyn UserRepository>, jwt_config: JwtConfig) -> Self {
        Self {
            user_repo,
            jwt_manager: JwtManager::new(jwt_config),
        }
    }

    /// Service backed by an empty in-memory repository
    pub fn in_memory(jwt_config: JwtConfig) -> Self {
        Self::new(Arc::new(InMemoryUserRepository::new()), jwt_config)
    }

    /// Register a new user, returning its id
    pub fn register(&self, credentials: &Credentials) -> AuthResult<Uuid> {
        let (username, password) = credentials.require()?;

        if self.user_repo.username_exists(username)? {
            return Err(AuthError::UsernameTaken);
        }

        let user = User::new(username.to_string(), password)?;
        self.user_repo.create(&user)?;
        Ok(user.id)
    }

    /// Verify credentials and issue an access token.
    /// Returns (username, token).
    pub fn login(&self, credentials: &Credentials) -> AuthResult<(String, String)> {
        let (username, password) = credentials.require()?;

        let user = self
            .user_repo
            .find_by_username(username)?
            .ok_or_else(|| AuthError::UnknownUser(username.to_string()))?;

        if !user.verify_password(password)? {
            return Err(AuthError::WrongCredentials);
        }

        let token = self.jwt_manager.generate_access_token(&user)?;
        Ok((user.username, token))
    }

    /// Validate a bearer token
    pub fn validate(&self, token: &str) -> AuthResult<JwtClaims> {
        self.jwt_manager.validate_token(token)
    }

    /// Validate the raw value of an `Authorization` header
    pub fn validate_header(&self, header: Option<&str>) -> AuthResult<JwtClaims> {
        let header = header.ok_or(AuthError::MissingAuthorization)?;
        let token = header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::InvalidToken)?;
        self.validate(token)
    }
}
