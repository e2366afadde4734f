//! # User Management
//!
//! User model and repository, keyed by username.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::crypto::{hash_password, verify_password};
use super::errors::{AuthError, AuthResult};

/// Registered account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,

    /// Unique login name
    pub username: String,

    /// Argon2id password hash (never plaintext)
    #[serde(skip_serializing)]
    pub password_hash: String,

    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user, hashing the password
    pub fn new(username: String, password: &str) -> AuthResult<Self> {
        Ok(Self {
            id: Uuid::new_v4(),
            username,
            password_hash: hash_password(password)?,
            created_at: Utc::now(),
        })
    }

    /// Verify a password against this user's stored hash
    pub fn verify_password(&self, password: &str) -> AuthResult<bool> {
        verify_password(password, &self.password_hash)
    }
}

/// Body of `/register` and `/login`
///
/// Both fields are optional at the wire level so a missing field surfaces as
/// [`AuthError::BlankField`] rather than a deserialization rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl Credentials {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: Some(username.to_string()),
            password: Some(password.to_string()),
        }
    }

    /// Returns (username, password) when both are present and non-blank
    pub fn require(&self) -> AuthResult<(&str, &str)> {
        fn non_blank(field: &Option<String>) -> AuthResult<&str> {
            field
                .as_deref()
                .filter(|v| !v.trim().is_empty())
                .ok_or(AuthError::BlankField)
        }
        Ok((non_blank(&self.username)?, non_blank(&self.password)?))
    }
}

/// User repository trait
///
/// Abstracts storage operations for users.
pub trait UserRepository: Send + Sync {
    fn find_by_username(&self, username: &str) -> AuthResult<Option<User>>;

    fn username_exists(&self, username: &str) -> AuthResult<bool>;

    /// Insert a user; fails with `UsernameTaken` on a duplicate
    fn create(&self, user: &User) -> AuthResult<()>;
}

/// In-memory user repository
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: std::sync::RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserRepository for InMemoryUserRepository {
    fn find_by_username(&self, username: &str) -> AuthResult<Option<User>> {
        let users = self
            .users
            .read()
            .map_err(|_| AuthError::StorageError("Lock poisoned".to_string()))?;
        Ok(users.iter().find(|u| u.username == username).cloned())
    }

    fn username_exists(&self, username: &str) -> AuthResult<bool> {
        let users = self
            .users
            .read()
            .map_err(|_| AuthError::StorageError("Lock poisoned".to_string()))?;
        Ok(users.iter().any(|u| u.username == username))
    }

    fn create(&self, user: &User) -> AuthResult<()> {
        let mut users = self
            .users
            .write()
            .map_err(|_| AuthError::StorageError("Lock poisoned".to_string()))?;

        if users.iter().any(|u| u.username == user.username) {
            return Err(AuthError::UsernameTaken);
        }

        users.push(user.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_creation() {
        let user = User::new("alice".to_string(), "pw123").unwrap();

        assert_eq!(user.username, "alice");
        assert!(user.verify_password("pw123").unwrap());
        assert!(!user.verify_password("nope").unwrap());
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let user = User::new("alice".to_string(), "pw123").unwrap();
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("password_hash"));
        assert!(!json.contains("argon2"));
    }

    #[test]
    fn test_repository_rejects_duplicates() {
        let repo = InMemoryUserRepository::new();
        let user = User::new("alice".to_string(), "pw").unwrap();
        repo.create(&user).unwrap();

        assert!(repo.username_exists("alice").unwrap());
        assert!(!repo.username_exists("bob").unwrap());
        assert_eq!(
            repo.create(&User::new("alice".to_string(), "other").unwrap()),
            Err(AuthError::UsernameTaken)
        );
        assert_eq!(repo.find_by_username("alice").unwrap().unwrap().id, user.id);
    }

    #[test]
    fn test_credentials_require() {
        assert_eq!(Credentials::new("a", "b").require().unwrap(), ("a", "b"));
        assert_eq!(
            Credentials::new("  ", "b").require(),
            Err(AuthError::BlankField)
        );
        assert_eq!(Credentials::default().require(), Err(AuthError::BlankField));
    }

    #[test]
    fn test_required_fields_borrow_from_credentials() {
        let creds = Credentials {
            username: Some("alice".to_string()),
            password: None,
        };
        assert_eq!(creds.require(), Err(AuthError::BlankField));

        let creds = Credentials::new("alice", "s3cret");
        let (username, password) = creds.require().unwrap();
        assert_eq!((username.len(), password.len()), (5, 6));
    }
}
