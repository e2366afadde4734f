//! # Auth Errors
//!
//! Error codes:
//! - TABSERVE_AUTH_BLANK_FIELD
//! - TABSERVE_AUTH_USERNAME_TAKEN
//! - TABSERVE_AUTH_UNKNOWN_USER
//! - TABSERVE_AUTH_WRONG_CREDENTIALS
//! - TABSERVE_AUTH_MISSING_HEADER
//! - TABSERVE_AUTH_INVALID_TOKEN
//! - TABSERVE_AUTH_TOKEN_EXPIRED
//! - TABSERVE_AUTH_INTERNAL

use thiserror::Error;

/// Result type for auth operations
pub type AuthResult<T> = Result<T, AuthError>;

/// Authentication errors. Display strings are the client-facing messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    // ==================
    // Registration / Login
    // ==================

    /// Username or password missing or blank
    #[error("This field cannot be blank")]
    BlankField,

    #[error("User with this username already exists")]
    UsernameTaken,

    #[error("User {0} doesn't exist")]
    UnknownUser(String),

    /// Password does not match the stored hash
    #[error("Wrong credentials")]
    WrongCredentials,

    // ==================
    // Token Errors
    // ==================

    #[error("Missing Authorization Header")]
    MissingAuthorization,

    /// Malformed token, bad signature or wrong issuer
    #[error("Invalid token")]
    InvalidToken,

    #[error("Token has expired")]
    TokenExpired,

    // ==================
    // Internal Errors
    // ==================

    #[error("Internal error: password hashing failed")]
    HashingFailed,

    #[error("Internal error: token generation failed")]
    TokenGenerationFailed,

    #[error("Storage error: {0}")]
    StorageError(String),
}

impl AuthError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            AuthError::BlankField | AuthError::UsernameTaken | AuthError::UnknownUser(_) => 400,

            AuthError::WrongCredentials
            | AuthError::MissingAuthorization
            | AuthError::InvalidToken
            | AuthError::TokenExpired => 401,

            AuthError::HashingFailed
            | AuthError::TokenGenerationFailed
            | AuthError::StorageError(_) => 500,
        }
    }

    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::BlankField => "TABSERVE_AUTH_BLANK_FIELD",
            AuthError::UsernameTaken => "TABSERVE_AUTH_USERNAME_TAKEN",
            AuthError::UnknownUser(_) => "TABSERVE_AUTH_UNKNOWN_USER",
            AuthError::WrongCredentials => "TABSERVE_AUTH_WRONG_CREDENTIALS",
            AuthError::MissingAuthorization => "TABSERVE_AUTH_MISSING_HEADER",
            AuthError::InvalidToken => "TABSERVE_AUTH_INVALID_TOKEN",
            AuthError::TokenExpired => "TABSERVE_AUTH_TOKEN_EXPIRED",
            AuthError::HashingFailed
            | AuthError::TokenGenerationFailed
            | AuthError::StorageError(_) => "TABSERVE_AUTH_INTERNAL",
        }
    }

    /// Returns whether this error should be logged at warn level
    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }
}
