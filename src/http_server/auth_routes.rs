//! Auth HTTP Routes
//!
//! - `POST /register` - create an account
//! - `POST /login` - exchange credentials for an access token
//! - `GET /protected` - echo the authenticated username

use std::sync::Arc;

use axum::{
    extract::{Json, State},
    http::StatusCode,
    routing::{get, post},
    Router,
};
use serde::Serialize;

use super::errors::ApiError;
use super::extract::AuthUser;
use super::state::AppState;
use crate::auth::Credentials;
use crate::observability::{log_event, Event};

pub fn auth_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/register", post(register_handler))
        .route("/login", post(login_handler))
        .route("/protected", get(protected_handler))
        .with_state(state)
}

// ==================
// Response Types
// ==================

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: String,
    pub user_id: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub access_token: String,
}

#[derive(Debug, Serialize)]
pub struct ProtectedResponse {
    pub message: String,
    pub user: String,
}

// ==================
// Handlers
// ==================

// Argon2 hashing runs on the blocking pool.

async fn register_handler(
    State(state): State<Arc<AppState>>,
    Json(credentials): Json<Credentials>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    let worker = Arc::clone(&state);
    let creds = credentials.clone();
    let user_id = tokio::task::spawn_blocking(move || worker.auth.register(&creds))
        .await
        .map_err(|_| ApiError::internal())??;

    log_event(
        Event::UserRegistered,
        &[
            ("user_id", &user_id.to_string()),
            ("username", credentials.username.as_deref().unwrap_or_default()),
        ],
    );

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully".to_string(),
            user_id: user_id.to_string(),
        }),
    ))
}

async fn login_handler(
    State(state): State<Arc<AppState>>,
    Json(credentials): Json<Credentials>,
) -> Result<Json<LoginResponse>, ApiError> {
    let worker = Arc::clone(&state);
    let creds = credentials.clone();
    let outcome = tokio::task::spawn_blocking(move || worker.auth.login(&creds))
        .await
        .map_err(|_| ApiError::internal())?;

    match outcome {
        Ok((username, access_token)) => {
            log_event(Event::LoginSucceeded, &[("username", &username)]);
            Ok(Json(LoginResponse {
                message: format!("Logged in as {}", username),
                access_token,
            }))
        }
        Err(err) => {
            log_event(
                Event::LoginFailed,
                &[
                    ("code", err.code()),
                    ("username", credentials.username.as_deref().unwrap_or_default()),
                ],
            );
            Err(err.into())
        }
    }
}

async fn protected_handler(AuthUser(user): AuthUser) -> Json<ProtectedResponse> {
    Json(ProtectedResponse {
        message: "This is a protected resource".to_string(),
        user,
    })
}
