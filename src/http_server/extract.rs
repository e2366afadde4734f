//! Request extractors

use std::sync::Arc;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use super::errors::ApiError;
use super::state::AppState;
use crate::observability::{log_event, Event};

/// Username of a request carrying a valid bearer token
///
/// Taking this as a handler argument rejects unauthenticated requests with
/// 401 before the handler body runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser(pub String);

#[async_trait]
impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        // A header that is not visible ASCII is present but unusable
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .map(|value| value.to_str().unwrap_or_default());

        match state.auth.validate_header(header) {
            Ok(claims) => Ok(AuthUser(claims.sub)),
            Err(err) => {
                log_event(
                    Event::AuthRejected,
                    &[("path", parts.uri.path()), ("reason", err.code())],
                );
                Err(err.into())
            }
        }
    }
}
