//! State shared by every request handler

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;

use crate::auth::AuthService;
use crate::dataset::DatasetSource;

/// Default ceiling on one request's query work
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub struct AppState {
    pub store: Arc<dyn DatasetSource>,
    pub auth: AuthService,
    pub request_timeout: Duration,
    /// Status code of a successful `/info` response
    pub info_status: StatusCode,
}

impl AppState {
    pub fn new(store: Arc<dyn DatasetSource>, auth: AuthService) -> Self {
        Self {
            store,
            auth,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            info_status: StatusCode::CREATED,
        }
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// `true` keeps the historical `201 Created` on `/info`; `false` answers `200`
    pub fn with_info_status_created(mut self, created: bool) -> Self {
        self.info_status = if created {
            StatusCode::CREATED
        } else {
            StatusCode::OK
        };
        self
    }
}
