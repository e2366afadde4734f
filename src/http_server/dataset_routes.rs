//! Dataset HTTP Routes
//!
//! - `GET /info` - schema report for every dataset
//! - `GET /get-file-data/:filename?filter=..&sort=..` - filtered, sorted records
//!
//! Query work is synchronous file I/O, so it runs on the blocking pool under
//! the configured request timeout.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::Value as JsonValue;

use super::errors::ApiError;
use super::extract::AuthUser;
use super::state::AppState;
use crate::executor::{QueryExecutor, QueryRequest};
use crate::introspect::{ReportEntry, SchemaIntrospector};
use crate::observability::{log_event, Event};

pub fn dataset_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/info", get(info_handler))
        .route("/get-file-data/:filename", get(file_data_handler))
        .with_state(state)
}

// ==================
// Response Types
// ==================

#[derive(Debug, Serialize)]
pub struct InfoResponse {
    #[serde(rename = "Report")]
    pub report: Vec<ReportEntry>,
}

#[derive(Debug, Serialize)]
pub struct DataResponse {
    pub data: Vec<JsonValue>,
}

/// Splits repeated `filter` and `sort` parameters, keeping their order.
/// Other parameters are ignored.
pub fn query_request(filename: String, params: Vec<(String, String)>) -> QueryRequest {
    params
        .into_iter()
        .fold(QueryRequest::new(filename), |request, (key, value)| {
            match key.as_str() {
                "filter" => request.filter(value),
                "sort" => request.sort_by(value),
                _ => request,
            }
        })
}

/// Runs `work` on the blocking pool, bounded by the request timeout
async fn run_blocking<T, F>(state: &AppState, operation: &str, work: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    let timeout_ms = state.request_timeout.as_millis().to_string();
    match tokio::time::timeout(state.request_timeout, tokio::task::spawn_blocking(work)).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(join_err)) => {
            log_event(
                Event::QueryFailed,
                &[("operation", operation), ("reason", &join_err.to_string())],
            );
            Err(ApiError::internal())
        }
        Err(_) => {
            log_event(
                Event::QueryTimeout,
                &[("operation", operation), ("timeout_ms", &timeout_ms)],
            );
            Err(ApiError::timeout())
        }
    }
}

// ==================
// Handlers
// ==================

async fn info_handler(
    AuthUser(user): AuthUser,
    State(state): State<Arc<AppState>>,
) -> Result<(StatusCode, Json<InfoResponse>), ApiError> {
    let store = Arc::clone(&state.store);
    let report = run_blocking(&state, "info", move || {
        SchemaIntrospector::new(store.as_ref()).describe_all()
    })
    .await?
    .map_err(|err| {
        log_event(Event::QueryFailed, &[("operation", "info"), ("reason", &err.to_string())]);
        ApiError::internal()
    })?;

    for failed in report.datasets.iter().filter(|d| !d.is_ok()) {
        if let Err(err) = &failed.outcome {
            log_event(
                Event::DatasetLoadFailed,
                &[("dataset", &failed.filename), ("code", err.code())],
            );
        }
    }
    log_event(
        Event::IntrospectComplete,
        &[
            ("datasets", &report.datasets.len().to_string()),
            ("failures", &report.failure_count().to_string()),
            ("user", &user),
        ],
    );

    Ok((
        state.info_status,
        Json(InfoResponse {
            report: report.entries(),
        }),
    ))
}

async fn file_data_handler(
    AuthUser(user): AuthUser,
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<DataResponse>, ApiError> {
    let request = query_request(filename, params);
    let dataset = request.dataset.clone();
    let started = Instant::now();

    let store = Arc::clone(&state.store);
    let outcome = run_blocking(&state, "get-file-data", move || {
        QueryExecutor::new(store.as_ref())
            .execute(&request)
            .map(|result| (result.records(), result.scanned_count))
    })
    .await?;

    match outcome {
        Ok((data, scanned)) => {
            log_event(
                Event::QueryComplete,
                &[
                    ("dataset", &dataset),
                    ("duration_ms", &started.elapsed().as_millis().to_string()),
                    ("rows", &data.len().to_string()),
                    ("scanned", &scanned.to_string()),
                    ("user", &user),
                ],
            );
            Ok(Json(DataResponse { data }))
        }
        Err(err) => {
            let event = if err.is_client_error() {
                Event::QueryRejected
            } else {
                Event::QueryFailed
            };
            log_event(
                event,
                &[
                    ("code", err.code()),
                    ("dataset", &dataset),
                    ("reason", &err.to_string()),
                ],
            );
            Err(err.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_request_keeps_parameter_order() {
        let params = vec![
            ("sort".to_string(), "name".to_string()),
            ("filter".to_string(), "age > 1".to_string()),
            ("page".to_string(), "2".to_string()),
            ("filter".to_string(), "age < 9".to_string()),
            ("sort".to_string(), "age".to_string()),
        ];

        let request = query_request("t.csv".to_string(), params);
        assert_eq!(request.dataset, "t.csv");
        assert_eq!(request.filters, vec!["age > 1", "age < 9"]);
        assert_eq!(request.sort, vec!["name", "age"]);
    }
}
