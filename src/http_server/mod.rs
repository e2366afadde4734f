//! # HTTP Server Module
//!
//! # Endpoints
//!
//! - `GET /info` - schema report (auth)
//! - `GET /get-file-data/:filename` - query a dataset (auth)
//! - `POST /register`, `POST /login` - accounts
//! - `GET /protected` - token check (auth)

pub mod auth_routes;
pub mod config;
pub mod dataset_routes;
pub mod errors;
pub mod extract;
pub mod server;
pub mod state;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ErrorResponse};
pub use extract::AuthUser;
pub use server::{build_router, HttpServer};
pub use state::AppState;
