//! tabserve - an authenticated HTTP server that filters, sorts and
//! describes delimited text datasets.
//!
//! Request pipeline: [`dataset`] loads raw cells, [`schema`] infers column
//! types, [`expr`] compiles filter expressions, [`executor`] applies
//! filters and sorts, [`introspect`] reports schemas, and [`http_server`]
//! exposes it all behind bearer-token [`auth`].

pub mod auth;
pub mod cli;
pub mod dataset;
pub mod executor;
pub mod expr;
pub mod http_server;
pub mod introspect;
pub mod observability;
pub mod schema;
