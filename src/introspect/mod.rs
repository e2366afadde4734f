//! Schema introspection across all datasets in the store

mod introspector;

pub use introspector::{DatasetReport, IntrospectionReport, ReportEntry, SchemaIntrospector};
