//! Query executor subsystem for tabserve
//!
//! Turns a dataset name, filter expressions and sort keys into an ordered
//! set of output records.
//!
//! # Execution Flow (strict order)
//!
//! 1. Load the dataset (`NotFound`, `EmptyFile`)
//! 2. Infer the schema
//! 3. Compile and apply each filter over the previous survivors (`InvalidExpression`)
//! 4. Sort when keys are given (`InvalidSortKey`)
//! 5. Serialize records

mod errors;
mod executor;
mod filters;
mod result;
mod sorter;

pub use errors::{ExecutorError, ExecutorResult};
pub use executor::{QueryExecutor, QueryRequest};
pub use filters::PredicateFilter;
pub use result::ExecutionResult;
pub use sorter::RowSorter;
