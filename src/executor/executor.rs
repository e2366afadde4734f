//! Query executor for tabserve
//!
//! Execution flow (strict order, each stage short-circuits on error):
//! 1. Load the dataset from the store
//! 2. Infer the schema and materialize typed rows
//! 3. Apply each filter expression over the previous survivors
//! 4. Sort by the requested keys, if any
//! 5. Hand back the ordered rows for serialization

use crate::dataset::DatasetSource;
use crate::schema::SchemaInferencer;

use super::errors::ExecutorResult;
use super::filters::PredicateFilter;
use super::result::ExecutionResult;
use super::sorter::RowSorter;

/// One client query against a dataset
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryRequest {
    pub dataset: String,
    pub filters: Vec<String>,
    pub sort: Vec<String>,
}

impl QueryRequest {
    pub fn new(dataset: impl Into<String>) -> Self {
        Self {
            dataset: dataset.into(),
            ..Default::default()
        }
    }

    pub fn filter(mut self, expression: impl Into<String>) -> Self {
        self.filters.push(expression.into());
        self
    }

    pub fn sort_by(mut self, column: impl Into<String>) -> Self {
        self.sort.push(column.into());
        self
    }
}

/// Runs queries against a dataset source
pub struct QueryExecutor<'a, S: DatasetSource + ?Sized> {
    store: &'a S,
}

impl<'a, S: DatasetSource + ?Sized> QueryExecutor<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Executes a query and returns the surviving rows in output order
    pub fn execute(&self, request: &QueryRequest) -> ExecutorResult<ExecutionResult> {
        let dataset = self.store.load(&request.dataset)?;

        let schema = SchemaInferencer::infer(&dataset);
        let rows = SchemaInferencer::materialize(&dataset, &schema);
        let scanned_count = rows.len();

        let rows = PredicateFilter::apply_all(rows, &request.filters, &schema)?;

        let rows = if request.sort.is_empty() {
            rows
        } else {
            RowSorter::sort_by_names(rows, &schema, &request.sort)?
        };

        let columns = dataset.columns().iter().map(|c| c.name.clone()).collect();
        Ok(ExecutionResult::new(
            dataset.name(),
            columns,
            rows,
            scanned_count,
        ))
    }
}
