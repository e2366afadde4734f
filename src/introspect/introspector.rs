//! Per-dataset schema reports
//!
//! A dataset that fails to load is reported inline with its error; it
//! never aborts the report for the other datasets.

use serde::Serialize;

use crate::dataset::{DatasetSource, StoreError, StoreResult};
use crate::schema::{InferredType, SchemaInferencer};

/// Schema, or load failure, of one dataset
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetReport {
    pub filename: String,
    pub outcome: Result<Vec<(String, InferredType)>, StoreError>,
}

impl DatasetReport {
    /// `"column  Type"` lines in column order
    pub fn fileinfo_lines(&self) -> Option<Vec<String>> {
        self.outcome.as_ref().ok().map(|columns| {
            columns
                .iter()
                .map(|(name, ty)| format!("{}  {}", name, ty))
                .collect()
        })
    }

    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }

    /// Wire form: `fileinfo` on success, `error` on failure
    pub fn entry(&self) -> ReportEntry {
        ReportEntry {
            filename: self.filename.clone(),
            fileinfo: self.fileinfo_lines(),
            error: self.outcome.as_ref().err().map(|e| e.to_string()),
        }
    }
}

/// Serialized form of one dataset report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportEntry {
    pub filename: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fileinfo: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Reports for every dataset in the store, sorted by name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntrospectionReport {
    pub datasets: Vec<DatasetReport>,
}

impl IntrospectionReport {
    pub fn entries(&self) -> Vec<ReportEntry> {
        self.datasets.iter().map(DatasetReport::entry).collect()
    }

    /// Number of datasets that failed to load
    pub fn failure_count(&self) -> usize {
        self.datasets.iter().filter(|d| !d.is_ok()).count()
    }

    pub fn get(&self, filename: &str) -> Option<&DatasetReport> {
        self.datasets.iter().find(|d| d.filename == filename)
    }
}

/// Enumerates datasets and infers their column types
pub struct SchemaIntrospector<'a, S: DatasetSource + ?Sized> {
    store: &'a S,
}

impl<'a, S: DatasetSource + ?Sized> SchemaIntrospector<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Describes a single dataset
    pub fn describe(&self, name: &str) -> DatasetReport {
        let outcome = self.store.load(name).map(|dataset| {
            SchemaInferencer::infer(&dataset).column_types()
        });
        DatasetReport {
            filename: name.to_string(),
            outcome,
        }
    }

    /// Describes every dataset. Fails only when the store cannot be listed.
    pub fn describe_all(&self) -> StoreResult<IntrospectionReport> {
        let datasets = self
            .store
            .list()?
            .iter()
            .map(|name| self.describe(name))
            .collect();
        Ok(IntrospectionReport { datasets })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::DirectoryStore;
    use std::fs;
    use tempfile::TempDir;

    fn store() -> (TempDir, DirectoryStore) {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("people.csv"), "age,name\n30,Al\n17,Bo\n").unwrap();
        fs::write(tmp.path().join("broken.csv"), b"a\n\xff\n").unwrap();
        fs::write(tmp.path().join("empty.csv"), "").unwrap();
        let store = DirectoryStore::new(tmp.path());
        (tmp, store)
    }

    #[test]
    fn test_report_types() {
        let (_tmp, store) = store();
        let report = SchemaIntrospector::new(&store).describe_all().unwrap();
        let people = report.get("people.csv").unwrap();
        assert_eq!(
            people.outcome,
            Ok(vec![
                ("age".to_string(), InferredType::Integer),
                ("name".to_string(), InferredType::Text),
            ])
        );
        assert_eq!(
            people.fileinfo_lines().unwrap(),
            vec!["age  Integer", "name  Text"]
        );
    }

    #[test]
    fn test_failures_are_isolated() {
        let (_tmp, store) = store();
        let report = SchemaIntrospector::new(&store).describe_all().unwrap();

        assert_eq!(report.datasets.len(), 3);
        assert_eq!(report.failure_count(), 2);
        assert!(matches!(
            report.get("broken.csv").unwrap().outcome,
            Err(StoreError::Unreadable { .. })
        ));
        assert!(report.get("people.csv").unwrap().is_ok());
    }

    #[test]
    fn test_entries_serialize() {
        let (_tmp, store) = store();
        let report = SchemaIntrospector::new(&store).describe_all().unwrap();
        let entries = serde_json::to_value(report.entries()).unwrap();

        assert_eq!(entries[0]["filename"], "broken.csv");
        assert!(entries[0].get("fileinfo").is_none());
        assert!(entries[0]["error"].is_string());
        assert_eq!(entries[2]["filename"], "people.csv");
        assert_eq!(entries[2]["fileinfo"][0], "age  Integer");
    }

    #[test]
    fn test_describe_all_empty_store() {
        let tmp = TempDir::new().unwrap();
        let store = DirectoryStore::new(tmp.path());
        let report = SchemaIntrospector::new(&store).describe_all().unwrap();
        assert!(report.datasets.is_empty());
    }
}
