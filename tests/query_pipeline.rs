//! Query pipeline tests over a real data directory
//!
//! Test Categories:
//! 1. Reference scenarios (filter, filter + sort, unknown columns)
//! 2. Filter composition (sequential filters intersect)
//! 3. Sort stability and Null placement
//! 4. Record serialization

use std::fs;

use serde_json::{json, Value};
use tempfile::TempDir;

use tabserve::dataset::DirectoryStore;
use tabserve::executor::{ExecutorError, QueryExecutor, QueryRequest};

fn data_dir() -> TempDir {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("t.csv"), "age,name\n30,Al\n17,Bo\n17,Cy\n").unwrap();
    fs::write(
        tmp.path().join("events.csv"),
        "id,kind,score,active,at\n\
         1,b,2.5,true,2024-01-02\n\
         2,a,,false,2024-01-01T10:00:00\n\
         3,b,1.0,true,\n\
         4,a,2.5,NA,2023-12-31 23:59:59\n\
         5,c,0.5,false,2024-01-02\n",
    )
    .unwrap();
    fs::write(tmp.path().join("empty.csv"), "age,name\n").unwrap();
    tmp
}

fn run(store: &DirectoryStore, request: QueryRequest) -> Result<Vec<Value>, ExecutorError> {
    QueryExecutor::new(store)
        .execute(&request)
        .map(|result| result.records())
}

fn ids(records: &[Value]) -> Vec<i64> {
    records.iter().map(|r| r["id"].as_i64().unwrap()).collect()
}

// =============================================================================
// REFERENCE SCENARIOS
// =============================================================================

#[test]
fn test_filter_adults() {
    let tmp = data_dir();
    let store = DirectoryStore::new(tmp.path());

    let records = run(&store, QueryRequest::new("t.csv").filter("age >= 18")).unwrap();
    assert_eq!(records, vec![json!({"age": 30, "name": "Al"})]);
}

#[test]
fn test_filter_then_sort() {
    let tmp = data_dir();
    let store = DirectoryStore::new(tmp.path());

    let records = run(
        &store,
        QueryRequest::new("t.csv").filter("age < 18").sort_by("name"),
    )
    .unwrap();
    assert_eq!(
        records,
        vec![
            json!({"age": 17, "name": "Bo"}),
            json!({"age": 17, "name": "Cy"}),
        ]
    );
}

#[test]
fn test_unknown_filter_column_is_invalid_expression() {
    let tmp = data_dir();
    let store = DirectoryStore::new(tmp.path());

    let err = run(&store, QueryRequest::new("t.csv").filter("missing_col == 1")).unwrap_err();
    assert!(matches!(err, ExecutorError::InvalidExpression { index: 0, .. }));
}

#[test]
fn test_unknown_sort_column_is_invalid_sort_key() {
    let tmp = data_dir();
    let store = DirectoryStore::new(tmp.path());

    let err = run(&store, QueryRequest::new("t.csv").sort_by("missing_col")).unwrap_err();
    assert_eq!(err, ExecutorError::InvalidSortKey("missing_col".to_string()));
}

#[test]
fn test_absent_and_empty_datasets() {
    let tmp = data_dir();
    let store = DirectoryStore::new(tmp.path());

    assert!(matches!(
        run(&store, QueryRequest::new("absent.csv")),
        Err(ExecutorError::NotFound(_))
    ));
    assert!(matches!(
        run(&store, QueryRequest::new("empty.csv")),
        Err(ExecutorError::EmptyFile(_))
    ));
    assert!(matches!(
        run(&store, QueryRequest::new("../t.csv")),
        Err(ExecutorError::NotFound(_))
    ));
}

// =============================================================================
// FILTER COMPOSITION
// =============================================================================

/// Sequential filters return a subset of the first filter alone.
#[test]
fn test_sequential_filters_intersect() {
    let tmp = data_dir();
    let store = DirectoryStore::new(tmp.path());

    let first = run(&store, QueryRequest::new("events.csv").filter("kind != 'c'")).unwrap();
    let both = run(
        &store,
        QueryRequest::new("events.csv")
            .filter("kind != 'c'")
            .filter("score >= 2"),
    )
    .unwrap();

    assert_eq!(ids(&first), vec![1, 2, 3, 4]);
    assert_eq!(ids(&both), vec![1, 4]);
    assert!(both.iter().all(|r| first.contains(r)));
}

/// The failing filter's position is reported.
#[test]
fn test_second_filter_failure_reports_index() {
    let tmp = data_dir();
    let store = DirectoryStore::new(tmp.path());

    let err = run(
        &store,
        QueryRequest::new("events.csv")
            .filter("id > 1")
            .filter("score == 'high'"),
    )
    .unwrap_err();
    assert!(matches!(err, ExecutorError::InvalidExpression { index: 1, .. }));
}

/// Null satisfies neither `==` nor `!=`.
#[test]
fn test_null_never_matches_comparisons() {
    let tmp = data_dir();
    let store = DirectoryStore::new(tmp.path());

    let eq = run(&store, QueryRequest::new("events.csv").filter("active == true")).unwrap();
    let ne = run(&store, QueryRequest::new("events.csv").filter("active != true")).unwrap();
    assert_eq!(ids(&eq), vec![1, 3]);
    assert_eq!(ids(&ne), vec![2, 5]);

    let negated =
        run(&store, QueryRequest::new("events.csv").filter("not (active == true)")).unwrap();
    assert_eq!(ids(&negated), vec![2, 4, 5]);
}

#[test]
fn test_logical_connectives_and_datetime_literals() {
    let tmp = data_dir();
    let store = DirectoryStore::new(tmp.path());

    let records = run(
        &store,
        QueryRequest::new("events.csv").filter("at >= '2024-01-01' and (kind == 'a' or id == 5)"),
    )
    .unwrap();
    assert_eq!(ids(&records), vec![2, 5]);
}

// =============================================================================
// SORTING
// =============================================================================

/// Equal keys keep file order; Nulls sort last.
#[test]
fn test_sort_stable_with_nulls_last() {
    let tmp = data_dir();
    let store = DirectoryStore::new(tmp.path());

    let by_score = run(&store, QueryRequest::new("events.csv").sort_by("score")).unwrap();
    assert_eq!(ids(&by_score), vec![5, 3, 1, 4, 2]);

    let by_kind_then_at = run(
        &store,
        QueryRequest::new("events.csv").sort_by("kind").sort_by("at"),
    )
    .unwrap();
    assert_eq!(ids(&by_kind_then_at), vec![4, 2, 1, 3, 5]);
}

// =============================================================================
// SERIALIZATION
// =============================================================================

#[test]
fn test_records_keep_column_order_and_types() {
    let tmp = data_dir();
    let store = DirectoryStore::new(tmp.path());

    let records = run(&store, QueryRequest::new("events.csv").filter("id == 2")).unwrap();
    let text = serde_json::to_string(&records[0]).unwrap();
    assert_eq!(
        text,
        r#"{"id":2,"kind":"a","score":null,"active":false,"at":"2024-01-01T10:00:00.000"}"#
    );

    let reparsed: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(reparsed, records[0]);
}

#[test]
fn test_custom_delimiter() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("semi.csv"), "a;b\n1;x\n2;y\n").unwrap();
    let store = DirectoryStore::new(tmp.path()).with_delimiter(b';');

    let records = run(&store, QueryRequest::new("semi.csv").filter("a > 1")).unwrap();
    assert_eq!(records, vec![json!({"a": 2, "b": "y"})]);
}
