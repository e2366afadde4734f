//! Dataset store for tabserve
//!
//! Loads a named delimited file into raw rows on demand and defines the
//! typed [`Value`] and [`Row`] the rest of the engine operates on.
//!
//! # Load outcomes
//!
//! - `NotFound`: no file matches the name
//! - `EmptyFile`: empty file, or header without data rows
//! - `TooLarge`: file exceeds the configured ceiling
//! - `Malformed`: a row has more cells than the header
//! - `Unreadable`: I/O failure or non UTF-8 content

mod errors;
mod store;
mod value;

pub use errors::{StoreError, StoreResult};
pub use store::{
    parse_delimited, Column, Dataset, DatasetSource, DirectoryStore, DEFAULT_MAX_FILE_BYTES,
    NULL_TOKENS,
};
pub use value::{Row, Value, DATETIME_OUTPUT_FORMAT};
