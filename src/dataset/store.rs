//! Directory-backed dataset store
//!
//! Reads a named delimited file on every request. No caching, no shared
//! mutable state: concurrent requests each own their loaded copy.

use std::fs::{self, File};
use std::io::Read;
use std::path::{Component, Path, PathBuf};

use super::errors::{StoreError, StoreResult};

/// Cell spellings that load as Null
pub const NULL_TOKENS: &[&str] = &["", "NA", "N/A", "NULL", "null", "NaN", "nan", "None"];

/// Default ceiling on the size of a single dataset file (64 MiB)
pub const DEFAULT_MAX_FILE_BYTES: u64 = 64 * 1024 * 1024;

/// A column as declared by the header line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub position: usize,
}

/// Raw, untyped content of one dataset file.
///
/// Every record holds exactly one cell per column; `None` marks a Null
/// cell (missing or spelled as one of [`NULL_TOKENS`]).
#[derive(Debug, Clone)]
pub struct Dataset {
    name: String,
    columns: Vec<Column>,
    records: Vec<Vec<Option<String>>>,
}

impl Dataset {
    /// Builds a dataset, padding short records with Null cells
    pub fn new(
        name: impl Into<String>,
        headers: Vec<String>,
        records: Vec<Vec<Option<String>>>,
    ) -> Self {
        let width = headers.len();
        let columns = headers
            .into_iter()
            .enumerate()
            .map(|(position, name)| Column { name, position })
            .collect();
        let records = records
            .into_iter()
            .map(|mut cells| {
                cells.resize(width, None);
                cells
            })
            .collect();
        Self {
            name: name.into(),
            columns,
            records,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn records(&self) -> &[Vec<Option<String>>] {
        &self.records
    }

    pub fn row_count(&self) -> usize {
        self.records.len()
    }

    /// Position of a column by name; the first occurrence wins for duplicates
    pub fn column_position(&self, name: &str) -> Option<usize> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.position)
    }

    /// Iterates the cells of one column, top to bottom
    pub fn column_cells(&self, position: usize) -> impl Iterator<Item = Option<&str>> + '_ {
        self.records
            .iter()
            .map(move |cells| cells.get(position).and_then(|c| c.as_deref()))
    }
}

/// Source of datasets: enumerates names and loads raw rows by name
pub trait DatasetSource: Send + Sync {
    /// Names of every dataset currently in the store, sorted
    fn list(&self) -> StoreResult<Vec<String>>;

    /// Loads and parses one dataset
    fn load(&self, name: &str) -> StoreResult<Dataset>;
}

/// Dataset store over a directory of delimited text files
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
    delimiter: u8,
    max_file_bytes: u64,
}

impl DirectoryStore {
    /// Creates a comma-delimited store rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            delimiter: b',',
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
        }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_max_file_bytes(mut self, max_file_bytes: u64) -> Self {
        self.max_file_bytes = max_file_bytes;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Maps a dataset name to a path, refusing anything but a single
    /// plain file name component
    fn resolve(&self, name: &str) -> StoreResult<PathBuf> {
        let mut components = Path::new(name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) if !name.contains(['/', '\\', '\0']) => {
                Ok(self.root.join(name))
            }
            _ => Err(StoreError::NotFound(name.to_string())),
        }
    }

    fn read_bounded(&self, name: &str, path: &Path) -> StoreResult<Vec<u8>> {
        let metadata = fs::metadata(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StoreError::NotFound(name.to_string())
            } else {
                StoreError::unreadable(name, e)
            }
        })?;

        if !metadata.is_file() {
            return Err(StoreError::NotFound(name.to_string()));
        }

        if metadata.len() > self.max_file_bytes {
            return Err(StoreError::TooLarge {
                name: name.to_string(),
                size: metadata.len(),
                limit: self.max_file_bytes,
            });
        }

        // The file may grow between stat and read; never read past the ceiling.
        let file = File::open(path).map_err(|e| StoreError::unreadable(name, e))?;
        let mut bytes = Vec::with_capacity(metadata.len() as usize);
        file.take(self.max_file_bytes + 1)
            .read_to_end(&mut bytes)
            .map_err(|e| StoreError::unreadable(name, e))?;

        if bytes.len() as u64 > self.max_file_bytes {
            return Err(StoreError::TooLarge {
                name: name.to_string(),
                size: bytes.len() as u64,
                limit: self.max_file_bytes,
            });
        }

        Ok(bytes)
    }
}

impl DatasetSource for DirectoryStore {
    fn list(&self) -> StoreResult<Vec<String>> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::unreadable(&self.root.display().to_string(), e)),
        };

        let mut names = Vec::new();
        for entry in entries.flatten() {
            let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false);
            if !is_file {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                if !name.starts_with('.') {
                    names.push(name.to_string());
                }
            }
        }

        names.sort();
        Ok(names)
    }

    fn load(&self, name: &str) -> StoreResult<Dataset> {
        let path = self.resolve(name)?;
        let bytes = self.read_bounded(name, &path)?;
        parse_delimited(name, &bytes, self.delimiter)
    }
}

/// Parses delimited bytes into a [`Dataset`].
///
/// The first record is the header. Records shorter than the header are
/// padded with Null; longer records are rejected as malformed.
pub fn parse_delimited(name: &str, bytes: &[u8], delimiter: u8) -> StoreResult<Dataset> {
    let text = std::str::from_utf8(bytes).map_err(|e| StoreError::unreadable(name, e))?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    if text.trim().is_empty() {
        return Err(StoreError::EmptyFile(name.to_string()));
    }

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| StoreError::unreadable(name, e))?
        .iter()
        .map(str::to_string)
        .collect();

    if headers.is_empty() {
        return Err(StoreError::EmptyFile(name.to_string()));
    }

    let width = headers.len();
    let mut records = Vec::new();

    for result in reader.records() {
        let record = result.map_err(|e| StoreError::unreadable(name, e))?;

        // Blank line
        if record.len() == 1 && record.get(0).map_or(false, str::is_empty) && width > 1 {
            continue;
        }

        if record.len() > width {
            return Err(StoreError::Malformed {
                name: name.to_string(),
                line: record.position().map(|p| p.line()).unwrap_or(0),
                expected: width,
                found: record.len(),
            });
        }

        records.push(record.iter().map(null_or_cell).collect());
    }

    if records.is_empty() {
        return Err(StoreError::EmptyFile(name.to_string()));
    }

    Ok(Dataset::new(name, headers, records))
}

fn null_or_cell(cell: &str) -> Option<String> {
    if NULL_TOKENS.contains(&cell) {
        None
    } else {
        Some(cell.to_string())
    }
}
