use std::env;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{PipelineError, Result};

pub fn project_root() -> PathBuf {
    match env::var_os("PROJECT_ROOT") {
        Some(val) => PathBuf::from(val),
        None => {
            // Fall back to current directory if PROJECT_ROOT not set
            env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
        }
    }
}

/// Anchor a relative path at `root`; absolute paths are returned unchanged.
pub fn resolve_path(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

/// How many columns a headerless table must have.
#[derive(Debug, Clone, Copy)]
pub enum Columns {
    Exactly(usize),
    AtLeast(usize),
}

impl Columns {
    fn accepts(&self, found: usize) -> bool {
        match *self {
            Columns::Exactly(n) => found == n,
            Columns::AtLeast(n) => found >= n,
        }
    }

    fn wanted(&self) -> usize {
        match *self {
            Columns::Exactly(n) | Columns::AtLeast(n) => n,
        }
    }

    fn describe(&self) -> String {
        match *self {
            Columns::Exactly(n) => n.to_string(),
            Columns::AtLeast(n) => format!("at least {}", n),
        }
    }
}

/// Read a headerless, tab-separated table into typed rows.
///
/// Every row must satisfy `columns`; only the leading `columns.wanted()` fields
/// are deserialised. Cells are kept as written, so callers trim the fields they
/// key on. Returns each row with its 1-based line number.
pub fn read_tsv<T: DeserializeOwned>(path: &Path, columns: Columns) -> Result<Vec<(usize, T)>> {
    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_path(path)
        .map_err(|e| PipelineError::csv(path, e))?;

    let mut rows = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record.map_err(|e| PipelineError::csv(path, e))?;
        let line = record
            .position()
            .map(|pos| pos.line() as usize)
            .unwrap_or(idx + 1);

        if !columns.accepts(record.len()) {
            return Err(PipelineError::MalformedRow {
                path: path.to_path_buf(),
                line,
                expected: columns.describe(),
                found: record.len(),
            });
        }

        let leading: StringRecord = record.iter().take(columns.wanted()).collect();
        let row = leading
            .deserialize(None)
            .map_err(|e| PipelineError::csv(path, e))?;
        rows.push((line, row));
    }

    debug!("Loaded {} rows from {}", rows.len(), path.display());
    Ok(rows)
}
