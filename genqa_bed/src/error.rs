use std::path::PathBuf;
use std::process::ExitStatus;

use polars::error::PolarsError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PipelineError>;

/// Every way a run can stop. Nothing here is recovered from; `main` reports it and exits.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("invalid configuration in {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Polars(#[from] PolarsError),

    #[error("{path} line {line}: expected {expected} columns, found {found}")]
    MalformedRow {
        path: PathBuf,
        line: usize,
        expected: String,
        found: usize,
    },

    #[error("{path}: expected {expected} columns in header, found {found}")]
    ColumnCount {
        path: PathBuf,
        expected: usize,
        found: usize,
    },

    #[error("{path} row {row}: missing value in column '{column}'")]
    MissingField {
        path: PathBuf,
        row: usize,
        column: &'static str,
    },

    #[error("{found} unique non-empty {what} identified, should be {expected}")]
    CardinalityMismatch {
        what: &'static str,
        found: usize,
        expected: usize,
    },

    #[error(
        "g2e line {line}: row transcript {transcript} corresponds to {transcript_gene}, \
         but row gene {symbol} corresponds to {}",
        .symbol_gene.as_deref().unwrap_or("no HGNC ID")
    )]
    IdentityConflict {
        line: usize,
        transcript: String,
        transcript_gene: String,
        symbol: String,
        symbol_gene: Option<String>,
    },

    #[error("{symbol} fetches {}, not {expected}", .found.as_deref().unwrap_or("no HGNC ID"))]
    SymbolConflict {
        symbol: String,
        found: Option<String>,
        expected: String,
    },

    #[error("{gene} should have {expected}, not {found}")]
    TranscriptConflict {
        gene: String,
        expected: String,
        found: String,
    },

    #[error("{gene} has no exons")]
    MissingCoverage { gene: String },

    #[error("{gene} has multiple exon {exon}")]
    DuplicateExon { gene: String, exon: u32 },

    #[error("could not locate '{tool}' on PATH: {source}")]
    ToolNotFound {
        tool: &'static str,
        #[source]
        source: which::Error,
    },

    #[error("{tool} exited with {status}: {stderr}")]
    ToolFailed {
        tool: &'static str,
        status: ExitStatus,
        stderr: String,
    },
}

impl PipelineError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PipelineError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        PipelineError::Csv {
            path: path.into(),
            source,
        }
    }
}
