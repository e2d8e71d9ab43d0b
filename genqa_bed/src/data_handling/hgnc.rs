//! HGNC database dump: loading and symbol ⇄ HGNC ID lookups.
//!
//! A gene symbol may be current, previous or an alias, so lookups check the
//! `symbol`, `prev_symbol` and `alias_symbol` columns in that order. The order
//! decides which gene wins when a retired symbol was later reused.

use std::path::PathBuf;

use polars::prelude::*;
use tracing::{debug, info};

use crate::error::{PipelineError, Result};
use crate::models::{Dataset, GeneId, SymbolRecord};

/// Standard names for the four dump columns, whatever the dump itself calls them.
pub const HGNC_COLUMNS: [&str; 4] = ["hgnc_id", "symbol", "prev_symbol", "alias_symbol"];

/// Tab-separated HGNC dump with a header row.
pub struct HgncDump {
    pub path: PathBuf,
}

impl Dataset for HgncDump {
    type Row = SymbolRecord;

    fn load(&self) -> Result<Vec<SymbolRecord>> {
        info!("Reading HGNC dump from {}", self.path.display());

        // Every column stays a string; empty cells come back as nulls
        let mut df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .map_parse_options(|mut o| {
                o.separator = b'\t';
                o.quote_char = None;
                o.encoding = CsvEncoding::LossyUtf8;
                o
            })
            .try_into_reader_with_file_path(Some(self.path.clone()))?
            .finish()?;

        if df.width() != HGNC_COLUMNS.len() {
            return Err(PipelineError::ColumnCount {
                path: self.path.clone(),
                expected: HGNC_COLUMNS.len(),
                found: df.width(),
            });
        }
        debug!("HGNC dump header = {:?}", df.get_column_names());
        df.set_column_names(HGNC_COLUMNS)?;

        let ids = df.column("hgnc_id")?.str()?;
        let symbols = df.column("symbol")?.str()?;
        let prev = df.column("prev_symbol")?.str()?;
        let alias = df.column("alias_symbol")?.str()?;

        let mut records = Vec::with_capacity(df.height());
        for (row, (((id, symbol), prev), alias)) in ids
            .into_iter()
            .zip(symbols)
            .zip(prev)
            .zip(alias)
            .enumerate()
        {
            let hgnc_id = non_blank(id).ok_or_else(|| PipelineError::MissingField {
                path: self.path.clone(),
                row: row + 1,
                column: "hgnc_id",
            })?;

            records.push(SymbolRecord {
                hgnc_id,
                symbol: non_blank(symbol),
                prev_symbol: non_blank(prev),
                alias_symbol: non_blank(alias),
            });
        }

        debug!("Loaded {} HGNC records", records.len());
        Ok(records)
    }
}

fn non_blank(cell: Option<&str>) -> Option<String> {
    cell.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// In-memory HGNC dump, kept in file order.
#[derive(Debug, Clone, Default)]
pub struct SymbolRegistry {
    records: Vec<SymbolRecord>,
}

impl SymbolRegistry {
    pub fn new(records: Vec<SymbolRecord>) -> Self {
        Self { records }
    }

    pub fn load(dump: &HgncDump) -> Result<Self> {
        Ok(Self::new(dump.load()?))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// HGNC ID for a gene symbol, if one exists.
    ///
    /// Current symbols are searched first, then previous symbols, then aliases.
    /// Within a stage the first row in file order wins.
    pub fn resolve(&self, gene_symbol: &str) -> Option<&GeneId> {
        self.records
            .iter()
            .find(|r| r.symbol.as_deref() == Some(gene_symbol))
            .or_else(|| {
                self.records
                    .iter()
                    .find(|r| list_contains(r.prev_symbol.as_deref(), gene_symbol))
            })
            .or_else(|| {
                self.records
                    .iter()
                    .find(|r| list_contains(r.alias_symbol.as_deref(), gene_symbol))
            })
            .map(|r| &r.hgnc_id)
    }

    /// Current symbol for an HGNC ID. Previous and alias symbols are never returned.
    pub fn symbol_for(&self, hgnc_id: &str) -> Option<&str> {
        self.records
            .iter()
            .find(|r| r.hgnc_id == hgnc_id)
            .and_then(|r| r.symbol.as_deref())
    }
}

/// Whether a comma-separated symbol list contains `gene_symbol` exactly.
fn list_contains(cell: Option<&str>, gene_symbol: &str) -> bool {
    cell.map_or(false, |list| list.split(',').any(|s| s.trim() == gene_symbol))
}
