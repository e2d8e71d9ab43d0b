use std::collections::BTreeSet;
use std::path::PathBuf;

use tracing::{debug, info};

use crate::error::{PipelineError, Result};
use crate::helper_functions::{read_tsv, Columns};
use crate::models::{Dataset, PanelGeneSet, PanelRow};

/// Map of panels to their genes; the HGNC ID sits in the third column.
pub struct PanelsToGenes {
    pub path: PathBuf,
}

impl Dataset for PanelsToGenes {
    type Row = PanelRow;

    fn load(&self) -> Result<Vec<PanelRow>> {
        info!("Reading panel genes from {}", self.path.display());
        let rows = read_tsv(&self.path, Columns::AtLeast(3))?;
        Ok(rows.into_iter().map(|(_, row)| row).collect())
    }
}

/// Unique, non-empty HGNC IDs referenced by any panel.
///
/// Fails unless exactly `expected` genes are found.
pub fn get_panel_genes(rows: &[PanelRow], expected: usize) -> Result<PanelGeneSet> {
    let genes: PanelGeneSet = rows
        .iter()
        .map(|row| row.hgnc_id.trim())
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect();

    let panels: BTreeSet<&str> = rows.iter().map(|row| row.panel.as_str()).collect();
    debug!("{} panels reference {} genes", panels.len(), genes.len());

    if genes.len() != expected {
        return Err(PipelineError::CardinalityMismatch {
            what: "panel genes",
            found: genes.len(),
            expected,
        });
    }

    info!("Identified {} unique panel genes", genes.len());
    Ok(genes)
}
