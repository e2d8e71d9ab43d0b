use std::collections::BTreeSet;
use std::path::PathBuf;

use tracing::{debug, info};

use crate::error::{PipelineError, Result};
use crate::helper_functions::{read_tsv, Columns};
use crate::models::{ClinicalTranscriptMap, Dataset, PanelGeneSet, TranscriptRow};

/// Label marking the transcript used for clinical reporting.
pub const CLINICAL_TRANSCRIPT: &str = "clinical_transcript";

/// Map of HGNC IDs to their transcripts: `hgnc_id`, `transcript`, `label`.
pub struct GenesToTranscripts {
    pub path: PathBuf,
}

impl Dataset for GenesToTranscripts {
    type Row = TranscriptRow;

    fn load(&self) -> Result<Vec<TranscriptRow>> {
        info!("Reading gene transcripts from {}", self.path.display());
        let rows = read_tsv(&self.path, Columns::Exactly(3))?;
        Ok(rows.into_iter().map(|(_, row)| row).collect())
    }
}

/// Clinical transcript of every panel gene.
///
/// A later row for the same gene replaces an earlier one. Fails unless both the
/// genes and the transcripts number exactly `expected`.
pub fn get_gene_transcripts(
    rows: &[TranscriptRow],
    genes: &PanelGeneSet,
    expected: usize,
) -> Result<ClinicalTranscriptMap> {
    let mut gene_transcripts = ClinicalTranscriptMap::new();

    for row in rows {
        let hgnc_id = row.hgnc_id.trim();
        if genes.contains(hgnc_id) && row.label == CLINICAL_TRANSCRIPT {
            gene_transcripts.insert(hgnc_id.to_string(), row.transcript.trim().to_string());
        }
    }

    let keys = gene_transcripts.keys().filter(|k| !k.is_empty()).count();
    let values: BTreeSet<&str> = gene_transcripts
        .values()
        .map(String::as_str)
        .filter(|v| !v.is_empty())
        .collect();
    debug!("{} genes map to {} distinct transcripts", keys, values.len());

    if keys != expected {
        return Err(PipelineError::CardinalityMismatch {
            what: "HGNC IDs with a clinical transcript",
            found: keys,
            expected,
        });
    }
    if values.len() != expected {
        return Err(PipelineError::CardinalityMismatch {
            what: "clinical transcripts",
            found: values.len(),
            expected,
        });
    }

    info!("Selected {} clinical transcripts", values.len());
    Ok(gene_transcripts)
}
