use std::collections::{HashMap, HashSet};

use tracing::info;

use crate::data_handling::hgnc::SymbolRegistry;
use crate::error::{PipelineError, Result};
use crate::models::{ClinicalTranscriptMap, ExonRecord};

/// Re-check an assembled exon table, independently of how it was built.
///
/// Every record's symbol must still resolve to its HGNC ID, its transcript must
/// be that gene's clinical transcript, and no gene may repeat an exon number.
pub fn verify_exon_table(
    exons: &[ExonRecord],
    transcripts: &ClinicalTranscriptMap,
    registry: &SymbolRegistry,
) -> Result<()> {
    let mut exon_check: HashMap<&str, HashSet<u32>> = HashMap::new();

    for record in exons {
        let test_hgnc = registry.resolve(&record.symbol);
        if test_hgnc != Some(&record.hgnc_id) {
            return Err(PipelineError::SymbolConflict {
                symbol: record.symbol.clone(),
                found: test_hgnc.cloned(),
                expected: record.hgnc_id.clone(),
            });
        }

        match transcripts.get(&record.hgnc_id) {
            Some(expected) if *expected == record.transcript => {}
            other => {
                return Err(PipelineError::TranscriptConflict {
                    gene: record.hgnc_id.clone(),
                    expected: other.cloned().unwrap_or_else(|| "no clinical transcript".to_string()),
                    found: record.transcript.clone(),
                });
            }
        }

        if !exon_check
            .entry(record.hgnc_id.as_str())
            .or_default()
            .insert(record.exon)
        {
            return Err(PipelineError::DuplicateExon {
                gene: record.hgnc_id.clone(),
                exon: record.exon,
            });
        }
    }

    info!("Verified {} exons across {} genes", exons.len(), exon_check.len());
    Ok(())
}
