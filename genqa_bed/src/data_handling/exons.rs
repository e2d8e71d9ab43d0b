use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use tracing::{debug, info};

use crate::data_handling::hgnc::SymbolRegistry;
use crate::error::{PipelineError, Result};
use crate::helper_functions::{read_tsv, Columns};
use crate::models::{ClinicalTranscriptMap, ExonRecord, ExonRow};

/// Exon positions of each transcript:
/// `chrom`, `start`, `end`, `symbol`, `transcript`, `exon`.
pub struct TranscriptsToExons {
    pub path: PathBuf,
}

impl TranscriptsToExons {
    /// Rows with their line numbers, for diagnostics.
    pub fn load_numbered(&self) -> Result<Vec<(usize, ExonRow)>> {
        info!("Reading transcript exons from {}", self.path.display());
        read_tsv(&self.path, Columns::Exactly(6))
    }
}

/// Exons of every clinical transcript, each checked against the HGNC dump.
///
/// A row is kept when its transcript is a clinical transcript. The HGNC ID that
/// owns the transcript must equal the HGNC ID of the row's gene symbol, and
/// every gene in `transcripts` must end up with at least one exon.
pub fn build_exon_table(
    rows: &[(usize, ExonRow)],
    transcripts: &ClinicalTranscriptMap,
    registry: &SymbolRegistry,
) -> Result<Vec<ExonRecord>> {
    let owners: HashMap<&str, &str> = transcripts
        .iter()
        .map(|(gene, transcript)| (transcript.as_str(), gene.as_str()))
        .collect();

    let mut exons = Vec::new();
    let mut outdated = 0;
    for (line, row) in rows {
        let Some(&hgnc_id) = owners.get(row.transcript.as_str()) else {
            continue;
        };

        let symbol_hgnc = registry.resolve(&row.symbol);
        if symbol_hgnc.map(String::as_str) != Some(hgnc_id) {
            return Err(PipelineError::IdentityConflict {
                line: *line,
                transcript: row.transcript.clone(),
                transcript_gene: hgnc_id.to_string(),
                symbol: row.symbol.clone(),
                symbol_gene: symbol_hgnc.cloned(),
            });
        }

        if registry.symbol_for(hgnc_id) != Some(row.symbol.as_str()) {
            debug!("g2e line {}: {} is listed under old symbol {}", line, hgnc_id, row.symbol);
            outdated += 1;
        }

        exons.push(ExonRecord {
            chrom: row.chrom.clone(),
            start: row.start,
            end: row.end,
            symbol: row.symbol.clone(),
            transcript: row.transcript.clone(),
            exon: row.exon,
            hgnc_id: hgnc_id.to_string(),
        });
    }
    debug!("{} of {} exon rows belong to clinical transcripts", exons.len(), rows.len());
    if outdated > 0 {
        info!("{} exons use a previous or alias gene symbol", outdated);
    }

    let covered: HashSet<&str> = exons.iter().map(|e| e.hgnc_id.as_str()).collect();
    if let Some(gene) = transcripts.keys().find(|g| !covered.contains(g.as_str())) {
        return Err(PipelineError::MissingCoverage { gene: gene.clone() });
    }

    info!("Collected {} exons for {} genes", exons.len(), covered.len());
    Ok(exons)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SymbolRecord;

    fn registry() -> SymbolRegistry {
        SymbolRegistry::new(vec![
            SymbolRecord {
                hgnc_id: "HGNC:1".to_string(),
                symbol: Some("ABC".to_string()),
                prev_symbol: Some("OLD1, OLD2".to_string()),
                alias_symbol: Some("A1".to_string()),
            },
            SymbolRecord {
                hgnc_id: "HGNC:2".to_string(),
                symbol: Some("DEF".to_string()),
                prev_symbol: None,
                alias_symbol: None,
            },
        ])
    }

    fn transcripts() -> ClinicalTranscriptMap {
        [("HGNC:1", "NM_001.1"), ("HGNC:2", "NM_002.3")]
            .into_iter()
            .map(|(g, t)| (g.to_string(), t.to_string()))
            .collect()
    }

    fn row(line: usize, chrom: &str, start: u64, symbol: &str, transcript: &str, exon: u32) -> (usize, ExonRow) {
        (
            line,
            ExonRow {
                chrom: chrom.to_string(),
                start,
                end: start + 100,
                symbol: symbol.to_string(),
                transcript: transcript.to_string(),
                exon,
            },
        )
    }

    #[test]
    fn keeps_only_clinical_transcript_exons() {
        let rows = vec![
            row(1, "chr1", 100, "ABC", "NM_001.1", 1),
            row(2, "chr1", 300, "ABC", "NM_001.1", 2),
            row(3, "chr1", 500, "ABC", "NM_999.1", 1),
            row(4, "chr2", 100, "DEF", "NM_002.3", 1),
        ];

        let exons = build_exon_table(&rows, &transcripts(), &registry()).unwrap();
        assert_eq!(exons.len(), 3);
        assert!(exons.iter().all(|e| e.transcript != "NM_999.1"));
        assert_eq!(exons[2].hgnc_id, "HGNC:2");
        assert_eq!(exons[2].end, 200);
    }

    #[test]
    fn previous_symbols_are_accepted() {
        let rows = vec![
            row(1, "chr1", 100, "OLD2", "NM_001.1", 1),
            row(2, "chr2", 100, "DEF", "NM_002.3", 1),
        ];

        let exons = build_exon_table(&rows, &transcripts(), &registry()).unwrap();
        assert_eq!(exons[0].symbol, "OLD2");
        assert_eq!(exons[0].hgnc_id, "HGNC:1");
    }

    #[test]
    fn symbol_of_another_gene_is_an_identity_conflict() {
        let rows = vec![
            row(1, "chr1", 100, "ABC", "NM_001.1", 1),
            row(2, "chr2", 100, "ABC", "NM_002.3", 1),
        ];

        match build_exon_table(&rows, &transcripts(), &registry()) {
            Err(PipelineError::IdentityConflict {
                line,
                transcript_gene,
                symbol_gene,
                ..
            }) => {
                assert_eq!(line, 2);
                assert_eq!(transcript_gene, "HGNC:2");
                assert_eq!(symbol_gene.as_deref(), Some("HGNC:1"));
            }
            other => panic!("expected an identity conflict, got {other:?}"),
        }
    }

    #[test]
    fn unknown_symbol_is_an_identity_conflict() {
        let rows = vec![row(7, "chr1", 100, "NOPE", "NM_001.1", 1)];

        let err = build_exon_table(&rows, &transcripts(), &registry()).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::IdentityConflict { line: 7, symbol_gene: None, .. }
        ));
        assert!(err.to_string().contains("g2e line 7"));
    }

    #[test]
    fn padded_symbol_is_not_resolved() {
        let rows = vec![
            row(1, "chr1", 100, " ABC", "NM_001.1", 1),
            row(2, "chr2", 100, "DEF", "NM_002.3", 1),
        ];

        match build_exon_table(&rows, &transcripts(), &registry()) {
            Err(PipelineError::IdentityConflict { line, symbol, symbol_gene, .. }) => {
                assert_eq!(line, 1);
                assert_eq!(symbol, " ABC");
                assert_eq!(symbol_gene, None);
            }
            other => panic!("expected an identity conflict, got {other:?}"),
        }
    }

    #[test]
    fn gene_without_exons_is_missing_coverage() {
        let rows = vec![row(1, "chr1", 100, "ABC", "NM_001.1", 1)];

        match build_exon_table(&rows, &transcripts(), &registry()) {
            Err(PipelineError::MissingCoverage { gene }) => assert_eq!(gene, "HGNC:2"),
            other => panic!("expected missing coverage, got {other:?}"),
        }
    }
}
