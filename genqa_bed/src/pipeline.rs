use tracing::info;

use crate::bed::write_bed;
use crate::config::PipelineConfig;
use crate::data_handling::exons::{build_exon_table, TranscriptsToExons};
use crate::data_handling::hgnc::{HgncDump, SymbolRegistry};
use crate::data_handling::panels::{get_panel_genes, PanelsToGenes};
use crate::data_handling::transcripts::{get_gene_transcripts, GenesToTranscripts};
use crate::error::Result;
use crate::external_tools::bedtools_integration::{intersect_beds, locate_bedtools, BedtoolsOptions};
use crate::models::Dataset;
use crate::validation::verify_exon_table;

/// What one run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub panel_genes: usize,
    pub clinical_transcripts: usize,
    pub exons: usize,
    /// `None` when the intersect step was skipped.
    pub intersected: Option<usize>,
}

/// Build the exon BED from the reference files, then intersect it with the capture BED.
///
/// Any inconsistency between the reference files stops the run before a BED is written.
pub fn run(config: &PipelineConfig) -> Result<RunSummary> {
    let registry = SymbolRegistry::load(&HgncDump {
        path: config.hgnc_dump.clone(),
    })?;
    info!("HGNC dump holds {} genes", registry.len());

    let panel_rows = PanelsToGenes {
        path: config.panels2genes.clone(),
    }
    .load()?;
    let genes = get_panel_genes(&panel_rows, config.expected_genes)?;

    let transcript_rows = GenesToTranscripts {
        path: config.genes2transcripts.clone(),
    }
    .load()?;
    let transcripts = get_gene_transcripts(&transcript_rows, &genes, config.expected_genes)?;

    let exon_rows = TranscriptsToExons {
        path: config.transcripts2exons.clone(),
    }
    .load_numbered()?;
    let exons = build_exon_table(&exon_rows, &transcripts, &registry)?;
    verify_exon_table(&exons, &transcripts, &registry)?;

    write_bed(&exons, &config.exon_bed)?;

    let intersected = if config.skip_intersect {
        info!("Skipping bedtools intersect");
        None
    } else {
        let opts = BedtoolsOptions {
            bedtools_path: locate_bedtools(config.bedtools.as_deref())?,
            capture_bed: config.capture_bed.clone(),
            exon_bed: config.exon_bed.clone(),
        };
        Some(intersect_beds(&opts, &config.output_bed)?)
    };

    Ok(RunSummary {
        panel_genes: genes.len(),
        clinical_transcripts: transcripts.len(),
        exons: exons.len(),
        intersected,
    })
}
