use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use clap::Parser;
use serde::Deserialize;
use tracing::info;

use crate::error::{PipelineError, Result};
use crate::helper_functions::{project_root, resolve_path};

/// Unique panel genes in the 2022 reference snapshot.
pub const SNAPSHOT_GENE_COUNT: usize = 3122;

/// Reference files, outputs and checks for one run.
///
/// Relative paths are taken from the project root (`PROJECT_ROOT`, else the
/// working directory).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub panels2genes: PathBuf,
    pub genes2transcripts: PathBuf,
    pub transcripts2exons: PathBuf,
    pub hgnc_dump: PathBuf,
    pub capture_bed: PathBuf,
    pub exon_bed: PathBuf,
    pub output_bed: PathBuf,
    pub expected_genes: usize,
    pub bedtools: Option<PathBuf>,
    pub skip_intersect: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            panels2genes: "dx_221027_panels2genes.tsv".into(),
            genes2transcripts: "dx_221025_genes2transcripts.tsv".into(),
            transcripts2exons: "dx_220711_transcripts2exons.tsv".into(),
            hgnc_dump: "hgnc_20221103_dump.tsv".into(),
            capture_bed: "dx_200900_TWE.bed".into(),
            exon_bed: "eglh_bed.bed".into(),
            output_bed: "genqa_bed.bed".into(),
            expected_genes: SNAPSHOT_GENE_COUNT,
            bedtools: None,
            skip_intersect: false,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "genqa_bed",
    about = "Build a BED of clinical transcript exons for all panel genes and intersect it with the capture BED"
)]
pub struct Cli {
    /// JSON file with any of the settings below; flags override it.
    #[arg(long, env = "GENQA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Panels-to-genes TSV (HGNC ID in the third column).
    #[arg(long)]
    pub panels2genes: Option<PathBuf>,

    /// Genes-to-transcripts TSV.
    #[arg(long)]
    pub genes2transcripts: Option<PathBuf>,

    /// Transcripts-to-exons TSV.
    #[arg(long)]
    pub transcripts2exons: Option<PathBuf>,

    /// HGNC database dump (4 columns with header).
    #[arg(long)]
    pub hgnc_dump: Option<PathBuf>,

    /// Capture regions BED.
    #[arg(long)]
    pub capture_bed: Option<PathBuf>,

    /// Where to write the clinical transcript exon BED.
    #[arg(long)]
    pub exon_bed: Option<PathBuf>,

    /// Where to write the intersected BED.
    #[arg(long)]
    pub output_bed: Option<PathBuf>,

    /// Number of unique panel genes the reference files must yield.
    #[arg(long)]
    pub expected_genes: Option<usize>,

    /// bedtools binary; looked up on PATH when omitted.
    #[arg(long, env = "BEDTOOLS")]
    pub bedtools: Option<PathBuf>,

    /// Stop after writing the exon BED.
    #[arg(long)]
    pub skip_intersect: bool,
}

impl PipelineConfig {
    pub fn from_json(path: &Path) -> Result<Self> {
        info!("Reading configuration from {}", path.display());
        let file = File::open(path).map_err(|e| PipelineError::io(path, e))?;
        serde_json::from_reader(BufReader::new(file))
            .map_err(|source| PipelineError::Config {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Defaults, then the JSON file named by `--config`, then individual flags.
    pub fn from_cli(cli: Cli) -> Result<Self> {
        let base = match &cli.config {
            Some(path) => Self::from_json(path)?,
            None => Self::default(),
        };
        Ok(base.with_overrides(cli))
    }

    fn with_overrides(mut self, cli: Cli) -> Self {
        let Cli {
            config: _,
            panels2genes,
            genes2transcripts,
            transcripts2exons,
            hgnc_dump,
            capture_bed,
            exon_bed,
            output_bed,
            expected_genes,
            bedtools,
            skip_intersect,
        } = cli;

        if let Some(p) = panels2genes {
            self.panels2genes = p;
        }
        if let Some(p) = genes2transcripts {
            self.genes2transcripts = p;
        }
        if let Some(p) = transcripts2exons {
            self.transcripts2exons = p;
        }
        if let Some(p) = hgnc_dump {
            self.hgnc_dump = p;
        }
        if let Some(p) = capture_bed {
            self.capture_bed = p;
        }
        if let Some(p) = exon_bed {
            self.exon_bed = p;
        }
        if let Some(p) = output_bed {
            self.output_bed = p;
        }
        if let Some(n) = expected_genes {
            self.expected_genes = n;
        }
        if bedtools.is_some() {
            self.bedtools = bedtools;
        }
        self.skip_intersect |= skip_intersect;
        self
    }

    /// Anchor every relative path at `root`.
    pub fn rooted_at(mut self, root: &Path) -> Self {
        for path in [
            &mut self.panels2genes,
            &mut self.genes2transcripts,
            &mut self.transcripts2exons,
            &mut self.hgnc_dump,
            &mut self.capture_bed,
            &mut self.exon_bed,
            &mut self.output_bed,
        ] {
            *path = resolve_path(root, path.as_path());
        }
        if let Some(bedtools) = self.bedtools.as_mut() {
            *bedtools = resolve_path(root, bedtools.as_path());
        }
        self
    }

    /// Anchor every relative path at the project root.
    pub fn rooted(self) -> Self {
        let root = project_root();
        self.rooted_at(&root)
    }
}
