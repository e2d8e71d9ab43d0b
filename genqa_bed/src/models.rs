use std::collections::{BTreeMap, BTreeSet};

use serde::de::IgnoredAny;
use serde::Deserialize;

use crate::error::Result;

/// Canonical gene key shared by every reference table (e.g. `HGNC:1100`).
pub type GeneId = String;

pub type TranscriptId = String;

/// Unique HGNC IDs referenced by any panel.
pub type PanelGeneSet = BTreeSet<GeneId>;

/// Clinical transcript of each panel gene.
pub type ClinicalTranscriptMap = BTreeMap<GeneId, TranscriptId>;

/// Something that loads a whole reference table into memory.
pub trait Dataset {
    type Row;

    fn load(&self) -> Result<Vec<Self::Row>>;
}

/// One row of the panels-to-genes file. Only the HGNC ID column matters here.
#[derive(Debug, Clone, Deserialize)]
pub struct PanelRow {
    pub panel: String,
    pub _detail: IgnoredAny,
    pub hgnc_id: GeneId,
}

/// One row of the genes-to-transcripts file.
#[derive(Debug, Clone, Deserialize)]
pub struct TranscriptRow {
    pub hgnc_id: GeneId,
    pub transcript: TranscriptId,
    pub label: String,
}

/// One row of the transcripts-to-exons file, as written.
#[derive(Debug, Clone, Deserialize)]
pub struct ExonRow {
    pub chrom: String,
    pub start: u64,
    pub end: u64,
    pub symbol: String,
    pub transcript: TranscriptId,
    pub exon: u32,
}

/// A single row of the HGNC dump after column renaming.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolRecord {
    pub hgnc_id: GeneId,
    pub symbol: Option<String>,
    pub prev_symbol: Option<String>,
    pub alias_symbol: Option<String>,
}

/// An exon of a panel gene's clinical transcript, checked against the HGNC dump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExonRecord {
    pub chrom: String,
    pub start: u64,
    pub end: u64,
    pub symbol: String,
    pub transcript: TranscriptId,
    pub exon: u32,
    pub hgnc_id: GeneId,
}
