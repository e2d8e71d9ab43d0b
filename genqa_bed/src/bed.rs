use std::fs::{self, File};
use std::path::Path;

use polars::prelude::*;
use tracing::{debug, info};

use crate::error::{PipelineError, Result};
use crate::models::ExonRecord;

/// Exon coordinates as a `chrom`, `start`, `end` frame, sorted by chromosome
/// then start. Ties keep their input order.
pub fn bed_frame(exons: &[ExonRecord]) -> PolarsResult<DataFrame> {
    let chrom: Vec<&str> = exons.iter().map(|e| e.chrom.as_str()).collect();
    let start: Vec<u64> = exons.iter().map(|e| e.start).collect();
    let end: Vec<u64> = exons.iter().map(|e| e.end).collect();

    let df = df![
        "chrom" => chrom,
        "start" => start,
        "end" => end
    ]?;

    df.sort(
        ["chrom", "start"],
        SortMultipleOptions::default().with_maintain_order(true),
    )
}

/// Write the exons as a headerless, tab-separated BED file.
pub fn write_bed(exons: &[ExonRecord], path: &Path) -> Result<()> {
    let mut bed = bed_frame(exons)?;
    debug!("BED head(5): {:?}", bed.head(Some(5)));

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| PipelineError::io(parent, e))?;
    }
    let mut file = File::create(path).map_err(|e| PipelineError::io(path, e))?;
    CsvWriter::new(&mut file)
        .include_header(false)
        .with_separator(b'\t')
        .finish(&mut bed)?;

    info!("Wrote {} exon intervals to {}", bed.height(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exon(chrom: &str, start: u64, end: u64, exon: u32) -> ExonRecord {
        ExonRecord {
            chrom: chrom.to_string(),
            start,
            end,
            symbol: "ABC".to_string(),
            transcript: "NM_001.1".to_string(),
            exon,
            hgnc_id: "HGNC:1".to_string(),
        }
    }

    #[test]
    fn bed_is_sorted_by_chrom_then_start() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("eglh_bed.bed");
        let exons = vec![
            exon("chr2", 500, 600, 1),
            exon("chr1", 100, 200, 2),
            exon("chr1", 50, 90, 3),
        ];

        write_bed(&exons, &path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines, vec!["chr1\t50\t90", "chr1\t100\t200", "chr2\t500\t600"]);
    }

    #[test]
    fn start_sorts_numerically_and_chrom_lexically() {
        let exons = vec![
            exon("chr10", 5, 10, 1),
            exon("chr1", 1000, 1100, 2),
            exon("chr1", 999, 1000, 3),
            exon("chr2", 1, 2, 4),
        ];

        let df = bed_frame(&exons).unwrap();
        let chroms: Vec<&str> = df.column("chrom").unwrap().str().unwrap().into_no_null_iter().collect();
        let starts: Vec<u64> = df.column("start").unwrap().u64().unwrap().into_no_null_iter().collect();
        assert_eq!(chroms, vec!["chr1", "chr1", "chr10", "chr2"]);
        assert_eq!(starts, vec![999, 1000, 5, 1]);
    }

    #[test]
    fn equal_keys_keep_input_order() {
        let exons = vec![
            exon("chr1", 100, 300, 1),
            exon("chr1", 100, 200, 2),
            exon("chr1", 100, 250, 3),
        ];

        let df = bed_frame(&exons).unwrap();
        let ends: Vec<u64> = df.column("end").unwrap().u64().unwrap().into_no_null_iter().collect();
        assert_eq!(ends, vec![300, 200, 250]);
    }

    #[test]
    fn coordinates_beyond_i64_keep_their_value() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("eglh_bed.bed");
        let exons = vec![exon("chr1", u64::MAX - 1, u64::MAX, 1), exon("chr1", 5, 10, 2)];

        let df = bed_frame(&exons).unwrap();
        let starts: Vec<u64> = df.column("start").unwrap().u64().unwrap().into_no_null_iter().collect();
        assert_eq!(starts, vec![5, u64::MAX - 1]);

        write_bed(&exons, &path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            written.lines().last(),
            Some(format!("chr1\t{}\t{}", u64::MAX - 1, u64::MAX).as_str())
        );
    }
}
