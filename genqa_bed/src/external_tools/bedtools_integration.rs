use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, error, info};

use crate::error::{PipelineError, Result};

const BEDTOOLS: &str = "bedtools";

/// Holds the parameters of one `bedtools intersect` run.
#[derive(Debug)]
pub struct BedtoolsOptions {
    /// Path to the `bedtools` binary.
    pub bedtools_path: PathBuf,

    /// Capture regions, passed as `-a`.
    pub capture_bed: PathBuf,

    /// Clinical transcript exons, passed as `-b`.
    pub exon_bed: PathBuf,
}

/// `configured` if given, otherwise the first `bedtools` on PATH.
pub fn locate_bedtools(configured: Option<&Path>) -> Result<PathBuf> {
    match configured {
        Some(path) => Ok(path.to_path_buf()),
        None => which::which(BEDTOOLS).map_err(|source| PipelineError::ToolNotFound {
            tool: BEDTOOLS,
            source,
        }),
    }
}

/// Run `bedtools intersect -a <capture> -b <exons>` and return its stdout as raw bytes.
pub fn run_bedtools_intersect(opts: &BedtoolsOptions) -> Result<Vec<u8>> {
    info!("Intersecting {} with {}", opts.capture_bed.display(), opts.exon_bed.display());

    for input in [&opts.capture_bed, &opts.exon_bed] {
        if !input.is_file() {
            return Err(PipelineError::io(
                input.as_path(),
                std::io::Error::new(std::io::ErrorKind::NotFound, "BED file not found"),
            ));
        }
    }

    let mut cmd = Command::new(&opts.bedtools_path);
    cmd.arg("intersect")
        .arg("-a").arg(&opts.capture_bed)
        .arg("-b").arg(&opts.exon_bed);

    debug!("About to spawn: {:?}", cmd);
    let output = cmd
        .output()
        .map_err(|e| PipelineError::io(opts.bedtools_path.as_path(), e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        error!("bedtools failed. Stderr:\n{}", stderr);
        return Err(PipelineError::ToolFailed {
            tool: BEDTOOLS,
            status: output.status,
            stderr,
        });
    }

    Ok(output.stdout)
}

/// Intersect the two BED files and write the result verbatim to `output_path`.
///
/// Returns the number of intervals written.
pub fn intersect_beds(opts: &BedtoolsOptions, output_path: &Path) -> Result<usize> {
    let stdout = run_bedtools_intersect(opts)?;

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| PipelineError::io(parent, e))?;
    }
    fs::write(output_path, &stdout).map_err(|e| PipelineError::io(output_path, e))?;

    let intervals = stdout
        .split(|b| *b == b'\n')
        .filter(|line| !line.iter().all(u8::is_ascii_whitespace))
        .count();
    info!("Wrote {} intersected intervals to {}", intervals, output_path.display());
    Ok(intervals)
}
