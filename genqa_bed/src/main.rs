use anyhow::Context;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::config::{Cli, PipelineConfig};

mod bed;
mod config;
mod data_handling;
mod error;
mod external_tools;
mod helper_functions;
mod models;
mod pipeline;
mod validation;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting the GenQA BED pipeline");

    let cli = Cli::parse();
    let config = PipelineConfig::from_cli(cli)
        .context("failed to load configuration")?
        .rooted();
    info!("Configuration: {:?}", config);

    let summary = match pipeline::run(&config) {
        Ok(summary) => summary,
        Err(e) => {
            error!("Pipeline stopped: {}", e);
            return Err(e).context("GenQA BED pipeline failed");
        }
    };

    info!(
        "Done: {} panel genes, {} clinical transcripts, {} exons written to {}",
        summary.panel_genes,
        summary.clinical_transcripts,
        summary.exons,
        config.exon_bed.display()
    );
    if let Some(intervals) = summary.intersected {
        info!("{} intervals written to {}", intervals, config.output_bed.display());
    }

    Ok(())
}
