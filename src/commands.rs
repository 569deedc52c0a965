//! The three operations exposed to the command line: generate, parse and cycle.

use std::path::Path;

use crate::config::Config;
use crate::error::{GeneratorError, Result};
use crate::generator::{ArchiveGenerator, GenerateSummary};
use crate::pipeline::{ParsePipeline, ParseSummary};

/// Generate the configured number of archives into `folder`
pub async fn generate(folder: &Path, config: &Config) -> Result<GenerateSummary> {
    let generator = ArchiveGenerator::new(config.generation_settings());
    let folder = folder.to_path_buf();

    // rayon owns the parallelism here; keep it off the async workers
    let summary = tokio::task::spawn_blocking(move || generator.generate(&folder))
        .await
        .map_err(|e| GeneratorError::WorkerPool {
            details: format!("Generator join error: {}", e),
        })??;
    Ok(summary)
}

/// Parse every archive in `folder` into `vars.csv` and `objects.csv`
pub async fn parse(folder: &Path, config: &Config) -> Result<ParseSummary> {
    let pipeline = ParsePipeline::new(config.workers());
    Ok(pipeline.run(folder).await?)
}

/// Generate, then parse the same folder
pub async fn cycle(folder: &Path, config: &Config) -> Result<(GenerateSummary, ParseSummary)> {
    let generated = generate(folder, config).await?;
    let parsed = parse(folder, config).await?;
    Ok((generated, parsed))
}
