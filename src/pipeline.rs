//! Parallel parsing pipeline
//!
//! Turns a folder of archives into the two CSV reports:
//! - **Discovery**: archives directly inside the folder, sorted by name
//! - **Fan-out**: one task per archive, bounded by a semaphore of `workers` permits;
//!   each task parses its archive on the blocking thread pool
//! - **Fan-in**: `try_join_all` returns results in submission order, so the merged
//!   rows never depend on which worker finished first
//! - **Reports**: written only after every archive parsed successfully
//!
//! A failing archive aborts the run. All submitted tasks still run to completion,
//! and the first failure in discovery order is the one reported.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::future::try_join_all;
use log::{debug, info};
use serde::Serialize;
use tokio::sync::Semaphore;

use crate::archive::parse_archive;
use crate::error::ParserError;
use crate::file_discovery::FileDiscovery;
use crate::model::RecordTables;
use crate::report::{ReportPaths, write_reports};

/// Outcome of a parse run
#[derive(Debug, Clone, Serialize)]
pub struct ParseSummary {
    pub folder: PathBuf,
    /// Archives in discovery order
    pub archives: Vec<PathBuf>,
    pub documents: usize,
    pub objects: usize,
    pub workers: usize,
    pub reports: ReportPaths,
    pub duration: Duration,
}

/// Archive parsing pipeline with a bounded worker pool
#[derive(Debug, Clone)]
pub struct ParsePipeline {
    workers: usize,
    discovery: FileDiscovery,
}

impl ParsePipeline {
    /// Create a pipeline running at most `workers` archive parses at once
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
            discovery: FileDiscovery::new(),
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Parse every archive in `folder` and write `vars.csv` and `objects.csv` there
    pub async fn run(&self, folder: &Path) -> Result<ParseSummary, ParserError> {
        let start = Instant::now();

        let archives = self.discovery.discover_files(folder).await?;
        if archives.is_empty() {
            return Err(ParserError::NoArchivesFound {
                folder: folder.to_path_buf(),
            });
        }
        info!(
            "Discovered {} archives in {}, parsing with {} workers",
            archives.len(),
            folder.display(),
            self.workers
        );

        let tables = RecordTables::merge(self.parse_archives(archives.clone()).await?);
        let (documents, objects) = (tables.vars.len(), tables.objects.len());

        let report_folder = folder.to_path_buf();
        let reports = tokio::task::spawn_blocking(move || write_reports(&report_folder, &tables))
            .await
            .map_err(|e| ParserError::WorkerPool {
                details: format!("Report writer join error: {}", e),
            })??;

        Ok(ParseSummary {
            folder: folder.to_path_buf(),
            archives,
            documents,
            objects,
            workers: self.workers,
            reports,
            duration: start.elapsed(),
        })
    }

    /// Parse archives concurrently, returning one table per archive in input order
    pub async fn parse_archives(
        &self,
        archives: Vec<PathBuf>,
    ) -> Result<Vec<RecordTables>, ParserError> {
        if archives.is_empty() {
            return Ok(Vec::new());
        }

        let semaphore = Arc::new(Semaphore::new(self.workers));

        let tasks: Vec<_> = archives
            .into_iter()
            .map(|path| {
                let semaphore = Arc::clone(&semaphore);

                tokio::spawn(async move {
                    let _permit = semaphore.acquire_owned().await.map_err(|_| {
                        ParserError::WorkerPool {
                            details: "Failed to acquire worker permit".to_string(),
                        }
                    })?;

                    debug!("Parsing {}", path.display());
                    tokio::task::spawn_blocking(move || parse_archive(&path))
                        .await
                        .map_err(|e| ParserError::WorkerPool {
                            details: format!("Archive parser join error: {}", e),
                        })?
                })
            })
            .collect();

        let task_results = try_join_all(tasks)
            .await
            .map_err(|e| ParserError::WorkerPool {
                details: format!("Task join error: {}", e),
            })?;

        // Slots are indexed by submission, so the first error is the earliest archive
        task_results.into_iter().collect()
    }
}

impl Default for ParsePipeline {
    fn default() -> Self {
        Self::new(num_cpus::get())
    }
}
