//! Archive generation: random records rendered into ZIP archives of XML documents.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use chrono::Utc;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::Serialize;
use zip::ZipWriter;
use zip::result::ZipError;
use zip::write::SimpleFileOptions;

use crate::error::GeneratorError;
use crate::model::MAX_OBJECTS;
use crate::renderer::render_document;

/// Inclusive range of generated `level` values
pub const LEVEL_RANGE: (u32, u32) = (1, 100);

/// Source of randomness for generated records
#[cfg_attr(test, mockall::automock)]
pub trait EntropySource {
    /// A fresh, practically unique token
    fn token(&mut self) -> String;

    /// A uniformly drawn integer in `low..=high`
    fn int_in_range(&mut self, low: u32, high: u32) -> u32;
}

/// Default entropy backed by a seedable PRNG
pub struct RandomSource {
    rng: StdRng,
}

impl RandomSource {
    /// Seeded from the operating system
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Reproducible sequence for a given seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomSource {
    fn default() -> Self {
        Self::new()
    }
}

impl EntropySource for RandomSource {
    fn token(&mut self) -> String {
        let bytes: [u8; 16] = self.rng.random();
        uuid::Builder::from_random_bytes(bytes)
            .into_uuid()
            .simple()
            .to_string()
    }

    fn int_in_range(&mut self, low: u32, high: u32) -> u32 {
        self.rng.random_range(low..=high)
    }
}

/// Data for one generated document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedRecord {
    pub id: String,
    pub level: u32,
    pub objects: Vec<String>,
}

impl GeneratedRecord {
    pub fn render(&self) -> Result<String, GeneratorError> {
        render_document(&self.id, self.level, self.objects.as_slice())
    }
}

/// Draw an id, a level in [`LEVEL_RANGE`] and 1..=10 object names
pub fn generate_record<E: EntropySource + ?Sized>(entropy: &mut E) -> GeneratedRecord {
    let id = entropy.token();
    let level = entropy.int_in_range(LEVEL_RANGE.0, LEVEL_RANGE.1);
    let count = entropy.int_in_range(1, MAX_OBJECTS as u32) as usize;
    let objects = (0..count).map(|_| entropy.token()).collect();
    GeneratedRecord { id, level, objects }
}

/// Write an archive at `path` holding `documents` entries named `<n>.xml`
pub fn generate_archive<E: EntropySource + ?Sized>(
    path: &Path,
    documents: usize,
    entropy: &mut E,
) -> Result<(), GeneratorError> {
    let write_error = |source: ZipError| GeneratorError::ArchiveWrite {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(|e| write_error(ZipError::Io(e)))?;
    let mut writer = ZipWriter::new(file);
    let options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    for index in 0..documents {
        let content = generate_record(entropy).render()?;
        writer
            .start_file(format!("{}.xml", index), options)
            .map_err(write_error)?;
        writer
            .write_all(content.as_bytes())
            .map_err(|e| write_error(ZipError::Io(e)))?;
    }

    writer.finish().map_err(write_error)?;
    debug!("Wrote {} documents to {}", documents, path.display());
    Ok(())
}

/// Settings for a generation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationSettings {
    pub archives: usize,
    pub documents_per_archive: usize,
    pub workers: usize,
    /// Archive `i` draws from seed `seed + i` when set
    pub seed: Option<u64>,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            archives: 50,
            documents_per_archive: 100,
            workers: num_cpus::get(),
            seed: None,
        }
    }
}

/// Outcome of a generation run
#[derive(Debug, Clone, Serialize)]
pub struct GenerateSummary {
    pub folder: PathBuf,
    pub archives: Vec<PathBuf>,
    pub documents: usize,
    pub duration: Duration,
}

/// Produces a batch of archives in parallel
#[derive(Debug, Clone)]
pub struct ArchiveGenerator {
    settings: GenerationSettings,
}

impl ArchiveGenerator {
    pub fn new(settings: GenerationSettings) -> Self {
        Self { settings }
    }

    /// File name for archive `index`; the timestamp keeps runs apart
    pub fn archive_name(index: usize, timestamp: &str) -> String {
        format!("{}_{}.zip", index, timestamp)
    }

    /// Generate every archive into `folder`, returning their paths in index order
    pub fn generate(&self, folder: &Path) -> Result<GenerateSummary, GeneratorError> {
        let start = Instant::now();
        let timestamp = Utc::now().format("%Y%m%dT%H%M%S%.6f").to_string();
        let settings = &self.settings;

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(settings.workers.max(1))
            .build()
            .map_err(|e| GeneratorError::WorkerPool {
                details: e.to_string(),
            })?;

        let archives = pool.install(|| {
            (0..settings.archives)
                .into_par_iter()
                .map(|index| {
                    let path = folder.join(Self::archive_name(index, &timestamp));
                    let mut entropy = match settings.seed {
                        Some(seed) => RandomSource::seeded(seed.wrapping_add(index as u64)),
                        None => RandomSource::new(),
                    };
                    generate_archive(&path, settings.documents_per_archive, &mut entropy)?;
                    Ok(path)
                })
                .collect::<Result<Vec<_>, GeneratorError>>()
        })?;

        info!(
            "Generated {} archives with {} documents each in {}",
            archives.len(),
            settings.documents_per_archive,
            folder.display()
        );

        Ok(GenerateSummary {
            folder: folder.to_path_buf(),
            documents: archives.len() * settings.documents_per_archive,
            archives,
            duration: start.elapsed(),
        })
    }
}
