//! # xml-archive-report Library
//!
//! Generates ZIP archives of small XML documents and aggregates a folder of such
//! archives into two CSV reports, parsing archives concurrently on a bounded pool.

pub mod archive;
pub mod cli;
pub mod commands;
pub mod config;
pub mod document;
pub mod error;
pub mod error_reporter;
pub mod file_discovery;
pub mod generator;
pub mod model;
pub mod output;
pub mod pipeline;
pub mod renderer;
pub mod report;

pub use archive::{is_xml_entry, parse_archive};
pub use cli::{Cli, Command, OutputFormat, VerbosityLevel};
pub use config::{Config, ConfigManager, EnvProvider};
pub use document::parse_document;
pub use error::{ConfigError, DocumentError, Error, Field, GeneratorError, ParserError, Result};
pub use error_reporter::ErrorReporter;
pub use file_discovery::FileDiscovery;
pub use generator::{
    ArchiveGenerator, EntropySource, GenerateSummary, GeneratedRecord, GenerationSettings,
    RandomSource, generate_archive, generate_record,
};
pub use model::{MAX_OBJECTS, ParsedDocument, Record, RecordTables, SubObject};
pub use output::Output;
pub use pipeline::{ParsePipeline, ParseSummary};
pub use renderer::render_document;
pub use report::{OBJECTS_FILE_NAME, ReportPaths, VARS_FILE_NAME, write_reports};
