use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Main application error type that encompasses all possible failure modes
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Generator(#[from] GeneratorError),

    #[error(transparent)]
    Parser(#[from] ParserError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while generating archives
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("Document must have at least one object")]
    EmptyObjects,

    #[error("Value {value:?} contains a character not allowed in XML")]
    InvalidCharacter { value: String },

    #[error("Failed to write archive {path}: {source}")]
    ArchiveWrite {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("Worker pool error: {details}")]
    WorkerPool { details: String },
}

/// The two variable elements every document must carry exactly once
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Id,
    Level,
}

impl Field {
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Id => "id",
            Field::Level => "level",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Schema violations found in a single XML document
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    #[error("XML document is corrupted: {details}")]
    MalformedXml { details: String },

    #[error("XML document has no var element of type {field}")]
    MissingField { field: Field },

    #[error("XML document has multiple var elements of type {field} ({count} found)")]
    DuplicateField { field: Field, count: usize },

    #[error("XML document has no elements of type object")]
    NoObjects,

    #[error("XML document has more than ten elements of type object ({count} found)")]
    TooManyObjects { count: usize },

    #[error("XML element <{element}> has no {attribute} attribute")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },
}

/// Errors raised while parsing archives and producing reports
#[derive(Error, Debug)]
pub enum ParserError {
    #[error("Invalid XML document {entry} in {archive}: {source}")]
    Document {
        archive: PathBuf,
        entry: String,
        #[source]
        source: DocumentError,
    },

    #[error("ZIP file {path} is corrupted: {reason}")]
    ArchiveCorrupt { path: PathBuf, reason: String },

    #[error("No zip files found in folder {folder}")]
    NoArchivesFound { folder: PathBuf },

    #[error("Failed to write report {path}: {source}")]
    ReportWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read folder {folder}: {source}")]
    FolderRead {
        folder: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Worker pool error: {details}")]
    WorkerPool { details: String },
}

impl ParserError {
    /// The schema violation behind this error, if it came from a document
    pub fn document_error(&self) -> Option<&DocumentError> {
        match self {
            ParserError::Document { source, .. } => Some(source),
            _ => None,
        }
    }

    pub fn is_archive_corrupt(&self) -> bool {
        matches!(self, ParserError::ArchiveCorrupt { .. })
    }
}

/// Configuration-specific error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlParsing(#[from] toml::de::Error),

    #[error("JSON parsing error: {0}")]
    JsonParsing(#[from] serde_json::Error),

    #[error("Configuration validation error: {0}")]
    Validation(String),

    #[error("Environment variable error: {0}")]
    Environment(String),

    #[error("Unsupported configuration file format: {0}")]
    UnsupportedFormat(String),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Error>;
