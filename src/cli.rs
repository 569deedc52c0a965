use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Verbosity levels for output
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum VerbosityLevel {
    /// Only show errors
    Quiet,
    /// Show standard information
    #[default]
    Normal,
    /// Show detailed information
    Verbose,
}

impl VerbosityLevel {
    /// Default `env_logger` filter for this verbosity
    pub fn log_filter(self) -> &'static str {
        match self {
            VerbosityLevel::Quiet => "error",
            VerbosityLevel::Normal => "warn",
            VerbosityLevel::Verbose => "info",
        }
    }
}

/// Format of the run summary printed on stdout
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Human,
    Json,
}

/// Generate ZIP archives of XML documents and aggregate them into CSV reports
#[derive(Parser, Debug, Clone)]
#[command(name = "xml-archive-report")]
#[command(about = "Generate ZIP archives of XML documents and aggregate them into CSV reports")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file (TOML or JSON)
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Number of parallel workers
    #[arg(short = 'w', long = "workers", global = true)]
    pub workers: Option<usize>,

    /// Summary format
    #[arg(long = "format", value_enum, global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    /// Enable quiet mode (errors only)
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Generate a set of ZIP archives
    Generate {
        #[command(flatten)]
        folder: FolderArgs,
        #[command(flatten)]
        generate: GenerateArgs,
    },

    /// Build vars.csv and objects.csv from the ZIP archives in a folder
    Parse {
        #[command(flatten)]
        folder: FolderArgs,
    },

    /// Generate archives, then parse them
    Cycle {
        #[command(flatten)]
        folder: FolderArgs,
        #[command(flatten)]
        generate: GenerateArgs,
    },
}

impl Command {
    pub fn folder(&self) -> &FolderArgs {
        match self {
            Command::Generate { folder, .. }
            | Command::Parse { folder }
            | Command::Cycle { folder, .. } => folder,
        }
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct FolderArgs {
    /// Folder to read and write files in (default: current folder)
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
}

impl FolderArgs {
    /// The target folder, falling back to the working directory
    pub fn resolve(&self) -> std::io::Result<PathBuf> {
        match &self.output {
            Some(path) => Ok(path.clone()),
            None => std::env::current_dir(),
        }
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct GenerateArgs {
    /// Number of archives to generate
    #[arg(short = 'n', long = "archives")]
    pub archives: Option<usize>,

    /// Number of XML documents per archive
    #[arg(short = 'd', long = "documents")]
    pub documents: Option<usize>,

    /// Seed for reproducible output
    #[arg(long = "seed")]
    pub seed: Option<u64>,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn validate(&self) -> Result<(), String> {
        if let Some(output) = &self.command.folder().output
            && !output.is_dir()
        {
            return Err(format!("Folder does not exist: {}", output.display()));
        }
        if let Some(config) = &self.config
            && !config.exists()
        {
            return Err(format!(
                "Configuration file does not exist: {}",
                config.display()
            ));
        }
        Ok(())
    }
}
