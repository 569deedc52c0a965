use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::cli::{Cli, Command, OutputFormat, VerbosityLevel};
use crate::error::ConfigError;
use crate::generator::GenerationSettings;

const APP_NAME: &str = "xml-archive-report";
const ENV_PREFIX: &str = "XML_ARCHIVE_REPORT";
const MAX_WORKERS: usize = 1024;

/// Trait for abstracting environment variable access
pub trait EnvProvider {
    fn get(&self, key: &str) -> Option<String>;
}

/// System environment variable provider for production use
pub struct SystemEnvProvider;

impl EnvProvider for SystemEnvProvider {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub generator: GeneratorConfig,
    pub pool: PoolConfig,
    pub output: OutputConfig,
}

/// Archive generation settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Number of archives produced per run
    pub archives: usize,
    /// Number of XML documents in each archive
    pub documents_per_archive: usize,
    /// Seed for reproducible generation
    pub seed: Option<u64>,
}

/// Worker pool settings shared by generation and parsing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct PoolConfig {
    /// Number of parallel workers (defaults to the CPU count)
    pub workers: Option<usize>,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Verbose output
    pub verbose: bool,
    /// Quiet mode (errors only)
    pub quiet: bool,
}

impl OutputConfig {
    pub fn verbosity(&self) -> VerbosityLevel {
        if self.quiet {
            VerbosityLevel::Quiet
        } else if self.verbose {
            VerbosityLevel::Verbose
        } else {
            VerbosityLevel::Normal
        }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            archives: 50,
            documents_per_archive: 100,
            seed: None,
        }
    }
}

impl Config {
    /// Effective worker count
    pub fn workers(&self) -> usize {
        self.pool.workers.unwrap_or_else(num_cpus::get)
    }

    pub fn generation_settings(&self) -> GenerationSettings {
        GenerationSettings {
            archives: self.generator.archives,
            documents_per_archive: self.generator.documents_per_archive,
            workers: self.workers(),
            seed: self.generator.seed,
        }
    }
}

/// Configuration manager for loading and merging configurations
pub struct ConfigManager;

impl ConfigManager {
    /// Load configuration with precedence: defaults -> file -> environment -> CLI
    pub async fn load_config(cli: &Cli) -> Result<Config> {
        Self::load_config_with(cli, &SystemEnvProvider).await
    }

    /// Same as [`ConfigManager::load_config`] with a custom environment provider
    pub async fn load_config_with(cli: &Cli, env: &impl EnvProvider) -> Result<Config> {
        let mut config = match &cli.config {
            Some(path) => Self::load_from_file(path).await?,
            None => Self::find_config_file().await?.unwrap_or_default(),
        };

        config = Self::apply_environment_overrides_with(env, config)?;
        config = Self::merge_with_cli(config, cli);
        Self::validate_config(&config)?;

        Ok(config)
    }

    /// Load configuration from a file (TOML or JSON)
    pub async fn load_from_file(path: &Path) -> Result<Config> {
        let content = tokio::fs::read_to_string(path).await?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(toml::from_str(&content)?),
            Some("json") => Ok(serde_json::from_str(&content)?),
            Some(ext) => Err(ConfigError::UnsupportedFormat(ext.to_string())),
            None => match toml::from_str::<Config>(&content) {
                Ok(config) => Ok(config),
                Err(_) => Ok(serde_json::from_str(&content)?),
            },
        }
    }

    /// Find configuration file in standard locations
    pub async fn find_config_file() -> Result<Option<Config>> {
        let config_names = [
            format!("{}.toml", APP_NAME),
            format!("{}.json", APP_NAME),
            format!(".{}.toml", APP_NAME),
            format!(".{}.json", APP_NAME),
        ];

        let mut candidates: Vec<PathBuf> = config_names.iter().map(PathBuf::from).collect();
        if let Some(config_dir) = dirs::config_dir() {
            let app_config_dir = config_dir.join(APP_NAME);
            candidates.extend(config_names.iter().map(|name| app_config_dir.join(name)));
        }

        for path in candidates {
            if tokio::fs::try_exists(&path).await.unwrap_or(false) {
                return Ok(Some(Self::load_from_file(&path).await?));
            }
        }

        Ok(None)
    }

    /// Apply environment variable overrides with a custom environment provider
    pub fn apply_environment_overrides_with(
        env: &impl EnvProvider,
        mut config: Config,
    ) -> Result<Config> {
        if let Some(archives) = parse_env(env, "ARCHIVES")? {
            config.generator.archives = archives;
        }
        if let Some(documents) = parse_env(env, "DOCUMENTS")? {
            config.generator.documents_per_archive = documents;
        }
        if let Some(seed) = parse_env(env, "SEED")? {
            config.generator.seed = Some(seed);
        }
        if let Some(workers) = parse_env(env, "WORKERS")? {
            config.pool.workers = Some(workers);
        }
        if let Some(verbose) = parse_env(env, "VERBOSE")? {
            config.output.verbose = verbose;
        }
        if let Some(quiet) = parse_env(env, "QUIET")? {
            config.output.quiet = quiet;
        }
        if let Some(format) = env.get(&env_key("FORMAT")) {
            config.output.format = match format.to_lowercase().as_str() {
                "human" => OutputFormat::Human,
                "json" => OutputFormat::Json,
                _ => {
                    return Err(ConfigError::Environment(format!(
                        "Invalid {} value: {}",
                        env_key("FORMAT"),
                        format
                    )));
                }
            };
        }

        Ok(config)
    }

    /// Merge CLI arguments with configuration (CLI takes precedence)
    pub fn merge_with_cli(mut config: Config, cli: &Cli) -> Config {
        if cli.workers.is_some() {
            config.pool.workers = cli.workers;
        }
        if let Some(format) = cli.format {
            config.output.format = format;
        }
        if cli.verbose {
            config.output.verbose = true;
            config.output.quiet = false;
        }
        if cli.quiet {
            config.output.quiet = true;
            config.output.verbose = false;
        }

        if let Command::Generate { generate, .. } | Command::Cycle { generate, .. } = &cli.command
        {
            if let Some(archives) = generate.archives {
                config.generator.archives = archives;
            }
            if let Some(documents) = generate.documents {
                config.generator.documents_per_archive = documents;
            }
            if generate.seed.is_some() {
                config.generator.seed = generate.seed;
            }
        }

        config
    }

    /// Validate configuration values
    pub fn validate_config(config: &Config) -> Result<()> {
        if let Some(workers) = config.pool.workers {
            if workers == 0 {
                return Err(ConfigError::Validation(
                    "Number of workers must be greater than 0".to_string(),
                ));
            }
            if workers > MAX_WORKERS {
                return Err(ConfigError::Validation(format!(
                    "Number of workers cannot exceed {}",
                    MAX_WORKERS
                )));
            }
        }

        if config.generator.archives == 0 {
            return Err(ConfigError::Validation(
                "Number of archives must be greater than 0".to_string(),
            ));
        }

        if config.output.verbose && config.output.quiet {
            return Err(ConfigError::Validation(
                "Cannot enable both verbose and quiet modes".to_string(),
            ));
        }

        Ok(())
    }
}

fn env_key(name: &str) -> String {
    format!("{}_{}", ENV_PREFIX, name)
}

fn parse_env<T: std::str::FromStr>(env: &impl EnvProvider, name: &str) -> Result<Option<T>> {
    let key = env_key(name);
    match env.get(&key) {
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Environment(format!("Invalid {} value: {}", key, value))),
        None => Ok(None),
    }
}
