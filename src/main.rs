use std::process;

use env_logger::Env;

use xml_archive_report::cli::{Cli, Command, VerbosityLevel};
use xml_archive_report::commands;
use xml_archive_report::config::ConfigManager;
use xml_archive_report::error::Error;
use xml_archive_report::error_reporter::ErrorReporter;
use xml_archive_report::output::Output;

#[tokio::main]
async fn main() {
    let cli = Cli::parse_args();

    if let Err(message) = cli.validate() {
        eprintln!("{}", ErrorReporter::new(VerbosityLevel::Normal).format_usage(&message));
        process::exit(1);
    }

    let cli_verbosity = if cli.verbose {
        VerbosityLevel::Verbose
    } else if cli.quiet {
        VerbosityLevel::Quiet
    } else {
        VerbosityLevel::Normal
    };

    let config = match ConfigManager::load_config(&cli).await {
        Ok(config) => config,
        Err(e) => {
            ErrorReporter::new(cli_verbosity).report(&Error::Config(e));
            process::exit(1);
        }
    };

    let verbosity = config.output.verbosity();
    env_logger::Builder::from_env(Env::default().default_filter_or(verbosity.log_filter()))
        .init();

    let reporter = ErrorReporter::new(verbosity);
    let output = Output::new(verbosity, config.output.format);

    if let Err(e) = run(&cli.command, &config, &output).await {
        reporter.report(&e);
        process::exit(1);
    }
}

async fn run(
    command: &Command,
    config: &xml_archive_report::Config,
    output: &Output,
) -> xml_archive_report::Result<()> {
    let folder = command.folder().resolve()?;

    match command {
        Command::Generate { .. } => {
            let summary = commands::generate(&folder, config).await?;
            print!("{}", output.format_generate(&summary));
        }
        Command::Parse { .. } => {
            let summary = commands::parse(&folder, config).await?;
            print!("{}", output.format_parse(&summary));
        }
        Command::Cycle { .. } => {
            let (generated, parsed) = commands::cycle(&folder, config).await?;
            print!("{}", output.format_generate(&generated));
            print!("{}", output.format_parse(&parsed));
        }
    }

    Ok(())
}
