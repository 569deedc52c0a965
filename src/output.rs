//! Run summaries
//!
//! Human-readable text for terminals, pretty JSON for scripts.

use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Serialize;

use crate::cli::{OutputFormat, VerbosityLevel};
use crate::generator::GenerateSummary;
use crate::pipeline::ParseSummary;

/// Formats command summaries for stdout
pub struct Output {
    verbosity: VerbosityLevel,
    format: OutputFormat,
    show_colors: bool,
}

impl Output {
    pub fn new(verbosity: VerbosityLevel, format: OutputFormat) -> Self {
        Self {
            verbosity,
            format,
            show_colors: std::io::stdout().is_terminal(),
        }
    }

    pub fn with_colors(mut self, show_colors: bool) -> Self {
        self.show_colors = show_colors;
        self
    }

    fn colorize(&self, text: &str, color: &str) -> String {
        if self.show_colors {
            format!("\x1b[{}m{}\x1b[0m", color, text)
        } else {
            text.to_string()
        }
    }

    pub fn format_generate(&self, summary: &GenerateSummary) -> String {
        if self.format == OutputFormat::Json {
            return to_json(summary);
        }
        if self.verbosity == VerbosityLevel::Quiet {
            return String::new();
        }

        let mut output = String::new();
        output.push_str(&format!("{}\n", self.colorize("Generation Summary:", "32")));
        output.push_str(&format!("  Folder: {}\n", summary.folder.display()));
        output.push_str(&format!("  Archives: {}\n", summary.archives.len()));
        output.push_str(&format!("  Documents: {}\n", summary.documents));
        output.push_str(&format!(
            "  Duration: {}\n",
            format_duration(summary.duration)
        ));

        if self.verbosity == VerbosityLevel::Verbose {
            output.push_str(&format_archives(&summary.archives));
        }
        output
    }

    pub fn format_parse(&self, summary: &ParseSummary) -> String {
        if self.format == OutputFormat::Json {
            return to_json(summary);
        }
        if self.verbosity == VerbosityLevel::Quiet {
            return String::new();
        }

        let mut output = String::new();
        output.push_str(&format!("{}\n", self.colorize("Parse Summary:", "32")));
        output.push_str(&format!("  Folder: {}\n", summary.folder.display()));
        output.push_str(&format!("  Archives: {}\n", summary.archives.len()));
        output.push_str(&format!("  Documents: {}\n", summary.documents));
        output.push_str(&format!("  Objects: {}\n", summary.objects));
        output.push_str(&format!("  Workers: {}\n", summary.workers));
        output.push_str(&format!(
            "  Duration: {}\n",
            format_duration(summary.duration)
        ));
        output.push_str(&format!(
            "  Reports: {}, {}\n",
            file_name(&summary.reports.vars),
            file_name(&summary.reports.objects)
        ));

        if self.verbosity == VerbosityLevel::Verbose {
            output.push_str(&format_archives(&summary.archives));
        }
        output
    }
}

fn format_archives(archives: &[PathBuf]) -> String {
    let mut output = String::from("\nArchives:\n");
    for archive in archives {
        output.push_str(&format!("  {}\n", file_name(archive)));
    }
    output
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn to_json<T: Serialize>(value: &T) -> String {
    match serde_json::to_string_pretty(value) {
        Ok(json) => format!("{}\n", json),
        Err(e) => format!("{{\"error\": \"{}\"}}\n", e),
    }
}

fn format_duration(duration: Duration) -> String {
    let total_secs = duration.as_secs_f64();
    if total_secs < 1.0 {
        format!("{}ms", duration.as_millis())
    } else if total_secs < 60.0 {
        format!("{:.2}s", total_secs)
    } else {
        let mins = (total_secs / 60.0) as u64;
        let secs = total_secs % 60.0;
        format!("{}m{:.1}s", mins, secs)
    }
}
