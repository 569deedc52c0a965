use std::error::Error as StdError;

use crate::cli::VerbosityLevel;
use crate::error::Error;

/// Single-line diagnostics for errors that end a run
pub struct ErrorReporter {
    verbosity: VerbosityLevel,
}

impl ErrorReporter {
    pub fn new(verbosity: VerbosityLevel) -> Self {
        Self { verbosity }
    }

    /// Print the diagnostic for `error` on stderr
    pub fn report(&self, error: &Error) {
        eprintln!("{}", self.format_error(error));
    }

    /// Format `error` as `Error: <message>`.
    ///
    /// In verbose mode the source chain is appended, still on one line.
    pub fn format_error(&self, error: &Error) -> String {
        let mut output = format!("Error: {}", error);

        if self.verbosity == VerbosityLevel::Verbose {
            let mut current: &dyn StdError = error;
            while let Some(source) = current.source() {
                output.push_str(": ");
                output.push_str(&single_line(&source.to_string()));
                current = source;
            }
        }

        single_line(&output)
    }

    /// Format a command-line usage problem found before any work started
    pub fn format_usage(&self, message: &str) -> String {
        single_line(&format!("Error: {}", message))
    }
}

fn single_line(text: &str) -> String {
    if text.contains(['\n', '\r']) {
        text.split(['\n', '\r'])
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    } else {
        text.to_string()
    }
}
