//! Error handling for the Graft CLI.
//!
//! Provides structured errors with:
//! - User-friendly messages
//! - Actionable suggestions
//! - Exit code mapping

use std::error::Error;

use owo_colors::OwoColorize;
use thiserror::Error;
use tracing::{debug, error, warn};

use graft_core::application::{ScaffoldFailure, ScaffoldStage};
use graft_core::error::GraftError;

// Re-export so callers only need `use crate::error::*`.
pub use graft_core::error::ErrorCategory as CoreCategory;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// CLI error types.
#[derive(Debug, Error)]
pub enum CliError {
    /// A configuration file could not be read, parsed, or written.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An error propagated from `graft-core` or an adapter.
    #[error(transparent)]
    Core(#[from] GraftError),

    /// A `graft init` stage failed; the stage is shown in the header.
    #[error("{error}")]
    Scaffold {
        stage: ScaffoldStage,
        error: GraftError,
    },

    /// An I/O operation failed.
    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// The user declined to overwrite an existing directory.
    #[error("Operation cancelled")]
    Cancelled,
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<ScaffoldFailure> for CliError {
    fn from(failure: ScaffoldFailure) -> Self {
        debug!(stage = %failure.stage, "Scaffold stopped");
        CliError::Scaffold {
            stage: failure.stage,
            error: failure.error,
        }
    }
}

impl CliError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::ConfigError { message, .. } => vec![
                format!("Configuration issue: {}", message),
                "Check the file reported by 'graft config path'".into(),
                "Use 'graft config init --force' to write a fresh default".into(),
            ],

            Self::Core(core_err) | Self::Scaffold { error: core_err, .. } => {
                core_err.suggestions()
            }

            Self::IoError { message, .. } => vec![
                format!("I/O operation failed: {}", message),
                "Check file permissions".into(),
                "Ensure the parent directory exists".into(),
            ],

            Self::Cancelled => Vec::new(),
        }
    }

    /// Get the error category for styling and exit codes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::Core(core) | Self::Scaffold { error: core, .. } => match core.category() {
                CoreCategory::Validation => ErrorCategory::UserError,
                CoreCategory::Compatibility => ErrorCategory::UserError,
                CoreCategory::NotFound => ErrorCategory::NotFound,
                CoreCategory::Configuration => ErrorCategory::Configuration,
                CoreCategory::Internal => ErrorCategory::Internal,
            },
            Self::IoError { .. } => ErrorCategory::Internal,
            Self::Cancelled => ErrorCategory::Cancelled,
        }
    }

    /// Warning-level errors stop the command but are not faults.
    pub fn is_warning(&self) -> bool {
        match self {
            Self::Core(core) | Self::Scaffold { error: core, .. } => core.is_warning(),
            _ => false,
        }
    }

    /// Exit code to pass to the OS.
    ///
    /// | Category      | Code |
    /// |---------------|------|
    /// | User error    |  2   |
    /// | Not found     |  3   |
    /// | Configuration |  4   |
    /// | Internal      |  1   |
    /// | Cancelled     | 130  |
    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::UserError => 2,
            ErrorCategory::NotFound => 3,
            ErrorCategory::Configuration => 4,
            ErrorCategory::Internal => 1,
            ErrorCategory::Cancelled => 130,
        }
    }

    fn label(&self) -> String {
        let kind = if self.is_warning() { "Warning" } else { "Error" };
        match self {
            Self::Scaffold { stage, .. } if self.is_warning() => {
                format!("{kind} (stopped at {stage}):")
            }
            Self::Scaffold { stage, .. } => format!("{kind} (failed at {stage}):"),
            _ => format!("{kind}:"),
        }
    }

    /// Format the error for display with colors and suggestions.
    pub fn format_colored(&self, verbose: bool) -> String {
        if matches!(self, Self::Cancelled) {
            return format!("\n{}\n", self.to_string().yellow());
        }

        let mut output = String::new();

        if self.is_warning() {
            output.push_str(&format!(
                "\n{} {}\n\n",
                "\u{26a0}".yellow().bold(),
                self.label().yellow().bold()
            ));
            output.push_str(&format!("  {}\n", self.to_string().yellow()));
        } else {
            output.push_str(&format!(
                "\n{} {}\n\n",
                "✗".red().bold(),
                self.label().red().bold()
            ));
            output.push_str(&format!("  {}\n", self.to_string().red()));
        }

        // Error chain (if verbose)
        if verbose {
            let mut source = self.source();
            while let Some(err) = source {
                output.push_str(&format!(
                    "\n  {} {}\n",
                    "→".dimmed(),
                    err.to_string().dimmed()
                ));
                source = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            output.push_str(&format!("\n{}\n", "Suggestions:".yellow().bold()));
            for suggestion in suggestions {
                output.push_str(&format!("  {}\n", suggestion));
            }
        }

        if !verbose {
            output.push('\n');
            output.push_str(&format!(
                "{} {}\n",
                "\u{2139}".blue(), // ℹ
                "Use -v / --verbose for more details.".dimmed(),
            ));
        }

        output
    }

    /// Plain-text version of [`Self::format_colored`] without ANSI codes.
    pub fn format_plain(&self, verbose: bool) -> String {
        if matches!(self, Self::Cancelled) {
            return format!("\n{self}\n");
        }

        let mut out = String::new();
        out.push_str(&format!("\n{} {}\n", self.label(), self));

        if verbose {
            let mut src = std::error::Error::source(self);
            while let Some(err) = src {
                out.push_str(&format!("  Caused by: {err}\n"));
                src = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            out.push_str("\nSuggestions:\n");
            for s in &suggestions {
                out.push_str(&format!("  {s}\n"));
            }
        }

        if !verbose {
            out.push_str("\nUse -v / --verbose for more details.\n");
        }

        out
    }

    /// Log the error using tracing.
    pub fn log(&self) {
        match self.category() {
            ErrorCategory::UserError => warn!("User error: {}", self),
            ErrorCategory::NotFound => warn!("Not found: {}", self),
            ErrorCategory::Configuration => error!("Configuration error: {}", self),
            ErrorCategory::Internal => error!("Internal error: {}", self),
            ErrorCategory::Cancelled => debug!("Cancelled by user"),
        }

        if let Some(source) = self.source() {
            debug!("Caused by: {}", source);
        }
    }
}

/// Error categories for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// User input error (validation, invalid arguments).
    UserError,
    /// Resource not found.
    NotFound,
    /// Configuration error.
    Configuration,
    /// Internal/system error.
    Internal,
    /// The user backed out.
    Cancelled,
}

// ── IntoCli trait ─────────────────────────────────────────────────────────────

/// Extension trait to convert I/O results into [`CliError`] at call-sites
/// with a descriptive context message.
pub trait IntoCli<T> {
    /// Convert to `CliResult` attaching a human-readable context message.
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> IntoCli<T> for Result<T, std::io::Error> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| CliError::IoError {
            message: f().into(),
            source: e,
        })
    }
}
