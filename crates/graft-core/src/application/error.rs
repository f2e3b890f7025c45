//! Application layer errors.
//!
//! These errors represent failures in orchestration and I/O, not catalog
//! rules. Catalog and selection errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::application::services::AcquisitionStep;
use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// The version-control binary is not installed.
    #[error("'{binary}' is required but was not found on PATH")]
    MissingVcsClient { binary: String },

    /// A version-control command exited unsuccessfully.
    #[error("`{command}` failed: {reason}")]
    VcsCommandFailed { command: String, reason: String },

    /// One step of the sparse checkout failed. `leftover` names the project
    /// directory when removing it failed too.
    #[error("Template download failed while {step}: {reason}")]
    AcquisitionFailed {
        step: AcquisitionStep,
        reason: String,
        leftover: Option<PathBuf>,
    },

    /// The package descriptor could not be read or parsed.
    #[error("Failed to read {path}: {reason}")]
    DescriptorRead { path: PathBuf, reason: String },

    /// The package descriptor could not be written back.
    #[error("Failed to write {path}: {reason}")]
    DescriptorWrite { path: PathBuf, reason: String },

    /// An interactive prompt was interrupted or returned garbage.
    #[error("Prompt failed: {reason}")]
    PromptFailed { reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// Rollback failed (best-effort cleanup failed).
    #[error("Rollback failed for {path}: {reason}")]
    RollbackFailed { path: PathBuf, reason: String },

    /// A catalog file could not be loaded.
    #[error("Invalid catalog {path}: {reason}")]
    InvalidCatalog { path: PathBuf, reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::MissingVcsClient { binary } => vec![
                format!("Install {binary} and make sure it is on your PATH"),
                "Or point `vcs.binary` in the config file at an existing binary".into(),
            ],
            Self::AcquisitionFailed {
                leftover: Some(path),
                ..
            } => vec![
                "Check your network connection and access to the template repository".into(),
                format!(
                    "Remove the partially created directory manually: {}",
                    path.display()
                ),
            ],
            Self::AcquisitionFailed { .. } | Self::VcsCommandFailed { .. } => vec![
                "Check your network connection and access to the template repository".into(),
                "No project directory was left behind".into(),
            ],
            Self::DescriptorRead { path, .. } | Self::DescriptorWrite { path, .. } => vec![
                "The template was downloaded but its metadata was not updated".into(),
                format!("Edit {} by hand to finish", path.display()),
            ],
            Self::PromptFailed { .. } => vec![
                "Run graft from an interactive terminal".into(),
                "Or pass --framework and --template to skip the selection prompts".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::InvalidCatalog { path, .. } => vec![
                format!("Fix or remove {}", path.display()),
                "Or unset `catalog.path` to use the built-in catalog".into(),
            ],
            Self::RollbackFailed { path, .. } => vec![format!(
                "Remove the partially created directory manually: {}",
                path.display()
            )],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingVcsClient { .. } | Self::InvalidCatalog { .. } => {
                ErrorCategory::Configuration
            }
            Self::VcsCommandFailed { .. }
            | Self::AcquisitionFailed { .. }
            | Self::DescriptorRead { .. }
            | Self::DescriptorWrite { .. }
            | Self::PromptFailed { .. }
            | Self::FilesystemError { .. }
            | Self::RollbackFailed { .. } => ErrorCategory::Internal,
        }
    }
}
