// ============================================================================
// domain/error.rs - CATALOG & SELECTION ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (they travel inside `AcquisitionResult` and reports)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Unsupported framework '{framework}'")]
    UnsupportedFramework {
        framework: String,
        available: Vec<String>,
    },

    #[error("Unsupported template '{template}'")]
    UnsupportedTemplate { template: String },

    #[error("Unsupported UI set '{ui}'")]
    UnsupportedUi { ui: String },

    #[error("Invalid project name '{name}': {reason}")]
    InvalidProjectName { name: String, reason: String },

    #[error("Invalid package descriptor: {0}")]
    InvalidDescriptor(String),

    // ========================================================================
    // Compatibility Errors
    // ========================================================================
    #[error("template '{template}' targets '{actual}', not '{framework}'")]
    TemplateFrameworkMismatch {
        template: String,
        framework: String,
        actual: String,
    },

    #[error("branch '{branch}' is not published for template '{template}'")]
    UnsupportedBranch {
        template: String,
        branch: String,
        available: Vec<String>,
    },

    // ========================================================================
    // Not Found Errors
    // ========================================================================
    #[error("No template available for framework '{framework}'")]
    NoTemplateForFramework { framework: String },

    #[error("The {catalog} catalog is empty")]
    EmptyCatalog { catalog: &'static str },

    // ========================================================================
    // Catalog Integrity
    // ========================================================================
    #[error("Duplicate {catalog} entry: {name}")]
    DuplicateCatalogEntry { catalog: &'static str, name: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::UnsupportedFramework { available, .. } => {
                let mut out = vec!["Supported frameworks:".to_string()];
                out.extend(available.iter().map(|f| format!("  • {f}")));
                out.push("Omit --framework to pick one interactively".into());
                out
            }
            Self::UnsupportedTemplate { template } => vec![
                format!("No template named '{template}' exists"),
                "Try: graft list to see available templates".into(),
            ],
            Self::UnsupportedUi { ui } => vec![
                format!("No UI set named '{ui}' exists"),
                "Try: graft list to see available UI sets".into(),
            ],
            Self::TemplateFrameworkMismatch { actual, .. } => vec![
                format!("Use --framework {actual} with this template"),
                "Or omit --template to choose from the framework's templates".into(),
            ],
            Self::UnsupportedBranch { available, .. } => {
                let mut out = vec!["Published branches:".to_string()];
                out.extend(available.iter().map(|b| format!("  • {b}")));
                out
            }
            Self::NoTemplateForFramework { framework } => vec![
                format!("The catalog has no templates for '{framework}' yet"),
                "Try: graft list".into(),
            ],
            Self::InvalidProjectName { .. } => vec![
                "Use alphanumeric characters, hyphens, and underscores".into(),
                "Examples: my-project, my_app, project123".into(),
            ],
            Self::InvalidDescriptor(_) => vec![
                "The template's package.json could not be understood".into(),
                "Please report this to the template maintainers".into(),
            ],
            Self::EmptyCatalog { .. } | Self::DuplicateCatalogEntry { .. } => vec![
                "Check the catalog file configured under `catalog.path`".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnsupportedFramework { .. }
            | Self::UnsupportedTemplate { .. }
            | Self::UnsupportedUi { .. }
            | Self::InvalidProjectName { .. } => ErrorCategory::Validation,
            Self::TemplateFrameworkMismatch { .. } | Self::UnsupportedBranch { .. } => {
                ErrorCategory::Compatibility
            }
            Self::NoTemplateForFramework { .. } | Self::EmptyCatalog { .. } => {
                ErrorCategory::NotFound
            }
            Self::InvalidDescriptor(_) | Self::DuplicateCatalogEntry { .. } => {
                ErrorCategory::Internal
            }
        }
    }

    /// Whether this is reported as a warning rather than a failure.
    pub fn is_warning(&self) -> bool {
        matches!(self, Self::NoTemplateForFramework { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Compatibility,
    NotFound,
    Internal,
}
