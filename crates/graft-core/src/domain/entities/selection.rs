//! Per-invocation choices: what to scaffold, and the metadata to stamp on it.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::catalog::{TemplateEntry, UiEntry};

/// Branch pulled when the caller does not ask for a specific one.
pub const DEFAULT_BRANCH: &str = "main";

/// Version offered when the user does not enter one.
pub const DEFAULT_VERSION: &str = "1.0.0";

/// The resolved framework / template / UI combination for one scaffold.
///
/// Only the `SelectionWizard` builds these, after validating every field
/// against the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub project_name: String,
    pub framework: String,
    pub template: TemplateEntry,
    pub ui: UiEntry,
    pub branch: Option<String>,
}

impl Selection {
    /// Directory inside the remote repository to materialise.
    ///
    /// Templates are published once per UI set as `<template>-<ui>`.
    pub fn template_subpath(&self) -> String {
        format!("{}-{}", self.template.name, self.ui.name)
    }

    /// Branch to pull.
    pub fn branch(&self) -> &str {
        self.branch.as_deref().unwrap_or(DEFAULT_BRANCH)
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} / {} / {} @ {}",
            self.framework,
            self.template.name,
            self.ui.name,
            self.branch()
        )
    }
}

/// User-entered descriptor fields. Always overrides the template's values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectMetadata {
    pub name: String,
    pub author: String,
    pub version: String,
    pub description: String,
}

impl ProjectMetadata {
    /// Blank metadata used when the user could not be asked.
    pub fn fallback(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            author: String::new(),
            version: DEFAULT_VERSION.to_string(),
            description: String::new(),
        }
    }

    /// Field name / value pairs in the order they are written.
    pub fn fields(&self) -> [(&'static str, &str); 4] {
        [
            ("name", &self.name),
            ("author", &self.author),
            ("version", &self.version),
            ("description", &self.description),
        ]
    }
}
