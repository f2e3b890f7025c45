//! Static catalogs of frameworks, templates and UI add-on sets.
//!
//! A [`Catalog`] is loaded once at startup (built-in or from a file) and is
//! never mutated afterwards. Every lookup here is a pure function.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// Version written for a plugin that does not pin one.
pub const LATEST_VERSION: &str = "latest";

/// One scaffoldable template in the remote repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateEntry {
    pub name: String,
    /// Framework id this template belongs to.
    #[serde(rename = "type")]
    pub framework: String,
    /// Branch names the template is published on.
    #[serde(default)]
    pub tags: Vec<String>,
}

impl TemplateEntry {
    pub fn new(name: impl Into<String>, framework: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            framework: framework.into(),
            tags: Vec::new(),
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

impl fmt::Display for TemplateEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.framework)
    }
}

/// A dependency contributed by a UI add-on set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiPlugin {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl UiPlugin {
    /// A plugin tracking the latest published version.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: None,
        }
    }

    /// A plugin pinned to a version requirement.
    pub fn pinned(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: Some(version.into()),
        }
    }

    /// The version written into the descriptor.
    pub fn resolved_version(&self) -> &str {
        self.version.as_deref().unwrap_or(LATEST_VERSION)
    }
}

/// A selectable UI add-on set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiEntry {
    pub name: String,
    #[serde(default)]
    pub plugins: Vec<UiPlugin>,
}

impl UiEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            plugins: Vec::new(),
        }
    }

    pub fn with_plugin(mut self, plugin: UiPlugin) -> Self {
        self.plugins.push(plugin);
        self
    }
}

/// Read-only catalog data consumed by the scaffolding pipeline.
///
/// Construction rejects duplicate framework, template and UI names so every
/// lookup by name is unambiguous.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    remote_url: String,
    frameworks: Vec<String>,
    templates: Vec<TemplateEntry>,
    uis: Vec<UiEntry>,
}

impl Catalog {
    pub fn new(
        remote_url: impl Into<String>,
        frameworks: Vec<String>,
        templates: Vec<TemplateEntry>,
        uis: Vec<UiEntry>,
    ) -> Result<Self, DomainError> {
        ensure_unique("framework", frameworks.iter().map(String::as_str))?;
        ensure_unique("template", templates.iter().map(|t| t.name.as_str()))?;
        ensure_unique("ui", uis.iter().map(|u| u.name.as_str()))?;

        Ok(Self {
            remote_url: remote_url.into(),
            frameworks,
            templates,
            uis,
        })
    }

    /// Replace the remote repository URL.
    pub fn with_remote_url(mut self, remote_url: impl Into<String>) -> Self {
        self.remote_url = remote_url.into();
        self
    }

    pub fn remote_url(&self) -> &str {
        &self.remote_url
    }

    pub fn frameworks(&self) -> &[String] {
        &self.frameworks
    }

    pub fn templates(&self) -> &[TemplateEntry] {
        &self.templates
    }

    pub fn uis(&self) -> &[UiEntry] {
        &self.uis
    }

    // ------------------------------------------------------------------------
    // Lookups
    // ------------------------------------------------------------------------

    pub fn validate_framework(&self, id: &str) -> bool {
        self.frameworks.iter().any(|f| f == id)
    }

    /// Names of the templates whose type is `framework`, in catalog order.
    ///
    /// An empty result means "no template" and is not an error here.
    pub fn templates_for(&self, framework: &str) -> Vec<&str> {
        self.templates
            .iter()
            .filter(|t| t.framework == framework)
            .map(|t| t.name.as_str())
            .collect()
    }

    pub fn find_template(&self, name: &str) -> Option<&TemplateEntry> {
        self.templates.iter().find(|t| t.name == name)
    }

    /// Published branches for a template; empty when the template is unknown.
    pub fn branches_for(&self, template: &str) -> &[String] {
        self.find_template(template)
            .map(|t| t.tags.as_slice())
            .unwrap_or(&[])
    }

    pub fn find_ui(&self, name: &str) -> Option<&UiEntry> {
        self.uis.iter().find(|u| u.name == name)
    }

    pub fn ui_names(&self) -> Vec<&str> {
        self.uis.iter().map(|u| u.name.as_str()).collect()
    }
}

fn ensure_unique<'a>(
    catalog: &'static str,
    names: impl Iterator<Item = &'a str>,
) -> Result<(), DomainError> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(DomainError::DuplicateCatalogEntry {
                catalog,
                name: name.to_string(),
            });
        }
    }
    Ok(())
}
