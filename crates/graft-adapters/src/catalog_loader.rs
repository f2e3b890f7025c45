//! File-based catalog loader.
//!
//! Reads a TOML catalog and converts it into a domain [`Catalog`].
//!
//! # `catalog.toml` format
//!
//! ```toml
//! remote_url = "https://example.com/templates.git"   # optional
//! frameworks = ["vue", "react"]
//!
//! [[templates]]
//! name = "basic"
//! type = "react"          # framework id
//! tags = ["main", "v2"]   # optional; branches the template is published on
//!
//! [[uis]]
//! name = "antd"
//!
//! [[uis.plugins]]
//! name    = "antd"
//! version = "^5.12.0"     # optional; "latest" when omitted
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info, instrument};

use graft_core::{
    application::ApplicationError,
    domain::{Catalog, TemplateEntry, UiEntry},
    error::GraftResult,
};

use crate::builtin_catalog::{DEFAULT_REMOTE_URL, builtin_catalog};

/// Deserialised representation of a catalog file.
#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct CatalogManifest {
    pub remote_url: Option<String>,
    pub frameworks: Vec<String>,
    #[serde(default)]
    pub templates: Vec<TemplateEntry>,
    #[serde(default)]
    pub uis: Vec<UiEntry>,
}

/// Loads a [`Catalog`] from one TOML file.
#[derive(Debug, Clone)]
pub struct CatalogLoader {
    path: PathBuf,
}

impl CatalogLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and validate the catalog file.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::InvalidCatalog`] if the file is unreadable,
    /// is not valid TOML for the format above, or repeats a name.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn load(&self) -> GraftResult<Catalog> {
        let source = std::fs::read_to_string(&self.path).map_err(|e| self.invalid(e))?;
        let catalog = self.parse(&source)?;
        debug!(
            frameworks = catalog.frameworks().len(),
            templates = catalog.templates().len(),
            uis = catalog.uis().len(),
            "Catalog loaded"
        );
        Ok(catalog)
    }

    /// Parse catalog TOML. Errors are attributed to this loader's path.
    pub fn parse(&self, source: &str) -> GraftResult<Catalog> {
        let manifest: CatalogManifest = toml::from_str(source).map_err(|e| self.invalid(e))?;

        let remote_url = manifest
            .remote_url
            .unwrap_or_else(|| DEFAULT_REMOTE_URL.to_string());

        Catalog::new(
            remote_url,
            manifest.frameworks,
            manifest.templates,
            manifest.uis,
        )
        .map_err(|e| self.invalid(e))
    }

    fn invalid(&self, e: impl std::fmt::Display) -> graft_core::error::GraftError {
        ApplicationError::InvalidCatalog {
            path: self.path.clone(),
            reason: e.to_string(),
        }
        .into()
    }
}

/// Resolve the catalog for this invocation.
///
/// Uses the file at `path` when given, the built-in catalog otherwise. A
/// `remote_url` override replaces whatever the catalog declares.
pub fn load_catalog(path: Option<&Path>, remote_url: Option<&str>) -> GraftResult<Catalog> {
    let catalog = match path {
        Some(path) => CatalogLoader::new(path).load()?,
        None => builtin_catalog()?,
    };

    Ok(match remote_url {
        Some(url) => {
            info!(url, "Using remote override");
            catalog.with_remote_url(url)
        }
        None => catalog,
    })
}
