//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `GRAFT_<SECTION>__<KEY>`, e.g.
//!    `GRAFT_VCS__BINARY=/usr/local/bin/git`
//! 3. Config file: `--config <FILE>`, or `config.toml` in the platform config
//!    directory when it exists
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::debug;

use graft_adapters::vcs::DEFAULT_GIT_BINARY;

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "GRAFT";

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where the catalog comes from.
    pub catalog: CatalogConfig,
    /// Output settings.
    pub output: OutputConfig,
    /// Version-control client settings.
    pub vcs: VcsConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// TOML catalog file. The built-in catalog is used when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// Replaces the catalog's template repository URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VcsConfig {
    /// `git` binary name or path.
    pub binary: String,
}

impl Default for VcsConfig {
    fn default() -> Self {
        Self {
            binary: DEFAULT_GIT_BINARY.into(),
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, the config file and the environment.
    ///
    /// `config_file` is the path the user passed via `--config`; it must
    /// exist. Without it the default location is read only if present.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let file = match config_file {
            Some(path) => File::from(path.as_path())
                .format(FileFormat::Toml)
                .required(true),
            None => File::from(Self::config_path())
                .format(FileFormat::Toml)
                .required(false),
        };

        let config = Config::builder()
            .set_default("vcs.binary", DEFAULT_GIT_BINARY)?
            .set_default("output.no_color", false)?
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to read configuration")?;

        let config: Self = config
            .try_deserialize()
            .context("Invalid configuration")?;

        debug!(?config, "Configuration resolved");
        Ok(config)
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.graft.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "graft", "graft")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".graft.toml"))
    }

    /// Download cache location, `~/.graft`.
    pub fn cache_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".graft"))
    }

    /// Catalog file, if one is configured.
    pub fn catalog_path(&self) -> Option<&Path> {
        self.catalog.path.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_binary_is_git() {
        assert_eq!(AppConfig::default().vcs.binary, "git");
    }

    #[test]
    fn default_no_color_is_false() {
        assert!(!AppConfig::default().output.no_color);
    }

    #[test]
    fn file_values_override_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[catalog]
path = "/etc/graft/catalog.toml"
remote_url = "https://example.com/t.git"

[vcs]
binary = "/opt/git/bin/git"
"#,
        )
        .unwrap();

        let cfg = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(
            cfg.catalog_path(),
            Some(Path::new("/etc/graft/catalog.toml"))
        );
        assert_eq!(
            cfg.catalog.remote_url.as_deref(),
            Some("https://example.com/t.git")
        );
        assert_eq!(cfg.vcs.binary, "/opt/git/bin/git");
        assert!(!cfg.output.no_color);
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope.toml");
        assert!(AppConfig::load(Some(&missing)).is_err());
    }

    #[test]
    fn default_config_round_trips_through_toml() {
        let text = toml::to_string_pretty(&AppConfig::default()).unwrap();
        assert!(text.contains("binary = \"git\""));
        assert!(!text.contains("remote_url"));

        let parsed: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed.vcs.binary, "git");
    }

    #[test]
    fn config_path_is_not_empty() {
        let p = AppConfig::config_path();
        assert!(!p.as_os_str().is_empty());
    }
}
