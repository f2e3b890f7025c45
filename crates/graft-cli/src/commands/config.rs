//! `graft config`: inspect and bootstrap configuration.

use std::path::Path;

use crate::{
    cli::ConfigCommands,
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
pub fn execute(
    cmd: ConfigCommands,
    config_file: Option<&Path>,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = get_config_value(&config, &key)?;
            output.print(&value)?;
        }

        ConfigCommands::List => {
            output.header("Current Configuration:")?;
            output.print(&to_toml(&config)?)?;
        }

        ConfigCommands::Path => {
            let path = config_file
                .map(Path::to_path_buf)
                .unwrap_or_else(AppConfig::config_path);
            output.field("config", &path.display().to_string())?;
            let cache = AppConfig::cache_dir()
                .map(|dir| dir.display().to_string())
                .unwrap_or_else(|| "(no home directory)".into());
            output.field("cache", &cache)?;
        }

        ConfigCommands::Init { force } => {
            let path = config_file
                .map(Path::to_path_buf)
                .unwrap_or_else(AppConfig::config_path);
            init_config(&path, force, &output)?;
        }
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

fn to_toml(config: &AppConfig) -> CliResult<String> {
    toml::to_string_pretty(config).map_err(|e| CliError::ConfigError {
        message: format!("Failed to serialise config: {e}"),
        source: Some(Box::new(e)),
    })
}

fn get_config_value(config: &AppConfig, key: &str) -> CliResult<String> {
    match key {
        "catalog.path" => Ok(config
            .catalog
            .path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default()),
        "catalog.remote_url" => Ok(config.catalog.remote_url.clone().unwrap_or_default()),
        "output.no_color" => Ok(config.output.no_color.to_string()),
        "vcs.binary" => Ok(config.vcs.binary.clone()),
        _ => Err(CliError::ConfigError {
            message: format!("Unknown config key: '{key}'"),
            source: None,
        }),
    }
}

/// Write the default configuration to `path`.
fn init_config(path: &Path, force: bool, output: &OutputManager) -> CliResult<()> {
    // Bail early if the file already exists and --force was not given.
    if path.exists() && !force {
        output.warning(&format!(
            "Config already exists at {}  (use --force to overwrite)",
            path.display(),
        ))?;
        return Ok(());
    }

    let toml = to_toml(&AppConfig::default())?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).with_cli_context(|| {
            format!("Failed to create config directory '{}'", parent.display())
        })?;
    }

    std::fs::write(path, toml)
        .with_cli_context(|| format!("Failed to write config to '{}'", path.display()))?;

    output.success(&format!("Configuration created at {}", path.display()))?;
    Ok(())
}

// ── tests ─────────────────────────────────────────────────────────────────────
