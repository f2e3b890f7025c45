//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "graft",
    bin_name = "graft",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{26a1} Scaffold projects from a shared template repository",
    long_about = "Graft creates a new project by pulling one template directory \
                  out of a remote repository with a sparse checkout, then stamping \
                  your project details into its package.json.",
    after_help = "EXAMPLES:\n\
        \x20 graft init my-app\n\
        \x20 graft init my-app --framework react --template basic\n\
        \x20 graft list\n\
        \x20 graft completions bash > /usr/share/bash-completion/completions/graft",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a new project from a template.
    #[command(
        about = "Create a new project",
        after_help = "EXAMPLES:\n\
            \x20 graft init my-app\n\
            \x20 graft init my-app -f react -t basic -b v2\n\
            \x20 graft init my-app -f vue -C ~/code"
    )]
    Init(InitArgs),

    /// List the catalog.
    #[command(
        visible_alias = "ls",
        about = "List frameworks, templates and UI sets",
        after_help = "EXAMPLES:\n\
            \x20 graft list\n\
            \x20 graft list --format json"
    )]
    List(ListArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 graft completions bash > ~/.local/share/bash-completion/completions/graft\n\
            \x20 graft completions zsh  > ~/.zfunc/_graft\n\
            \x20 graft completions fish > ~/.config/fish/completions/graft.fish"
    )]
    Completions(CompletionsArgs),

    /// Manage the Graft configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 graft config init\n\
            \x20 graft config get vcs.binary\n\
            \x20 graft config list"
    )]
    Config(ConfigCommands),
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `graft init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Name of the project directory to create.
    #[arg(value_name = "APP_NAME", help = "Project name")]
    pub name: String,

    #[arg(
        short = 'f',
        long = "framework",
        value_name = "FRAMEWORK",
        help = "Framework to use (skips the framework prompt)"
    )]
    pub framework: Option<String>,

    #[arg(
        short = 't',
        long = "template",
        value_name = "TEMPLATE",
        help = "Template to use (skips the template prompt)"
    )]
    pub template: Option<String>,

    #[arg(
        short = 'b',
        long = "branch",
        value_name = "BRANCH",
        help = "Template branch to pull (default: main)"
    )]
    pub branch: Option<String>,

    /// Parent directory of the new project.
    #[arg(
        short = 'C',
        long = "dir",
        value_name = "DIR",
        help = "Create the project inside DIR (default: current directory)"
    )]
    pub dir: Option<PathBuf>,
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `graft list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `list` command.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One template name per line.
    List,
    /// The whole catalog as JSON.
    Json,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `graft completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `graft config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `vcs.binary`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the configuration file and download cache locations.
    Path,
    /// Write a default configuration file.
    Init {
        /// Overwrite an existing config file.
        #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
        force: bool,
    },
}

// ── tests ─────────────────────────────────────────────────────────────────────
