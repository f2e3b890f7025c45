//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `graft-adapters` crate provides filesystem and VCS implementations;
//! `graft-cli` provides the terminal-facing prompter and progress reporter.

use std::path::Path;

use crate::application::services::ScaffoldStage;
use crate::error::GraftResult;

/// Name of the version-control metadata directory.
pub const VCS_METADATA_DIR: &str = ".git";

/// Port for filesystem operations.
///
/// Implemented by:
/// - `graft_adapters::filesystem::LocalFilesystem` (production)
/// - `graft_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> GraftResult<()>;

    /// Write content to a file, replacing it.
    fn write_file(&self, path: &Path, content: &str) -> GraftResult<()>;

    /// Read a whole file as UTF-8.
    fn read_to_string(&self, path: &Path) -> GraftResult<String>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Names of the direct children of a directory, sorted.
    fn list_dir(&self, path: &Path) -> GraftResult<Vec<String>>;

    /// Move a file or directory.
    fn rename(&self, from: &Path, to: &Path) -> GraftResult<()>;

    /// Remove a file, or a directory and all contents.
    fn remove_all(&self, path: &Path) -> GraftResult<()>;
}

/// Narrow capability interface over the version-control client.
///
/// Every operation takes the repository's working directory explicitly; the
/// process working directory is never changed.
///
/// Implemented by:
/// - `graft_adapters::vcs::GitCli` (shells out to `git`)
#[cfg_attr(test, mockall::automock)]
pub trait VersionControlClient: Send + Sync {
    /// Fail with `MissingVcsClient` when the client cannot be run at all.
    fn ensure_available(&self) -> GraftResult<()>;

    /// Initialise an empty repository in `workdir`.
    fn init(&self, workdir: &Path) -> GraftResult<()>;

    /// Register a remote.
    fn add_remote(&self, workdir: &Path, name: &str, url: &str) -> GraftResult<()>;

    /// Turn on sparse checkout for the repository.
    fn enable_sparse_checkout(&self, workdir: &Path) -> GraftResult<()>;

    /// Record a path to materialise on the next checkout.
    fn set_sparse_path(&self, workdir: &Path, path: &str) -> GraftResult<()>;

    /// Pull `branch` from `remote` into the working tree.
    fn pull(&self, workdir: &Path, remote: &str, branch: &str) -> GraftResult<()>;

    /// Delete the repository metadata, leaving only the working tree.
    fn remove_metadata(&self, workdir: &Path) -> GraftResult<()>;
}

/// Port for blocking, interactive questions.
#[cfg_attr(test, mockall::automock)]
pub trait Prompter: Send + Sync {
    /// Single choice; returns the index into `choices`.
    fn select(&self, prompt: &str, choices: &[String]) -> GraftResult<usize>;

    /// Yes/no question.
    fn confirm(&self, prompt: &str, default: bool) -> GraftResult<bool>;

    /// Free-form text with a default.
    fn input(&self, prompt: &str, default: &str) -> GraftResult<String>;
}

/// Port for surfacing long-running stages (spinners in the CLI).
#[cfg_attr(test, mockall::automock)]
pub trait ProgressReporter: Send + Sync {
    fn stage_started(&self, stage: ScaffoldStage);

    fn stage_succeeded(&self, stage: ScaffoldStage);

    fn stage_failed(&self, stage: ScaffoldStage);
}
