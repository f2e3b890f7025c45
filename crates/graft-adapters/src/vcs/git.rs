//! `git` command-line adapter.
//!
//! Each operation spawns the binary with the repository as its working
//! directory and fails on a non-zero exit, carrying stderr.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, instrument, trace};

use graft_core::{
    application::{
        ApplicationError,
        ports::{VCS_METADATA_DIR, VersionControlClient},
    },
    error::{GraftError, GraftResult},
};

pub const DEFAULT_GIT_BINARY: &str = "git";

/// Shells out to `git`.
#[derive(Debug, Clone)]
pub struct GitCli {
    binary: String,
}

impl GitCli {
    pub fn new() -> Self {
        Self::with_binary(DEFAULT_GIT_BINARY)
    }

    /// Use a specific binary name or path instead of `git` from `PATH`.
    pub fn with_binary(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }

    fn run(&self, workdir: &Path, args: &[&str]) -> GraftResult<()> {
        let command = format!("{} {}", self.binary, args.join(" "));
        trace!(%command, workdir = %workdir.display(), "Running");

        let output = Command::new(&self.binary)
            .args(args)
            .current_dir(workdir)
            // Never block on a credential prompt.
            .env("GIT_TERMINAL_PROMPT", "0")
            .output()
            .map_err(|e| self.spawn_error(&command, e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let reason = if stderr.is_empty() {
                format!("exited with {}", output.status)
            } else {
                stderr
            };
            return Err(ApplicationError::VcsCommandFailed { command, reason }.into());
        }

        Ok(())
    }

    fn spawn_error(&self, command: &str, e: io::Error) -> GraftError {
        if e.kind() == io::ErrorKind::NotFound {
            ApplicationError::MissingVcsClient {
                binary: self.binary.clone(),
            }
            .into()
        } else {
            ApplicationError::VcsCommandFailed {
                command: command.to_string(),
                reason: e.to_string(),
            }
            .into()
        }
    }

    fn metadata_dir(workdir: &Path) -> PathBuf {
        workdir.join(VCS_METADATA_DIR)
    }
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new()
    }
}

impl VersionControlClient for GitCli {
    fn ensure_available(&self) -> GraftResult<()> {
        match which::which(&self.binary) {
            Ok(path) => {
                debug!(path = %path.display(), "Found git");
                Ok(())
            }
            Err(_) => Err(ApplicationError::MissingVcsClient {
                binary: self.binary.clone(),
            }
            .into()),
        }
    }

    #[instrument(skip(self), fields(workdir = %workdir.display()))]
    fn init(&self, workdir: &Path) -> GraftResult<()> {
        self.run(workdir, &["init", "--quiet"])
    }

    fn add_remote(&self, workdir: &Path, name: &str, url: &str) -> GraftResult<()> {
        self.run(workdir, &["remote", "add", name, url])
    }

    fn enable_sparse_checkout(&self, workdir: &Path) -> GraftResult<()> {
        self.run(workdir, &["config", "core.sparsecheckout", "true"])
    }

    fn set_sparse_path(&self, workdir: &Path, path: &str) -> GraftResult<()> {
        let info = Self::metadata_dir(workdir).join("info");
        let file = info.join("sparse-checkout");

        let to_fs_error = |e: io::Error| -> GraftError {
            ApplicationError::FilesystemError {
                path: file.clone(),
                reason: e.to_string(),
            }
            .into()
        };

        std::fs::create_dir_all(&info).map_err(to_fs_error)?;
        let mut sparse = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&file)
            .map_err(to_fs_error)?;
        writeln!(sparse, "{path}").map_err(to_fs_error)
    }

    #[instrument(skip(self), fields(workdir = %workdir.display()))]
    fn pull(&self, workdir: &Path, remote: &str, branch: &str) -> GraftResult<()> {
        self.run(workdir, &["pull", "--quiet", remote, branch])
    }

    fn remove_metadata(&self, workdir: &Path) -> GraftResult<()> {
        let dir = Self::metadata_dir(workdir);
        if !dir.exists() {
            return Ok(());
        }
        std::fs::remove_dir_all(&dir).map_err(|e| {
            ApplicationError::FilesystemError {
                path: dir.clone(),
                reason: e.to_string(),
            }
            .into()
        })
    }
}
