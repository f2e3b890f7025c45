//! Template Acquisition - fetch exactly one template subdirectory.
//!
//! Creates the project directory, sparse-pulls `{template}-{ui}` from the
//! catalog's remote, moves its contents up to the project root and restarts
//! version history from scratch. Any failing step removes the project
//! directory again.

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, error, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, VersionControlClient},
    },
    error::{GraftError, GraftResult},
};

/// Name given to the template remote.
pub const DEFAULT_REMOTE: &str = "origin";

/// The ordered steps of an acquisition; used to report where it broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcquisitionStep {
    CreateDirectory,
    InitRepository,
    AddRemote,
    EnableSparseCheckout,
    SetSparsePath,
    Pull,
    RemoveMetadata,
    Flatten,
    Reinitialize,
}

impl fmt::Display for AcquisitionStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let phrase = match self {
            Self::CreateDirectory => "creating the project directory",
            Self::InitRepository => "initialising a repository",
            Self::AddRemote => "adding the template remote",
            Self::EnableSparseCheckout => "enabling sparse checkout",
            Self::SetSparsePath => "selecting the template path",
            Self::Pull => "pulling the template",
            Self::RemoveMetadata => "removing template history",
            Self::Flatten => "moving template files into place",
            Self::Reinitialize => "starting a fresh repository",
        };
        f.write_str(phrase)
    }
}

/// Outcome of [`TemplateAcquisition::acquire`].
#[derive(Debug, Clone)]
pub struct AcquisitionResult {
    pub target_dir: PathBuf,
    pub success: bool,
    /// Set when `success` is false.
    pub failure: Option<ApplicationError>,
}

impl AcquisitionResult {
    fn succeeded(target_dir: PathBuf) -> Self {
        Self {
            target_dir,
            success: true,
            failure: None,
        }
    }

    fn failed(target_dir: PathBuf, failure: ApplicationError) -> Self {
        Self {
            target_dir,
            success: false,
            failure: Some(failure),
        }
    }

    /// Convert into a `Result`, keeping the failure cause.
    pub fn into_result(self) -> GraftResult<PathBuf> {
        match self.failure {
            Some(failure) => Err(failure.into()),
            None => Ok(self.target_dir),
        }
    }
}

pub struct TemplateAcquisition<'a> {
    filesystem: &'a dyn Filesystem,
    vcs: &'a dyn VersionControlClient,
}

impl<'a> TemplateAcquisition<'a> {
    pub fn new(filesystem: &'a dyn Filesystem, vcs: &'a dyn VersionControlClient) -> Self {
        Self { filesystem, vcs }
    }

    /// Materialise `template_subpath` of `remote_url@branch` as
    /// `base_dir/project_name`.
    ///
    /// On success the directory holds the template files at its root plus a
    /// freshly initialised, empty repository. On failure the directory is
    /// removed (best effort) and the failing step is reported.
    #[instrument(skip_all, fields(subpath = template_subpath, branch = branch))]
    pub fn acquire(
        &self,
        remote_url: &str,
        template_subpath: &str,
        branch: &str,
        project_name: &str,
        base_dir: &Path,
    ) -> AcquisitionResult {
        let target_dir = base_dir.join(project_name);

        match self.run_steps(remote_url, template_subpath, branch, &target_dir) {
            Ok(()) => {
                info!(target = %target_dir.display(), "Template acquired");
                AcquisitionResult::succeeded(target_dir)
            }
            Err((step, cause)) => {
                error!(%step, error = %cause, "Template acquisition failed");
                let leftover = self
                    .rollback(&target_dir)
                    .err()
                    .map(|_| target_dir.clone());
                let failure = ApplicationError::AcquisitionFailed {
                    step,
                    reason: cause.to_string(),
                    leftover,
                };
                AcquisitionResult::failed(target_dir, failure)
            }
        }
    }

    fn run_steps(
        &self,
        remote_url: &str,
        template_subpath: &str,
        branch: &str,
        dir: &Path,
    ) -> Result<(), (AcquisitionStep, GraftError)> {
        use AcquisitionStep::*;

        step(CreateDirectory, self.filesystem.create_dir_all(dir))?;
        step(InitRepository, self.vcs.init(dir))?;
        step(AddRemote, self.vcs.add_remote(dir, DEFAULT_REMOTE, remote_url))?;
        step(EnableSparseCheckout, self.vcs.enable_sparse_checkout(dir))?;
        step(SetSparsePath, self.vcs.set_sparse_path(dir, template_subpath))?;
        step(Pull, self.vcs.pull(dir, DEFAULT_REMOTE, branch))?;
        step(RemoveMetadata, self.vcs.remove_metadata(dir))?;
        step(Flatten, self.flatten(dir, template_subpath))?;
        step(Reinitialize, self.vcs.init(dir))?;

        Ok(())
    }

    /// Move every entry of `dir/subpath`, dotfiles included, up into `dir`
    /// and delete the then-empty subpath.
    fn flatten(&self, dir: &Path, subpath: &str) -> GraftResult<()> {
        let source = dir.join(subpath);
        if !self.filesystem.exists(&source) {
            return Err(ApplicationError::FilesystemError {
                path: source,
                reason: "template path not found in the downloaded tree".into(),
            }
            .into());
        }

        let entries = self.filesystem.list_dir(&source)?;
        debug!(count = entries.len(), "Flattening template");
        for entry in &entries {
            self.filesystem
                .rename(&source.join(entry), &dir.join(entry))?;
        }

        self.filesystem.remove_all(&source)
    }

    /// Remove `dir` if it exists. A failure is logged and handed back so the
    /// caller can tell the user the directory is still there.
    fn rollback(&self, dir: &Path) -> Result<(), ApplicationError> {
        if !self.filesystem.exists(dir) {
            return Ok(());
        }
        self.filesystem.remove_all(dir).map_err(|e| {
            let failure = ApplicationError::RollbackFailed {
                path: dir.to_path_buf(),
                reason: e.to_string(),
            };
            warn!(error = %failure, "Could not remove partially created project");
            failure
        })
    }
}

fn step<T>(
    step: AcquisitionStep,
    result: GraftResult<T>,
) -> Result<T, (AcquisitionStep, GraftError)> {
    result.map_err(|e| (step, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{MockFilesystem, MockVersionControlClient};
    use mockall::Sequence;

    const REMOTE: &str = "https://example.com/templates.git";

    fn dir() -> PathBuf {
        PathBuf::from("/work/demo")
    }

    fn vcs_failure() -> GraftError {
        ApplicationError::VcsCommandFailed {
            command: "git pull origin main".into(),
            reason: "couldn't find remote ref main".into(),
        }
        .into()
    }

    #[test]
    fn runs_every_step_in_order() {
        let mut seq = Sequence::new();
        let mut fs = MockFilesystem::new();
        let mut vcs = MockVersionControlClient::new();

        fs.expect_create_dir_all()
            .withf(|p| p == Path::new("/work/demo"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        vcs.expect_init()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        vcs.expect_add_remote()
            .withf(|_, name, url| name == "origin" && url == REMOTE)
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _| Ok(()));
        vcs.expect_enable_sparse_checkout()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        vcs.expect_set_sparse_path()
            .withf(|_, path| path == "basic-antd")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
        vcs.expect_pull()
            .withf(|_, remote, branch| remote == "origin" && branch == "main")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _| Ok(()));
        vcs.expect_remove_metadata()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        fs.expect_exists()
            .withf(|p| p == Path::new("/work/demo/basic-antd"))
            .times(1)
            .in_sequence(&mut seq)
            .return_const(true);
        fs.expect_list_dir()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(vec![".gitignore".into(), "package.json".into()]));
        fs.expect_rename()
            .withf(|from, to| {
                from == Path::new("/work/demo/basic-antd/.gitignore")
                    && to == Path::new("/work/demo/.gitignore")
            })
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
        fs.expect_rename()
            .withf(|from, to| {
                from == Path::new("/work/demo/basic-antd/package.json")
                    && to == Path::new("/work/demo/package.json")
            })
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
        fs.expect_remove_all()
            .withf(|p| p == Path::new("/work/demo/basic-antd"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        vcs.expect_init()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));

        let result = TemplateAcquisition::new(&fs, &vcs).acquire(
            REMOTE,
            "basic-antd",
            "main",
            "demo",
            Path::new("/work"),
        );

        assert!(result.success);
        assert!(result.failure.is_none());
        assert_eq!(result.target_dir, dir());
    }

    #[test]
    fn failed_pull_rolls_back_directory() {
        let mut fs = MockFilesystem::new();
        let mut vcs = MockVersionControlClient::new();

        fs.expect_create_dir_all().returning(|_| Ok(()));
        vcs.expect_init().times(1).returning(|_| Ok(()));
        vcs.expect_add_remote().returning(|_, _, _| Ok(()));
        vcs.expect_enable_sparse_checkout().returning(|_| Ok(()));
        vcs.expect_set_sparse_path().returning(|_, _| Ok(()));
        vcs.expect_pull().returning(|_, _, _| Err(vcs_failure()));
        vcs.expect_remove_metadata().never();
        fs.expect_exists().return_const(true);
        fs.expect_remove_all()
            .withf(|p| p == Path::new("/work/demo"))
            .times(1)
            .returning(|_| Ok(()));

        let result = TemplateAcquisition::new(&fs, &vcs).acquire(
            REMOTE,
            "basic-antd",
            "main",
            "demo",
            Path::new("/work"),
        );

        assert!(!result.success);
        match result.failure {
            Some(ApplicationError::AcquisitionFailed {
                step,
                reason,
                leftover,
            }) => {
                assert_eq!(step, AcquisitionStep::Pull);
                assert!(reason.contains("couldn't find remote ref"));
                assert_eq!(leftover, None);
            }
            other => panic!("unexpected failure: {other:?}"),
        }
    }

    #[test]
    fn missing_template_path_fails_flatten() {
        let mut fs = MockFilesystem::new();
        let mut vcs = MockVersionControlClient::new();

        fs.expect_create_dir_all().returning(|_| Ok(()));
        vcs.expect_init().times(1).returning(|_| Ok(()));
        vcs.expect_add_remote().returning(|_, _, _| Ok(()));
        vcs.expect_enable_sparse_checkout().returning(|_| Ok(()));
        vcs.expect_set_sparse_path().returning(|_, _| Ok(()));
        vcs.expect_pull().returning(|_, _, _| Ok(()));
        vcs.expect_remove_metadata().returning(|_| Ok(()));
        fs.expect_exists()
            .withf(|p| p == Path::new("/work/demo/basic-antd"))
            .return_const(false);
        fs.expect_exists()
            .withf(|p| p == Path::new("/work/demo"))
            .return_const(true);
        fs.expect_list_dir().never();
        fs.expect_remove_all().times(1).returning(|_| Ok(()));

        let result = TemplateAcquisition::new(&fs, &vcs).acquire(
            REMOTE,
            "basic-antd",
            "main",
            "demo",
            Path::new("/work"),
        );

        let err = result.into_result().unwrap_err();
        assert!(err.to_string().contains("moving template files into place"));
    }

    #[test]
    fn failed_rollback_still_reports_original_step() {
        let mut fs = MockFilesystem::new();
        let vcs = {
            let mut vcs = MockVersionControlClient::new();
            vcs.expect_init().returning(|_| Err(vcs_failure()));
            vcs
        };

        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_exists().return_const(true);
        fs.expect_remove_all().returning(|p| {
            Err(ApplicationError::FilesystemError {
                path: p.to_path_buf(),
                reason: "permission denied".into(),
            }
            .into())
        });

        let result = TemplateAcquisition::new(&fs, &vcs).acquire(
            REMOTE,
            "basic-antd",
            "main",
            "demo",
            Path::new("/work"),
        );

        let failure = result.failure.unwrap();
        assert!(matches!(
            failure,
            ApplicationError::AcquisitionFailed {
                step: AcquisitionStep::InitRepository,
                leftover: Some(ref path),
                ..
            } if path == Path::new("/work/demo")
        ));

        let suggestions = failure.suggestions();
        assert!(
            suggestions
                .iter()
                .any(|s| s.contains("Remove the partially created directory manually"))
        );
        assert!(
            !suggestions
                .iter()
                .any(|s| s.contains("No project directory was left behind"))
        );
    }
}
