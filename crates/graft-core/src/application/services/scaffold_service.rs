//! Scaffold Service - main application orchestrator.
//!
//! This service coordinates the entire scaffolding workflow:
//! 1. Preflight: VCS client present, caller-supplied flags valid
//! 2. Directory check (may cancel)
//! 3. Interactive selection and project details
//! 4. Template acquisition (rolls back on failure)
//! 5. Metadata merge (no rollback)
//!
//! It implements the driving port (incoming) and uses driven ports (outgoing).

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::{
    application::{
        ports::{Filesystem, ProgressReporter, Prompter, VersionControlClient},
        services::{
            DirectoryGuard, MetadataMerge, SelectionRequest, SelectionWizard, TemplateAcquisition,
        },
    },
    domain::{Catalog, DomainValidator as validator, ProjectMetadata, Selection},
    error::{GraftError, GraftResult},
};

/// Pipeline stage, used to tag failures and drive progress output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaffoldStage {
    Preflight,
    DirectoryCheck,
    Selection,
    Acquisition,
    MetadataMerge,
}

impl fmt::Display for ScaffoldStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Preflight => "preflight",
            Self::DirectoryCheck => "directory check",
            Self::Selection => "selection",
            Self::Acquisition => "template download",
            Self::MetadataMerge => "package.json update",
        };
        f.write_str(label)
    }
}

/// One `graft init` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldRequest {
    pub project_name: String,
    pub base_dir: PathBuf,
    pub framework: Option<String>,
    pub template: Option<String>,
    pub branch: Option<String>,
}

impl ScaffoldRequest {
    pub fn new(project_name: impl Into<String>, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            project_name: project_name.into(),
            base_dir: base_dir.into(),
            framework: None,
            template: None,
            branch: None,
        }
    }

    pub fn with_framework(mut self, framework: impl Into<String>) -> Self {
        self.framework = Some(framework.into());
        self
    }

    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }

    /// `base_dir/project_name`.
    pub fn target_dir(&self) -> PathBuf {
        self.base_dir.join(&self.project_name)
    }

    pub fn selection_request(&self) -> SelectionRequest {
        SelectionRequest {
            framework: self.framework.clone(),
            template: self.template.clone(),
            branch: self.branch.clone(),
        }
    }
}

/// What a completed scaffold produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaffoldReport {
    pub project_dir: PathBuf,
    pub selection: Selection,
    pub metadata: ProjectMetadata,
}

/// Terminal status of a scaffold that did not fail.
#[derive(Debug, Clone, PartialEq)]
pub enum ScaffoldOutcome {
    Created(ScaffoldReport),
    /// The user declined to clear a non-empty target directory.
    Cancelled { target_dir: PathBuf },
}

/// A pipeline failure and the stage it happened in.
#[derive(Debug, Clone, Error)]
#[error("{error}")]
pub struct ScaffoldFailure {
    pub stage: ScaffoldStage,
    pub error: GraftError,
}

trait AtStage<T> {
    fn at(self, stage: ScaffoldStage) -> Result<T, ScaffoldFailure>;
}

impl<T, E: Into<GraftError>> AtStage<T> for Result<T, E> {
    fn at(self, stage: ScaffoldStage) -> Result<T, ScaffoldFailure> {
        self.map_err(|e| ScaffoldFailure {
            stage,
            error: e.into(),
        })
    }
}

/// Main scaffolding service.
///
/// Owns the catalog and every adapter for the lifetime of one invocation.
pub struct ScaffoldService {
    catalog: Catalog,
    filesystem: Box<dyn Filesystem>,
    vcs: Box<dyn VersionControlClient>,
    prompter: Box<dyn Prompter>,
    reporter: Box<dyn ProgressReporter>,
}

impl ScaffoldService {
    /// Create a new scaffold service with the given adapters.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use graft_core::application::ScaffoldService;
    ///
    /// let service = ScaffoldService::new(
    ///     catalog,    // Catalog
    ///     filesystem, // impl Filesystem
    ///     vcs,        // impl VersionControlClient
    ///     prompter,   // impl Prompter
    ///     reporter,   // impl ProgressReporter
    /// );
    /// ```
    pub fn new(
        catalog: Catalog,
        filesystem: Box<dyn Filesystem>,
        vcs: Box<dyn VersionControlClient>,
        prompter: Box<dyn Prompter>,
        reporter: Box<dyn ProgressReporter>,
    ) -> Self {
        Self {
            catalog,
            filesystem,
            vcs,
            prompter,
            reporter,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Scaffold a new project.
    ///
    /// Nothing on disk is touched until preflight has passed.
    #[instrument(
        skip_all,
        fields(
            project = %request.project_name,
            base_dir = %request.base_dir.display()
        )
    )]
    pub fn scaffold(&self, request: &ScaffoldRequest) -> Result<ScaffoldOutcome, ScaffoldFailure> {
        info!("Scaffolding project");

        // 1. Preflight
        self.preflight(request).at(ScaffoldStage::Preflight)?;

        // 2. Directory check
        let target_dir = request.target_dir();
        let guard = DirectoryGuard::new(self.filesystem.as_ref(), self.prompter.as_ref());
        if !guard
            .ensure_writable(&target_dir)
            .at(ScaffoldStage::DirectoryCheck)?
        {
            info!("Scaffold cancelled");
            return Ok(ScaffoldOutcome::Cancelled { target_dir });
        }

        // 3. Selection
        let wizard = SelectionWizard::new(&self.catalog, self.prompter.as_ref());
        let selection = wizard
            .select(&request.project_name, &request.selection_request())
            .at(ScaffoldStage::Selection)?;
        let metadata = wizard.collect_metadata(&request.project_name);

        // 4. Acquisition
        let project_dir = self.run_stage(ScaffoldStage::Acquisition, || {
            self.acquire(&selection, &request.base_dir)
        })?;

        // 5. Metadata merge
        self.run_stage(ScaffoldStage::MetadataMerge, || {
            MetadataMerge::new(self.filesystem.as_ref()).merge(
                &project_dir,
                &metadata,
                &selection.ui.plugins,
            )
        })?;

        info!(dir = %project_dir.display(), "Scaffold completed successfully");
        Ok(ScaffoldOutcome::Created(ScaffoldReport {
            project_dir,
            selection,
            metadata,
        }))
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn preflight(&self, request: &ScaffoldRequest) -> GraftResult<()> {
        self.vcs.ensure_available()?;
        validator::validate_project_name(&request.project_name)?;
        validator::validate_request(
            &self.catalog,
            request.framework.as_deref(),
            request.template.as_deref(),
            request.branch.as_deref(),
        )?;
        Ok(())
    }

    fn acquire(&self, selection: &Selection, base_dir: &Path) -> GraftResult<PathBuf> {
        TemplateAcquisition::new(self.filesystem.as_ref(), self.vcs.as_ref())
            .acquire(
                self.catalog.remote_url(),
                &selection.template_subpath(),
                selection.branch(),
                &selection.project_name,
                base_dir,
            )
            .into_result()
    }

    /// Run a long stage between reporter start/finish calls.
    fn run_stage<T>(
        &self,
        stage: ScaffoldStage,
        f: impl FnOnce() -> GraftResult<T>,
    ) -> Result<T, ScaffoldFailure> {
        self.reporter.stage_started(stage);
        match f() {
            Ok(value) => {
                self.reporter.stage_succeeded(stage);
                Ok(value)
            }
            Err(e) => {
                warn!(%stage, error = %e, "Stage failed");
                self.reporter.stage_failed(stage);
                Err(e).at(stage)
            }
        }
    }
}
