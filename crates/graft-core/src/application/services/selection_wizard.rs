//! Selection Wizard - fills in whatever the caller did not supply.
//!
//! Prompts run in a fixed order (framework → template → UI → metadata) and
//! each one blocks until answered. Caller-supplied values are validated, never
//! re-prompted.

use tracing::{debug, instrument, warn};

use crate::{
    application::{ApplicationError, ports::Prompter},
    domain::{
        Catalog, DEFAULT_VERSION, DomainError, DomainValidator, ProjectMetadata, Selection,
        UiEntry,
    },
    error::GraftResult,
};

/// What the caller already knows before the wizard runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionRequest {
    pub framework: Option<String>,
    pub template: Option<String>,
    pub branch: Option<String>,
}

pub struct SelectionWizard<'a> {
    catalog: &'a Catalog,
    prompter: &'a dyn Prompter,
}

impl<'a> SelectionWizard<'a> {
    pub fn new(catalog: &'a Catalog, prompter: &'a dyn Prompter) -> Self {
        Self { catalog, prompter }
    }

    /// Resolve a complete [`Selection`].
    ///
    /// The UI set is always chosen interactively.
    #[instrument(skip_all, fields(project = project_name))]
    pub fn select(&self, project_name: &str, request: &SelectionRequest) -> GraftResult<Selection> {
        let framework = match &request.framework {
            Some(framework) => framework.clone(),
            None => self.prompt_framework()?,
        };
        DomainValidator::validate_framework(self.catalog, &framework)?;

        let template_name = match &request.template {
            Some(template) => template.clone(),
            None => self.prompt_template(&framework)?,
        };
        let template =
            DomainValidator::resolve_template(self.catalog, &framework, &template_name)?.clone();

        if let Some(branch) = &request.branch {
            DomainValidator::validate_branch(&template, branch)?;
        }

        let ui = self.prompt_ui()?;

        let selection = Selection {
            project_name: project_name.to_string(),
            framework,
            template,
            ui,
            branch: request.branch.clone(),
        };
        DomainValidator::validate_selection(self.catalog, &selection)?;

        debug!(selection = %selection, "Selection resolved");
        Ok(selection)
    }

    /// Ask for author, version and description.
    ///
    /// Never fails: if any prompt errors (closed stdin, Ctrl-C in a prompt)
    /// the blank fallback is returned and scaffolding carries on.
    pub fn collect_metadata(&self, project_name: &str) -> ProjectMetadata {
        match self.prompt_metadata(project_name) {
            Ok(metadata) => metadata,
            Err(e) => {
                warn!(error = %e, "Could not collect project details, using defaults");
                ProjectMetadata::fallback(project_name)
            }
        }
    }

    // -------------------------------------------------------------------------
    // Prompts
    // -------------------------------------------------------------------------

    fn prompt_framework(&self) -> GraftResult<String> {
        let choices = self.catalog.frameworks();
        if choices.is_empty() {
            return Err(DomainError::EmptyCatalog {
                catalog: "framework",
            }
            .into());
        }
        let index = self.prompter.select("Select a framework", choices)?;
        pick(choices, index).cloned()
    }

    fn prompt_template(&self, framework: &str) -> GraftResult<String> {
        let choices: Vec<String> = self
            .catalog
            .templates_for(framework)
            .into_iter()
            .map(str::to_owned)
            .collect();

        if choices.is_empty() {
            warn!(framework, "No template for framework");
            return Err(DomainError::NoTemplateForFramework {
                framework: framework.into(),
            }
            .into());
        }

        let index = self.prompter.select("Select a template", &choices)?;
        pick(&choices, index).cloned()
    }

    fn prompt_ui(&self) -> GraftResult<UiEntry> {
        let uis = self.catalog.uis();
        if uis.is_empty() {
            return Err(DomainError::EmptyCatalog { catalog: "ui" }.into());
        }

        let choices: Vec<String> = uis.iter().map(|u| u.name.clone()).collect();
        let index = self.prompter.select("Select a UI library", &choices)?;
        pick(uis, index).cloned()
    }

    fn prompt_metadata(&self, project_name: &str) -> GraftResult<ProjectMetadata> {
        let author = self.prompter.input("Author", "")?;
        let version = self.prompter.input("Version", DEFAULT_VERSION)?;
        let description = self.prompter.input("Description", "")?;

        Ok(ProjectMetadata {
            name: project_name.to_string(),
            author,
            version,
            description,
        })
    }
}

fn pick<T>(choices: &[T], index: usize) -> GraftResult<&T> {
    choices.get(index).ok_or_else(|| {
        ApplicationError::PromptFailed {
            reason: format!("choice {index} is out of range"),
        }
        .into()
    })
}
