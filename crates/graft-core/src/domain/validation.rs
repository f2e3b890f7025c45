use crate::domain::{
    entities::{Catalog, Selection, TemplateEntry},
    error::DomainError,
};

/// Centralized domain validation.
///
/// All selection rules live here, not scattered across the wizard and the
/// orchestrator.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_project_name(name: &str) -> Result<(), DomainError> {
        let reason = if name.is_empty() {
            "name cannot be empty"
        } else if name.starts_with('.') {
            "name cannot start with '.'"
        } else if name.contains('/') || name.contains('\\') {
            "name cannot contain path separators"
        } else {
            return Ok(());
        };

        Err(DomainError::InvalidProjectName {
            name: name.into(),
            reason: reason.into(),
        })
    }

    pub fn validate_framework(catalog: &Catalog, framework: &str) -> Result<(), DomainError> {
        if catalog.validate_framework(framework) {
            Ok(())
        } else {
            Err(DomainError::UnsupportedFramework {
                framework: framework.into(),
                available: catalog.frameworks().to_vec(),
            })
        }
    }

    /// Look up a template and check it belongs to `framework`.
    pub fn resolve_template<'c>(
        catalog: &'c Catalog,
        framework: &str,
        name: &str,
    ) -> Result<&'c TemplateEntry, DomainError> {
        let template =
            catalog
                .find_template(name)
                .ok_or_else(|| DomainError::UnsupportedTemplate {
                    template: name.into(),
                })?;

        if template.framework != framework {
            return Err(DomainError::TemplateFrameworkMismatch {
                template: name.into(),
                framework: framework.into(),
                actual: template.framework.clone(),
            });
        }
        Ok(template)
    }

    pub fn validate_branch(template: &TemplateEntry, branch: &str) -> Result<(), DomainError> {
        if template.has_tag(branch) {
            Ok(())
        } else {
            Err(DomainError::UnsupportedBranch {
                template: template.name.clone(),
                branch: branch.into(),
                available: template.tags.clone(),
            })
        }
    }

    /// Check whatever the caller supplied up front, before anything touches disk.
    ///
    /// Fields left as `None` are chosen interactively later and are always
    /// drawn from the catalog.
    pub fn validate_request(
        catalog: &Catalog,
        framework: Option<&str>,
        template: Option<&str>,
        branch: Option<&str>,
    ) -> Result<(), DomainError> {
        if let Some(framework) = framework {
            Self::validate_framework(catalog, framework)?;
        }

        let resolved = match (framework, template) {
            (Some(framework), Some(template)) => {
                Some(Self::resolve_template(catalog, framework, template)?)
            }
            (None, Some(template)) => Some(catalog.find_template(template).ok_or_else(|| {
                DomainError::UnsupportedTemplate {
                    template: template.into(),
                }
            })?),
            (Some(framework), None) => {
                if catalog.templates_for(framework).is_empty() {
                    return Err(DomainError::NoTemplateForFramework {
                        framework: framework.into(),
                    });
                }
                None
            }
            (None, None) => None,
        };

        if let (Some(template), Some(branch)) = (resolved, branch) {
            Self::validate_branch(template, branch)?;
        }
        Ok(())
    }

    pub fn validate_selection(catalog: &Catalog, selection: &Selection) -> Result<(), DomainError> {
        Self::validate_project_name(&selection.project_name)?;
        Self::validate_framework(catalog, &selection.framework)?;
        Self::resolve_template(catalog, &selection.framework, &selection.template.name)?;
        if let Some(branch) = &selection.branch {
            Self::validate_branch(&selection.template, branch)?;
        }
        if catalog.find_ui(&selection.ui.name).is_none() {
            return Err(DomainError::UnsupportedUi {
                ui: selection.ui.name.clone(),
            });
        }
        Ok(())
    }
}
