//! Implementation of the `graft list` command.

use serde::Serialize;

use graft_adapters::load_catalog;
use graft_core::domain::{Catalog, TemplateEntry, UiEntry};

use crate::{
    cli::{ListArgs, ListFormat},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Serialisable view of the whole catalog.
#[derive(Debug, Serialize)]
struct CatalogView<'a> {
    remote_url: &'a str,
    frameworks: &'a [String],
    templates: &'a [TemplateEntry],
    uis: &'a [UiEntry],
}

impl<'a> From<&'a Catalog> for CatalogView<'a> {
    fn from(catalog: &'a Catalog) -> Self {
        Self {
            remote_url: catalog.remote_url(),
            frameworks: catalog.frameworks(),
            templates: catalog.templates(),
            uis: catalog.uis(),
        }
    }
}

pub fn execute(args: ListArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let catalog = load_catalog(config.catalog_path(), config.catalog.remote_url.as_deref())?;

    match args.format {
        ListFormat::Table => print_table(&catalog, &output)?,

        ListFormat::List => {
            for template in catalog.templates() {
                output.print(&template.name)?;
            }
        }

        ListFormat::Json => {
            // Bypasses OutputManager so JSON stays parseable with --quiet.
            let json = serde_json::to_string_pretty(&CatalogView::from(&catalog)).map_err(|e| {
                CliError::ConfigError {
                    message: format!("Failed to serialise catalog: {e}"),
                    source: Some(Box::new(e)),
                }
            })?;
            println!("{json}");
        }
    }

    Ok(())
}

fn print_table(catalog: &Catalog, output: &OutputManager) -> CliResult<()> {
    output.header("Frameworks:")?;
    for framework in catalog.frameworks() {
        let templates = catalog.templates_for(framework);
        let templates = if templates.is_empty() {
            "(no templates)".to_string()
        } else {
            templates.join(", ")
        };
        output.print(&format!("  {framework:<12} {templates}"))?;
    }

    output.print("")?;
    output.header("Templates:")?;
    for template in catalog.templates() {
        output.print(&format!(
            "  {:<16} {:<10} {}",
            template.name,
            template.framework,
            tags(template)
        ))?;
    }

    output.print("")?;
    output.header("UI libraries:")?;
    for ui in catalog.uis() {
        output.print(&format!("  {:<12} {}", ui.name, plugins(ui)))?;
    }

    output.print("")?;
    output.info(&format!("Templates are pulled from {}", catalog.remote_url()))?;
    Ok(())
}

fn tags(template: &TemplateEntry) -> String {
    if template.tags.is_empty() {
        "main".to_string()
    } else {
        template.tags.join(", ")
    }
}

fn plugins(ui: &UiEntry) -> String {
    ui.plugins
        .iter()
        .map(|p| format!("{}@{}", p.name, p.resolved_version()))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use graft_core::domain::UiPlugin;

    #[test]
    fn untagged_template_lists_default_branch() {
        assert_eq!(tags(&TemplateEntry::new("basic", "react")), "main");
        assert_eq!(
            tags(&TemplateEntry::new("basic", "react").with_tags(["main", "v2"])),
            "main, v2"
        );
    }

    #[test]
    fn plugins_show_resolved_versions() {
        let ui = UiEntry::new("mui")
            .with_plugin(UiPlugin::pinned("@mui/material", "^5.15.0"))
            .with_plugin(UiPlugin::new("@emotion/react"));
        assert_eq!(
            plugins(&ui),
            "@mui/material@^5.15.0, @emotion/react@latest"
        );
    }

    #[test]
    fn json_view_uses_catalog_field_names() {
        let catalog = Catalog::new(
            "https://example.com/t.git",
            vec!["react".into()],
            vec![TemplateEntry::new("basic", "react")],
            vec![UiEntry::new("none")],
        )
        .unwrap();

        let value = serde_json::to_value(CatalogView::from(&catalog)).unwrap();
        assert_eq!(value["remote_url"], "https://example.com/t.git");
        assert_eq!(value["templates"][0]["type"], "react");
        assert_eq!(value["uis"][0]["name"], "none");
    }
}
