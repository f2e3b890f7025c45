//! The catalog that ships with Graft.
//!
//! Used whenever no `catalog.path` is configured. Every template is published
//! in the remote once per UI set, as `{template}-{ui}`.

use graft_core::domain::{Catalog, DomainError, TemplateEntry, UiEntry, UiPlugin};

/// Default template repository.
pub const DEFAULT_REMOTE_URL: &str = "https://github.com/graft-templates/templates.git";

/// Build the built-in catalog.
pub fn builtin_catalog() -> Result<Catalog, DomainError> {
    Catalog::new(
        DEFAULT_REMOTE_URL,
        vec!["vue".into(), "react".into()],
        templates(),
        uis(),
    )
}

fn templates() -> Vec<TemplateEntry> {
    vec![
        TemplateEntry::new("basic", "react").with_tags(["main", "v2"]),
        TemplateEntry::new("admin", "react").with_tags(["main"]),
        TemplateEntry::new("vue-basic", "vue").with_tags(["main"]),
        TemplateEntry::new("vue-admin", "vue").with_tags(["main"]),
    ]
}

fn uis() -> Vec<UiEntry> {
    vec![
        UiEntry::new("none"),
        UiEntry::new("antd")
            .with_plugin(UiPlugin::pinned("antd", "^5.12.0"))
            .with_plugin(UiPlugin::pinned("@ant-design/icons", "^5.2.6")),
        UiEntry::new("mui")
            .with_plugin(UiPlugin::pinned("@mui/material", "^5.15.0"))
            .with_plugin(UiPlugin::new("@emotion/react"))
            .with_plugin(UiPlugin::new("@emotion/styled")),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_is_valid() {
        let catalog = builtin_catalog().unwrap();
        assert_eq!(catalog.frameworks(), ["vue", "react"]);
        assert_eq!(catalog.remote_url(), DEFAULT_REMOTE_URL);
    }

    #[test]
    fn every_framework_has_a_template() {
        let catalog = builtin_catalog().unwrap();
        for framework in catalog.frameworks() {
            assert!(
                !catalog.templates_for(framework).is_empty(),
                "{framework} has no template"
            );
        }
    }

    #[test]
    fn unpinned_plugins_resolve_to_latest() {
        let catalog = builtin_catalog().unwrap();
        let mui = catalog.find_ui("mui").unwrap();
        let emotion = mui
            .plugins
            .iter()
            .find(|p| p.name == "@emotion/react")
            .unwrap();
        assert_eq!(emotion.resolved_version(), "latest");
    }
}
