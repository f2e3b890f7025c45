//! The acquired project's `package.json`, as an order-preserving JSON object.

use serde::Serialize;
use serde_json::{Map, Value};

use super::catalog::UiPlugin;
use super::selection::ProjectMetadata;
use crate::domain::error::DomainError;

/// File name of the package descriptor inside a project root.
pub const DESCRIPTOR_FILE: &str = "package.json";

const DEPENDENCIES: &str = "dependencies";
const INDENT: &[u8] = b"    ";

/// In-memory package descriptor.
///
/// Keys keep the order they were read in; keys added later are appended.
#[derive(Debug, Clone, PartialEq)]
pub struct PackageDescriptor {
    fields: Map<String, Value>,
}

impl PackageDescriptor {
    /// Parse a descriptor. The top level must be a JSON object.
    pub fn parse(source: &str) -> Result<Self, DomainError> {
        match serde_json::from_str::<Value>(source) {
            Ok(Value::Object(fields)) => Ok(Self { fields }),
            Ok(_) => Err(DomainError::InvalidDescriptor(
                "top level is not a JSON object".into(),
            )),
            Err(e) => Err(DomainError::InvalidDescriptor(e.to_string())),
        }
    }

    /// Pin each plugin in `dependencies`, replacing any existing pin.
    ///
    /// The `dependencies` object is created when the template has none.
    pub fn add_dependencies(&mut self, plugins: &[UiPlugin]) -> Result<(), DomainError> {
        if plugins.is_empty() {
            return Ok(());
        }

        let deps = self
            .fields
            .entry(DEPENDENCIES)
            .or_insert_with(|| Value::Object(Map::new()));

        let Value::Object(deps) = deps else {
            return Err(DomainError::InvalidDescriptor(
                "`dependencies` is not an object".into(),
            ));
        };

        for plugin in plugins {
            deps.insert(
                plugin.name.clone(),
                Value::String(plugin.resolved_version().to_string()),
            );
        }
        Ok(())
    }

    /// Shallow field-level override with the user's metadata.
    pub fn apply_metadata(&mut self, metadata: &ProjectMetadata) {
        for (key, value) in metadata.fields() {
            self.fields
                .insert(key.to_string(), Value::String(value.to_string()));
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// The pinned version of a dependency, if it is pinned to a string.
    pub fn dependency(&self, name: &str) -> Option<&str> {
        self.fields.get(DEPENDENCIES)?.get(name)?.as_str()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Render with four-space indentation and a trailing newline.
    pub fn to_pretty_string(&self) -> Result<String, DomainError> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(INDENT);
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.fields
            .serialize(&mut ser)
            .map_err(|e| DomainError::InvalidDescriptor(e.to_string()))?;
        buf.push(b'\n');
        String::from_utf8(buf).map_err(|e| DomainError::InvalidDescriptor(e.to_string()))
    }
}
