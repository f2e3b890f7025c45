//! Metadata Merge - personalise the acquired `package.json`.

use std::path::Path;

use tracing::{debug, instrument};

use crate::{
    application::{ApplicationError, ports::Filesystem},
    domain::{DESCRIPTOR_FILE, PackageDescriptor, ProjectMetadata, UiPlugin},
    error::GraftResult,
};

pub struct MetadataMerge<'a> {
    filesystem: &'a dyn Filesystem,
}

impl<'a> MetadataMerge<'a> {
    pub fn new(filesystem: &'a dyn Filesystem) -> Self {
        Self { filesystem }
    }

    /// Pin the UI plugins as dependencies, then overwrite `name`, `author`,
    /// `version` and `description`. Every other key survives in its original
    /// order.
    ///
    /// A failure here leaves the project directory in place.
    #[instrument(skip_all, fields(dir = %project_dir.display()))]
    pub fn merge(
        &self,
        project_dir: &Path,
        metadata: &ProjectMetadata,
        plugins: &[UiPlugin],
    ) -> GraftResult<()> {
        let path = project_dir.join(DESCRIPTOR_FILE);

        let source =
            self.filesystem
                .read_to_string(&path)
                .map_err(|e| ApplicationError::DescriptorRead {
                    path: path.clone(),
                    reason: e.to_string(),
                })?;

        let read_error = |e: crate::domain::DomainError| ApplicationError::DescriptorRead {
            path: path.clone(),
            reason: e.to_string(),
        };
        let mut descriptor = PackageDescriptor::parse(&source).map_err(read_error)?;
        descriptor.add_dependencies(plugins).map_err(read_error)?;
        descriptor.apply_metadata(metadata);

        let rendered =
            descriptor
                .to_pretty_string()
                .map_err(|e| ApplicationError::DescriptorWrite {
                    path: path.clone(),
                    reason: e.to_string(),
                })?;

        self.filesystem
            .write_file(&path, &rendered)
            .map_err(|e| ApplicationError::DescriptorWrite {
                path: path.clone(),
                reason: e.to_string(),
            })?;

        debug!(plugins = plugins.len(), "Descriptor updated");
        Ok(())
    }
}
