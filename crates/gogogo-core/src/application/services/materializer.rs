//! Writes a template tree under a destination root.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::application::error::MaterializationError;
use crate::application::ports::{Filesystem, TemplateSource};
use crate::application::services::file_renderer::FileRenderer;
use crate::domain::{DomainValidator, EntryKind, ProjectContext, TemplateFile};

/// What a materialization wrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaterializationReport {
    pub directories_created: usize,
    pub files_written: usize,
}

/// Walks a `TemplateSource` and writes the rendered tree.
///
/// Entries are visited in component-wise path order, so every directory is
/// created before anything nested under it. The first failure stops the
/// walk; whatever was written before it stays on disk.
pub struct TreeMaterializer {
    filesystem: Arc<dyn Filesystem>,
    renderer: FileRenderer,
}

impl TreeMaterializer {
    pub fn new(filesystem: Arc<dyn Filesystem>, renderer: FileRenderer) -> Self {
        Self {
            filesystem,
            renderer,
        }
    }

    pub fn renderer(&self) -> &FileRenderer {
        &self.renderer
    }

    /// Materialize `source` under `root`.
    ///
    /// # Errors
    /// - `Domain(PathCollision)` before anything is written
    /// - `TemplateRead` if the source cannot be listed or read
    /// - `Render`, `DirectoryCreation`, `FileWrite` for the entry that failed
    #[instrument(skip_all, fields(root = %root.display(), project = %context.name()))]
    pub fn materialize(
        &self,
        source: &dyn TemplateSource,
        root: &Path,
        context: &ProjectContext,
    ) -> Result<MaterializationReport, MaterializationError> {
        let mut entries = source.entries()?;
        entries.sort_by(|a, b| a.path.cmp(&b.path));

        DomainValidator::validate_destinations(&entries, self.renderer.marker())?;

        let mut report = MaterializationReport::default();

        for entry in &entries {
            match entry.kind {
                EntryKind::Directory => {
                    self.create_dir(&root.join(entry.path.as_path()))?;
                    report.directories_created += 1;
                }
                EntryKind::File => {
                    let content = source.read(&entry.path)?;
                    let file = TemplateFile::new(entry.path.clone(), content);

                    let rendered = self.renderer.render(&file, context).map_err(|source| {
                        MaterializationError::Render {
                            path: entry.path.clone(),
                            source,
                        }
                    })?;

                    let destination = root.join(rendered.destination.as_path());
                    if let Some(parent) = destination.parent() {
                        self.create_dir(parent)?;
                    }

                    self.filesystem
                        .write_file(&destination, &rendered.bytes)
                        .map_err(|cause| MaterializationError::FileWrite {
                            path: destination.clone(),
                            cause,
                        })?;

                    debug!(
                        source = %entry.path,
                        destination = %destination.display(),
                        "Wrote file"
                    );
                    report.files_written += 1;
                }
            }
        }

        info!(
            directories = report.directories_created,
            files = report.files_written,
            "Template tree materialized"
        );
        Ok(report)
    }

    fn create_dir(&self, path: &Path) -> Result<(), MaterializationError> {
        self.filesystem
            .create_dir_all(path)
            .map_err(|cause| MaterializationError::DirectoryCreation {
                path: path.to_path_buf(),
                cause,
            })
    }
}
