//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from the outside world.
//! The `gogogo-adapters` crate provides implementations.

use std::io::{self, Write};
use std::path::Path;

use crate::application::error::{RenderError, SourceError, StepError};
use crate::domain::{Phase, ProjectContext, RelativePath, TemplateEntry};

/// Port for a read-only template tree.
///
/// Implemented by:
/// - `gogogo_adapters::template_source::EmbeddedSource` (bundled templates)
/// - `gogogo_adapters::template_source::DirectorySource` (user templates on disk)
/// - `gogogo_adapters::template_source::MemorySource` (testing)
///
/// Entries may come back in any order; callers sort them.
pub trait TemplateSource: Send + Sync {
    /// Every directory and file in the tree.
    fn entries(&self) -> Result<Vec<TemplateEntry>, SourceError>;

    /// Raw bytes of one file entry.
    fn read(&self, path: &RelativePath) -> Result<Vec<u8>, SourceError>;
}

/// Port for filesystem operations on the destination.
///
/// Implemented by:
/// - `gogogo_adapters::filesystem::LocalFilesystem` (production)
/// - `gogogo_adapters::filesystem::MemoryFilesystem` (testing)
///
/// Errors are plain `io::Error`; the caller attaches the path and meaning.
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories. Existing is fine.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Create or truncate a file and write `content` to it.
    fn write_file(&self, path: &Path, content: &[u8]) -> io::Result<()>;

    /// Create or truncate a file and return a writer for streaming into it.
    fn create_file(&self, path: &Path) -> io::Result<Box<dyn Write + Send>>;

    /// Mark a file executable (no-op where the platform has no such bit).
    fn set_executable(&self, path: &Path) -> io::Result<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Remove a single file.
    fn remove_file(&self, path: &Path) -> io::Result<()>;
}

/// Port for the variable-substitution phase of rendering.
///
/// Implemented by `gogogo_adapters::renderer::PlaceholderRenderer`.
pub trait ContentRenderer: Send + Sync {
    /// Substitute placeholders in `content`.
    ///
    /// `name` is only used to label parse errors.
    fn render(
        &self,
        name: &str,
        content: &[u8],
        context: &ProjectContext,
    ) -> Result<Vec<u8>, RenderError>;
}

/// One post-materialization action.
///
/// Implemented by `gogogo_adapters::steps::CommandStep` and
/// `gogogo_adapters::steps::DownloadStep`.
#[cfg_attr(test, mockall::automock)]
pub trait Step: Send + Sync {
    /// Label used in logs and errors.
    fn name(&self) -> &str;

    /// Pipeline phase this step represents.
    fn phase(&self) -> Phase;

    /// Run to completion inside `workdir`.
    fn run(&self, workdir: &Path, context: &ProjectContext) -> Result<(), StepError>;
}

/// Progress notifications for a generation run.
///
/// Every method has a no-op default so observers only implement what they
/// display.
pub trait PhaseObserver {
    /// `phase` is about to start.
    fn entered(&self, _phase: Phase) {}

    /// `phase` ended the run with an error.
    fn failed(&self, _phase: Phase) {}
}

/// Observer that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl PhaseObserver for NoopObserver {}
