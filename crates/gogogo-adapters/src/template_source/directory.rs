//! Template tree read from a directory on disk.

use std::path::{Path, PathBuf};

use gogogo_core::{
    application::{SourceError, ports::TemplateSource},
    domain::{RelativePath, TemplateEntry},
};
use tracing::{debug, instrument};
use walkdir::WalkDir;

/// Source rooted at a user-supplied directory.
///
/// Symlinks are followed. Anything that is neither a file nor a directory
/// is skipped.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    /// Open `root`, failing early if it is not a directory.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, SourceError> {
        let root = root.into();
        if !root.is_dir() {
            return Err(SourceError::new(
                root.display().to_string(),
                "template directory does not exist",
            ));
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl TemplateSource for DirectorySource {
    #[instrument(skip(self), fields(root = %self.root.display()))]
    fn entries(&self) -> Result<Vec<TemplateEntry>, SourceError> {
        let mut entries = Vec::new();

        for walk_entry in WalkDir::new(&self.root).min_depth(1).follow_links(true) {
            let walk_entry = walk_entry.map_err(|e| {
                let path = e
                    .path()
                    .unwrap_or(&self.root)
                    .display()
                    .to_string();
                SourceError::new(path, format!("directory walk error: {e}"))
            })?;

            let abs_path = walk_entry.path();
            let rel_raw = abs_path.strip_prefix(&self.root).map_err(|_| {
                SourceError::new(
                    abs_path.display().to_string(),
                    format!("not under '{}'", self.root.display()),
                )
            })?;
            let path = RelativePath::try_new(rel_raw)
                .map_err(|e| SourceError::new(rel_raw.display().to_string(), e.to_string()))?;

            let file_type = walk_entry.file_type();
            if file_type.is_dir() {
                entries.push(TemplateEntry::directory(path));
            } else if file_type.is_file() {
                entries.push(TemplateEntry::file(path));
            } else {
                debug!(path = %abs_path.display(), "Skipping special file");
            }
        }

        debug!(count = entries.len(), "Walked template directory");
        Ok(entries)
    }

    fn read(&self, path: &RelativePath) -> Result<Vec<u8>, SourceError> {
        std::fs::read(self.root.join(path.as_path()))
            .map_err(|e| SourceError::new(path.to_slash_string(), e.to_string()))
    }
}
