//! In-memory template source, mostly for tests.

use std::collections::{BTreeMap, BTreeSet};

use gogogo_core::{
    application::{SourceError, ports::TemplateSource},
    domain::{DomainError, RelativePath, TemplateEntry},
};

use super::with_implied_directories;

/// Template tree held in memory.
///
/// Parent directories of every file are reported as directory entries even
/// when they were not added explicitly.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    files: BTreeMap<RelativePath, Vec<u8>>,
    directories: BTreeSet<RelativePath>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file. A later file at the same path replaces the earlier one.
    pub fn with_file(
        mut self,
        path: &str,
        content: impl Into<Vec<u8>>,
    ) -> Result<Self, DomainError> {
        self.files.insert(RelativePath::try_new(path)?, content.into());
        Ok(self)
    }

    /// Add a directory, which may stay empty.
    pub fn with_directory(mut self, path: &str) -> Result<Self, DomainError> {
        self.directories.insert(RelativePath::try_new(path)?);
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl TemplateSource for MemorySource {
    fn entries(&self) -> Result<Vec<TemplateEntry>, SourceError> {
        Ok(with_implied_directories(
            self.files.keys(),
            self.directories.iter(),
        ))
    }

    fn read(&self, path: &RelativePath) -> Result<Vec<u8>, SourceError> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| SourceError::new(path.to_slash_string(), "no such file"))
    }
}
