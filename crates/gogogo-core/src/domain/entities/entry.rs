//! Template tree entries and the values derived from them.

use std::fmt;

use crate::domain::entities::common::RelativePath;

/// Default suffix that marks a file as "strip me from the destination name".
pub const DEFAULT_TEMPLATE_MARKER: &str = ".tmpl";

/// Whether an entry is a directory or a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
}

/// One node of a template tree, as enumerated by a template source.
///
/// Content is not carried here; sources hand out bytes on demand so a large
/// tree can be listed without reading everything up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateEntry {
    pub path: RelativePath,
    pub kind: EntryKind,
}

impl TemplateEntry {
    pub fn directory(path: RelativePath) -> Self {
        Self {
            path,
            kind: EntryKind::Directory,
        }
    }

    pub fn file(path: RelativePath) -> Self {
        Self {
            path,
            kind: EntryKind::File,
        }
    }

    pub fn is_directory(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

/// A file entry together with its raw bytes (possibly empty).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFile {
    pub path: RelativePath,
    pub content: Vec<u8>,
}

impl TemplateFile {
    pub fn new(path: RelativePath, content: impl Into<Vec<u8>>) -> Self {
        Self {
            path,
            content: content.into(),
        }
    }
}

/// Output of rendering one file: where it goes and what it contains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    pub destination: RelativePath,
    pub bytes: Vec<u8>,
}

/// File-name suffix that is removed from the destination path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateMarker(String);

impl TemplateMarker {
    pub fn new(suffix: impl Into<String>) -> Self {
        Self(suffix.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Destination path for a source file.
    ///
    /// The suffix is only stripped when a non-empty file name remains, so a
    /// file literally named `.tmpl` keeps its name.
    pub fn destination_for(&self, source: &RelativePath) -> RelativePath {
        let stripped = source
            .file_name()
            .and_then(|name| name.strip_suffix(self.0.as_str()))
            .filter(|stem| !stem.is_empty());

        match stripped {
            Some(stem) => source.with_file_name(stem).unwrap_or_else(|_| source.clone()),
            None => source.clone(),
        }
    }
}

impl Default for TemplateMarker {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPLATE_MARKER)
    }
}

impl fmt::Display for TemplateMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
