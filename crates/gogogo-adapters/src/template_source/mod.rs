//! Template source adapters.
//!
//! All three hand out the same shape: a flat list of directory and file
//! entries plus byte reads by relative path.

mod directory;
mod embedded;
mod memory;

pub use directory::DirectorySource;
pub use embedded::EmbeddedSource;
pub use memory::MemorySource;

use std::collections::BTreeSet;

use gogogo_core::domain::{RelativePath, TemplateEntry};

/// File entries plus a directory entry for every ancestor they imply.
fn with_implied_directories<'a>(
    files: impl IntoIterator<Item = &'a RelativePath>,
    explicit_dirs: impl IntoIterator<Item = &'a RelativePath>,
) -> Vec<TemplateEntry> {
    let mut dirs: BTreeSet<RelativePath> = explicit_dirs.into_iter().cloned().collect();
    let mut entries = Vec::new();

    for file in files {
        let mut parent = file.parent();
        while let Some(dir) = parent {
            parent = dir.parent();
            dirs.insert(dir);
        }
        entries.push(TemplateEntry::file(file.clone()));
    }

    entries.extend(dirs.into_iter().map(TemplateEntry::directory));
    entries
}
