//! Template tree compiled into the binary.

use gogogo_core::{
    application::{SourceError, ports::TemplateSource},
    domain::{RelativePath, TemplateEntry},
};
use rust_embed::RustEmbed;

use super::with_implied_directories;
use crate::bundled::ProjectTemplate;

/// Read-only source over the embedded project template.
///
/// Directories are not stored; they are derived from the file paths.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedSource;

impl EmbeddedSource {
    /// The Go web-app template shipped with gogogo.
    pub const fn bundled() -> Self {
        Self
    }

    pub fn len(&self) -> usize {
        ProjectTemplate::iter().count()
    }

    pub fn is_empty(&self) -> bool {
        ProjectTemplate::iter().next().is_none()
    }
}

impl TemplateSource for EmbeddedSource {
    fn entries(&self) -> Result<Vec<TemplateEntry>, SourceError> {
        let mut paths = ProjectTemplate::iter()
            .map(|path| {
                RelativePath::try_new(&*path).map_err(|e| SourceError::new(path, e.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        paths.sort();

        Ok(with_implied_directories(&paths, std::iter::empty()))
    }

    fn read(&self, path: &RelativePath) -> Result<Vec<u8>, SourceError> {
        let wanted = path.to_slash_string();
        ProjectTemplate::get(&wanted)
            .map(|file| file.data.into_owned())
            .ok_or_else(|| SourceError::new(wanted, "not embedded"))
    }
}
