pub mod common;
pub mod context;
pub mod entry;
pub mod phase;

pub use crate::domain::DomainError;
pub use common::RelativePath;
pub use context::{ModulePrefix, ProjectContext};
pub use entry::{EntryKind, RenderedFile, TemplateEntry, TemplateFile, TemplateMarker};
pub use phase::Phase;
