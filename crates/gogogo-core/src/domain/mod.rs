//! Core domain layer for gogogo.
//!
//! Pure data and rules: template paths, the project context, the naming
//! rule for marked files. No filesystem, process or network access happens
//! here; those live behind the ports in `crate::application::ports`.

pub mod entities;
pub mod error;

mod validation;

pub use entities::{
    common::RelativePath,
    context::{
        DEFAULT_MODULE_PREFIX, MODULE_PATH_VARIABLE, ModulePrefix, NAME_VARIABLE, ProjectContext,
        is_identifier,
    },
    entry::{
        DEFAULT_TEMPLATE_MARKER, EntryKind, RenderedFile, TemplateEntry, TemplateFile,
        TemplateMarker,
    },
    phase::Phase,
};

pub use error::{DomainError, ErrorCategory};

pub use validation::DomainValidator;
