//! Application layer errors.
//!
//! These errors represent failures while materializing a template tree or
//! running the external step pipeline. Rule violations in the domain layer
//! are `DomainError` from `crate::domain`.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::domain::{DomainError, RelativePath};
use crate::error::ErrorCategory;

/// Failure while substituting variables into one file.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RenderError {
    /// The placeholder syntax could not be parsed.
    #[error("Template parse error in {path}: {cause}")]
    ParseError { path: String, cause: String },

    /// A placeholder names a variable the context does not define.
    #[error("Undefined variable '{name}'")]
    UndefinedVariable { name: String },
}

/// Failure reading from a template source.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("Cannot read template entry '{path}': {reason}")]
pub struct SourceError {
    pub path: String,
    pub reason: String,
}

impl SourceError {
    pub fn new(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Errors raised by the tree materializer.
///
/// Every variant names the path that produced it.
#[derive(Debug, Error)]
pub enum MaterializationError {
    /// A destination directory could not be created.
    #[error("Failed to create directory {path}: {cause}")]
    DirectoryCreation {
        path: PathBuf,
        #[source]
        cause: io::Error,
    },

    /// The template source could not be enumerated or read.
    #[error(transparent)]
    TemplateRead(#[from] SourceError),

    /// A file could not be rendered.
    #[error("Failed to render {path}: {source}")]
    Render {
        path: RelativePath,
        #[source]
        source: RenderError,
    },

    /// A rendered file could not be written.
    #[error("Failed to write {path}: {cause}")]
    FileWrite {
        path: PathBuf,
        #[source]
        cause: io::Error,
    },

    /// The template tree violates a domain rule (e.g. path collision).
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl MaterializationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::DirectoryCreation { path, .. } => vec![
                format!("Could not create: {}", path.display()),
                "Check that you have write permissions".into(),
                "Make sure the project name is a valid directory name".into(),
            ],
            Self::FileWrite { path, .. } => vec![
                format!("Could not write: {}", path.display()),
                "Check available disk space and permissions".into(),
                "Files written before this one were left in place".into(),
            ],
            Self::Render {
                source: RenderError::UndefinedVariable { name },
                ..
            } => vec![
                format!("The template uses '{{{{.{}}}}}' but no such variable is set", name),
                format!("Pass it with --var {}=VALUE", name),
            ],
            Self::Render { path, .. } => vec![
                format!("Fix the placeholder syntax in '{}'", path),
                "Placeholders look like {{.Name}} or {{.ModulePath}}".into(),
            ],
            Self::TemplateRead(e) => vec![
                format!("Template source problem at '{}'", e.path),
                "Check --templates or generator.templates_dir".into(),
            ],
            Self::Domain(e) => e.suggestions(),
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::DirectoryCreation { .. } | Self::FileWrite { .. } => ErrorCategory::Filesystem,
            Self::TemplateRead(_) | Self::Render { .. } | Self::Domain(_) => {
                ErrorCategory::Template
            }
        }
    }
}

/// Errors raised by post-materialization steps.
///
/// Every variant names the step that produced it.
#[derive(Debug, Error)]
pub enum StepError {
    /// The command ran but exited unsuccessfully.
    #[error("Step '{step}' failed ({exit_info})")]
    CommandFailed {
        step: String,
        exit_info: String,
        output: String,
    },

    /// The command could not be started at all.
    #[error("Step '{step}' could not start '{program}': {source}")]
    Launch {
        step: String,
        program: String,
        #[source]
        source: io::Error,
    },

    /// The request never produced a response (DNS, TLS, timeout, ...).
    #[error("Step '{step}' network error: {reason}")]
    Network { step: String, reason: String },

    /// The server answered with a non-2xx status.
    #[error("Step '{step}' got HTTP {code}")]
    HttpStatus { step: String, code: u16, body: String },

    /// Local I/O failed while the step was writing its output.
    #[error("Step '{step}' failed to write {path}: {source}")]
    Io {
        step: String,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// No download is published for this OS/architecture pair.
    #[error("Step '{step}' has no asset for {os}/{arch}")]
    UnsupportedPlatform {
        step: String,
        os: String,
        arch: String,
    },
}

impl StepError {
    /// Name of the step that failed.
    pub fn step(&self) -> &str {
        match self {
            Self::CommandFailed { step, .. }
            | Self::Launch { step, .. }
            | Self::Network { step, .. }
            | Self::HttpStatus { step, .. }
            | Self::Io { step, .. }
            | Self::UnsupportedPlatform { step, .. } => step,
        }
    }

    /// Captured diagnostic text, if the step produced any.
    pub fn details(&self) -> Option<&str> {
        match self {
            Self::CommandFailed { output, .. } => Some(output.as_str()),
            Self::HttpStatus { body, .. } => Some(body.as_str()),
            _ => None,
        }
        .filter(|s| !s.trim().is_empty())
    }

    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Launch { program, .. } => vec![
                format!("Ensure '{}' is installed and in your PATH", program),
                "The project files were generated; rerun the remaining steps by hand".into(),
            ],
            Self::CommandFailed { step, .. } => vec![
                format!("'{}' exited with an error; see its output above", step),
                "Later steps were not run".into(),
            ],
            Self::Network { .. } | Self::HttpStatus { .. } => vec![
                "Check your network connection".into(),
                "Use --skip-download to generate the project without the asset".into(),
            ],
            Self::UnsupportedPlatform { .. } => vec![
                "Use --skip-download and install the asset manually".into(),
            ],
            Self::Io { path, .. } => vec![
                format!("Could not write: {}", path.display()),
                "Check available disk space and permissions".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Network { .. } | Self::HttpStatus { .. } => ErrorCategory::Network,
            Self::Io { .. } => ErrorCategory::Filesystem,
            Self::CommandFailed { .. } | Self::Launch { .. } | Self::UnsupportedPlatform { .. } => {
                ErrorCategory::ExternalTool
            }
        }
    }
}
