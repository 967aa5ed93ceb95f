//! Unified error handling for gogogo core.
//!
//! Wraps domain, materialization and step errors in one type so the CLI can
//! categorize and explain any failure the same way.

use thiserror::Error;

use crate::application::{MaterializationError, StepError};
use crate::domain::DomainError;

/// Root error type for a generation run.
#[derive(Debug, Error)]
pub enum GogogoError {
    /// Errors from the domain layer (rule violations).
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// The template tree could not be written.
    #[error(transparent)]
    Materialization(#[from] MaterializationError),

    /// A post-materialization step failed.
    #[error(transparent)]
    Step(#[from] StepError),
}

impl GogogoError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Materialization(e) => e.suggestions(),
            Self::Step(e) => e.suggestions(),
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => e.category().into(),
            Self::Materialization(e) => e.category(),
            Self::Step(e) => e.category(),
        }
    }

    /// Diagnostic output captured from a failed step, if any.
    pub fn details(&self) -> Option<&str> {
        match self {
            Self::Step(e) => e.details(),
            _ => None,
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Template,
    Filesystem,
    Network,
    ExternalTool,
}

impl From<crate::domain::ErrorCategory> for ErrorCategory {
    fn from(category: crate::domain::ErrorCategory) -> Self {
        match category {
            crate::domain::ErrorCategory::Validation => Self::Validation,
            crate::domain::ErrorCategory::Template => Self::Template,
        }
    }
}

/// Convenient result type alias.
pub type GogogoResult<T> = Result<T, GogogoError>;
