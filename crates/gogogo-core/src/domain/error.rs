use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Path Errors
    // ========================================================================
    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    #[error("Invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("Template entries '{first}' and '{second}' both map to '{destination}'")]
    PathCollision {
        destination: String,
        first: String,
        second: String,
    },

    // ========================================================================
    // Context Errors
    // ========================================================================
    #[error("Invalid variable name '{name}'")]
    InvalidVariableName { name: String },

    #[error("Variable '{name}' is built in and cannot be overridden")]
    ReservedVariable { name: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::PathCollision { first, second, .. } => vec![
                format!("Rename either '{}' or '{}'", first, second),
                "A '.tmpl' file and a plain file with the same stem cannot coexist".into(),
            ],
            Self::InvalidVariableName { name } => vec![
                format!("'{}' is not a valid identifier", name),
                "Use letters, digits and underscores, starting with a letter".into(),
                "Example: --var Author=jane".into(),
            ],
            Self::ReservedVariable { name } => vec![
                format!("'{}' is computed from the project name", name),
                "Use --module-prefix to change the module path".into(),
            ],
            _ => vec!["Check the template tree for malformed paths".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidVariableName { .. } | Self::ReservedVariable { .. } => {
                ErrorCategory::Validation
            }
            Self::PathCollision { .. }
            | Self::AbsolutePathNotAllowed { .. }
            | Self::InvalidPath { .. } => ErrorCategory::Template,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Template,
}
