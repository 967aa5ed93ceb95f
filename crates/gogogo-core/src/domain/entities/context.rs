//! Substitution variables for one generation run.
//!
//! ## Built-in Variables
//!
//! | Variable     | Example                        | Source               |
//! |--------------|--------------------------------|----------------------|
//! | `Name`       | "demo"                         | User input, verbatim |
//! | `ModulePath` | "github.com/brainmaniac/demo"  | Prefix + name        |
//!
//! Anything else comes from `extra` (`--var KEY=VALUE` on the command line).

use std::collections::BTreeMap;
use std::fmt;

use crate::domain::error::DomainError;

pub const NAME_VARIABLE: &str = "Name";
pub const MODULE_PATH_VARIABLE: &str = "ModulePath";

/// Namespace owner used when none is configured.
pub const DEFAULT_MODULE_PREFIX: &str = "github.com/brainmaniac";

/// Namespace prefix that `modulePath` is derived from.
///
/// Trailing slashes are trimmed so `github.com/me/` and `github.com/me`
/// produce the same module path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModulePrefix(String);

impl ModulePrefix {
    pub fn new(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        Self(prefix.trim_end_matches('/').to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `prefix/name`, or just `name` when the prefix is empty.
    pub fn module_path_for(&self, name: &str) -> String {
        if self.0.is_empty() {
            name.to_string()
        } else {
            format!("{}/{}", self.0, name)
        }
    }
}

impl Default for ModulePrefix {
    fn default() -> Self {
        Self::new(DEFAULT_MODULE_PREFIX)
    }
}

impl fmt::Display for ModulePrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Read-only variable set for one run.
///
/// Built once by the orchestrator and never mutated afterwards; `with_variable`
/// consumes and returns a new value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectContext {
    name: String,
    module_path: String,
    extra: BTreeMap<String, String>,
}

impl ProjectContext {
    /// Build the context for `raw_name`. The name is used verbatim.
    pub fn build(raw_name: &str, prefix: &ModulePrefix) -> Self {
        Self {
            name: raw_name.to_string(),
            module_path: prefix.module_path_for(raw_name),
            extra: BTreeMap::new(),
        }
    }

    /// Add an extra named value.
    ///
    /// # Errors
    /// - `InvalidVariableName` if `key` is not an identifier
    /// - `ReservedVariable` if `key` shadows a built-in
    pub fn with_variable(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let key = key.into();
        if !is_identifier(&key) {
            return Err(DomainError::InvalidVariableName { name: key });
        }
        if key == NAME_VARIABLE || key == MODULE_PATH_VARIABLE {
            return Err(DomainError::ReservedVariable { name: key });
        }
        self.extra.insert(key, value.into());
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn module_path(&self) -> &str {
        &self.module_path
    }

    pub fn extra(&self) -> &BTreeMap<String, String> {
        &self.extra
    }

    /// Resolve a variable by name.
    pub fn lookup(&self, variable: &str) -> Option<&str> {
        match variable {
            NAME_VARIABLE => Some(&self.name),
            MODULE_PATH_VARIABLE => Some(&self.module_path),
            other => self.extra.get(other).map(String::as_str),
        }
    }
}

/// `[A-Za-z_][A-Za-z0-9_]*`
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
