//! Application ports (traits) for external dependencies.
//!
//! Adapters in `gogogo-adapters` implement these.
//!
//! - `TemplateSource`: enumerate and read a template tree
//! - `Filesystem`: write the generated project
//! - `ContentRenderer`: substitute `{{.Var}}` placeholders
//! - `Step`: one external action after materialization
//! - `PhaseObserver`: progress notifications for the UI

pub mod output;

pub use output::{ContentRenderer, Filesystem, NoopObserver, PhaseObserver, Step, TemplateSource};

#[cfg(test)]
pub use output::MockStep;
