//! Application layer for gogogo.
//!
//! - **Services**: tree materialization, the step pipeline, the orchestrator
//! - **Ports**: traits the adapters implement
//! - **Errors**: failures of materialization and steps
//!
//! Naming and substitution rules live in `crate::domain`; this layer only
//! sequences them against the ports.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{
    DEFAULT_SENTINEL, FileRenderer, GenerationReport, GenerationRequest, MaterializationReport,
    ProjectGenerator, ProjectGeneratorBuilder, StepReport, StepRunner, TreeMaterializer,
};

pub use ports::{ContentRenderer, Filesystem, NoopObserver, PhaseObserver, Step, TemplateSource};

pub use error::{MaterializationError, RenderError, SourceError, StepError};
