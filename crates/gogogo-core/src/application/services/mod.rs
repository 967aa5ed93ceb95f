//! Application services - orchestrate use cases.
//!
//! `ProjectGenerator` is the entry point; it drives `TreeMaterializer`
//! (which uses `FileRenderer` per file) and then `StepRunner`.

pub mod file_renderer;
pub mod generator;
pub mod materializer;
pub mod step_runner;

#[cfg(test)]
pub(crate) mod fakes;

pub use file_renderer::{DEFAULT_SENTINEL, FileRenderer};
pub use generator::{GenerationReport, GenerationRequest, ProjectGenerator, ProjectGeneratorBuilder};
pub use materializer::{MaterializationReport, TreeMaterializer};
pub use step_runner::{StepReport, StepRunner};
