//! Infrastructure adapters for gogogo.
//!
//! This crate implements the ports defined in `gogogo_core::application::ports`.
//! Every filesystem, process and network call lives here.

pub mod bundled;
pub mod filesystem;
pub mod platform;
pub mod renderer;
pub mod steps;
pub mod template_source;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use renderer::PlaceholderRenderer;
pub use steps::{CommandStep, DownloadStep, StepConfig, standard_steps};
pub use template_source::{DirectorySource, EmbeddedSource, MemorySource};
