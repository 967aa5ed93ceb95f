//! gogogo core: hexagonal architecture for Go web-app project generation.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            gogogo-cli (CLI)             │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (ProjectGenerator, TreeMaterializer,   │
//! │   StepRunner, FileRenderer)             │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │       Application Ports (Traits)        │
//! │ (TemplateSource, Filesystem,            │
//! │  ContentRenderer, Step, PhaseObserver)  │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     gogogo-adapters (Infrastructure)    │
//! │ (LocalFilesystem, EmbeddedSource,       │
//! │  PlaceholderRenderer, CommandStep, ...) │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use gogogo_core::prelude::*;
//!
//! let generator = ProjectGenerator::builder(source, filesystem, renderer)
//!     .steps(steps)
//!     .build();
//! let report = generator.generate(&GenerationRequest::new("demo", "./demo"))?;
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        GenerationReport, GenerationRequest, MaterializationReport, ProjectGenerator,
        StepRunner, TreeMaterializer,
        ports::{ContentRenderer, Filesystem, PhaseObserver, Step, TemplateSource},
    };
    pub use crate::domain::{
        ModulePrefix, Phase, ProjectContext, RelativePath, TemplateEntry, TemplateMarker,
    };
    pub use crate::error::{GogogoError, GogogoResult};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
