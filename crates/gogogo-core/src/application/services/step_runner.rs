//! Ordered, fail-fast execution of post-materialization steps.

use std::path::Path;

use tracing::{error, info, instrument};

use crate::application::error::StepError;
use crate::application::ports::{PhaseObserver, Step};
use crate::domain::{Phase, ProjectContext};

/// Names of the steps that completed, in run order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepReport {
    pub completed: Vec<String>,
}

/// Runs steps one after another inside the project directory.
///
/// The first failing step stops the sequence. Nothing is undone.
#[derive(Default)]
pub struct StepRunner {
    steps: Vec<Box<dyn Step>>,
}

impl StepRunner {
    pub fn new(steps: Vec<Box<dyn Step>>) -> Self {
        Self { steps }
    }

    pub fn push(&mut self, step: Box<dyn Step>) {
        self.steps.push(step);
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Phases the configured steps will move through, in order.
    pub fn phases(&self) -> Vec<Phase> {
        self.steps.iter().map(|s| s.phase()).collect()
    }

    #[instrument(skip_all, fields(workdir = %workdir.display(), steps = self.steps.len()))]
    pub fn run(
        &self,
        workdir: &Path,
        context: &ProjectContext,
        observer: &dyn PhaseObserver,
    ) -> Result<StepReport, StepError> {
        let mut report = StepReport::default();

        for step in &self.steps {
            let phase = step.phase();
            observer.entered(phase);
            info!(step = step.name(), phase = %phase, "Running step");

            if let Err(e) = step.run(workdir, context) {
                error!(step = step.name(), error = %e, "Step failed");
                observer.failed(phase);
                return Err(e);
            }

            report.completed.push(step.name().to_string());
        }

        Ok(report)
    }
}

impl std::fmt::Debug for StepRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.steps.iter().map(|s| s.name()))
            .finish()
    }
}
