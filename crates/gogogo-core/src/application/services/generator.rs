//! Project generator - main application orchestrator.
//!
//! One run moves through:
//! 1. `Init`: build the `ProjectContext`
//! 2. `DirectoryScaffold`: create the project root
//! 3. `TemplateMaterialization`: write the template tree
//! 4. the external steps, in the order they were configured
//! 5. `Done`

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, instrument};

use crate::application::error::MaterializationError;
use crate::application::ports::{
    ContentRenderer, Filesystem, NoopObserver, PhaseObserver, Step, TemplateSource,
};
use crate::application::services::file_renderer::FileRenderer;
use crate::application::services::materializer::{MaterializationReport, TreeMaterializer};
use crate::application::services::step_runner::{StepReport, StepRunner};
use crate::domain::{ModulePrefix, Phase, ProjectContext, TemplateMarker};
use crate::error::{GogogoError, GogogoResult};

/// Input for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Raw project name, used verbatim.
    pub name: String,
    /// Project root to create.
    pub destination: PathBuf,
    /// Extra template variables.
    pub variables: BTreeMap<String, String>,
}

impl GenerationRequest {
    pub fn new(name: impl Into<String>, destination: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            destination: destination.into(),
            variables: BTreeMap::new(),
        }
    }

    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }
}

/// Summary of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    pub project_root: PathBuf,
    pub module_path: String,
    pub materialization: MaterializationReport,
    pub steps: StepReport,
}

/// Generates one project: context, root directory, template tree, steps.
pub struct ProjectGenerator {
    source: Box<dyn TemplateSource>,
    filesystem: Arc<dyn Filesystem>,
    materializer: TreeMaterializer,
    runner: StepRunner,
    prefix: ModulePrefix,
}

impl ProjectGenerator {
    pub fn builder(
        source: Box<dyn TemplateSource>,
        filesystem: Arc<dyn Filesystem>,
        renderer: Box<dyn ContentRenderer>,
    ) -> ProjectGeneratorBuilder {
        ProjectGeneratorBuilder {
            source,
            filesystem,
            renderer,
            steps: Vec::new(),
            prefix: ModulePrefix::default(),
            marker: TemplateMarker::default(),
            sentinel: None,
        }
    }

    /// Phases this generator will move through when nothing fails.
    pub fn planned_phases(&self) -> Vec<Phase> {
        let mut phases = vec![
            Phase::Init,
            Phase::DirectoryScaffold,
            Phase::TemplateMaterialization,
        ];
        phases.extend(self.runner.phases());
        phases.push(Phase::Done);
        phases
    }

    pub fn generate(&self, request: &GenerationRequest) -> GogogoResult<GenerationReport> {
        self.generate_with(request, &NoopObserver)
    }

    /// Run every phase, reporting transitions to `observer`.
    ///
    /// # Errors
    /// The first failure ends the run. Files and step effects produced
    /// before it are left in place.
    #[instrument(
        skip_all,
        fields(project = %request.name, destination = %request.destination.display())
    )]
    pub fn generate_with(
        &self,
        request: &GenerationRequest,
        observer: &dyn PhaseObserver,
    ) -> GogogoResult<GenerationReport> {
        observer.entered(Phase::Init);
        let context = self
            .build_context(request)
            .inspect_err(|_| observer.failed(Phase::Init))?;
        info!(module_path = %context.module_path(), "Generating project");

        observer.entered(Phase::DirectoryScaffold);
        self.scaffold_root(&request.destination)
            .inspect_err(|_| observer.failed(Phase::DirectoryScaffold))?;

        observer.entered(Phase::TemplateMaterialization);
        let materialization = self
            .materializer
            .materialize(self.source.as_ref(), &request.destination, &context)
            .inspect_err(|_| observer.failed(Phase::TemplateMaterialization))?;

        let steps = self.runner.run(&request.destination, &context, observer)?;

        observer.entered(Phase::Done);
        info!("Project generated successfully");

        Ok(GenerationReport {
            project_root: request.destination.clone(),
            module_path: context.module_path().to_string(),
            materialization,
            steps,
        })
    }

    fn build_context(&self, request: &GenerationRequest) -> GogogoResult<ProjectContext> {
        request
            .variables
            .iter()
            .try_fold(
                ProjectContext::build(&request.name, &self.prefix),
                |context, (key, value)| context.with_variable(key, value),
            )
            .map_err(GogogoError::Domain)
    }

    fn scaffold_root(&self, root: &Path) -> GogogoResult<()> {
        self.filesystem.create_dir_all(root).map_err(|cause| {
            MaterializationError::DirectoryCreation {
                path: root.to_path_buf(),
                cause,
            }
        })?;
        Ok(())
    }
}

/// Builder for [`ProjectGenerator`].
pub struct ProjectGeneratorBuilder {
    source: Box<dyn TemplateSource>,
    filesystem: Arc<dyn Filesystem>,
    renderer: Box<dyn ContentRenderer>,
    steps: Vec<Box<dyn Step>>,
    prefix: ModulePrefix,
    marker: TemplateMarker,
    sentinel: Option<String>,
}

impl ProjectGeneratorBuilder {
    pub fn module_prefix(mut self, prefix: ModulePrefix) -> Self {
        self.prefix = prefix;
        self
    }

    pub fn marker(mut self, marker: TemplateMarker) -> Self {
        self.marker = marker;
        self
    }

    pub fn sentinel(mut self, sentinel: impl Into<String>) -> Self {
        self.sentinel = Some(sentinel.into());
        self
    }

    pub fn step(mut self, step: Box<dyn Step>) -> Self {
        self.steps.push(step);
        self
    }

    pub fn steps(mut self, steps: impl IntoIterator<Item = Box<dyn Step>>) -> Self {
        self.steps.extend(steps);
        self
    }

    pub fn build(self) -> ProjectGenerator {
        let mut renderer = FileRenderer::new(self.renderer).with_marker(self.marker);
        if let Some(sentinel) = self.sentinel {
            renderer = renderer.with_sentinel(sentinel);
        }

        ProjectGenerator {
            source: self.source,
            materializer: TreeMaterializer::new(Arc::clone(&self.filesystem), renderer),
            filesystem: self.filesystem,
            runner: StepRunner::new(self.steps),
            prefix: self.prefix,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::error::StepError;
    use crate::application::ports::MockStep;
    use crate::application::services::fakes::{
        FakeSource, RecordingEngine, RecordingFs, RecordingObserver,
    };
    use crate::domain::DomainError;
    use crate::error::ErrorCategory;

    fn passing_step(name: &str, phase: Phase) -> Box<dyn Step> {
        let mut mock = MockStep::new();
        mock.expect_name().return_const(name.to_string());
        mock.expect_phase().return_const(phase);
        mock.expect_run().times(1).returning(|_, _| Ok(()));
        Box::new(mock)
    }

    fn generator(fs: Arc<RecordingFs>, steps: Vec<Box<dyn Step>>) -> ProjectGenerator {
        let source = FakeSource::default()
            .file("go.mod.tmpl", "module {{.ModulePath}}")
            .file("static/readme.md", "github.com/brainmaniac/gogogo-app");
        ProjectGenerator::builder(Box::new(source), fs, Box::new(RecordingEngine::default()))
            .steps(steps)
            .build()
    }

    #[test]
    fn full_run_moves_through_every_phase() {
        let fs = Arc::new(RecordingFs::default());
        let generator = generator(
            fs.clone(),
            vec![
                passing_step("dependency-init", Phase::DependencyInit),
                passing_step("asset-fetch", Phase::AssetFetch),
                passing_step("code-generation", Phase::CodeGeneration),
                passing_step("dependency-tidy", Phase::DependencyTidy),
            ],
        );
        let observer = RecordingObserver::default();

        let report = generator
            .generate_with(&GenerationRequest::new("demo", "/work/demo"), &observer)
            .unwrap();

        assert_eq!(report.module_path, "github.com/brainmaniac/demo");
        assert_eq!(report.materialization.files_written, 2);
        assert_eq!(report.steps.completed.len(), 4);
        assert_eq!(
            observer.events(),
            vec![
                "entered:init",
                "entered:directory-scaffold",
                "entered:template-materialization",
                "entered:dependency-init",
                "entered:asset-fetch",
                "entered:code-generation",
                "entered:dependency-tidy",
                "entered:done",
            ]
        );
        assert_eq!(
            fs.file("/work/demo/static/readme.md").unwrap(),
            b"github.com/brainmaniac/demo"
        );
    }

    #[test]
    fn planned_phases_skip_missing_steps() {
        let mut codegen = MockStep::new();
        codegen.expect_phase().return_const(Phase::CodeGeneration);

        let generator = generator(Arc::new(RecordingFs::default()), vec![Box::new(codegen)]);

        assert_eq!(
            generator.planned_phases(),
            vec![
                Phase::Init,
                Phase::DirectoryScaffold,
                Phase::TemplateMaterialization,
                Phase::CodeGeneration,
                Phase::Done,
            ]
        );
    }

    #[test]
    fn module_prefix_is_configurable() {
        let fs = Arc::new(RecordingFs::default());
        let generator = ProjectGenerator::builder(
            Box::new(FakeSource::default()),
            fs,
            Box::new(RecordingEngine::default()),
        )
        .module_prefix(ModulePrefix::new("gitlab.com/acme/"))
        .build();

        let report = generator
            .generate(&GenerationRequest::new("svc", "/work/svc"))
            .unwrap();
        assert_eq!(report.module_path, "gitlab.com/acme/svc");
    }

    #[test]
    fn reserved_variable_fails_before_touching_disk() {
        let fs = Arc::new(RecordingFs::default());
        let generator = generator(fs.clone(), Vec::new());
        let request = GenerationRequest::new("demo", "/work/demo").with_variable("Name", "x");

        let err = generator.generate(&request).unwrap_err();

        assert!(matches!(
            err,
            GogogoError::Domain(DomainError::ReservedVariable { .. })
        ));
        assert!(fs.ops().is_empty());
    }

    #[test]
    fn root_creation_failure_is_a_directory_error() {
        let fs = Arc::new(RecordingFs::failing_on("/work/demo"));
        let generator = generator(fs, Vec::new());
        let observer = RecordingObserver::default();

        let err = generator
            .generate_with(&GenerationRequest::new("demo", "/work/demo"), &observer)
            .unwrap_err();

        assert_eq!(err.category(), ErrorCategory::Filesystem);
        assert_eq!(
            observer.events(),
            vec![
                "entered:init",
                "entered:directory-scaffold",
                "failed:directory-scaffold",
            ]
        );
    }

    #[test]
    fn failing_step_stops_the_run_after_materialization() {
        let fs = Arc::new(RecordingFs::default());

        let mut failing = MockStep::new();
        failing.expect_name().return_const("dependency-init".to_string());
        failing.expect_phase().return_const(Phase::DependencyInit);
        failing.expect_run().times(1).returning(|_, _| {
            Err(StepError::Launch {
                step: "dependency-init".into(),
                program: "go".into(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            })
        });
        let mut never = MockStep::new();
        never.expect_name().return_const("code-generation".to_string());
        never.expect_phase().return_const(Phase::CodeGeneration);
        never.expect_run().never();

        let generator = generator(fs.clone(), vec![Box::new(failing), Box::new(never)]);
        let err = generator
            .generate(&GenerationRequest::new("demo", "/work/demo"))
            .unwrap_err();

        match err {
            GogogoError::Step(e) => assert_eq!(e.step(), "dependency-init"),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(fs.file("/work/demo/go.mod").is_some());
    }
}
