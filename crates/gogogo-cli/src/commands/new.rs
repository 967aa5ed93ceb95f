//! Implementation of the `gogogo new` command.
//!
//! Responsibility: translate CLI arguments and config into a
//! `ProjectGenerator`, run it, and display results. No business logic lives
//! here.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, instrument};

use gogogo_adapters::{
    DirectorySource, EmbeddedSource, LocalFilesystem, PlaceholderRenderer, StepConfig,
    standard_steps,
};
use gogogo_core::application::{Filesystem, GenerationRequest, ProjectGenerator, TemplateSource};
use gogogo_core::domain::ModulePrefix;
use gogogo_core::error::GogogoError;

use crate::{
    cli::NewArgs,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `gogogo new` command.
///
/// Dispatch sequence:
/// 1. Parse `--var` pairs
/// 2. Pick the template source and the step sequence
/// 3. Generate the project under the current directory
/// 4. Print next-steps guidance
#[instrument(skip_all, fields(project = %args.name))]
pub fn execute(args: NewArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let variables = parse_variables(&args.vars)?;
    let destination = std::env::current_dir()?.join(&args.name);

    let source = select_source(args.templates.as_deref(), &config)?;
    let step_config = step_config(&args, &config);
    let prefix = ModulePrefix::new(
        args.module_prefix
            .as_deref()
            .unwrap_or(&config.generator.module_prefix),
    );

    debug!(
        prefix = %prefix,
        download_assets = step_config.download_assets,
        go = %step_config.go,
        templ = %step_config.templ,
        "Generator configured"
    );

    let filesystem: Arc<dyn Filesystem> = Arc::new(LocalFilesystem::new());
    let generator = ProjectGenerator::builder(
        source,
        Arc::clone(&filesystem),
        Box::new(PlaceholderRenderer::new()),
    )
    .module_prefix(prefix)
    .sentinel(config.generator.sentinel.clone())
    .steps(standard_steps(&step_config, &filesystem))
    .build();

    let request = variables
        .into_iter()
        .fold(GenerationRequest::new(&args.name, &destination), |req, (k, v)| {
            req.with_variable(k, v)
        });

    output.header(&format!("Creating '{}'...", args.name))?;
    info!(path = %destination.display(), "Generation started");

    let spinner = output.progress();
    let report = generator.generate_with(&request, &spinner)?;
    spinner.finish();

    info!(
        files = report.materialization.files_written,
        steps = report.steps.completed.len(),
        "Generation completed"
    );

    output.success(&format!("Project '{}' created!", args.name))?;
    output.info(&format!("Module path: {}", report.module_path))?;
    if args.skip_download || !config.steps.download_assets {
        output.info("Tailwind CSS was not downloaded; put the binary at bin/tailwindcss")?;
    }

    output.print("")?;
    output.print("Next steps:")?;
    output.print(&format!("  cd {}", args.name))?;
    output.print("  make dev")?;

    Ok(())
}

/// `KEY=VALUE` pairs, split on the first `=`.
///
/// Key validity is checked by the core when the context is built.
pub fn parse_variables(raw: &[String]) -> CliResult<Vec<(String, String)>> {
    raw.iter()
        .map(|pair| {
            pair.split_once('=')
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .ok_or_else(|| CliError::InvalidVariable { raw: pair.clone() })
        })
        .collect()
}

/// `--templates` wins over `generator.templates_dir`; otherwise the bundled
/// templates.
fn select_source(flag: Option<&Path>, config: &AppConfig) -> CliResult<Box<dyn TemplateSource>> {
    let dir: Option<PathBuf> = flag
        .map(Path::to_path_buf)
        .or_else(|| config.generator.templates_dir.clone());

    match dir {
        Some(dir) => {
            debug!(templates = %dir.display(), "Using template directory");
            let source = DirectorySource::open(dir).map_err(|e| {
                CliError::Core(GogogoError::Materialization(e.into()))
            })?;
            Ok(Box::new(source))
        }
        None => Ok(Box::new(EmbeddedSource::bundled())),
    }
}

fn step_config(args: &NewArgs, config: &AppConfig) -> StepConfig {
    StepConfig {
        go: config.steps.go.clone(),
        templ: config.steps.templ.clone(),
        download_assets: config.steps.download_assets && !args.skip_download,
        ..StepConfig::default()
    }
}
