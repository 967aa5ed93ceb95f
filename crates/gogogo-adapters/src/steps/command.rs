//! External command step.

use std::path::Path;
use std::process::{Command, Stdio};

use gogogo_core::{
    application::{StepError, ports::Step},
    domain::{Phase, ProjectContext},
};
use tracing::{debug, instrument};

/// Runs one program synchronously inside the project directory.
///
/// Stdout and stderr are captured; on a non-zero exit both are attached to
/// the error. There are no retries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandStep {
    name: String,
    phase: Phase,
    program: String,
    args: Vec<String>,
    append_module_path: bool,
}

impl CommandStep {
    pub fn new<I, S>(name: impl Into<String>, phase: Phase, program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            phase,
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            append_module_path: false,
        }
    }

    /// Pass the run's module path as the final argument.
    pub fn with_module_path_arg(mut self) -> Self {
        self.append_module_path = true;
        self
    }

    /// `go mod init <modulePath>`
    pub fn go_mod_init(go: impl Into<String>) -> Self {
        Self::new("go mod init", Phase::DependencyInit, go, ["mod", "init"]).with_module_path_arg()
    }

    /// `templ generate`
    pub fn templ_generate(templ: impl Into<String>) -> Self {
        Self::new("templ generate", Phase::CodeGeneration, templ, ["generate"])
    }

    /// `go mod tidy`
    pub fn go_mod_tidy(go: impl Into<String>) -> Self {
        Self::new("go mod tidy", Phase::DependencyTidy, go, ["mod", "tidy"])
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments as they will be passed for `context`.
    pub fn args_for(&self, context: &ProjectContext) -> Vec<String> {
        let mut args = self.args.clone();
        if self.append_module_path {
            args.push(context.module_path().to_string());
        }
        args
    }
}

impl Step for CommandStep {
    fn name(&self) -> &str {
        &self.name
    }

    fn phase(&self) -> Phase {
        self.phase
    }

    #[instrument(skip_all, fields(step = %self.name, program = %self.program))]
    fn run(&self, workdir: &Path, context: &ProjectContext) -> Result<(), StepError> {
        let args = self.args_for(context);
        debug!(?args, workdir = %workdir.display(), "Spawning command");

        let output = Command::new(&self.program)
            .args(&args)
            .current_dir(workdir)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| StepError::Launch {
                step: self.name.clone(),
                program: self.program.clone(),
                source,
            })?;

        if output.status.success() {
            debug!("Command succeeded");
            return Ok(());
        }

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        Err(StepError::CommandFailed {
            step: self.name.clone(),
            exit_info: output.status.to_string(),
            output: combined,
        })
    }
}
