//! Output management and formatting.

use std::io;
use std::time::Duration;

use console::Term;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use owo_colors::OwoColorize;

use gogogo_core::application::PhaseObserver;
use gogogo_core::domain::Phase;

use crate::cli::GlobalArgs;
use crate::config::AppConfig;

/// Manages CLI output based on configuration.
pub struct OutputManager {
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded config.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        Self {
            quiet: args.quiet,
            no_color: args.no_color || config.output.no_color,
            term: Term::stdout(),
        }
    }

    // ── Public write methods ───────────────────────────────────────────────

    /// Generic message; suppressed in quiet mode.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    /// Success indicator: `✓ <msg>`.
    pub fn success(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2713} {msg}") // ✓
        } else {
            format!("{} {}", "\u{2713}".green().bold(), msg.green())
        };
        self.term.write_line(&line)
    }

    /// Informational indicator: `ℹ <msg>`.
    pub fn info(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2139} {msg}") // ℹ
        } else {
            format!("{} {}", "\u{2139}".blue().bold(), msg.blue())
        };
        self.term.write_line(&line)
    }

    /// Bold cyan header line.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.cyan().bold().to_string()
        };
        self.term.write_line(&line)
    }

    /// Spinner that follows the generation phases.
    pub fn progress(&self) -> PhaseSpinner {
        PhaseSpinner::new(self.quiet)
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// `true` if ANSI colours are enabled.
    pub fn supports_color(&self) -> bool {
        !self.no_color
    }

    /// `true` if quiet mode suppresses most output.
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }
}

/// Progress spinner driven by [`PhaseObserver`] callbacks.
///
/// Drawn on stderr; hidden entirely in quiet mode.
pub struct PhaseSpinner {
    bar: ProgressBar,
}

impl PhaseSpinner {
    fn new(hidden: bool) -> Self {
        let bar = if hidden {
            ProgressBar::hidden()
        } else {
            let bar = ProgressBar::with_draw_target(None, ProgressDrawTarget::stderr());
            if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
                bar.set_style(style);
            }
            bar.enable_steady_tick(Duration::from_millis(100));
            bar
        };
        Self { bar }
    }

    /// Stop the spinner and clear its line.
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl PhaseObserver for PhaseSpinner {
    fn entered(&self, phase: Phase) {
        if phase == Phase::Done {
            self.bar.finish_and_clear();
        } else {
            self.bar.set_message(phase_label(phase));
        }
    }

    fn failed(&self, phase: Phase) {
        self.bar
            .abandon_with_message(format!("{} failed", phase_label(phase)));
    }
}

impl Drop for PhaseSpinner {
    fn drop(&mut self) {
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }
}

fn phase_label(phase: Phase) -> &'static str {
    match phase {
        Phase::Init => "Preparing",
        Phase::DirectoryScaffold => "Creating project directory",
        Phase::TemplateMaterialization => "Writing project files",
        Phase::DependencyInit => "Initialising Go module",
        Phase::AssetFetch => "Downloading Tailwind CSS",
        Phase::CodeGeneration => "Generating templ code",
        Phase::DependencyTidy => "Tidying Go dependencies",
        Phase::Done => "Done",
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn make_manager(quiet: bool, no_color: bool) -> OutputManager {
        let args = GlobalArgs {
            verbose: 0,
            quiet,
            no_color,
            config: None,
        };
        OutputManager::new(&args, &AppConfig::default())
    }

    #[test]
    fn quiet_suppresses_print() {
        let out = make_manager(true, true);
        assert!(out.print("hello").is_ok());
        assert!(out.is_quiet());
    }

    #[test]
    fn no_color_flag_reported() {
        assert!(make_manager(false, false).supports_color());
        assert!(!make_manager(false, true).supports_color());
    }

    #[test]
    fn config_can_disable_color() {
        let mut config = AppConfig::default();
        config.output.no_color = true;
        let out = OutputManager::new(&GlobalArgs::default(), &config);
        assert!(!out.supports_color());
    }

    #[test]
    fn spinner_follows_phases() {
        let spinner = PhaseSpinner::new(true);
        spinner.entered(Phase::TemplateMaterialization);
        spinner.entered(Phase::Done);
        assert!(spinner.bar.is_finished());
    }

    #[test]
    fn spinner_is_abandoned_on_failure() {
        let spinner = PhaseSpinner::new(true);
        spinner.entered(Phase::DependencyInit);
        spinner.failed(Phase::DependencyInit);
        assert!(spinner.bar.is_finished());
    }

    #[test]
    fn every_phase_has_a_label() {
        assert_eq!(phase_label(Phase::AssetFetch), "Downloading Tailwind CSS");
        assert_eq!(phase_label(Phase::DependencyTidy), "Tidying Go dependencies");
    }
}
