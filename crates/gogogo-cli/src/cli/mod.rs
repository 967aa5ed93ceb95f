//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases
//! and help text.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

pub mod global;
pub use global::GlobalArgs;

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
///
/// The subcommand is optional: running `gogogo` alone prints usage and
/// succeeds.
#[derive(Debug, Parser)]
#[command(
    name     = "gogogo",
    bin_name = "gogogo",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "GoGoGo - An opinionated Go framework",
    long_about = "gogogo generates a ready-to-run Go web application: chi routing, \
                  templ views and a Tailwind CSS build, wired together.",
    after_help = "EXAMPLES:\n\
        \x20 gogogo new my-app\n\
        \x20 gogogo new my-app --module-prefix gitlab.com/acme\n\
        \x20 gogogo new my-app --skip-download --var Author=jane",
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a new project.
    #[command(
        about = "Create a new project",
        after_help = "EXAMPLES:\n\
            \x20 gogogo new my-app\n\
            \x20 gogogo new my-app --templates ./my-templates\n\
            \x20 gogogo new my-app --var Author=jane --var License=MIT"
    )]
    New(NewArgs),
}

// ── new ───────────────────────────────────────────────────────────────────────

/// Arguments for `gogogo new`.
#[derive(Debug, Clone, Args)]
pub struct NewArgs {
    /// Project name.  Used verbatim as the directory name and as the last
    /// segment of the module path.
    #[arg(value_name = "NAME", help = "Project name")]
    pub name: String,

    /// Namespace prefix for the Go module path.
    #[arg(
        long = "module-prefix",
        value_name = "PREFIX",
        help = "Module path prefix (default: github.com/brainmaniac)"
    )]
    pub module_prefix: Option<String>,

    /// Read templates from a directory instead of the bundled set.
    #[arg(
        long = "templates",
        value_name = "DIR",
        help = "Template directory to use instead of the bundled templates"
    )]
    pub templates: Option<PathBuf>,

    /// Do not download the Tailwind CSS binary.
    #[arg(long = "skip-download", help = "Skip the Tailwind CSS download")]
    pub skip_download: bool,

    /// Extra template variable; may be repeated.
    #[arg(
        long = "var",
        value_name = "KEY=VALUE",
        help = "Extra template variable (repeatable)"
    )]
    pub vars: Vec<String>,
}

// ── tests ─────────────────────────────────────────────────────────────────────
