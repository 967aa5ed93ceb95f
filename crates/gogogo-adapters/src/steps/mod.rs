//! Post-materialization steps.

mod command;
mod download;

pub use command::CommandStep;
pub use download::{BROWSER_USER_AGENT, DOWNLOAD_TIMEOUT, DownloadStep};

use std::sync::Arc;

use gogogo_core::application::ports::{Filesystem, Step};

use crate::platform::{Platform, TAILWIND_RELEASE_BASE};

/// Knobs for the standard step sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepConfig {
    /// Program used for `mod init` and `mod tidy`.
    pub go: String,
    /// Program used for `generate`.
    pub templ: String,
    /// Whether the asset-fetch step is part of the sequence.
    pub download_assets: bool,
    pub platform: Platform,
    pub asset_base_url: String,
}

impl Default for StepConfig {
    fn default() -> Self {
        Self {
            go: "go".into(),
            templ: "templ".into(),
            download_assets: true,
            platform: Platform::current(),
            asset_base_url: TAILWIND_RELEASE_BASE.into(),
        }
    }
}

/// `go mod init`, the Tailwind download, `templ generate`, `go mod tidy`.
///
/// With `download_assets` off the download step is never constructed. The
/// download writes through `filesystem`, the same port the tree goes to.
pub fn standard_steps(
    config: &StepConfig,
    filesystem: &Arc<dyn Filesystem>,
) -> Vec<Box<dyn Step>> {
    let mut steps: Vec<Box<dyn Step>> = vec![Box::new(CommandStep::go_mod_init(&config.go))];

    if config.download_assets {
        steps.push(Box::new(
            DownloadStep::tailwind_from(&config.asset_base_url, config.platform)
                .with_filesystem(Arc::clone(filesystem)),
        ));
    }

    steps.push(Box::new(CommandStep::templ_generate(&config.templ)));
    steps.push(Box::new(CommandStep::go_mod_tidy(&config.go)));
    steps
}
