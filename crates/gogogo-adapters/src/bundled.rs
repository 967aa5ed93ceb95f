//! Project template compiled into the binary.
//!
//! Sources live under `templates/project/` in this crate. Files ending in
//! `.tmpl` lose that suffix when written; every file goes through sentinel
//! and placeholder substitution.

use rust_embed::RustEmbed;

/// Every file under `templates/project/`, dotfiles included.
#[derive(RustEmbed)]
#[folder = "templates/project/"]
pub struct ProjectTemplate;
