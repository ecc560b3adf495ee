//! CLI command implementations

pub mod init;
pub mod inspect;
pub mod simulate;
pub mod timeline;

use anyhow::{Context, Result};
use loupe_animator::ShowcaseConfig;
use std::path::Path;

/// Load the showcase config: defaults, then the file if given, then env vars
pub fn load_config(path: Option<&str>) -> Result<ShowcaseConfig> {
    ShowcaseConfig::load(path.map(Path::new)).with_context(|| match path {
        Some(path) => format!("Failed to load showcase config '{}'", path),
        None => "Invalid showcase configuration".to_string(),
    })
}
