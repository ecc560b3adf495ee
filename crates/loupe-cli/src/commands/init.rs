//! Showcase initialization command

use anyhow::{Context, Result};
use loupe_animator::ShowcaseConfig;
use std::fs;
use std::path::Path;

pub fn run(dir: &str) -> Result<()> {
    let dir = Path::new(dir);
    let path = dir.join("showcase.toml");

    if path.exists() {
        anyhow::bail!("'{}' already exists", path.display());
    }

    fs::create_dir_all(dir.join("assets"))
        .with_context(|| format!("Failed to create {}", dir.display()))?;

    let config = ShowcaseConfig::default();
    let content = format!(
        "# Loupe showcase\n# Place the model at {} (relative to where loupe runs).\n\n{}",
        config.viewer.asset.display(),
        config.to_toml()?
    );
    fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;

    println!("Created {}", path.display());
    println!();
    println!("Next steps:");
    println!("  cp <model>.glb {}", dir.join("assets").display());
    println!("  loupe simulate --config {}", path.display());

    Ok(())
}
