//! Inspector command: bootstrap the viewer and print what the panel shows

use super::load_config;
use anyhow::{Context, Result};
use loupe_viewer::plugins::InspectorPlugin;
use loupe_viewer::setup_viewer;

pub fn run(config: Option<&str>) -> Result<()> {
    let config = load_config(config)?;
    let document = config.page.build_document()?;
    let viewer = setup_viewer(&config.viewer.bootstrap_options()?, &document)
        .context("Viewer setup failed")?;

    println!("Canvas: #{} ({}x{})", viewer.canvas().id, viewer.canvas().width, viewer.canvas().height);
    println!("Colour output: {}", if viewer.use_rgbm() { "rgbm" } else { "tone-mapped" });
    println!();

    println!("Plugins ({}):", viewer.plugin_kinds().len());
    for kind in viewer.plugin_kinds() {
        println!("  {}", kind);
    }
    println!();

    println!("Pipeline:");
    for pass in viewer.renderer().passes() {
        match pass.source {
            Some(kind) => println!("  {:>3}  {:<12} ({})", pass.order, pass.name, kind),
            None => println!("  {:>3}  {}", pass.order, pass.name),
        }
    }
    println!();

    if let Some(inspector) = viewer.get_plugin::<InspectorPlugin>() {
        println!("Inspector:");
        print!("{}", inspector.render_text());
    }

    Ok(())
}
