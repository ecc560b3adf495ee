//! Viewer bootstrap: the ordered initialisation pipeline
//!
//! Setup is a linear sequence of stages. Every stage declares which
//! capabilities it needs from earlier stages and which it provides, so a
//! misordered pipeline is rejected before anything is installed.

use crate::plugin::{Capability, PluginKind, ViewerPlugin};
use crate::plugins::{
    add_base_plugins, AssetManagerPlugin, BloomPlugin, CanvasSnipperPlugin, GBufferPlugin,
    ProgressivePlugin, SsaoPlugin, SsrPlugin, TonemapPlugin,
};
use crate::viewer::{ViewerApp, ViewerOptions};
use loupe_core::{Document, LoupeError, Result};
use std::collections::HashSet;
use std::path::PathBuf;

/// Everything the showcase setup needs to know
#[derive(Debug, Clone)]
pub struct BootstrapOptions {
    pub canvas: String,
    pub use_rgbm: bool,
    pub asset: PathBuf,
    pub progressive_frames: u32,
    /// Plugins whose settings the inspector exposes
    pub inspect: Vec<PluginKind>,
}

impl Default for BootstrapOptions {
    fn default() -> Self {
        Self {
            canvas: "webgi-canvas".into(),
            use_rgbm: false,
            asset: PathBuf::from("./assets/vintage-watch.glb"),
            progressive_frames: 32,
            inspect: vec![PluginKind::Tonemap, PluginKind::CanvasSnipper],
        }
    }
}

/// One step of the initialisation pipeline
pub enum Stage {
    Plugin(Box<dyn ViewerPlugin>),
    /// The base bundle, see [`add_base_plugins`]
    BasePlugins,
}

impl Stage {
    pub fn plugin<P: ViewerPlugin>(plugin: P) -> Self {
        Stage::Plugin(Box::new(plugin))
    }

    pub fn name(&self) -> String {
        match self {
            Stage::Plugin(p) => p.kind().to_string(),
            Stage::BasePlugins => "base-plugins".into(),
        }
    }

    pub fn requires(&self) -> &'static [Capability] {
        match self {
            Stage::Plugin(p) => p.requires(),
            Stage::BasePlugins => &[Capability::Assets, Capability::GBuffer, Capability::Accumulation],
        }
    }

    pub fn provides(&self) -> &'static [Capability] {
        match self {
            Stage::Plugin(p) => p.provides(),
            Stage::BasePlugins => &[],
        }
    }
}

#[derive(Default)]
pub struct PluginPipeline {
    stages: Vec<Stage>,
}

impl PluginPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// The fixed showcase sequence
    pub fn showcase(options: &BootstrapOptions) -> Self {
        Self::new()
            .then(Stage::plugin(AssetManagerPlugin::new()))
            .then(Stage::plugin(GBufferPlugin))
            .then(Stage::plugin(ProgressivePlugin::new(options.progressive_frames)))
            .then(Stage::plugin(TonemapPlugin::new(!options.use_rgbm)))
            .then(Stage::plugin(SsrPlugin::default()))
            .then(Stage::plugin(SsaoPlugin::default()))
            .then(Stage::plugin(BloomPlugin::default()))
            .then(Stage::BasePlugins)
            .then(Stage::plugin(CanvasSnipperPlugin::default()))
    }

    pub fn then(mut self, stage: Stage) -> Self {
        self.stages.push(stage);
        self
    }

    pub fn stage_names(&self) -> Vec<String> {
        self.stages.iter().map(Stage::name).collect()
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Check that every requirement is provided by an earlier stage
    pub fn validate(&self) -> Result<()> {
        let mut provided: HashSet<Capability> = HashSet::new();
        for stage in &self.stages {
            if let Some(missing) = stage.requires().iter().find(|c| !provided.contains(*c)) {
                return Err(LoupeError::MissingCapability {
                    plugin: stage.name(),
                    capability: missing.to_string(),
                });
            }
            provided.extend(stage.provides().iter().copied());
        }
        Ok(())
    }

    /// Install every stage in order, stopping at the first failure
    pub fn run(self, viewer: &mut ViewerApp) -> Result<()> {
        let total = self.stages.len();
        for (i, stage) in self.stages.into_iter().enumerate() {
            log::debug!("Setup stage {}/{}: {}", i + 1, total, stage.name());
            match stage {
                Stage::Plugin(plugin) => {
                    viewer.add_boxed_plugin(plugin)?;
                }
                Stage::BasePlugins => add_base_plugins(viewer)?,
            }
        }
        Ok(())
    }
}

/// Build the showcase viewer: bind the canvas, install the plugin pipeline,
/// refresh the renderer, load the asset and set up the inspector.
pub fn setup_viewer(options: &BootstrapOptions, document: &Document) -> Result<ViewerApp> {
    let mut viewer = ViewerApp::new(
        ViewerOptions {
            canvas: options.canvas.clone(),
            use_rgbm: options.use_rgbm,
        },
        document,
    )?;

    let pipeline = PluginPipeline::showcase(options);
    pipeline.validate()?;
    pipeline.run(&mut viewer)?;

    viewer.refresh_pipeline();
    viewer.load_asset(&options.asset)?;
    viewer.setup_inspector(&options.inspect)?;

    log::info!(
        "Viewer ready: {} plugins, {} passes",
        viewer.plugin_kinds().len(),
        viewer.renderer().passes().len()
    );
    Ok(viewer)
}
