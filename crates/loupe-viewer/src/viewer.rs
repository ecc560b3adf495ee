//! The viewer application: canvas, plugin registry, camera and renderer

use crate::camera::Camera;
use crate::events::{EventBus, ViewerEvent};
use crate::plugin::{Capability, PluginKind, Setting, SettingValue, ViewerPlugin};
use crate::plugins::{
    AssetHandle, AssetManagerPlugin, AssetSummary, CameraPose, CanvasSnipperPlugin,
    InspectorPanel, InspectorPlugin, Snapshot,
};
use crate::renderer::{FrameStats, Renderer};
use loupe_core::{Document, LoupeError, Result};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Construction options for [`ViewerApp`]
#[derive(Debug, Clone)]
pub struct ViewerOptions {
    /// Id of the canvas element the viewer renders into
    pub canvas: String,
    /// Write RGBM-encoded output instead of tone-mapped colour
    pub use_rgbm: bool,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            canvas: "webgi-canvas".into(),
            use_rgbm: false,
        }
    }
}

/// The render surface, resolved from the page once at startup
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    pub id: String,
    pub width: f32,
    pub height: f32,
}

/// What a frame listener may touch right before the renderer runs
pub struct FrameContext<'a> {
    /// Index of the frame about to be rendered
    pub frame: u64,
    pub camera: &'a mut Camera,
    pub renderer: &'a mut Renderer,
}

/// Receives the pre-render event of every frame
pub trait FrameListener {
    fn pre_frame(&mut self, ctx: &mut FrameContext<'_>);
}

pub struct ViewerApp {
    options: ViewerOptions,
    canvas: Canvas,
    camera: Camera,
    renderer: Renderer,
    plugins: Vec<Box<dyn ViewerPlugin>>,
    provided: HashSet<Capability>,
    events: EventBus,
}

impl ViewerApp {
    /// Bind a viewer to the canvas named in `options`.
    pub fn new(options: ViewerOptions, document: &Document) -> Result<Self> {
        let element = document
            .get_element_by_id(&options.canvas)
            .map_err(|_| LoupeError::CanvasNotFound(options.canvas.clone()))?;

        let canvas = Canvas {
            id: options.canvas.clone(),
            width: document.viewport_width(),
            height: element.rect.height,
        };

        let mut camera = Camera::new();
        if canvas.height > 0.0 {
            camera.aspect = canvas.width / canvas.height;
        }

        log::info!(
            "Viewer bound to #{} ({}x{}, rgbm={})",
            canvas.id,
            canvas.width,
            canvas.height,
            options.use_rgbm
        );

        Ok(Self {
            options,
            canvas,
            camera,
            renderer: Renderer::new(),
            plugins: Vec::new(),
            provided: HashSet::new(),
            events: EventBus::new(),
        })
    }

    /// Install a plugin, or return the existing one of the same kind.
    pub fn add_plugin<P: ViewerPlugin>(&mut self, plugin: P) -> Result<&mut P> {
        let kind = plugin.kind();
        let index = match self.index_of(kind) {
            Some(index) => {
                log::debug!("Plugin '{}' already installed", kind);
                index
            }
            None => self.install(Box::new(plugin))?,
        };
        self.plugins[index]
            .as_any_mut()
            .downcast_mut::<P>()
            .ok_or_else(|| {
                LoupeError::PluginError(format!(
                    "plugin '{}' is installed with a different type",
                    kind
                ))
            })
    }

    /// Install a boxed plugin; a kind that is already present is left as is.
    pub fn add_boxed_plugin(&mut self, plugin: Box<dyn ViewerPlugin>) -> Result<PluginKind> {
        let kind = plugin.kind();
        if self.index_of(kind).is_none() {
            self.install(plugin)?;
        }
        Ok(kind)
    }

    fn install(&mut self, plugin: Box<dyn ViewerPlugin>) -> Result<usize> {
        let kind = plugin.kind();
        if let Some(missing) = plugin
            .requires()
            .iter()
            .find(|cap| !self.provided.contains(cap))
        {
            return Err(LoupeError::MissingCapability {
                plugin: kind.to_string(),
                capability: missing.to_string(),
            });
        }

        plugin.apply_settings(&mut self.renderer);

        self.provided.extend(plugin.provides().iter().copied());
        self.plugins.push(plugin);
        self.renderer.mark_stale();
        self.events.push(ViewerEvent::PluginAdded(kind));
        log::info!("Installed plugin '{}'", kind);
        Ok(self.plugins.len() - 1)
    }

    fn index_of(&self, kind: PluginKind) -> Option<usize> {
        self.plugins.iter().position(|p| p.kind() == kind)
    }

    pub fn has_plugin(&self, kind: PluginKind) -> bool {
        self.index_of(kind).is_some()
    }

    pub fn get_plugin<P: ViewerPlugin>(&self) -> Option<&P> {
        self.plugins
            .iter()
            .find_map(|p| p.as_any().downcast_ref::<P>())
    }

    pub fn get_plugin_mut<P: ViewerPlugin>(&mut self) -> Option<&mut P> {
        self.plugins
            .iter_mut()
            .find_map(|p| p.as_any_mut().downcast_mut::<P>())
    }

    /// Installed plugin kinds in installation order
    pub fn plugin_kinds(&self) -> Vec<PluginKind> {
        self.plugins.iter().map(|p| p.kind()).collect()
    }

    pub fn provides(&self, capability: Capability) -> bool {
        self.provided.contains(&capability)
    }

    pub fn plugin_settings(&self, kind: PluginKind) -> Result<Vec<Setting>> {
        self.index_of(kind)
            .map(|i| self.plugins[i].settings())
            .ok_or_else(|| LoupeError::PluginError(format!("plugin '{}' is not installed", kind)))
    }

    /// Change a plugin setting and apply it to the renderer, refreshing the
    /// pipeline if the plugin asks for it
    pub fn set_plugin_setting(
        &mut self,
        kind: PluginKind,
        name: &str,
        value: SettingValue,
    ) -> Result<()> {
        let index = self.index_of(kind).ok_or_else(|| {
            LoupeError::PluginError(format!("plugin '{}' is not installed", kind))
        })?;
        let refresh = self.plugins[index].set_setting(name, value)?;
        self.plugins[index].apply_settings(&mut self.renderer);
        if refresh {
            self.refresh_pipeline();
        }
        Ok(())
    }

    /// Rebuild the renderer's pass list from the installed plugins
    pub fn refresh_pipeline(&mut self) {
        let passes = self.plugins.iter().flat_map(|p| p.passes()).collect();
        self.renderer.refresh_pipeline(passes);
        self.events.push(ViewerEvent::PipelineRefreshed {
            passes: self.renderer.passes().len(),
        });
    }

    /// Load a model through the asset manager plugin
    pub fn load_asset<P: AsRef<Path>>(&mut self, path: P) -> Result<AssetHandle> {
        let manager = self.get_plugin_mut::<AssetManagerPlugin>().ok_or_else(|| {
            LoupeError::MissingCapability {
                plugin: "viewer".into(),
                capability: Capability::Assets.to_string(),
            }
        })?;
        let handle = manager.add_from_path(path)?;
        let name = manager
            .get(handle)
            .map(|a| a.import.name.clone())
            .unwrap_or_default();

        // New geometry casts new shadows
        self.renderer.reset_shadows();
        self.events.push(ViewerEvent::AssetLoaded {
            name,
            hash: handle.0,
        });
        Ok(handle)
    }

    /// Install the inspector and give it one panel per listed plugin.
    pub fn setup_inspector(&mut self, kinds: &[PluginKind]) -> Result<usize> {
        let panels = kinds
            .iter()
            .map(|&kind| {
                Ok(InspectorPanel {
                    plugin: kind,
                    settings: self.plugin_settings(kind)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        let count = panels.len();

        self.add_plugin(InspectorPlugin::new())?.setup_plugins(panels);
        self.events.push(ViewerEvent::InspectorReady { panels: count });
        Ok(count)
    }

    /// Capture the current frame state. Requires the canvas snipper.
    pub fn snapshot(&mut self) -> Result<Snapshot> {
        if !self.has_plugin(PluginKind::CanvasSnipper) {
            return Err(LoupeError::SnapshotError(
                "canvas-snipper plugin is not installed".into(),
            ));
        }

        let assets = self
            .get_plugin::<AssetManagerPlugin>()
            .map(|m| {
                m.assets()
                    .map(|a| AssetSummary {
                        name: a.import.name.clone(),
                        hash: a.import.hash.to_prefixed_hex(),
                        meshes: a.import.meshes.len(),
                        vertices: a.import.vertex_count(),
                        triangles: a.import.triangle_count(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        let snapshot = Snapshot {
            frame: self.renderer.frame(),
            canvas: self.canvas.id.clone(),
            camera: CameraPose {
                position: self.camera.position,
                target: self.camera.target,
                fov: self.camera.fov,
            },
            passes: self.renderer.passes().iter().map(|p| p.name).collect(),
            samples: self.renderer.samples(),
            max_samples: self.renderer.max_samples(),
            shadow_recomputes: self.renderer.shadow_recomputes(),
            assets,
        };
        self.events.push(ViewerEvent::SnapshotTaken {
            frame: snapshot.frame,
        });
        Ok(snapshot)
    }

    /// Capture a snapshot and write it with the canvas snipper
    pub fn export_snapshot(&mut self, path: &Path) -> Result<PathBuf> {
        let snapshot = self.snapshot()?;
        let snipper = self
            .get_plugin_mut::<CanvasSnipperPlugin>()
            .ok_or_else(|| LoupeError::SnapshotError("canvas-snipper plugin is not installed".into()))?;
        snipper.export(&snapshot, path)
    }

    /// Run one frame: the pre-render event for every listener, then the renderer.
    pub fn render_frame(&mut self, listeners: &mut [&mut dyn FrameListener]) -> FrameStats {
        let mut ctx = FrameContext {
            frame: self.renderer.frame() + 1,
            camera: &mut self.camera,
            renderer: &mut self.renderer,
        };
        for listener in listeners.iter_mut() {
            listener.pre_frame(&mut ctx);
        }
        self.renderer.render(&mut self.camera)
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn use_rgbm(&self) -> bool {
        self.options.use_rgbm
    }

    pub fn events(&mut self) -> &mut EventBus {
        &mut self.events
    }
}
