//! Loupe Viewer - the viewer the showcase configures and animates
//!
//! Models the external rendering engine at the interface the showcase
//! consumes: a render surface bound to a canvas, a registry of plugins
//! installed in order with capability checks, an active camera, and a
//! renderer that schedules shadow recomputation and progressive
//! accumulation. [`bootstrap::setup_viewer`] performs the fixed showcase
//! setup sequence.

/// Implements the `as_any` accessors of [`ViewerPlugin`] for a plugin type.
macro_rules! impl_plugin_any {
    () => {
        fn as_any(&self) -> &dyn std::any::Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
            self
        }
    };
}

pub mod bootstrap;
mod camera;
mod events;
mod plugin;
pub mod plugins;
mod renderer;
mod viewer;

pub use bootstrap::{setup_viewer, BootstrapOptions, PluginPipeline, Stage};
pub use camera::Camera;
pub use events::{EventBus, ViewerEvent};
pub use plugin::{Capability, PluginKind, Setting, SettingValue, ViewerPlugin};
pub use renderer::{FrameStats, PassDesc, Renderer};
pub use viewer::{Canvas, FrameContext, FrameListener, ViewerApp, ViewerOptions};
