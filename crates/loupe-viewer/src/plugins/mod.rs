//! Concrete viewer plugins
//!
//! Each plugin stands in for one capability of the external engine. They
//! carry the settings the inspector exposes and the passes they contribute,
//! not the GPU work itself.

mod asset_manager;
mod base;
mod effects;
mod inspector;
mod progressive;
mod snipper;
mod tonemap;

pub use asset_manager::{AssetHandle, AssetManagerPlugin, LoadedAsset};
pub use base::add_base_plugins;
pub use effects::{
    AnisotropyPlugin, BloomPlugin, FrameFadePlugin, GBufferPlugin, GltfAnimationPlugin,
    GroundPlugin, SsaoPlugin, SsrPlugin, TemporalAaPlugin,
};
pub use inspector::{InspectorPanel, InspectorPlugin};
pub use progressive::ProgressivePlugin;
pub use snipper::{AssetSummary, CameraPose, CanvasSnipperPlugin, Snapshot};
pub use tonemap::{ToneMapping, TonemapPlugin};

use crate::plugin::SettingValue;
use loupe_core::{LoupeError, Result};

pub(crate) fn expect_float(name: &str, value: SettingValue) -> Result<f32> {
    match value {
        SettingValue::Float(v) => Ok(v),
        SettingValue::Int(v) => Ok(v as f32),
        other => Err(LoupeError::PluginError(format!(
            "setting '{}' expects a number, got {}",
            name, other
        ))),
    }
}

pub(crate) fn expect_bool(name: &str, value: SettingValue) -> Result<bool> {
    match value {
        SettingValue::Bool(b) => Ok(b),
        other => Err(LoupeError::PluginError(format!(
            "setting '{}' expects true or false, got {}",
            name, other
        ))),
    }
}
