//! The base plugin bundle

use super::{
    AnisotropyPlugin, FrameFadePlugin, GltfAnimationPlugin, GroundPlugin, TemporalAaPlugin,
};
use crate::viewer::ViewerApp;
use loupe_core::Result;

/// Add the base bundle: temporal AA, anisotropic filtering, frame fade,
/// ground and glTF animation. Kinds already present are left untouched.
pub fn add_base_plugins(viewer: &mut ViewerApp) -> Result<()> {
    viewer.add_plugin(TemporalAaPlugin)?;
    viewer.add_plugin(AnisotropyPlugin::default())?;
    viewer.add_plugin(FrameFadePlugin::default())?;
    viewer.add_plugin(GroundPlugin::default())?;
    viewer.add_plugin(GltfAnimationPlugin)?;
    Ok(())
}
