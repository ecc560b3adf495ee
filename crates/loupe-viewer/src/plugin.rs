//! Plugin trait, capabilities, and inspector settings

use crate::renderer::{PassDesc, Renderer};
use loupe_core::{LoupeError, Result};
use serde::Serialize;
use std::any::Any;
use std::fmt;

/// Identifies a plugin type. A viewer holds at most one plugin per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PluginKind {
    AssetManager,
    GBuffer,
    Progressive,
    Tonemap,
    Ssr,
    Ssao,
    Bloom,
    TemporalAa,
    Anisotropy,
    FrameFade,
    Ground,
    GltfAnimation,
    CanvasSnipper,
    Inspector,
}

impl PluginKind {
    pub fn name(&self) -> &'static str {
        match self {
            PluginKind::AssetManager => "asset-manager",
            PluginKind::GBuffer => "gbuffer",
            PluginKind::Progressive => "progressive",
            PluginKind::Tonemap => "tonemap",
            PluginKind::Ssr => "ssr",
            PluginKind::Ssao => "ssao",
            PluginKind::Bloom => "bloom",
            PluginKind::TemporalAa => "temporal-aa",
            PluginKind::Anisotropy => "anisotropy",
            PluginKind::FrameFade => "frame-fade",
            PluginKind::Ground => "ground",
            PluginKind::GltfAnimation => "gltf-animation",
            PluginKind::CanvasSnipper => "canvas-snipper",
            PluginKind::Inspector => "inspector",
        }
    }

    pub const ALL: [PluginKind; 14] = [
        PluginKind::AssetManager,
        PluginKind::GBuffer,
        PluginKind::Progressive,
        PluginKind::Tonemap,
        PluginKind::Ssr,
        PluginKind::Ssao,
        PluginKind::Bloom,
        PluginKind::TemporalAa,
        PluginKind::Anisotropy,
        PluginKind::FrameFade,
        PluginKind::Ground,
        PluginKind::GltfAnimation,
        PluginKind::CanvasSnipper,
        PluginKind::Inspector,
    ];
}

impl fmt::Display for PluginKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for PluginKind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl std::str::FromStr for PluginKind {
    type Err = LoupeError;

    fn from_str(s: &str) -> Result<Self> {
        PluginKind::ALL
            .iter()
            .copied()
            .find(|k| k.name() == s)
            .ok_or_else(|| LoupeError::PluginError(format!("unknown plugin '{}'", s)))
    }
}

/// Something a plugin produces that later plugins may consume
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Asset loading
    Assets,
    /// Depth and normal buffers
    GBuffer,
    /// Progressive frame accumulation
    Accumulation,
    /// HDR to display mapping
    Tonemapping,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Capability::Assets => "assets",
            Capability::GBuffer => "gbuffer",
            Capability::Accumulation => "accumulation",
            Capability::Tonemapping => "tonemapping",
        };
        f.write_str(name)
    }
}

/// A tunable value exposed to the inspector
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SettingValue {
    Bool(bool),
    Float(f32),
    Int(u32),
    Text(String),
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::Bool(b) => write!(f, "{}", b),
            SettingValue::Float(v) => write!(f, "{:.3}", v),
            SettingValue::Int(v) => write!(f, "{}", v),
            SettingValue::Text(s) => write!(f, "{}", s),
        }
    }
}

/// A named setting
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Setting {
    pub name: &'static str,
    pub value: SettingValue,
}

impl Setting {
    pub fn new(name: &'static str, value: SettingValue) -> Self {
        Self { name, value }
    }
}

/// A viewer capability installed through [`crate::ViewerApp::add_plugin`].
///
/// Installation is strictly sequential; every capability listed in
/// `requires` must have been provided by an earlier plugin.
pub trait ViewerPlugin: Any {
    fn kind(&self) -> PluginKind;

    fn requires(&self) -> &'static [Capability] {
        &[]
    }

    fn provides(&self) -> &'static [Capability] {
        &[]
    }

    /// Push the current settings into the renderer. Runs when the plugin
    /// is installed and after every accepted setting change.
    fn apply_settings(&self, _renderer: &mut Renderer) {}

    /// Render passes this plugin contributes when the pipeline is refreshed
    fn passes(&self) -> Vec<PassDesc> {
        Vec::new()
    }

    /// Settings shown by the inspector
    fn settings(&self) -> Vec<Setting> {
        Vec::new()
    }

    /// Change a setting. Returns true when the render pipeline must be refreshed.
    fn set_setting(&mut self, name: &str, _value: SettingValue) -> Result<bool> {
        Err(LoupeError::PluginError(format!(
            "{} has no setting '{}'",
            self.kind(),
            name
        )))
    }

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}
