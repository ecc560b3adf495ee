//! Buffer and post-processing effect plugins

use super::{expect_bool, expect_float};
use crate::plugin::{Capability, PluginKind, Setting, SettingValue, ViewerPlugin};
use crate::renderer::PassDesc;
use loupe_core::{LoupeError, Result};

/// Depth/normal buffer pass. Producer for the screen-space effects.
#[derive(Debug, Default)]
pub struct GBufferPlugin;

impl ViewerPlugin for GBufferPlugin {
    fn kind(&self) -> PluginKind {
        PluginKind::GBuffer
    }

    fn provides(&self) -> &'static [Capability] {
        &[Capability::GBuffer]
    }

    fn passes(&self) -> Vec<PassDesc> {
        vec![PassDesc::new("gbuffer", 10, PluginKind::GBuffer)]
    }

    impl_plugin_any!();
}

/// Screen-space reflections
#[derive(Debug)]
pub struct SsrPlugin {
    pub intensity: f32,
    pub step_count: u32,
}

impl Default for SsrPlugin {
    fn default() -> Self {
        Self {
            intensity: 1.0,
            step_count: 16,
        }
    }
}

impl ViewerPlugin for SsrPlugin {
    fn kind(&self) -> PluginKind {
        PluginKind::Ssr
    }

    fn requires(&self) -> &'static [Capability] {
        &[Capability::GBuffer]
    }

    fn passes(&self) -> Vec<PassDesc> {
        vec![PassDesc::new("ssr", 40, PluginKind::Ssr)]
    }

    fn settings(&self) -> Vec<Setting> {
        vec![
            Setting::new("intensity", SettingValue::Float(self.intensity)),
            Setting::new("step_count", SettingValue::Int(self.step_count)),
        ]
    }

    impl_plugin_any!();
}

/// Screen-space ambient occlusion
#[derive(Debug)]
pub struct SsaoPlugin {
    pub radius: f32,
    pub intensity: f32,
}

impl Default for SsaoPlugin {
    fn default() -> Self {
        Self {
            radius: 0.5,
            intensity: 1.0,
        }
    }
}

impl ViewerPlugin for SsaoPlugin {
    fn kind(&self) -> PluginKind {
        PluginKind::Ssao
    }

    fn requires(&self) -> &'static [Capability] {
        &[Capability::GBuffer]
    }

    fn passes(&self) -> Vec<PassDesc> {
        vec![PassDesc::new("ssao", 20, PluginKind::Ssao)]
    }

    fn settings(&self) -> Vec<Setting> {
        vec![
            Setting::new("radius", SettingValue::Float(self.radius)),
            Setting::new("intensity", SettingValue::Float(self.intensity)),
        ]
    }

    impl_plugin_any!();
}

/// Bloom on bright areas of the HDR buffer
#[derive(Debug)]
pub struct BloomPlugin {
    pub enabled: bool,
    pub intensity: f32,
    pub threshold: f32,
}

impl Default for BloomPlugin {
    fn default() -> Self {
        Self {
            enabled: true,
            intensity: 0.04,
            threshold: 1.0,
        }
    }
}

impl ViewerPlugin for BloomPlugin {
    fn kind(&self) -> PluginKind {
        PluginKind::Bloom
    }

    fn passes(&self) -> Vec<PassDesc> {
        if self.enabled {
            vec![PassDesc::new("bloom", 60, PluginKind::Bloom)]
        } else {
            Vec::new()
        }
    }

    fn settings(&self) -> Vec<Setting> {
        vec![
            Setting::new("enabled", SettingValue::Bool(self.enabled)),
            Setting::new("intensity", SettingValue::Float(self.intensity)),
            Setting::new("threshold", SettingValue::Float(self.threshold)),
        ]
    }

    fn set_setting(&mut self, name: &str, value: SettingValue) -> Result<bool> {
        match name {
            "enabled" => {
                self.enabled = expect_bool(name, value)?;
                Ok(true)
            }
            "intensity" => {
                self.intensity = expect_float(name, value)?.max(0.0);
                Ok(false)
            }
            "threshold" => {
                self.threshold = expect_float(name, value)?.max(0.0);
                Ok(false)
            }
            _ => Err(LoupeError::PluginError(format!("bloom has no setting '{}'", name))),
        }
    }

    impl_plugin_any!();
}

/// Temporal anti-aliasing, jittered across accumulated frames
#[derive(Debug, Default)]
pub struct TemporalAaPlugin;

impl ViewerPlugin for TemporalAaPlugin {
    fn kind(&self) -> PluginKind {
        PluginKind::TemporalAa
    }

    fn requires(&self) -> &'static [Capability] {
        &[Capability::GBuffer, Capability::Accumulation]
    }

    fn passes(&self) -> Vec<PassDesc> {
        vec![PassDesc::new("temporal-aa", 55, PluginKind::TemporalAa)]
    }

    impl_plugin_any!();
}

/// Anisotropic texture filtering
#[derive(Debug)]
pub struct AnisotropyPlugin {
    pub level: u32,
}

impl Default for AnisotropyPlugin {
    fn default() -> Self {
        Self { level: 16 }
    }
}

impl ViewerPlugin for AnisotropyPlugin {
    fn kind(&self) -> PluginKind {
        PluginKind::Anisotropy
    }

    fn settings(&self) -> Vec<Setting> {
        vec![Setting::new("level", SettingValue::Int(self.level))]
    }

    impl_plugin_any!();
}

/// Cross-fades between the accumulated image and the live frame
#[derive(Debug)]
pub struct FrameFadePlugin {
    pub duration: f32,
}

impl Default for FrameFadePlugin {
    fn default() -> Self {
        Self { duration: 0.3 }
    }
}

impl ViewerPlugin for FrameFadePlugin {
    fn kind(&self) -> PluginKind {
        PluginKind::FrameFade
    }

    fn requires(&self) -> &'static [Capability] {
        &[Capability::Accumulation]
    }

    fn passes(&self) -> Vec<PassDesc> {
        vec![PassDesc::new("frame-fade", 80, PluginKind::FrameFade)]
    }

    fn settings(&self) -> Vec<Setting> {
        vec![Setting::new("duration", SettingValue::Float(self.duration))]
    }

    impl_plugin_any!();
}

/// Ground plane receiving the model's shadow
#[derive(Debug)]
pub struct GroundPlugin {
    pub visible: bool,
}

impl Default for GroundPlugin {
    fn default() -> Self {
        Self { visible: true }
    }
}

impl ViewerPlugin for GroundPlugin {
    fn kind(&self) -> PluginKind {
        PluginKind::Ground
    }

    fn settings(&self) -> Vec<Setting> {
        vec![Setting::new("visible", SettingValue::Bool(self.visible))]
    }

    impl_plugin_any!();
}

/// Plays animations embedded in loaded glTF files
#[derive(Debug, Default)]
pub struct GltfAnimationPlugin;

impl ViewerPlugin for GltfAnimationPlugin {
    fn kind(&self) -> PluginKind {
        PluginKind::GltfAnimation
    }

    fn requires(&self) -> &'static [Capability] {
        &[Capability::Assets]
    }

    impl_plugin_any!();
}
