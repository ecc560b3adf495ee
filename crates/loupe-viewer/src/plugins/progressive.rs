//! Progressive refinement: accumulate samples while the camera is still

use crate::plugin::{Capability, PluginKind, Setting, SettingValue, ViewerPlugin};
use crate::renderer::{PassDesc, Renderer};
use loupe_core::{LoupeError, Result};

/// Accumulates up to `max_frames` samples; the renderer restarts the count
/// whenever the camera is notified of a change.
#[derive(Debug)]
pub struct ProgressivePlugin {
    pub max_frames: u32,
}

impl ProgressivePlugin {
    pub fn new(max_frames: u32) -> Self {
        Self {
            max_frames: max_frames.max(1),
        }
    }
}

impl Default for ProgressivePlugin {
    fn default() -> Self {
        Self::new(64)
    }
}

impl ViewerPlugin for ProgressivePlugin {
    fn kind(&self) -> PluginKind {
        PluginKind::Progressive
    }

    fn provides(&self) -> &'static [Capability] {
        &[Capability::Accumulation]
    }

    fn apply_settings(&self, renderer: &mut Renderer) {
        renderer.set_max_samples(self.max_frames);
    }

    fn passes(&self) -> Vec<PassDesc> {
        vec![PassDesc::new("progressive", 50, PluginKind::Progressive)]
    }

    fn settings(&self) -> Vec<Setting> {
        vec![Setting::new("max_frames", SettingValue::Int(self.max_frames))]
    }

    fn set_setting(&mut self, name: &str, value: SettingValue) -> Result<bool> {
        if name != "max_frames" {
            return Err(LoupeError::PluginError(format!(
                "progressive has no setting '{}'",
                name
            )));
        }
        let frames = match value {
            SettingValue::Int(frames) => frames,
            other => {
                return Err(LoupeError::PluginError(format!(
                    "setting 'max_frames' expects a whole number, got {}",
                    other
                )))
            }
        };
        if frames < 1 {
            return Err(LoupeError::ValueOutOfRange {
                field: "max_frames".into(),
                min: 1.0,
                max: f64::from(u32::MAX),
                value: f64::from(frames),
            });
        }
        self.max_frames = frames;
        // The pass list does not depend on the budget
        Ok(false)
    }

    impl_plugin_any!();
}
