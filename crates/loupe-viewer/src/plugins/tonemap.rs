//! Tone mapping plugin

use super::{expect_bool, expect_float};
use crate::plugin::{Capability, PluginKind, Setting, SettingValue, ViewerPlugin};
use crate::renderer::PassDesc;
use loupe_core::{LoupeError, Result};
use std::fmt;
use std::str::FromStr;

/// Tone mapping operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToneMapping {
    #[default]
    Aces,
    Reinhard,
    Linear,
}

impl fmt::Display for ToneMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ToneMapping::Aces => "aces",
            ToneMapping::Reinhard => "reinhard",
            ToneMapping::Linear => "linear",
        };
        f.write_str(name)
    }
}

impl FromStr for ToneMapping {
    type Err = LoupeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "aces" => Ok(ToneMapping::Aces),
            "reinhard" => Ok(ToneMapping::Reinhard),
            "linear" | "none" => Ok(ToneMapping::Linear),
            _ => Err(LoupeError::PluginError(format!(
                "unknown tone mapping operator '{}'",
                s
            ))),
        }
    }
}

/// Maps HDR output to display range.
///
/// When the viewer writes RGBM-encoded output the mapping happens later, so
/// the bootstrapper installs this plugin disabled in that case.
#[derive(Debug)]
pub struct TonemapPlugin {
    pub enabled: bool,
    pub exposure: f32,
    pub operator: ToneMapping,
}

impl TonemapPlugin {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            exposure: 1.0,
            operator: ToneMapping::default(),
        }
    }
}

impl Default for TonemapPlugin {
    fn default() -> Self {
        Self::new(true)
    }
}

impl ViewerPlugin for TonemapPlugin {
    fn kind(&self) -> PluginKind {
        PluginKind::Tonemap
    }

    fn provides(&self) -> &'static [Capability] {
        &[Capability::Tonemapping]
    }

    fn passes(&self) -> Vec<PassDesc> {
        if self.enabled {
            vec![PassDesc::new("tonemap", 70, PluginKind::Tonemap)]
        } else {
            Vec::new()
        }
    }

    fn settings(&self) -> Vec<Setting> {
        vec![
            Setting::new("enabled", SettingValue::Bool(self.enabled)),
            Setting::new("exposure", SettingValue::Float(self.exposure)),
            Setting::new("operator", SettingValue::Text(self.operator.to_string())),
        ]
    }

    fn set_setting(&mut self, name: &str, value: SettingValue) -> Result<bool> {
        match name {
            "enabled" => {
                let enabled = expect_bool(name, value)?;
                let changed = enabled != self.enabled;
                self.enabled = enabled;
                Ok(changed)
            }
            "exposure" => {
                let exposure = expect_float(name, value)?;
                if !(0.0..=16.0).contains(&exposure) {
                    return Err(LoupeError::ValueOutOfRange {
                        field: "exposure".into(),
                        min: 0.0,
                        max: 16.0,
                        value: f64::from(exposure),
                    });
                }
                self.exposure = exposure;
                Ok(false)
            }
            "operator" => match value {
                SettingValue::Text(s) => {
                    self.operator = s.parse()?;
                    Ok(false)
                }
                other => Err(LoupeError::PluginError(format!(
                    "setting 'operator' expects a name, got {}",
                    other
                ))),
            },
            _ => Err(LoupeError::PluginError(format!(
                "tonemap has no setting '{}'",
                name
            ))),
        }
    }

    impl_plugin_any!();
}
