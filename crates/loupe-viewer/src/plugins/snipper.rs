//! Canvas snipper: exports the current frame state as JSON

use super::expect_bool;
use crate::plugin::{PluginKind, Setting, SettingValue, ViewerPlugin};
use loupe_core::{LoupeError, Result, Vec3};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Camera pose at capture time
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CameraPose {
    pub position: Vec3,
    pub target: Vec3,
    pub fov: f32,
}

/// One loaded asset, as recorded in a snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetSummary {
    pub name: String,
    pub hash: String,
    pub meshes: usize,
    pub vertices: usize,
    pub triangles: usize,
}

/// Everything the snipper records about a frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub frame: u64,
    pub canvas: String,
    pub camera: CameraPose,
    pub passes: Vec<&'static str>,
    pub samples: u32,
    pub max_samples: u32,
    pub shadow_recomputes: u64,
    pub assets: Vec<AssetSummary>,
}

#[derive(Debug)]
pub struct CanvasSnipperPlugin {
    pub file_name: String,
    pub pretty: bool,
    captures: u32,
}

impl Default for CanvasSnipperPlugin {
    fn default() -> Self {
        Self {
            file_name: "snapshot.json".into(),
            pretty: true,
            captures: 0,
        }
    }
}

impl CanvasSnipperPlugin {
    /// Serialize a snapshot with the configured formatting
    pub fn to_json(&self, snapshot: &Snapshot) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(snapshot)
        } else {
            serde_json::to_string(snapshot)
        };
        json.map_err(|e| LoupeError::SnapshotError(e.to_string()))
    }

    /// Write a snapshot to `path`. A directory path receives `file_name`.
    pub fn export(&mut self, snapshot: &Snapshot, path: &Path) -> Result<PathBuf> {
        let out = if path.is_dir() {
            path.join(&self.file_name)
        } else {
            path.to_path_buf()
        };
        if let Some(parent) = out.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&out, self.to_json(snapshot)?)?;
        self.captures += 1;
        log::info!("Snapshot of frame {} written to {}", snapshot.frame, out.display());
        Ok(out)
    }

    pub fn captures(&self) -> u32 {
        self.captures
    }
}

impl ViewerPlugin for CanvasSnipperPlugin {
    fn kind(&self) -> PluginKind {
        PluginKind::CanvasSnipper
    }

    fn settings(&self) -> Vec<Setting> {
        vec![
            Setting::new("file_name", SettingValue::Text(self.file_name.clone())),
            Setting::new("pretty", SettingValue::Bool(self.pretty)),
        ]
    }

    fn set_setting(&mut self, name: &str, value: SettingValue) -> Result<bool> {
        match (name, value) {
            ("file_name", SettingValue::Text(s)) if !s.is_empty() => {
                self.file_name = s;
                Ok(false)
            }
            ("pretty", value) => {
                self.pretty = expect_bool(name, value)?;
                Ok(false)
            }
            (_, value) => Err(LoupeError::PluginError(format!(
                "canvas-snipper cannot set '{}' to {}",
                name, value
            ))),
        }
    }

    impl_plugin_any!();
}
