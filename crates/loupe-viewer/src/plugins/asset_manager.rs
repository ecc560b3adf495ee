//! Asset manager plugin: loads model files and caches them by content hash

use crate::plugin::{Capability, PluginKind, Setting, SettingValue, ViewerPlugin};
use loupe_core::{ContentHash, LoupeError, Result};
use loupe_import::{import_gltf, ImportResult};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Handle to a loaded asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AssetHandle(pub ContentHash);

/// An imported model and where it came from
#[derive(Debug, Clone)]
pub struct LoadedAsset {
    pub path: PathBuf,
    pub import: ImportResult,
}

/// Loads glTF/GLB files through `loupe-import`.
///
/// Loading a path whose bytes were already imported returns the cached
/// handle without importing again.
#[derive(Debug, Default)]
pub struct AssetManagerPlugin {
    assets: HashMap<ContentHash, LoadedAsset>,
    /// Load order, for stable listings
    order: Vec<ContentHash>,
}

impl AssetManagerPlugin {
    pub fn new() -> Self {
        Self::default()
    }

    /// Import a model file and add it to the cache
    pub fn add_from_path<P: AsRef<Path>>(&mut self, path: P) -> Result<AssetHandle> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(LoupeError::AssetError(format!(
                "Asset not found: {}",
                path.display()
            )));
        }

        let hash = ContentHash::from_file(path)?;
        if self.assets.contains_key(&hash) {
            log::debug!("Asset {} already loaded ({})", path.display(), hash.short());
            return Ok(AssetHandle(hash));
        }

        let import = import_gltf(path)?;
        log::info!(
            "Loaded asset '{}' ({} meshes, {} triangles, {})",
            import.name,
            import.meshes.len(),
            import.triangle_count(),
            hash.short()
        );
        self.assets.insert(
            hash,
            LoadedAsset {
                path: path.to_path_buf(),
                import,
            },
        );
        self.order.push(hash);
        Ok(AssetHandle(hash))
    }

    pub fn get(&self, handle: AssetHandle) -> Option<&LoadedAsset> {
        self.assets.get(&handle.0)
    }

    /// Loaded assets in load order
    pub fn assets(&self) -> impl Iterator<Item = &LoadedAsset> {
        self.order.iter().filter_map(move |h| self.assets.get(h))
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

impl ViewerPlugin for AssetManagerPlugin {
    fn kind(&self) -> PluginKind {
        PluginKind::AssetManager
    }

    fn provides(&self) -> &'static [Capability] {
        &[Capability::Assets]
    }

    fn settings(&self) -> Vec<Setting> {
        vec![Setting::new(
            "loaded",
            SettingValue::Int(self.assets.len() as u32),
        )]
    }

    impl_plugin_any!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_gltf(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join("loupe_asset_manager_test");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        fs::write(&path, r#"{"asset":{"version":"2.0"}}"#).unwrap();
        path
    }

    #[test]
    fn same_bytes_share_one_entry() {
        let a = write_gltf("a.gltf");
        let b = write_gltf("b.gltf");

        let mut manager = AssetManagerPlugin::new();
        let ha = manager.add_from_path(&a).unwrap();
        let hb = manager.add_from_path(&b).unwrap();
        assert_eq!(ha, hb);
        assert_eq!(manager.len(), 1);
        assert_eq!(manager.get(ha).unwrap().import.name, "a");
    }

    #[test]
    fn missing_file_is_an_asset_error() {
        let mut manager = AssetManagerPlugin::new();
        let err = manager
            .add_from_path("/definitely/not/here/watch.glb")
            .unwrap_err();
        assert!(matches!(err, LoupeError::AssetError(_)));
        assert!(manager.is_empty());
    }
}
