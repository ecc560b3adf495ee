//! glTF/GLB file importer

use crate::types::{ImportResult, ImportedMesh, MeshBounds};
use loupe_core::{ContentHash, LoupeError, Result};
use std::path::Path;

/// Import a glTF or GLB file
pub fn import_gltf<P: AsRef<Path>>(path: P) -> Result<ImportResult> {
    let path = path.as_ref();
    let (document, buffers, images) = gltf::import(path).map_err(|e| {
        LoupeError::ImportError(format!("Failed to import {}: {}", path.display(), e))
    })?;

    let hash = ContentHash::from_file(path)
        .map_err(|e| LoupeError::ImportError(format!("Failed to hash file: {}", e)))?;

    let name = path
        .file_stem()
        .and_then(|n| n.to_str())
        .unwrap_or("unnamed")
        .to_string();

    let mut meshes = Vec::new();
    for mesh in document.meshes() {
        let mesh_name = mesh
            .name()
            .map(String::from)
            .unwrap_or_else(|| format!("mesh_{}", mesh.index()));

        for primitive in mesh.primitives() {
            let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));

            let positions: Vec<[f32; 3]> = reader
                .read_positions()
                .map(|iter| iter.collect())
                .unwrap_or_default();

            let index_count = reader
                .read_indices()
                .map(|iter| iter.into_u32().count())
                .unwrap_or(positions.len());

            meshes.push(ImportedMesh {
                name: mesh_name.clone(),
                vertex_count: positions.len(),
                index_count,
                material_index: primitive.material().index(),
                bounds: MeshBounds::from_positions(&positions),
            });
        }
    }

    let material_names = document
        .materials()
        .map(|m| {
            m.name()
                .map(String::from)
                .unwrap_or_else(|| format!("material_{}", m.index().unwrap_or(0)))
        })
        .collect();

    let result = ImportResult {
        name,
        hash,
        meshes,
        material_names,
        texture_count: images.len(),
        node_count: document.nodes().count(),
        animation_count: document.animations().count(),
    };

    log::debug!(
        "Imported {}: {} meshes, {} vertices, {} textures",
        path.display(),
        result.meshes.len(),
        result.vertex_count(),
        result.texture_count
    );

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    /// Build a GLB holding one unindexed triangle.
    fn triangle_glb() -> Vec<u8> {
        let json = r#"{"asset":{"version":"2.0"},"buffers":[{"byteLength":36}],"bufferViews":[{"buffer":0,"byteOffset":0,"byteLength":36}],"accessors":[{"bufferView":0,"componentType":5126,"count":3,"type":"VEC3","min":[0.0,0.0,0.0],"max":[1.0,2.0,0.0]}],"meshes":[{"name":"case","primitives":[{"attributes":{"POSITION":0}}]}],"nodes":[{"mesh":0}],"scenes":[{"nodes":[0]}],"scene":0}"#;
        let mut json_bytes = json.as_bytes().to_vec();
        while json_bytes.len() % 4 != 0 {
            json_bytes.push(b' ');
        }

        let positions: [[f32; 3]; 3] = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 2.0, 0.0]];
        let mut bin = Vec::new();
        for p in positions.iter() {
            for c in p {
                bin.extend_from_slice(&c.to_le_bytes());
            }
        }

        let total = 12 + 8 + json_bytes.len() + 8 + bin.len();
        let mut out = Vec::with_capacity(total);
        out.extend_from_slice(&0x4654_6C67u32.to_le_bytes());
        out.extend_from_slice(&2u32.to_le_bytes());
        out.extend_from_slice(&(total as u32).to_le_bytes());
        out.extend_from_slice(&(json_bytes.len() as u32).to_le_bytes());
        out.extend_from_slice(&0x4E4F_534Au32.to_le_bytes());
        out.extend_from_slice(&json_bytes);
        out.extend_from_slice(&(bin.len() as u32).to_le_bytes());
        out.extend_from_slice(&0x004E_4942u32.to_le_bytes());
        out.extend_from_slice(&bin);
        out
    }

    fn write_temp(name: &str, bytes: &[u8]) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("loupe-import-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, bytes).unwrap();
        path
    }

    #[test]
    fn import_triangle_glb() {
        let path = write_temp("triangle.glb", &triangle_glb());
        let result = import_gltf(&path).unwrap();

        assert_eq!(result.name, "triangle");
        assert_eq!(result.meshes.len(), 1);
        assert_eq!(result.meshes[0].name, "case");
        assert_eq!(result.vertex_count(), 3);
        assert_eq!(result.triangle_count(), 1);
        assert_eq!(result.node_count, 1);

        let bounds = result.bounds().unwrap();
        assert_eq!(bounds.min, [0.0, 0.0, 0.0]);
        assert_eq!(bounds.max, [1.0, 2.0, 0.0]);
        assert_eq!(result.hash, ContentHash::from_bytes(&triangle_glb()));
    }

    #[test]
    fn missing_file_is_an_import_error() {
        let result = import_gltf("./does/not/exist.glb");
        assert!(matches!(result, Err(LoupeError::ImportError(_))));
    }
}
