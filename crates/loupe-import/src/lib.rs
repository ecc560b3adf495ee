//! Loupe Import - glTF/GLB model import
//!
//! Decoding is delegated to the `gltf` crate; this crate reduces a model
//! to the summary the viewer needs (meshes, bounds, materials, content hash).

mod gltf_import;
mod types;

pub use gltf_import::import_gltf;
pub use types::{ImportResult, ImportedMesh, MeshBounds};
