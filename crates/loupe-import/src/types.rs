//! Import result types

use loupe_core::ContentHash;

/// Result of importing a model file
#[derive(Debug, Clone)]
pub struct ImportResult {
    /// File stem, used as the asset's display name
    pub name: String,
    /// Hash of the file bytes
    pub hash: ContentHash,
    pub meshes: Vec<ImportedMesh>,
    pub material_names: Vec<String>,
    pub texture_count: usize,
    pub node_count: usize,
    pub animation_count: usize,
}

impl ImportResult {
    /// Compute the combined bounding box across all meshes
    pub fn bounds(&self) -> Option<MeshBounds> {
        self.meshes
            .iter()
            .filter_map(|m| m.bounds)
            .reduce(|a, b| a.union(&b))
    }

    pub fn vertex_count(&self) -> usize {
        self.meshes.iter().map(|m| m.vertex_count).sum()
    }

    pub fn triangle_count(&self) -> usize {
        self.meshes.iter().map(|m| m.index_count / 3).sum()
    }
}

/// One mesh primitive
#[derive(Debug, Clone)]
pub struct ImportedMesh {
    pub name: String,
    pub vertex_count: usize,
    pub index_count: usize,
    pub material_index: Option<usize>,
    pub bounds: Option<MeshBounds>,
}

/// Axis-aligned bounding box computed from vertex positions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshBounds {
    pub min: [f32; 3],
    pub max: [f32; 3],
}

impl MeshBounds {
    /// Compute bounds from a set of vertex positions
    pub fn from_positions(positions: &[[f32; 3]]) -> Option<Self> {
        let first = *positions.first()?;
        let mut min = first;
        let mut max = first;
        for p in positions.iter().skip(1) {
            for i in 0..3 {
                min[i] = min[i].min(p[i]);
                max[i] = max[i].max(p[i]);
            }
        }
        Some(Self { min, max })
    }

    /// Size along each axis
    pub fn size(&self) -> [f32; 3] {
        [
            self.max[0] - self.min[0],
            self.max[1] - self.min[1],
            self.max[2] - self.min[2],
        ]
    }

    pub fn center(&self) -> [f32; 3] {
        [
            (self.min[0] + self.max[0]) * 0.5,
            (self.min[1] + self.max[1]) * 0.5,
            (self.min[2] + self.max[2]) * 0.5,
        ]
    }

    /// Merge with another bounds to get the union
    pub fn union(&self, other: &MeshBounds) -> MeshBounds {
        MeshBounds {
            min: [
                self.min[0].min(other.min[0]),
                self.min[1].min(other.min[1]),
                self.min[2].min(other.min[2]),
            ],
            max: [
                self.max[0].max(other.max[0]),
                self.max[1].max(other.max[1]),
                self.max[2].max(other.max[2]),
            ],
        }
    }
}

impl std::fmt::Display for MeshBounds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = self.size();
        write!(
            f,
            "{:.2} x {:.2} x {:.2} (min [{:.2}, {:.2}, {:.2}], max [{:.2}, {:.2}, {:.2}])",
            s[0], s[1], s[2],
            self.min[0], self.min[1], self.min[2],
            self.max[0], self.max[1], self.max[2],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_from_positions() {
        let b = MeshBounds::from_positions(&[[0.0, 0.0, 0.0], [1.0, -2.0, 3.0], [-1.0, 2.0, 0.5]])
            .unwrap();
        assert_eq!(b.min, [-1.0, -2.0, 0.0]);
        assert_eq!(b.max, [1.0, 2.0, 3.0]);
        assert_eq!(b.size(), [2.0, 4.0, 3.0]);
        assert_eq!(b.center(), [0.0, 0.0, 1.5]);
    }

    #[test]
    fn empty_positions_have_no_bounds() {
        assert!(MeshBounds::from_positions(&[]).is_none());
    }

    #[test]
    fn union_covers_both() {
        let a = MeshBounds { min: [0.0; 3], max: [1.0; 3] };
        let b = MeshBounds { min: [-1.0, 0.5, 0.5], max: [0.5, 2.0, 0.5] };
        let u = a.union(&b);
        assert_eq!(u.min, [-1.0, 0.0, 0.0]);
        assert_eq!(u.max, [1.0, 2.0, 1.0]);
    }
}
