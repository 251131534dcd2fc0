//! Mesh records and the external GPU sink capability

use std::sync::Arc;

use glam::Mat4;

use crate::texture::Texture;
use crate::vertex::Vertex;

/// A renderable mesh: vertices, a triangle-list index sequence (three per
/// face), and the textures its material resolved to. The mesh owns its
/// vertex and index data; textures are shared with the loader's cache.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    pub textures: Vec<Arc<Texture>>,
}

impl Mesh {
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>, textures: Vec<Arc<Texture>>) -> Self {
        Self {
            vertices,
            indices,
            textures,
        }
    }

    /// Number of triangles in the index list.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// The capability the core hands finished meshes to. Implemented by the
/// external window/GPU layer, which owns buffer upload and draw submission.
pub trait MeshSink {
    /// Accept one mesh together with its world transform. The transform is
    /// not baked into the vertex positions.
    fn submit(&mut self, mesh: &Mesh, world: Mat4);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triangle_count_from_indices() {
        let mesh = Mesh::new(Vec::new(), vec![0, 1, 2, 0, 2, 3], Vec::new());
        assert_eq!(mesh.triangle_count(), 2);
    }
}
