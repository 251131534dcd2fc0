//! Wavefront OBJ model loading
//!
//! Thin loader over tobj producing the same Mesh records as the glTF path.
//! OBJ geometry carries no scene graph, so every mesh sits at the identity
//! transform.

use std::path::Path;
use std::sync::Arc;

use glam::{Mat4, Vec2, Vec3};
use tracing::{debug, warn};

use orrery_core::{Mesh, MeshSink, Texture, TextureKind, Vertex};

use crate::error::AssetError;
use crate::texture::TextureCache;

/// A loaded OBJ scene: one Mesh per OBJ object, in file order.
pub struct ObjModel {
    pub meshes: Vec<Mesh>,
}

impl ObjModel {
    /// Load an OBJ file, triangulating faces and unifying the index streams.
    /// Material textures resolve through the given cache; a texture that
    /// fails to load is skipped.
    pub fn load(path: impl AsRef<Path>, cache: &mut TextureCache) -> Result<Self, AssetError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(AssetError::NotFound(path.to_path_buf()));
        }

        let options = tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        };
        let (models, materials) = tobj::load_obj(path, &options)
            .map_err(|e| AssetError::ObjLoadFailed(path.to_path_buf(), e.to_string()))?;
        let materials = materials.unwrap_or_default();
        let directory = path.parent().unwrap_or(Path::new("."));

        let mut meshes = Vec::new();
        for model in &models {
            let mesh = &model.mesh;
            let vertex_count = mesh.positions.len() / 3;

            let mut vertices = Vec::with_capacity(vertex_count);
            for i in 0..vertex_count {
                let position = Vec3::new(
                    mesh.positions[i * 3],
                    mesh.positions[i * 3 + 1],
                    mesh.positions[i * 3 + 2],
                );
                let normal = if mesh.normals.len() >= (i + 1) * 3 {
                    Vec3::new(
                        mesh.normals[i * 3],
                        mesh.normals[i * 3 + 1],
                        mesh.normals[i * 3 + 2],
                    )
                } else {
                    Vec3::ZERO
                };
                let uv = if mesh.texcoords.len() >= (i + 1) * 2 {
                    Vec2::new(mesh.texcoords[i * 2], mesh.texcoords[i * 2 + 1])
                } else {
                    Vec2::ZERO
                };
                vertices.push(Vertex::new(position, normal, Vec3::ONE, uv));
            }

            let textures = match mesh.material_id.and_then(|id| materials.get(id)) {
                Some(material) => material_textures(material, directory, cache),
                None => Vec::new(),
            };

            debug!(
                "Loaded OBJ object '{}' with {} vertices, {} triangles",
                model.name,
                vertices.len(),
                mesh.indices.len() / 3
            );

            meshes.push(Mesh::new(vertices, mesh.indices.clone(), textures));
        }

        Ok(Self { meshes })
    }

    /// Hand every mesh to the external GPU sink at the identity transform.
    pub fn submit_to(&self, sink: &mut impl MeshSink) {
        for mesh in &self.meshes {
            sink.submit(mesh, Mat4::IDENTITY);
        }
    }
}

/// Resolve a material's diffuse and specular maps through the texture cache.
fn material_textures(
    material: &tobj::Material,
    directory: &Path,
    cache: &mut TextureCache,
) -> Vec<Arc<Texture>> {
    let mut textures = Vec::new();
    let maps = [
        (material.diffuse_texture.as_deref(), TextureKind::Diffuse),
        (material.specular_texture.as_deref(), TextureKind::Specular),
    ];
    for (uri, kind) in maps {
        let Some(uri) = uri else { continue };
        let texture_path = directory.join(uri);
        match cache.load(&texture_path, kind) {
            Ok(texture) => textures.push(texture),
            Err(e) => warn!("Skipping texture '{}': {}", texture_path.display(), e),
        }
    }
    textures
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn write_test_obj(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("orrery_{}_{}", std::process::id(), name));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn missing_file_is_not_found() {
        let mut cache = TextureCache::new();
        let result = ObjModel::load("/nonexistent/model.obj", &mut cache);
        assert!(matches!(result, Err(AssetError::NotFound(_))));
    }

    #[test]
    fn loads_a_triangle() {
        let path = write_test_obj(
            "triangle.obj",
            "v 0 0 0\nv 1 0 0\nv 0 1 0\nvn 0 0 1\nvt 0 0\nf 1/1/1 2/1/1 3/1/1\n",
        );
        let mut cache = TextureCache::new();
        let model = ObjModel::load(&path, &mut cache).unwrap();
        assert_eq!(model.meshes.len(), 1);
        let mesh = &model.meshes[0];
        assert_eq!(mesh.vertices.len(), 3);
        assert_eq!(mesh.indices.len(), 3);
        assert_eq!(mesh.vertices[0].normal, [0.0, 0.0, 1.0]);
        assert!(mesh.textures.is_empty());
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn quad_is_triangulated() {
        let path = write_test_obj(
            "quad.obj",
            "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n",
        );
        let mut cache = TextureCache::new();
        let model = ObjModel::load(&path, &mut cache).unwrap();
        assert_eq!(model.meshes[0].indices.len(), 6);
        std::fs::remove_file(&path).ok();
    }
}
