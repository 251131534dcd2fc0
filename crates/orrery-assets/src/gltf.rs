//! glTF model loading
//!
//! Reads a .gltf JSON document plus its side-car binary buffer, walks the
//! node tree composing world transforms, and assembles one renderable mesh
//! (with its world matrix) per mesh-bearing node.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use glam::{Mat4, Quat, Vec2, Vec3};
use tracing::{debug, warn};

use orrery_core::{Mesh, MeshSink, Texture, TextureKind, Vertex};

use crate::buffer::BinaryBuffer;
use crate::decode::{group_vec2, group_vec3, AccessorDecoder};
use crate::document::Document;
use crate::error::AssetError;
use crate::texture::TextureCache;

/// A loaded glTF model: meshes in traversal order, each with the world
/// transform composed along its node path.
pub struct GltfModel {
    pub meshes: Vec<Mesh>,
    /// One world matrix per entry of `meshes`, in the same order.
    pub transforms: Vec<Mat4>,
}

impl GltfModel {
    /// Load a glTF document and its binary buffer from disk. Decode failures
    /// abort the load; failures to load an individual texture only skip that
    /// texture.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AssetError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(AssetError::NotFound(path.to_path_buf()));
        }

        let json = std::fs::read_to_string(path)
            .map_err(|e| AssetError::Io(path.to_path_buf(), e))?;
        let document: Document = serde_json::from_str(&json)
            .map_err(|e| AssetError::Json(path.to_path_buf(), e))?;

        let directory = path.parent().unwrap_or(Path::new(".")).to_path_buf();
        let buffer = read_buffer(&document, &directory)?;

        let mut loader = Loader::new(document, buffer, directory);
        loader.traverse_node(0, Mat4::IDENTITY)?;

        debug!(
            "glTF '{}': {} meshes, {} textures",
            path.display(),
            loader.meshes.len(),
            loader.textures.len()
        );

        Ok(Self {
            meshes: loader.meshes,
            transforms: loader.transforms,
        })
    }

    /// Hand every mesh and its world transform to the external GPU sink.
    pub fn submit_to(&self, sink: &mut impl MeshSink) {
        for (mesh, &world) in self.meshes.iter().zip(&self.transforms) {
            sink.submit(mesh, world);
        }
    }
}

/// Materialize the document's first buffer from its side-car file.
fn read_buffer(document: &Document, directory: &Path) -> Result<BinaryBuffer, AssetError> {
    let buffer = document
        .buffers
        .first()
        .ok_or(AssetError::MissingEntry {
            kind: "buffer",
            index: 0,
        })?;
    let buffer_path = directory.join(&buffer.uri);
    if !buffer_path.exists() {
        return Err(AssetError::NotFound(buffer_path));
    }
    let bytes = std::fs::read(&buffer_path).map_err(|e| AssetError::Io(buffer_path, e))?;
    Ok(BinaryBuffer::new(bytes))
}

/// Classify a material image by filename. Unrecognized names carry no
/// texture the renderer knows how to bind and are skipped.
fn classify_image(uri: &str) -> Option<TextureKind> {
    if uri.contains("baseColor") {
        Some(TextureKind::Diffuse)
    } else if uri.contains("metallicRoughness") {
        Some(TextureKind::Specular)
    } else {
        None
    }
}

/// Transient state for one model load. Owns the decoded document, the raw
/// buffer, and the texture cache; only the mesh list and transforms escape.
struct Loader {
    document: Document,
    buffer: BinaryBuffer,
    directory: PathBuf,
    textures: TextureCache,
    meshes: Vec<Mesh>,
    transforms: Vec<Mat4>,
}

impl Loader {
    fn new(document: Document, buffer: BinaryBuffer, directory: PathBuf) -> Self {
        Self {
            document,
            buffer,
            directory,
            textures: TextureCache::new(),
            meshes: Vec::new(),
            transforms: Vec::new(),
        }
    }

    /// Depth-first walk from `node_index`, composing `parent * local` world
    /// matrices. An explicit node matrix replaces the TRS composition; the
    /// two are mutually exclusive per node.
    fn traverse_node(&mut self, node_index: usize, parent: Mat4) -> Result<(), AssetError> {
        let node = self
            .document
            .nodes
            .get(node_index)
            .ok_or(AssetError::MissingEntry {
                kind: "node",
                index: node_index,
            })?
            .clone();

        let local = match node.matrix {
            Some(values) => Mat4::from_cols_array(&values),
            None => {
                let translation = node.translation.map_or(Vec3::ZERO, Vec3::from);
                let rotation = node
                    .rotation
                    .map_or(Quat::IDENTITY, |[x, y, z, w]| Quat::from_xyzw(x, y, z, w));
                let scale = node.scale.map_or(Vec3::ONE, Vec3::from);
                Mat4::from_translation(translation)
                    * Mat4::from_quat(rotation)
                    * Mat4::from_scale(scale)
            }
        };
        let world = parent * local;

        if let Some(mesh_index) = node.mesh {
            self.load_mesh(mesh_index, world)?;
        }

        for &child in &node.children {
            self.traverse_node(child, world)?;
        }
        Ok(())
    }

    /// Decode the first primitive of mesh `mesh_index` into a Mesh record
    /// and record its world transform.
    fn load_mesh(&mut self, mesh_index: usize, world: Mat4) -> Result<(), AssetError> {
        let mesh_def = self
            .document
            .meshes
            .get(mesh_index)
            .ok_or(AssetError::MissingEntry {
                kind: "mesh",
                index: mesh_index,
            })?;
        let primitive = mesh_def
            .primitives
            .first()
            .ok_or(AssetError::MissingEntry {
                kind: "primitive",
                index: 0,
            })?
            .clone();

        let decoder = AccessorDecoder::new(&self.document, &self.buffer);
        let positions = group_vec3(&decoder.floats(primitive.attributes.position)?)?;
        let normals = group_vec3(&decoder.floats(primitive.attributes.normal)?)?;
        let uvs = group_vec2(&decoder.floats(primitive.attributes.texcoord_0)?)?;

        let vertices = assemble_vertices(&positions, &normals, &uvs)?;
        let indices = decoder.indices(primitive.indices)?;
        let textures = self.load_textures();

        debug!(
            "Loaded mesh {} with {} vertices, {} triangles",
            mesh_index,
            vertices.len(),
            indices.len() / 3
        );

        self.meshes.push(Mesh::new(vertices, indices, textures));
        self.transforms.push(world);
        Ok(())
    }

    /// Resolve every classified material image through the texture cache.
    /// A texture that fails to load is skipped rather than failing the
    /// model.
    fn load_textures(&mut self) -> Vec<Arc<Texture>> {
        let mut textures = Vec::new();
        for image in &self.document.images {
            let Some(kind) = classify_image(&image.uri) else {
                debug!("Skipping unclassified image '{}'", image.uri);
                continue;
            };
            let path = self.directory.join(&image.uri);
            match self.textures.load(&path, kind) {
                Ok(texture) => textures.push(texture),
                Err(e) => warn!("Skipping texture '{}': {}", path.display(), e),
            }
        }
        textures
    }
}

/// Zip per-vertex attribute arrays into Vertex records with a white tint.
/// The arrays must all match the position count.
fn assemble_vertices(
    positions: &[Vec3],
    normals: &[Vec3],
    uvs: &[Vec2],
) -> Result<Vec<Vertex>, AssetError> {
    if positions.len() != normals.len() || positions.len() != uvs.len() {
        return Err(AssetError::AttributeCountMismatch {
            positions: positions.len(),
            normals: normals.len(),
            uvs: uvs.len(),
        });
    }
    Ok(positions
        .iter()
        .zip(normals)
        .zip(uvs)
        .map(|((&position, &normal), &uv)| Vertex::new(position, normal, Vec3::ONE, uv))
        .collect())
}
