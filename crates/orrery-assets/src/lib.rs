//! Orrery Assets - Model and texture loading
//!
//! Decodes glTF 2.0 documents (JSON plus side-car binary buffer) into
//! renderable meshes with per-instance world transforms, loads Wavefront OBJ
//! scenes, and caches textures by resolved path.

mod buffer;
mod decode;
pub mod document;
mod error;
mod gltf;
mod obj;
mod texture;

pub use buffer::BinaryBuffer;
pub use decode::{group_vec2, group_vec3, group_vec4, AccessorDecoder};
pub use document::Document;
pub use error::AssetError;
pub use gltf::GltfModel;
pub use obj::ObjModel;
pub use texture::{load_texture, TextureCache};
