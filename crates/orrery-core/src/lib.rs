//! Orrery Core - Shared data model for the Orrery playground
//!
//! This crate provides the types that flow between the loaders, the
//! procedural generators, and the external GPU layer:
//! - Vertex and Mesh records in a GPU-uploadable layout
//! - Texture records with path identity and a Diffuse/Specular kind
//! - The MeshSink capability the core hands finished meshes to
//! - A free-look camera for view/projection composition

pub mod camera;
pub mod mesh;
pub mod texture;
pub mod vertex;

pub use camera::Camera;
pub use glam::{Mat4, Quat, Vec2, Vec3, Vec4};
pub use mesh::{Mesh, MeshSink};
pub use texture::{Texture, TextureKind};
pub use vertex::Vertex;
