//! Vertex layout shared by the loaders and generators

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};

/// A single mesh vertex: position, normal, colour tint, and texture
/// coordinates, tightly packed so the external GPU layer can upload a
/// `&[Vertex]` as raw bytes.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub colour: [f32; 3],
    pub uv: [f32; 2],
}

impl Vertex {
    /// Create a new vertex.
    pub fn new(position: Vec3, normal: Vec3, colour: Vec3, uv: Vec2) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
            colour: colour.to_array(),
            uv: uv.to_array(),
        }
    }

    /// Create a vertex with a white tint and zeroed texture coordinates.
    pub fn from_position_normal(position: Vec3, normal: Vec3) -> Self {
        Self::new(position, normal, Vec3::ONE, Vec2::ZERO)
    }

    /// Vertex position as a vector.
    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    /// Vertex normal as a vector.
    pub fn normal(&self) -> Vec3 {
        Vec3::from_array(self.normal)
    }
}
