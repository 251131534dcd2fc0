//! Subdivided icosphere generation
//!
//! Seeds a unit icosahedron and refines it by recursive edge splitting:
//! each pass replaces every triangle with four children whose shared edge
//! midpoints are deduplicated through a per-pass cache, so resolution `r`
//! yields exactly `10 * 4^r + 2` vertices and `20 * 4^r` triangles.

use std::collections::HashMap;
use std::sync::Arc;

use glam::{Mat4, Vec2, Vec3};
use tracing::debug;

use orrery_core::{Mesh, MeshSink, Texture, Vertex};

/// Colour tint applied to every sphere vertex (the sphere is untextured).
const SPHERE_COLOUR: Vec3 = Vec3::new(1.0, 0.5, 0.31);

/// A procedurally generated sphere mesh positioned in the world.
pub struct Icosphere {
    pub position: Vec3,
    radius: f32,
    resolution: u32,
    mesh: Mesh,
}

impl Icosphere {
    /// Generate a sphere of the given radius, subdivided `resolution` times.
    pub fn new(position: Vec3, radius: f32, resolution: u32) -> Self {
        Self {
            position,
            radius,
            resolution,
            mesh: generate(radius, resolution),
        }
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// Regenerate at a new resolution, replacing the mesh atomically.
    pub fn set_resolution(&mut self, resolution: u32) {
        self.resolution = resolution;
        self.mesh = generate(self.radius, resolution);
    }

    /// Regenerate with a new radius, replacing the mesh atomically.
    pub fn set_radius(&mut self, radius: f32) {
        self.radius = radius;
        self.mesh = generate(radius, self.resolution);
    }

    /// World transform placing the sphere at its position.
    pub fn world_transform(&self) -> Mat4 {
        Mat4::from_translation(self.position)
    }

    /// Hand the mesh to the external GPU sink.
    pub fn submit_to(&self, sink: &mut impl MeshSink) {
        sink.submit(&self.mesh, self.world_transform());
    }
}

/// Mutable geometry state for one generation call: the growing vertex list,
/// the current triangle list, and the midpoint cache for the pass in
/// progress.
struct SphereBuilder {
    vertices: Vec<Vec3>,
    triangles: Vec<[u32; 3]>,
    midpoints: HashMap<(u32, u32), u32>,
}

impl SphereBuilder {
    /// Unit icosahedron: 12 vertices built from the golden ratio, projected
    /// onto the unit sphere, and a fixed table of 20 faces.
    fn new() -> Self {
        let t = (1.0 + 5.0_f32.sqrt()) / 2.0;
        let vertices = vec![
            Vec3::new(-1.0, t, 0.0),
            Vec3::new(1.0, t, 0.0),
            Vec3::new(-1.0, -t, 0.0),
            Vec3::new(1.0, -t, 0.0),
            Vec3::new(0.0, -1.0, t),
            Vec3::new(0.0, 1.0, t),
            Vec3::new(0.0, -1.0, -t),
            Vec3::new(0.0, 1.0, -t),
            Vec3::new(t, 0.0, -1.0),
            Vec3::new(t, 0.0, 1.0),
            Vec3::new(-t, 0.0, -1.0),
            Vec3::new(-t, 0.0, 1.0),
        ]
        .into_iter()
        .map(|v| v.normalize())
        .collect();

        let triangles = vec![
            [0, 11, 5],
            [0, 5, 1],
            [0, 1, 7],
            [0, 7, 10],
            [0, 10, 11],
            [1, 5, 9],
            [5, 11, 4],
            [11, 10, 2],
            [10, 7, 6],
            [7, 1, 8],
            [3, 9, 4],
            [3, 4, 2],
            [3, 2, 6],
            [3, 6, 8],
            [3, 8, 9],
            [4, 9, 5],
            [2, 4, 11],
            [6, 2, 10],
            [8, 6, 7],
            [9, 8, 1],
        ];

        Self {
            vertices,
            triangles,
            midpoints: HashMap::new(),
        }
    }

    /// Split every triangle into four. The midpoint cache is rebuilt per
    /// pass; edges from earlier passes no longer exist.
    fn subdivide(&mut self) {
        self.midpoints.clear();
        let mut next = Vec::with_capacity(self.triangles.len() * 4);
        for [i1, i2, i3] in std::mem::take(&mut self.triangles) {
            let i12 = self.midpoint(i1, i2);
            let i13 = self.midpoint(i1, i3);
            let i23 = self.midpoint(i2, i3);
            next.push([i1, i12, i13]);
            next.push([i13, i12, i23]);
            next.push([i12, i2, i23]);
            next.push([i13, i23, i3]);
        }
        self.triangles = next;
    }

    /// Index of the midpoint vertex of edge (a, b), created on first request
    /// within the current pass and shared by the adjacent triangle.
    fn midpoint(&mut self, a: u32, b: u32) -> u32 {
        let key = (a.min(b), a.max(b));
        if let Some(&index) = self.midpoints.get(&key) {
            return index;
        }
        let mid = ((self.vertices[a as usize] + self.vertices[b as usize]) * 0.5).normalize();
        let index = self.vertices.len() as u32;
        self.vertices.push(mid);
        self.midpoints.insert(key, index);
        index
    }

    /// Per-vertex normals: accumulate the raw cross product of each final
    /// triangle's edge vectors into its three corners (larger faces weigh
    /// more), then normalize each sum.
    fn normals(&self) -> Vec<Vec3> {
        let mut normals = vec![Vec3::ZERO; self.vertices.len()];
        for &[i1, i2, i3] in &self.triangles {
            let v1 = self.vertices[i1 as usize];
            let v2 = self.vertices[i2 as usize];
            let v3 = self.vertices[i3 as usize];
            let face_normal = (v2 - v1).cross(v3 - v1);
            normals[i1 as usize] += face_normal;
            normals[i2 as usize] += face_normal;
            normals[i3 as usize] += face_normal;
        }
        normals.into_iter().map(|n| n.normalize()).collect()
    }
}

/// Run the full generation: seed, subdivide, scale to radius, assemble.
fn generate(radius: f32, resolution: u32) -> Mesh {
    let mut builder = SphereBuilder::new();
    for _ in 0..resolution {
        builder.subdivide();
    }

    let normals = builder.normals();
    let vertices: Vec<Vertex> = builder
        .vertices
        .iter()
        .zip(&normals)
        .map(|(&position, &normal)| {
            Vertex::new(position * radius, normal, SPHERE_COLOUR, Vec2::ZERO)
        })
        .collect();

    let indices: Vec<u32> = builder.triangles.iter().flatten().copied().collect();
    let textures = vec![Arc::new(Texture::blank())];

    debug!(
        "Generated icosphere: resolution {}, {} vertices, {} triangles",
        resolution,
        vertices.len(),
        indices.len() / 3
    );

    Mesh::new(vertices, indices, textures)
}
