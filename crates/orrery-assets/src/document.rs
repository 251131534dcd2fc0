//! Typed model of the glTF JSON document
//!
//! The document is deserialized once at load time into these structs; every
//! "missing field falls back to a default" rule of the format is expressed
//! here as a serde default rather than checked ad hoc at each access site.

use serde::Deserialize;

/// The subset of a glTF 2.0 document the loader consumes.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(default)]
    pub buffers: Vec<Buffer>,
    #[serde(default)]
    pub buffer_views: Vec<BufferView>,
    #[serde(default)]
    pub accessors: Vec<Accessor>,
    #[serde(default)]
    pub meshes: Vec<MeshDef>,
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub images: Vec<Image>,
}

/// A backing binary blob, stored in a side-car file next to the document.
#[derive(Debug, Clone, Deserialize)]
pub struct Buffer {
    pub uri: String,
}

/// A byte sub-range of the backing buffer.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BufferView {
    #[serde(default)]
    pub byte_offset: usize,
    pub byte_length: usize,
}

/// Describes where, how many, and what shape of typed values to extract from
/// a buffer view.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Accessor {
    #[serde(default)]
    pub buffer_view: usize,
    pub count: usize,
    #[serde(default)]
    pub byte_offset: usize,
    /// Element arity tag: SCALAR, VEC2, VEC3, or VEC4.
    #[serde(rename = "type")]
    pub element_type: String,
    /// Numeric component type code (5125 u32, 5123 u16, 5122 i16, 5126 f32).
    pub component_type: u32,
}

/// A mesh definition; only the first primitive is consumed.
#[derive(Debug, Clone, Deserialize)]
pub struct MeshDef {
    pub primitives: Vec<Primitive>,
}

/// One drawable geometry unit within a mesh definition.
#[derive(Debug, Clone, Deserialize)]
pub struct Primitive {
    pub attributes: Attributes,
    pub indices: usize,
}

/// Accessor indices for the vertex attributes the loader consumes.
#[derive(Debug, Clone, Deserialize)]
pub struct Attributes {
    #[serde(rename = "POSITION")]
    pub position: usize,
    #[serde(rename = "NORMAL")]
    pub normal: usize,
    #[serde(rename = "TEXCOORD_0")]
    pub texcoord_0: usize,
}

/// A scene-graph node. Local transform fields are optional; absent fields
/// default to zero translation, identity rotation, and unit scale. An
/// explicit `matrix` replaces the TRS composition entirely.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Node {
    pub translation: Option<[f32; 3]>,
    /// Quaternion in glTF storage order (x, y, z, w).
    pub rotation: Option<[f32; 4]>,
    pub scale: Option<[f32; 3]>,
    /// Column-major 4x4 local transform.
    pub matrix: Option<[f32; 16]>,
    pub mesh: Option<usize>,
    #[serde(default)]
    pub children: Vec<usize>,
}

/// An image referenced by a material, relative to the document's directory.
#[derive(Debug, Clone, Deserialize)]
pub struct Image {
    pub uri: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_node_fields_default() {
        let node: Node = serde_json::from_str(r#"{ "mesh": 0 }"#).unwrap();
        assert_eq!(node.mesh, Some(0));
        assert!(node.translation.is_none());
        assert!(node.rotation.is_none());
        assert!(node.scale.is_none());
        assert!(node.matrix.is_none());
        assert!(node.children.is_empty());
    }

    #[test]
    fn accessor_byte_offset_defaults_to_zero() {
        let accessor: Accessor = serde_json::from_str(
            r#"{ "bufferView": 2, "count": 12, "type": "VEC3", "componentType": 5126 }"#,
        )
        .unwrap();
        assert_eq!(accessor.buffer_view, 2);
        assert_eq!(accessor.byte_offset, 0);
        assert_eq!(accessor.element_type, "VEC3");
    }

    #[test]
    fn camel_case_buffer_view_fields() {
        let view: BufferView =
            serde_json::from_str(r#"{ "byteOffset": 24, "byteLength": 96 }"#).unwrap();
        assert_eq!(view.byte_offset, 24);
        assert_eq!(view.byte_length, 96);
    }
}
