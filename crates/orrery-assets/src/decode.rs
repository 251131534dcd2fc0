//! Accessor decoding
//!
//! Resolves an accessor through the document's buffer-view table and turns
//! the referenced byte span into typed float or index arrays.

use glam::{Vec2, Vec3, Vec4};

use crate::buffer::BinaryBuffer;
use crate::document::{Accessor, BufferView, Document};
use crate::error::AssetError;

/// glTF component type codes accepted for index accessors.
const COMPONENT_U32: u32 = 5125;
const COMPONENT_U16: u32 = 5123;
const COMPONENT_I16: u32 = 5122;

/// Decodes accessors of a single document against its binary buffer.
pub struct AccessorDecoder<'a> {
    document: &'a Document,
    buffer: &'a BinaryBuffer,
}

impl<'a> AccessorDecoder<'a> {
    pub fn new(document: &'a Document, buffer: &'a BinaryBuffer) -> Self {
        Self { document, buffer }
    }

    fn accessor(&self, index: usize) -> Result<&Accessor, AssetError> {
        self.document
            .accessors
            .get(index)
            .ok_or(AssetError::MissingEntry {
                kind: "accessor",
                index,
            })
    }

    fn view(&self, accessor: &Accessor) -> Result<&BufferView, AssetError> {
        self.document
            .buffer_views
            .get(accessor.buffer_view)
            .ok_or(AssetError::MissingEntry {
                kind: "bufferView",
                index: accessor.buffer_view,
            })
    }

    /// Decode a float accessor: `count * arity` little-endian f32 values,
    /// where arity comes from the accessor's SCALAR/VEC2/VEC3/VEC4 tag.
    pub fn floats(&self, accessor_index: usize) -> Result<Vec<f32>, AssetError> {
        let accessor = self.accessor(accessor_index)?;
        let arity = element_arity(&accessor.element_type)?;
        let view = self.view(accessor)?;
        let offset = view.byte_offset + accessor.byte_offset;
        let count = accessor.count.checked_mul(arity).unwrap_or(usize::MAX);
        self.buffer.read_f32s(offset, count)
    }

    /// Decode an index accessor into u32 values. The accessor's component
    /// type selects the byte width: 5125 reads u32, 5123 reads u16
    /// (zero-extended), 5122 reads i16 (sign-extended, preserving whatever
    /// the document author meant by a negative index).
    pub fn indices(&self, accessor_index: usize) -> Result<Vec<u32>, AssetError> {
        let accessor = self.accessor(accessor_index)?;
        let view = self.view(accessor)?;
        let offset = view.byte_offset + accessor.byte_offset;

        match accessor.component_type {
            COMPONENT_U32 => {
                let bytes = self.buffer.slice_elements(offset, accessor.count, 4)?;
                Ok(bytes
                    .chunks_exact(4)
                    .map(|b| u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
                    .collect())
            }
            COMPONENT_U16 => {
                let bytes = self.buffer.slice_elements(offset, accessor.count, 2)?;
                Ok(bytes
                    .chunks_exact(2)
                    .map(|b| u32::from(u16::from_le_bytes([b[0], b[1]])))
                    .collect())
            }
            COMPONENT_I16 => {
                let bytes = self.buffer.slice_elements(offset, accessor.count, 2)?;
                Ok(bytes
                    .chunks_exact(2)
                    .map(|b| i16::from_le_bytes([b[0], b[1]]) as u32)
                    .collect())
            }
            other => Err(AssetError::UnsupportedComponentType(other)),
        }
    }
}

/// Number of components per element for an accessor type tag.
fn element_arity(tag: &str) -> Result<usize, AssetError> {
    match tag {
        "SCALAR" => Ok(1),
        "VEC2" => Ok(2),
        "VEC3" => Ok(3),
        "VEC4" => Ok(4),
        other => Err(AssetError::UnsupportedAccessorType(other.to_string())),
    }
}

/// Partition a flat float sequence into 2-component vectors.
pub fn group_vec2(floats: &[f32]) -> Result<Vec<Vec2>, AssetError> {
    check_arity(floats.len(), 2)?;
    Ok(floats
        .chunks_exact(2)
        .map(|c| Vec2::new(c[0], c[1]))
        .collect())
}

/// Partition a flat float sequence into 3-component vectors.
pub fn group_vec3(floats: &[f32]) -> Result<Vec<Vec3>, AssetError> {
    check_arity(floats.len(), 3)?;
    Ok(floats
        .chunks_exact(3)
        .map(|c| Vec3::new(c[0], c[1], c[2]))
        .collect())
}

/// Partition a flat float sequence into 4-component vectors.
pub fn group_vec4(floats: &[f32]) -> Result<Vec<Vec4>, AssetError> {
    check_arity(floats.len(), 4)?;
    Ok(floats
        .chunks_exact(4)
        .map(|c| Vec4::new(c[0], c[1], c[2], c[3]))
        .collect())
}

fn check_arity(length: usize, arity: usize) -> Result<(), AssetError> {
    if length % arity != 0 {
        return Err(AssetError::RaggedVectorData { length, arity });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Accessor, BufferView};

    fn document_with_accessor(element_type: &str, component_type: u32, count: usize) -> Document {
        Document {
            buffer_views: vec![BufferView {
                byte_offset: 0,
                byte_length: 0,
            }],
            accessors: vec![Accessor {
                buffer_view: 0,
                count,
                byte_offset: 0,
                element_type: element_type.to_string(),
                component_type,
            }],
            ..Default::default()
        }
    }

    #[test]
    fn decodes_u32_indices() {
        let doc = document_with_accessor("SCALAR", 5125, 3);
        let bytes: Vec<u8> = [1u32, 2, 3].iter().flat_map(|v| v.to_le_bytes()).collect();
        let buffer = BinaryBuffer::new(bytes);
        let indices = AccessorDecoder::new(&doc, &buffer).indices(0).unwrap();
        assert_eq!(indices, vec![1, 2, 3]);
    }

    #[test]
    fn decodes_u16_indices() {
        let doc = document_with_accessor("SCALAR", 5123, 4);
        let bytes: Vec<u8> = [7u16, 8, 9, 65535]
            .iter()
            .flat_map(|v| v.to_le_bytes())
            .collect();
        let buffer = BinaryBuffer::new(bytes);
        let indices = AccessorDecoder::new(&doc, &buffer).indices(0).unwrap();
        assert_eq!(indices, vec![7, 8, 9, 65535]);
    }

    #[test]
    fn decodes_i16_indices_with_sign_extension() {
        let doc = document_with_accessor("SCALAR", 5122, 2);
        let bytes: Vec<u8> = [5i16, -1].iter().flat_map(|v| v.to_le_bytes()).collect();
        let buffer = BinaryBuffer::new(bytes);
        let indices = AccessorDecoder::new(&doc, &buffer).indices(0).unwrap();
        assert_eq!(indices, vec![5, u32::MAX]);
    }

    #[test]
    fn rejects_unknown_component_type() {
        let doc = document_with_accessor("SCALAR", 5120, 1);
        let buffer = BinaryBuffer::new(vec![0; 4]);
        let err = AccessorDecoder::new(&doc, &buffer).indices(0).unwrap_err();
        assert!(matches!(err, AssetError::UnsupportedComponentType(5120)));
    }

    #[test]
    fn rejects_unknown_accessor_type_tag() {
        let doc = document_with_accessor("MAT4", 5126, 1);
        let buffer = BinaryBuffer::new(vec![0; 64]);
        let err = AccessorDecoder::new(&doc, &buffer).floats(0).unwrap_err();
        assert!(matches!(err, AssetError::UnsupportedAccessorType(tag) if tag == "MAT4"));
    }

    #[test]
    fn hostile_counts_error_instead_of_overflowing() {
        let mut doc = document_with_accessor("VEC3", 5126, usize::MAX);
        let buffer = BinaryBuffer::new(vec![0; 16]);
        let err = AccessorDecoder::new(&doc, &buffer).floats(0).unwrap_err();
        assert!(matches!(err, AssetError::BufferOutOfBounds { .. }));

        doc.accessors[0].component_type = 5125;
        let err = AccessorDecoder::new(&doc, &buffer).indices(0).unwrap_err();
        assert!(matches!(err, AssetError::BufferOutOfBounds { .. }));
    }

    #[test]
    fn floats_respect_combined_byte_offsets() {
        let mut doc = document_with_accessor("VEC2", 5126, 1);
        doc.buffer_views[0].byte_offset = 4;
        doc.accessors[0].byte_offset = 4;
        let bytes: Vec<u8> = [0.0f32, 0.0, 1.5, -2.5]
            .iter()
            .flat_map(|v| v.to_le_bytes())
            .collect();
        let buffer = BinaryBuffer::new(bytes);
        let floats = AccessorDecoder::new(&doc, &buffer).floats(0).unwrap();
        assert_eq!(floats, vec![1.5, -2.5]);
    }

    #[test]
    fn grouping_inverts_flattening() {
        let original = vec![
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(4.0, 5.0, 6.0),
            Vec3::new(7.0, 8.0, 9.0),
        ];
        let flat: Vec<f32> = original.iter().flat_map(|v| v.to_array()).collect();
        assert_eq!(group_vec3(&flat).unwrap(), original);
    }

    #[test]
    fn grouping_rejects_ragged_input() {
        let err = group_vec3(&[1.0, 2.0]).unwrap_err();
        assert!(matches!(
            err,
            AssetError::RaggedVectorData {
                length: 2,
                arity: 3
            }
        ));
    }
}
