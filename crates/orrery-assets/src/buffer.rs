//! Bounds-checked reads over the side-car binary buffer

use crate::error::AssetError;

/// The raw binary blob a glTF document's buffer views index into. All reads
/// are little-endian, matching the byte order the format mandates.
#[derive(Debug, Clone, Default)]
pub struct BinaryBuffer {
    data: Vec<u8>,
}

impl BinaryBuffer {
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// A byte window of `length` bytes starting at `offset`, or a decode
    /// error if the window runs past the end of the buffer.
    pub fn slice(&self, offset: usize, length: usize) -> Result<&[u8], AssetError> {
        let end = offset
            .checked_add(length)
            .ok_or(AssetError::BufferOutOfBounds {
                offset,
                length,
                size: self.data.len(),
            })?;
        if end > self.data.len() {
            return Err(AssetError::BufferOutOfBounds {
                offset,
                length,
                size: self.data.len(),
            });
        }
        Ok(&self.data[offset..end])
    }

    /// A byte window covering `count` elements of `width` bytes each. A
    /// `count * width` overflow saturates and is reported as the same
    /// out-of-bounds error an oversized span would be.
    pub fn slice_elements(
        &self,
        offset: usize,
        count: usize,
        width: usize,
    ) -> Result<&[u8], AssetError> {
        let length = count.checked_mul(width).unwrap_or(usize::MAX);
        self.slice(offset, length)
    }

    /// Reinterpret `count` consecutive 4-byte windows starting at `offset` as
    /// IEEE-754 floats.
    pub fn read_f32s(&self, offset: usize, count: usize) -> Result<Vec<f32>, AssetError> {
        let bytes = self.slice_elements(offset, count, 4)?;
        Ok(bytes
            .chunks_exact(4)
            .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn float_bytes(values: &[f32]) -> Vec<u8> {
        values.iter().flat_map(|v| v.to_le_bytes()).collect()
    }

    #[test]
    fn reads_floats_at_offset() {
        let buffer = BinaryBuffer::new(float_bytes(&[1.0, 2.5, -3.0, 4.25]));
        let floats = buffer.read_f32s(4, 2).unwrap();
        assert_eq!(floats, vec![2.5, -3.0]);
    }

    #[test]
    fn rejects_reads_past_the_end() {
        let buffer = BinaryBuffer::new(float_bytes(&[1.0, 2.0]));
        let err = buffer.read_f32s(4, 2).unwrap_err();
        match err {
            AssetError::BufferOutOfBounds {
                offset,
                length,
                size,
            } => {
                assert_eq!((offset, length, size), (4, 8, 8));
            }
            other => panic!("expected BufferOutOfBounds, got: {other:?}"),
        }
    }

    #[test]
    fn rejects_offset_overflow() {
        let buffer = BinaryBuffer::new(vec![0; 8]);
        assert!(buffer.slice(usize::MAX, 8).is_err());
    }

    #[test]
    fn rejects_element_count_overflow() {
        let buffer = BinaryBuffer::new(vec![0; 8]);
        let err = buffer.read_f32s(0, usize::MAX).unwrap_err();
        assert!(matches!(err, AssetError::BufferOutOfBounds { .. }));
    }
}
