use std::path::PathBuf;

/// Errors that can occur while loading models and textures.
///
/// Decode errors abort the whole model load; a failure to load one texture is
/// downgraded to a warning at the call site and that texture is skipped.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("asset not found: {0}")]
    NotFound(PathBuf),

    #[error("I/O error loading '{0}': {1}")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("failed to parse glTF document '{0}': {1}")]
    Json(PathBuf, #[source] serde_json::Error),

    #[error("glTF document references missing {kind} {index}")]
    MissingEntry { kind: &'static str, index: usize },

    #[error("unsupported accessor type '{0}' (expected SCALAR, VEC2, VEC3, or VEC4)")]
    UnsupportedAccessorType(String),

    #[error("unsupported index component type {0}")]
    UnsupportedComponentType(u32),

    #[error("buffer read out of bounds: {offset} + {length} exceeds buffer size {size}")]
    BufferOutOfBounds {
        offset: usize,
        length: usize,
        size: usize,
    },

    #[error("float array of length {length} cannot be grouped into {arity}-component vectors")]
    RaggedVectorData { length: usize, arity: usize },

    #[error(
        "vertex attribute counts disagree: {positions} positions, {normals} normals, {uvs} UVs"
    )]
    AttributeCountMismatch {
        positions: usize,
        normals: usize,
        uvs: usize,
    },

    #[error("failed to load image '{0}': {1}")]
    ImageLoadFailed(PathBuf, String),

    #[error("image '{0}' has {1} colour channels (expected 1, 3, or 4)")]
    ChannelCount(PathBuf, u8),

    #[error("failed to load OBJ file '{0}': {1}")]
    ObjLoadFailed(PathBuf, String),
}
