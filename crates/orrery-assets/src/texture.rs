//! Texture loading and the path-keyed texture cache

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use orrery_core::{Texture, TextureKind};

use crate::error::AssetError;

/// Load an image file as a texture. The image is flipped vertically to match
/// the UV convention of the renderer, and must have 1, 3, or 4 colour
/// channels; anything else is a ChannelCount error.
pub fn load_texture(path: &Path, kind: TextureKind, unit: u32) -> Result<Texture, AssetError> {
    if !path.exists() {
        return Err(AssetError::NotFound(path.to_path_buf()));
    }

    let img = image::open(path)
        .map_err(|e| AssetError::ImageLoadFailed(path.to_path_buf(), e.to_string()))?
        .flipv();

    let channels = img.color().channel_count();
    let (width, height) = (img.width(), img.height());
    let pixels = match channels {
        1 => img.to_luma8().into_raw(),
        3 => img.to_rgb8().into_raw(),
        4 => img.to_rgba8().into_raw(),
        other => return Err(AssetError::ChannelCount(path.to_path_buf(), other)),
    };

    debug!(
        "Loaded {:?} texture '{}' ({}x{}, {} channels)",
        kind,
        path.display(),
        width,
        height,
        channels
    );

    Ok(Texture {
        path: path.to_path_buf(),
        kind,
        unit,
        width,
        height,
        channels,
        pixels,
    })
}

/// Deduplicates texture loads by resolved path. Two requests for the same
/// path return the same shared texture; the kind and unit recorded at first
/// load win. Scoped to one model load when loading in parallel.
#[derive(Debug, Default)]
pub struct TextureCache {
    entries: HashMap<PathBuf, Arc<Texture>>,
}

impl TextureCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the texture at `path`, loading it on first request. The unit
    /// slot assigned to a new texture is the number of textures loaded so
    /// far.
    pub fn load(&mut self, path: &Path, kind: TextureKind) -> Result<Arc<Texture>, AssetError> {
        if let Some(texture) = self.entries.get(path) {
            return Ok(texture.clone());
        }

        let unit = self.entries.len() as u32;
        let texture = Arc::new(load_texture(path, kind, unit)?);
        self.entries.insert(path.to_path_buf(), texture.clone());
        Ok(texture)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
