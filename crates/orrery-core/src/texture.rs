//! Texture records with path identity

use std::path::PathBuf;

/// How a texture is sampled by the shading stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureKind {
    Diffuse,
    Specular,
}

impl TextureKind {
    /// Uniform name prefix the external renderer binds this kind under.
    pub fn as_str(&self) -> &'static str {
        match self {
            TextureKind::Diffuse => "diffuse",
            TextureKind::Specular => "specular",
        }
    }
}

/// A decoded texture. Identity is the resolved file path: two loads of the
/// same path are the same logical texture and are deduplicated by the
/// asset-side cache. GPU handles are derived externally and keyed to this
/// data.
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    /// Resolved path the image was loaded from (the texture's identity).
    pub path: PathBuf,
    pub kind: TextureKind,
    /// Texture unit slot assigned at load time.
    pub unit: u32,
    pub width: u32,
    pub height: u32,
    /// Number of colour channels in `pixels` (1, 3, or 4).
    pub channels: u8,
    pub pixels: Vec<u8>,
}

impl Texture {
    /// A 1x1 white diffuse texture for meshes that carry only a colour tint,
    /// such as procedurally generated geometry.
    pub fn blank() -> Self {
        Self {
            path: PathBuf::from("blank"),
            kind: TextureKind::Diffuse,
            unit: 0,
            width: 1,
            height: 1,
            channels: 4,
            pixels: vec![255, 255, 255, 255],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_texture_is_single_white_pixel() {
        let tex = Texture::blank();
        assert_eq!((tex.width, tex.height), (1, 1));
        assert_eq!(tex.pixels, vec![255, 255, 255, 255]);
        assert_eq!(tex.kind, TextureKind::Diffuse);
    }
}
