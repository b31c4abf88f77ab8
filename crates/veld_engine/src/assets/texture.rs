//! Texture resources.

use std::sync::OnceLock;

use super::model::ResourceId;

/// Pixel layout of decoded texture data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// 8-bit grayscale
    Luminance,
    /// 8-bit grayscale with alpha
    LuminanceAlpha,
    /// 8-bit RGB
    Rgb,
    /// 8-bit RGBA
    Rgba,
}

impl PixelFormat {
    /// Bytes per pixel.
    pub fn components(self) -> usize {
        match self {
            Self::Luminance => 1,
            Self::LuminanceAlpha => 2,
            Self::Rgb => 3,
            Self::Rgba => 4,
        }
    }
}

/// A shared, read-only texture resource with the same prepare-once
/// contract as [`super::Model`].
#[derive(Debug)]
pub struct Texture {
    name: String,
    width: u32,
    height: u32,
    format: PixelFormat,
    data: Vec<u8>,
    prepared: OnceLock<ResourceId>,
}

impl Texture {
    /// Wrap decoded image data. The data length must match
    /// `width * height * format.components()`; importers guarantee
    /// this, and a mismatch is a decoder bug.
    pub fn new(
        name: impl Into<String>,
        width: u32,
        height: u32,
        format: PixelFormat,
        data: Vec<u8>,
    ) -> Self {
        debug_assert_eq!(
            data.len(),
            width as usize * height as usize * format.components()
        );
        Self {
            name: name.into(),
            width,
            height,
            format,
            data,
            prepared: OnceLock::new(),
        }
    }

    /// Texture name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel layout.
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Decoded pixel data.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Bind the texture and return the reusable handle; memoized once.
    pub fn prepare(&self) -> ResourceId {
        *self.prepared.get_or_init(|| {
            log::debug!("prepared texture '{}' ({}x{})", self.name, self.width, self.height);
            ResourceId::allocate()
        })
    }

    /// Whether `prepare` has run.
    pub fn is_prepared(&self) -> bool {
        self.prepared.get().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prepare_is_memoized() {
        let texture = Texture::new("checker", 2, 2, PixelFormat::Rgb, vec![0; 12]);
        assert_eq!(texture.prepare(), texture.prepare());
        assert!(texture.is_prepared());
    }

    #[test]
    fn component_counts_match_format() {
        assert_eq!(PixelFormat::Luminance.components(), 1);
        assert_eq!(PixelFormat::Rgba.components(), 4);
    }
}
