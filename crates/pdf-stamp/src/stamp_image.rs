//! Stamp images loaded from disk

use crate::types::Result;
use image::{DynamicImage, ImageReader};
use std::path::Path;

/// A decoded stamp image (initials, signature, or any other overlay)
#[derive(Debug, Clone)]
pub struct StampImage {
    image: DynamicImage,
}

impl StampImage {
    /// Decode an image file, sniffing the format from its contents.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let image = ImageReader::open(path)?.with_guessed_format()?.decode()?;
        Ok(Self { image })
    }

    /// Intrinsic (width, height) in pixels
    pub fn dimensions(&self) -> (u32, u32) {
        (self.image.width(), self.image.height())
    }

    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    /// Whether any pixel is less than fully opaque
    pub fn has_transparency(&self) -> bool {
        if !self.image.color().has_alpha() {
            return false;
        }
        self.image.to_rgba8().pixels().any(|p| p.0[3] < u8::MAX)
    }

    /// Whether the image carries no color information
    pub fn is_grayscale(&self) -> bool {
        !self.image.color().has_color()
    }
}
