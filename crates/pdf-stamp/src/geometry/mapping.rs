//! Pixmap-space to point-space mapping
//!
//! Pages in one document may differ in size, so a box drawn on one page's
//! preview is never copied pixel-for-pixel onto another. It is first
//! normalized to fractions of the source pixmap, then re-scaled against the
//! target page's point dimensions.
//!
//! Source and target are assumed to be rendered at the same zoom relative to
//! their own point size. A mismatch distorts the result.

use crate::types::{Result, StampError};

use super::{PageSize, PixmapSize, Rect};

/// A rectangle expressed as fractions of page width and height
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl NormalizedRect {
    /// Normalize a pixel rectangle against the pixmap it was drawn on.
    pub fn from_pixels(rect: &Rect, pixmap: PixmapSize) -> Result<Self> {
        if pixmap.is_empty() {
            return Err(StampError::Config(format!(
                "Cannot normalize against an empty pixmap ({}x{})",
                pixmap.width, pixmap.height
            )));
        }

        let pw = pixmap.width as f32;
        let ph = pixmap.height as f32;
        Ok(Self {
            x: rect.x / pw,
            y: rect.y / ph,
            width: rect.width / pw,
            height: rect.height / ph,
        })
    }

    /// Normalize a point-space rectangle against its page.
    pub fn from_points(rect: &Rect, page: PageSize) -> Result<Self> {
        if page.width_pt <= 0.0 || page.height_pt <= 0.0 {
            return Err(StampError::Config(format!(
                "Cannot normalize against a degenerate page ({}x{} pt)",
                page.width_pt, page.height_pt
            )));
        }

        Ok(Self {
            x: rect.x / page.width_pt,
            y: rect.y / page.height_pt,
            width: rect.width / page.width_pt,
            height: rect.height / page.height_pt,
        })
    }

    /// Re-scale against a target page's point dimensions.
    pub fn to_points(&self, page: PageSize) -> Rect {
        Rect::new(
            self.x * page.width_pt,
            self.y * page.height_pt,
            self.width * page.width_pt,
            self.height * page.height_pt,
        )
    }

    /// Re-scale against a pixmap's pixel dimensions.
    pub fn to_pixels(&self, pixmap: PixmapSize) -> Rect {
        let pw = pixmap.width as f32;
        let ph = pixmap.height as f32;
        Rect::new(self.x * pw, self.y * ph, self.width * pw, self.height * ph)
    }

    /// Whether every edge lies within the unit square
    pub fn is_within_unit(&self) -> bool {
        let unit = 0.0..=1.0;
        unit.contains(&self.x)
            && unit.contains(&self.y)
            && unit.contains(&(self.x + self.width))
            && unit.contains(&(self.y + self.height))
    }
}

/// Map a box drawn on a source pixmap onto a target page in points.
pub fn map_to_page(rect: &Rect, source: PixmapSize, target: PageSize) -> Result<Rect> {
    Ok(NormalizedRect::from_pixels(rect, source)?.to_points(target))
}

/// Inverse of [`map_to_page`]: project a point-space rectangle onto a pixmap.
pub fn map_to_pixmap(rect: &Rect, page: PageSize, pixmap: PixmapSize) -> Result<Rect> {
    Ok(NormalizedRect::from_points(rect, page)?.to_pixels(pixmap))
}
