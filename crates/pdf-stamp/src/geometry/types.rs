//! Geometry data types shared by the mapper and the renderer
//!
//! All rectangles here use a top-left origin with y growing downward. That is
//! the convention of rendered pixmaps and of the displayed page in points.
//! Conversion to PDF user space happens in `render::page`.

use crate::constants::{DEFAULT_PAGE_DIMENSIONS, POINTS_PER_INCH};

/// A rectangle with a top-left origin
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    /// X position (left edge)
    pub x: f32,
    /// Y position (top edge)
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge x coordinate
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge y coordinate
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Center x coordinate
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Center y coordinate
    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    /// Whether this rectangle lies entirely within `0..width` × `0..height`
    pub fn fits_within(&self, width: f32, height: f32) -> bool {
        self.x >= 0.0 && self.y >= 0.0 && self.right() <= width && self.bottom() <= height
    }

    pub fn translated(&self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }
}

/// Displayed page dimensions in points
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageSize {
    pub width_pt: f32,
    pub height_pt: f32,
}

impl PageSize {
    pub fn new(width_pt: f32, height_pt: f32) -> Self {
        Self {
            width_pt,
            height_pt,
        }
    }

    /// US Letter, used when a page carries no usable box
    pub fn letter() -> Self {
        Self::new(DEFAULT_PAGE_DIMENSIONS.0, DEFAULT_PAGE_DIMENSIONS.1)
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::letter()
    }
}

/// Dimensions of a rendered page bitmap in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PixmapSize {
    pub width: u32,
    pub height: u32,
}

impl PixmapSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Size of the bitmap a renderer produces for `page` at `zoom`
    /// (1.0 = one pixel per point).
    pub fn for_page(page: PageSize, zoom: f32) -> Self {
        let scale = |pt: f32| ((pt * zoom).round() as u32).max(1);
        Self::new(scale(page.width_pt), scale(page.height_pt))
    }

    /// Size of the bitmap for `page` rendered at `dpi`
    pub fn at_dpi(page: PageSize, dpi: f32) -> Self {
        Self::for_page(page, dpi / POINTS_PER_INCH)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}
