//! Shared constants for PDF stamping
//!
//! Defaults for the batch stamper and the interactive placer live here so
//! both entry points agree on them.

use crate::types::StampTag;

// =============================================================================
// Unit Conversion
// =============================================================================

/// PDF user space units per inch
pub const POINTS_PER_INCH: f32 = 72.0;

/// Zoom factor at which one rendered pixel equals one point
pub const DEFAULT_ZOOM: f32 = 1.0;

// =============================================================================
// Default Page Dimensions
// =============================================================================

/// Default page width in points (US Letter: 8.5" × 11")
pub const DEFAULT_PAGE_WIDTH_PT: f32 = 612.0;

/// Default page height in points (US Letter)
pub const DEFAULT_PAGE_HEIGHT_PT: f32 = 792.0;

/// Default page dimensions as tuple (width, height)
pub const DEFAULT_PAGE_DIMENSIONS: (f32, f32) = (DEFAULT_PAGE_WIDTH_PT, DEFAULT_PAGE_HEIGHT_PT);

// =============================================================================
// Batch Stamping
// =============================================================================

/// Initials width in points
pub const DEFAULT_INITIALS_WIDTH_PT: f32 = 72.0;

/// Distance of the initials from the right and bottom page edges (points)
pub const DEFAULT_INITIALS_MARGIN_PT: f32 = 12.0;

/// Signature width in points
pub const DEFAULT_SIGNATURE_WIDTH_PT: f32 = 180.0;

// =============================================================================
// Interactive Placement
// =============================================================================

/// Where a freshly added box appears on the page (pixmap pixels)
pub const NEW_BOX_OFFSET_PX: f32 = 20.0;

/// Smallest edge a box can be resized down to (pixmap pixels)
pub const MIN_BOX_SIZE_PX: f32 = 8.0;

/// Initial box size for a tag, in pixmap pixels
pub fn default_box_size(tag: StampTag) -> (f32, f32) {
    match tag {
        StampTag::Initials => (72.0, 48.0),
        StampTag::Signature => (180.0, 60.0),
        StampTag::Other => (120.0, 120.0),
    }
}

/// Prefix for image XObject names added to page resources
pub const IMAGE_XOBJECT_PREFIX: &str = "Stamp";
