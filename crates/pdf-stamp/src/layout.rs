//! Fixed-size stamp layout for the batch stamper
//!
//! Widths are given in points; heights follow from each image's own aspect
//! ratio. Initials are anchored per page, so pages of different sizes each get
//! their initials in their own bottom-right corner.

use crate::geometry::{PageSize, Rect, height_for_width};
use crate::options::SignaturePosition;

/// Bottom-right initials box for one page.
pub fn initials_rect(
    page: PageSize,
    image_size: (u32, u32),
    width_pt: f32,
    margin_pt: f32,
) -> Rect {
    let height = height_for_width(width_pt, image_size.0, image_size.1);
    Rect::new(
        page.width_pt - width_pt - margin_pt,
        page.height_pt - height - margin_pt,
        width_pt,
        height,
    )
}

/// Signature box with its top-left corner at `position`.
pub fn signature_rect(position: SignaturePosition, image_size: (u32, u32), width_pt: f32) -> Rect {
    let height = height_for_width(width_pt, image_size.0, image_size.1);
    Rect::new(position.x, position.y, width_pt, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_initials_on_letter() {
        let rect = initials_rect(PageSize::letter(), (300, 300), 72.0, 12.0);
        assert_eq!(rect, Rect::new(528.0, 708.0, 72.0, 72.0));
        assert_eq!(rect.right(), 600.0);
        assert_eq!(rect.bottom(), 780.0);
    }

    #[test]
    fn test_wide_initials_are_shorter() {
        let rect = initials_rect(PageSize::letter(), (200, 100), 72.0, 12.0);
        assert_eq!(rect.height, 36.0);
        assert_eq!(rect.y, 792.0 - 36.0 - 12.0);
    }

    #[test]
    fn test_initials_follow_page_size() {
        let a4 = initials_rect(PageSize::new(595.0, 842.0), (1, 1), 72.0, 12.0);
        assert_eq!(a4.x, 511.0);
        assert_eq!(a4.y, 758.0);
    }

    #[test]
    fn test_signature_rect() {
        let rect = signature_rect(SignaturePosition { x: 548.0, y: 300.0 }, (600, 200), 180.0);
        assert_eq!(rect, Rect::new(548.0, 300.0, 180.0, 60.0));
    }
}
