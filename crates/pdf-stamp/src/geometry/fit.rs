//! Aspect-preserving fit of an image inside a target box

use super::Rect;

/// Largest rectangle with the image's aspect ratio that fits in `bounds`,
/// centered on both axes.
///
/// Degenerate image dimensions leave `bounds` untouched.
pub fn fit_preserving_aspect(bounds: &Rect, image_width: u32, image_height: u32) -> Rect {
    if image_width == 0 || image_height == 0 || bounds.width <= 0.0 || bounds.height <= 0.0 {
        return *bounds;
    }

    let scale = (bounds.width / image_width as f32).min(bounds.height / image_height as f32);
    let width = image_width as f32 * scale;
    let height = image_height as f32 * scale;

    Rect::new(
        bounds.center_x() - width / 2.0,
        bounds.center_y() - height / 2.0,
        width,
        height,
    )
}

/// Height of an image scaled to `width`, keeping its aspect ratio.
pub fn height_for_width(width: f32, image_width: u32, image_height: u32) -> f32 {
    if image_width == 0 {
        return width;
    }
    width * image_height as f32 / image_width as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wide_image_in_square_box() {
        let fitted = fit_preserving_aspect(&Rect::new(0.0, 0.0, 100.0, 100.0), 200, 100);
        assert_eq!(fitted, Rect::new(0.0, 25.0, 100.0, 50.0));
    }

    #[test]
    fn test_tall_image_in_wide_box() {
        let fitted = fit_preserving_aspect(&Rect::new(10.0, 10.0, 180.0, 60.0), 50, 100);
        assert!((fitted.height - 60.0).abs() < 1e-3);
        assert!((fitted.width - 30.0).abs() < 1e-3);
        assert!((fitted.x - 85.0).abs() < 1e-3);
        assert!((fitted.y - 10.0).abs() < 1e-3);
    }

    #[test]
    fn test_degenerate_image_keeps_bounds() {
        let bounds = Rect::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(fit_preserving_aspect(&bounds, 0, 10), bounds);
    }

    #[test]
    fn test_height_for_width() {
        assert_eq!(height_for_width(72.0, 100, 100), 72.0);
        assert_eq!(height_for_width(180.0, 600, 200), 60.0);
    }
}
