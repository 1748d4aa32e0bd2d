//! Displayed page geometry
//!
//! Stamps are positioned in a top-left, y-down point space that matches what
//! a viewer shows: the crop box, rotated by `/Rotate`. This module reads that
//! geometry from the page tree and converts between the displayed space and
//! PDF user space.

use crate::constants::DEFAULT_PAGE_DIMENSIONS;
use crate::geometry::{PageSize, Rect};
use crate::types::Result;
use lopdf::{Document, Object, ObjectId};

/// Guards against cyclic `/Parent` chains in malformed files
pub(super) const MAX_TREE_DEPTH: usize = 64;

/// Page box and rotation of a single page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    /// Lower-left corner of the visible box in user space
    pub origin: (f32, f32),
    /// Unrotated box width in points
    pub width: f32,
    /// Unrotated box height in points
    pub height: f32,
    /// Clockwise display rotation: 0, 90, 180 or 270
    pub rotation: u16,
}

impl PageGeometry {
    /// Read the crop box (falling back to the media box) and rotation,
    /// following inheritance through the page tree.
    pub fn read(doc: &Document, page_id: ObjectId) -> Result<Self> {
        // Fails early for IDs that are not pages at all
        doc.get_dictionary(page_id)?;

        let page_box = inherited_attribute(doc, page_id, b"CropBox")
            .and_then(|obj| read_box(doc, obj))
            .or_else(|| {
                inherited_attribute(doc, page_id, b"MediaBox").and_then(|obj| read_box(doc, obj))
            });

        let (origin, width, height) = match page_box {
            Some([x0, y0, x1, y1]) => ((x0, y0), x1 - x0, y1 - y0),
            None => ((0.0, 0.0), DEFAULT_PAGE_DIMENSIONS.0, DEFAULT_PAGE_DIMENSIONS.1),
        };

        let rotation = inherited_attribute(doc, page_id, b"Rotate")
            .and_then(|obj| resolve(doc, obj).as_i64().ok())
            .map(normalize_rotation)
            .unwrap_or(0);

        Ok(Self {
            origin,
            width,
            height,
            rotation,
        })
    }

    /// Page size as displayed, with width and height swapped for quarter turns
    pub fn display_size(&self) -> PageSize {
        if self.rotation % 180 == 90 {
            PageSize::new(self.height, self.width)
        } else {
            PageSize::new(self.width, self.height)
        }
    }

    /// Convert a displayed point (top-left origin, y down) to user space.
    pub fn to_user_space(&self, u: f32, v: f32) -> (f32, f32) {
        let (x0, y0) = self.origin;
        let (w, h) = (self.width, self.height);
        match self.rotation {
            90 => (x0 + v, y0 + u),
            180 => (x0 + w - u, y0 + v),
            270 => (x0 + w - v, y0 + h - u),
            _ => (x0 + u, y0 + h - v),
        }
    }

    /// `cm` operands mapping the image unit square onto a displayed rectangle,
    /// so the image shows upright whatever the page rotation.
    pub fn image_matrix(&self, rect: &Rect) -> [f32; 6] {
        let (ox, oy) = self.to_user_space(rect.x, rect.bottom());
        let (rx, ry) = self.to_user_space(rect.right(), rect.bottom());
        let (tx, ty) = self.to_user_space(rect.x, rect.y);
        [rx - ox, ry - oy, tx - ox, ty - oy, ox, oy]
    }
}

/// Look up a page attribute, walking `/Parent` links for inheritable keys.
fn inherited_attribute<'a>(doc: &'a Document, page_id: ObjectId, key: &[u8]) -> Option<&'a Object> {
    let mut node = doc.get_dictionary(page_id).ok()?;
    for _ in 0..MAX_TREE_DEPTH {
        if let Ok(value) = node.get(key) {
            return Some(value);
        }
        let parent = node.get(b"Parent").and_then(Object::as_reference).ok()?;
        node = doc.get_dictionary(parent).ok()?;
    }
    None
}

fn resolve<'a>(doc: &'a Document, obj: &'a Object) -> &'a Object {
    match obj {
        Object::Reference(id) => doc.get_object(*id).unwrap_or(obj),
        _ => obj,
    }
}

/// Read a `[x0 y0 x1 y1]` box, normalizing corner order.
fn read_box(doc: &Document, obj: &Object) -> Option<[f32; 4]> {
    let arr = resolve(doc, obj).as_array().ok()?;
    if arr.len() != 4 {
        return None;
    }

    let mut values = [0.0; 4];
    for (slot, item) in values.iter_mut().zip(arr) {
        *slot = extract_number(resolve(doc, item))?;
    }

    let [ax, ay, bx, by] = values;
    let normalized = [ax.min(bx), ay.min(by), ax.max(bx), ay.max(by)];
    if normalized[2] - normalized[0] <= 0.0 || normalized[3] - normalized[1] <= 0.0 {
        return None;
    }
    Some(normalized)
}

/// Extract numeric value from a PDF object
fn extract_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

/// Snap `/Rotate` to one of 0, 90, 180, 270.
fn normalize_rotation(degrees: i64) -> u16 {
    let quarter_turns = (degrees as f64 / 90.0).round() as i64;
    (quarter_turns.rem_euclid(4) * 90) as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry(rotation: u16) -> PageGeometry {
        PageGeometry {
            origin: (0.0, 0.0),
            width: 612.0,
            height: 792.0,
            rotation,
        }
    }

    #[test]
    fn test_unrotated_flips_y() {
        let g = geometry(0);
        assert_eq!(g.to_user_space(0.0, 0.0), (0.0, 792.0));
        assert_eq!(g.to_user_space(528.0, 780.0), (528.0, 12.0));
    }

    #[test]
    fn test_unrotated_image_matrix() {
        let m = geometry(0).image_matrix(&Rect::new(528.0, 708.0, 72.0, 72.0));
        assert_eq!(m, [72.0, 0.0, 0.0, 72.0, 528.0, 12.0]);
    }

    #[test]
    fn test_display_size_swaps_on_quarter_turn() {
        assert_eq!(geometry(90).display_size(), PageSize::new(792.0, 612.0));
        assert_eq!(geometry(180).display_size(), PageSize::new(612.0, 792.0));
        assert_eq!(geometry(270).display_size(), PageSize::new(792.0, 612.0));
    }

    #[test]
    fn test_rotated_corners_stay_on_page() {
        for rotation in [90, 180, 270] {
            let g = geometry(rotation);
            let size = g.display_size();
            for (u, v) in [
                (0.0, 0.0),
                (size.width_pt, 0.0),
                (0.0, size.height_pt),
                (size.width_pt, size.height_pt),
            ] {
                let (x, y) = g.to_user_space(u, v);
                assert!((0.0..=612.0).contains(&x), "rotation {rotation}: x={x}");
                assert!((0.0..=792.0).contains(&y), "rotation {rotation}: y={y}");
            }
        }
    }

    #[test]
    fn test_rotated_matrix_keeps_image_area() {
        let rect = Rect::new(10.0, 20.0, 100.0, 50.0);
        for rotation in [0, 90, 180, 270] {
            let [a, b, c, d, _, _] = geometry(rotation).image_matrix(&rect);
            let area = (a * d - b * c).abs();
            assert_eq!(area, 5000.0, "rotation {rotation}");
        }
    }

    #[test]
    fn test_normalize_rotation() {
        assert_eq!(normalize_rotation(0), 0);
        assert_eq!(normalize_rotation(450), 90);
        assert_eq!(normalize_rotation(-90), 270);
        assert_eq!(normalize_rotation(180), 180);
    }
}
