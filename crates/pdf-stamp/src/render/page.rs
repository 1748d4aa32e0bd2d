//! Compositing stamp images onto existing pages
//!
//! The original page content is wrapped in `q … Q` so any graphics state it
//! leaves behind cannot shift the stamps. Stamps are drawn after it, on top.

use crate::constants::IMAGE_XOBJECT_PREFIX;
use crate::geometry::{Rect, fit_preserving_aspect};
use crate::types::{Result, StampError};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

use super::page_box::{MAX_TREE_DEPTH, PageGeometry};

/// One image to draw on a page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StampDraw {
    /// Image XObject in the same document
    pub xobject_id: ObjectId,
    /// Intrinsic image size, used to keep its aspect ratio
    pub image_size: (u32, u32),
    /// Target box in displayed page points (top-left origin)
    pub rect: Rect,
}

/// Draw all `draws` onto one page. Returns the number of images drawn.
pub fn overlay_images(doc: &mut Document, page_id: ObjectId, draws: &[StampDraw]) -> Result<usize> {
    if draws.is_empty() {
        return Ok(0);
    }

    let geometry = PageGeometry::read(doc, page_id)?;

    let mut ops = String::new();
    for draw in draws {
        let name = register_xobject(doc, page_id, draw.xobject_id)?;
        let fitted = fit_preserving_aspect(&draw.rect, draw.image_size.0, draw.image_size.1);
        ops.push_str(&generate_draw_command(&name, geometry.image_matrix(&fitted)));
    }

    append_content(doc, page_id, ops)?;
    Ok(draws.len())
}

/// Generate the content stream command that paints an image XObject.
fn generate_draw_command(name: &str, matrix: [f32; 6]) -> String {
    let [a, b, c, d, e, f] = matrix;
    format!("q {} {} {} {} {} {} cm /{} Do Q\n", a, b, c, d, e, f, name)
}

// =============================================================================
// Resources
// =============================================================================

/// Add `xobject_id` to the page's `/XObject` resources, reusing its name if
/// it is already registered there.
fn register_xobject(doc: &mut Document, page_id: ObjectId, xobject_id: ObjectId) -> Result<String> {
    let resources_id = own_resources(doc, page_id)?;

    let xobjects_ref = match doc.get_dictionary(resources_id)?.get(b"XObject") {
        Ok(Object::Reference(id)) => Some(*id),
        _ => None,
    };

    let xobjects = match xobjects_ref {
        Some(id) => doc.get_object_mut(id)?.as_dict_mut()?,
        None => {
            let resources = doc.get_object_mut(resources_id)?.as_dict_mut()?;
            if !matches!(resources.get(b"XObject"), Ok(Object::Dictionary(_))) {
                resources.set("XObject", Object::Dictionary(Dictionary::new()));
            }
            resources.get_mut(b"XObject")?.as_dict_mut()?
        }
    };

    // Pages sharing one resource dictionary reuse the first name given to the image
    let existing = xobjects.iter().find_map(|(key, value)| match value {
        Object::Reference(id) if *id == xobject_id => Some(String::from_utf8_lossy(key).into_owned()),
        _ => None,
    });
    if let Some(name) = existing {
        return Ok(name);
    }

    let name = (1..)
        .map(|n| format!("{}{}", IMAGE_XOBJECT_PREFIX, n))
        .find(|candidate| !xobjects.has(candidate.as_bytes()))
        .ok_or_else(|| StampError::Config("No free XObject name".to_string()))?;
    xobjects.set(name.clone().into_bytes(), Object::Reference(xobject_id));

    Ok(name)
}

/// Make sure the page's `/Resources` is an indirect dictionary and return it.
///
/// Inline resources are moved into their own object. Inherited resources are
/// copied onto the page so siblings sharing them stay untouched.
fn own_resources(doc: &mut Document, page_id: ObjectId) -> Result<ObjectId> {
    let current = doc.get_dictionary(page_id)?.get(b"Resources").ok().cloned();

    let resources = match current {
        Some(Object::Reference(id)) => return Ok(id),
        Some(Object::Dictionary(dict)) => dict,
        _ => match inherited_resources(doc, page_id) {
            Some(Object::Reference(id)) => doc.get_dictionary(id)?.clone(),
            Some(Object::Dictionary(dict)) => dict,
            _ => Dictionary::new(),
        },
    };
    let resources_id = doc.add_object(resources);

    doc.get_object_mut(page_id)?
        .as_dict_mut()?
        .set("Resources", Object::Reference(resources_id));
    Ok(resources_id)
}

fn inherited_resources(doc: &Document, page_id: ObjectId) -> Option<Object> {
    let mut node = doc.get_dictionary(page_id).ok()?;
    for _ in 0..MAX_TREE_DEPTH {
        let parent = node.get(b"Parent").and_then(Object::as_reference).ok()?;
        node = doc.get_dictionary(parent).ok()?;
        if let Ok(resources) = node.get(b"Resources") {
            return Some(resources.clone());
        }
    }
    None
}

// =============================================================================
// Content Streams
// =============================================================================

/// Wrap the existing content in `q … Q` and append `ops` after it.
fn append_content(doc: &mut Document, page_id: ObjectId, ops: String) -> Result<()> {
    let existing = doc.get_dictionary(page_id)?.get(b"Contents").ok().cloned();

    let mut contents: Vec<Object> = match existing {
        Some(Object::Reference(id)) => match doc.get_object(id)? {
            Object::Array(items) => items.clone(),
            _ => vec![Object::Reference(id)],
        },
        Some(Object::Array(items)) => items,
        _ => Vec::new(),
    };

    let stamp_ops = if contents.is_empty() {
        ops
    } else {
        let save_id = doc.add_object(Stream::new(Dictionary::new(), b"q\n".to_vec()));
        contents.insert(0, Object::Reference(save_id));
        format!("\nQ\n{}", ops)
    };

    let stamp_id = doc.add_object(Stream::new(Dictionary::new(), stamp_ops.into_bytes()));
    contents.push(Object::Reference(stamp_id));

    doc.get_object_mut(page_id)?
        .as_dict_mut()?
        .set("Contents", Object::Array(contents));
    Ok(())
}
