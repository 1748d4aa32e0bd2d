//! Image XObject creation for stamps
//!
//! Each stamp image is embedded once per document and referenced from every
//! page that shows it. Transparency is carried in a separate soft mask.

use crate::stamp_image::StampImage;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

/// Embed a stamp image as an `/XObject /Image` and return its object ID.
///
/// Streams are left unfiltered here; `save_pdf` compresses the whole document.
pub fn create_image_xobject(output: &mut Document, image: &StampImage) -> ObjectId {
    let (width, height) = image.dimensions();

    let (color_space, samples) = if image.is_grayscale() {
        ("DeviceGray", image.image().to_luma8().into_raw())
    } else {
        ("DeviceRGB", image.image().to_rgb8().into_raw())
    };

    let mut dict = image_dictionary(width, height, color_space);

    if image.has_transparency() {
        let alpha: Vec<u8> = image
            .image()
            .to_rgba8()
            .pixels()
            .map(|p| p.0[3])
            .collect();
        let smask_id = output.add_object(Stream::new(
            image_dictionary(width, height, "DeviceGray"),
            alpha,
        ));
        dict.set("SMask", Object::Reference(smask_id));
    }

    output.add_object(Stream::new(dict, samples))
}

/// Dictionary for an uncompressed 8-bit image stream
fn image_dictionary(width: u32, height: u32, color_space: &str) -> Dictionary {
    let mut dict = Dictionary::new();
    dict.set("Type", Object::Name(b"XObject".to_vec()));
    dict.set("Subtype", Object::Name(b"Image".to_vec()));
    dict.set("Width", Object::Integer(width as i64));
    dict.set("Height", Object::Integer(height as i64));
    dict.set("ColorSpace", Object::Name(color_space.as_bytes().to_vec()));
    dict.set("BitsPerComponent", Object::Integer(8));
    dict
}
