//! PDF rendering modules for stamping
//!
//! This module handles all PDF-specific operations:
//! - Embedding stamp images as XObjects
//! - Reading displayed page geometry (box, rotation)
//! - Compositing images onto existing pages

mod page;
mod page_box;
mod xobject;

pub use page::{StampDraw, overlay_images};
pub use page_box::PageGeometry;
pub use xobject::create_image_xobject;
