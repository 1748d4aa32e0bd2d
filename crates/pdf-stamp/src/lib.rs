pub mod constants;
pub mod geometry;
pub mod layout;
mod options;
mod placement;
pub mod render;
pub mod stamp;
mod stamp_image;
mod types;

pub use geometry::{NormalizedRect, PageSize, PixmapSize, Rect, map_to_page, map_to_pixmap};
pub use options::*;
pub use placement::*;
pub use stamp::{
    load_pdf, page_ids, page_sizes, save_pdf, stamp, stamp_batch, stamp_placements,
};
pub use stamp_image::StampImage;
pub use types::*;
