//! Geometry for stamp placement
//!
//! - Rectangles, page sizes and pixmap sizes
//! - Normalized mapping between a preview pixmap and page point-space
//! - Aspect-preserving fit of an image inside a box

mod fit;
mod mapping;
mod types;

pub use fit::*;
pub use mapping::*;
pub use types::*;
