//! Shared plumbing for both stamping modes: embed each image once, collect
//! draws per page, then composite page by page.

use crate::render::{StampDraw, create_image_xobject, overlay_images};
use crate::stamp_image::StampImage;
use crate::types::*;
use lopdf::{Document, ObjectId};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

/// An image already embedded in the output document
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct EmbeddedImage {
    pub xobject_id: ObjectId,
    pub size: (u32, u32),
}

impl EmbeddedImage {
    pub fn draw(&self, rect: crate::geometry::Rect) -> StampDraw {
        StampDraw {
            xobject_id: self.xobject_id,
            image_size: self.size,
            rect,
        }
    }
}

/// Embeds each distinct image path at most once per document
#[derive(Default)]
pub(crate) struct ImageStore {
    embedded: HashMap<PathBuf, Option<EmbeddedImage>>,
}

impl ImageStore {
    /// Embed the image at `path`, or return `None` if it cannot be read.
    ///
    /// Unreadable images are logged and recorded in the report; callers
    /// skip their draws.
    pub fn embed(
        &mut self,
        doc: &mut Document,
        path: &Path,
        report: &mut StampReport,
    ) -> Option<EmbeddedImage> {
        if let Some(entry) = self.embedded.get(path) {
            return *entry;
        }

        let entry = match StampImage::open(path) {
            Ok(image) => {
                let xobject_id = create_image_xobject(doc, &image);
                log::debug!(
                    "Embedded {} ({}x{}) as {:?}",
                    path.display(),
                    image.dimensions().0,
                    image.dimensions().1,
                    xobject_id
                );
                Some(EmbeddedImage {
                    xobject_id,
                    size: image.dimensions(),
                })
            }
            Err(e) => {
                log::warn!("Skipping unreadable image {}: {}", path.display(), e);
                report.record_skip(path.to_owned());
                None
            }
        };

        self.embedded.insert(path.to_owned(), entry);
        entry
    }
}

/// Draws grouped by page index
#[derive(Default)]
pub(crate) struct PageDraws {
    by_page: BTreeMap<usize, Vec<StampDraw>>,
}

impl PageDraws {
    pub fn push(&mut self, page_index: usize, draw: StampDraw) {
        self.by_page.entry(page_index).or_default().push(draw);
    }

    /// Composite every collected draw onto its page.
    pub fn apply(
        self,
        doc: &mut Document,
        page_ids: &[ObjectId],
        report: &mut StampReport,
    ) -> Result<()> {
        for (page_index, draws) in self.by_page {
            let page_id = *page_ids.get(page_index).ok_or(StampError::PageOutOfRange {
                index: page_index,
                count: page_ids.len(),
            })?;
            report.stamps_placed += overlay_images(doc, page_id, &draws)?;
            report.pages_stamped += 1;
        }
        Ok(())
    }
}
