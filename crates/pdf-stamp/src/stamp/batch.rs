//! Fixed-layout stamping: initials on every page, optional signature once

use crate::layout::{initials_rect, signature_rect};
use crate::options::BatchOptions;
use crate::types::*;
use lopdf::Document;

use super::compose::{ImageStore, PageDraws};
use super::io::page_sizes;

/// Queue the initials and signature draws described by `options`.
pub(super) fn collect_batch_draws(
    doc: &mut Document,
    options: &BatchOptions,
    images: &mut ImageStore,
    draws: &mut PageDraws,
    report: &mut StampReport,
) -> Result<()> {
    let sizes = page_sizes(doc)?;
    if sizes.is_empty() {
        return Err(StampError::NoPages);
    }

    if let Some(initials) = images.embed(doc, &options.initials, report) {
        for (page_index, page) in sizes.iter().enumerate() {
            let rect = initials_rect(
                *page,
                initials.size,
                options.initials_width_pt,
                options.initials_margin_pt,
            );
            draws.push(page_index, initials.draw(rect));
        }
    }

    let Some(signature) = &options.signature else {
        return Ok(());
    };

    let Some(position) = signature.position else {
        log::warn!(
            "Signature {} has no position; not placing it",
            signature.image.display()
        );
        return Ok(());
    };

    let page_index = signature.page.unwrap_or(sizes.len() - 1);
    if page_index >= sizes.len() {
        return Err(StampError::PageOutOfRange {
            index: page_index,
            count: sizes.len(),
        });
    }

    if let Some(image) = images.embed(doc, &signature.image, report) {
        let rect = signature_rect(position, image.size, signature.width_pt);
        log::debug!("Signature on page {} at {:?}", page_index, rect);
        draws.push(page_index, image.draw(rect));
    }

    Ok(())
}
