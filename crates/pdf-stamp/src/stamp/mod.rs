//! PDF stamping - compositing images onto existing pages
//!
//! This module orchestrates a stamping run:
//! 1. Resolve what goes where (batch layout or placed boxes)
//! 2. Embed each distinct image once
//! 3. Composite the draws page by page
//!
//! The public entry points are async and run the document work on a blocking
//! task, like loading and saving.

mod batch;
mod compose;
mod interactive;
mod io;

pub use io::{load_pdf, page_ids, page_sizes, save_pdf};

use crate::options::BatchOptions;
use crate::placement::PlacementSet;
use crate::types::*;
use compose::{ImageStore, PageDraws};
use lopdf::Document;

/// Stamp initials on every page and optionally one signature.
pub async fn stamp_batch(doc: Document, options: &BatchOptions) -> Result<(Document, StampReport)> {
    stamp(doc, Some(options), None).await
}

/// Stamp the boxes of an interactive placement session.
pub async fn stamp_placements(
    doc: Document,
    placements: &PlacementSet,
) -> Result<(Document, StampReport)> {
    stamp(doc, None, Some(placements)).await
}

/// Apply a batch layout and a placement session in a single pass.
pub async fn stamp(
    doc: Document,
    options: Option<&BatchOptions>,
    placements: Option<&PlacementSet>,
) -> Result<(Document, StampReport)> {
    if let Some(options) = options {
        options.validate()?;
    }

    let options = options.cloned();
    let placements = placements.cloned();

    tokio::task::spawn_blocking(move || {
        let mut doc = doc;
        let report = stamp_sync(&mut doc, options.as_ref(), placements.as_ref())?;
        Ok::<_, StampError>((doc, report))
    })
    .await?
}

fn stamp_sync(
    doc: &mut Document,
    options: Option<&BatchOptions>,
    placements: Option<&PlacementSet>,
) -> Result<StampReport> {
    let page_ids = page_ids(doc);
    if page_ids.is_empty() {
        return Err(StampError::NoPages);
    }

    let mut report = StampReport::default();
    let mut images = ImageStore::default();
    let mut draws = PageDraws::default();

    if let Some(options) = options {
        batch::collect_batch_draws(doc, options, &mut images, &mut draws, &mut report)?;
    }

    if let Some(placements) = placements {
        interactive::collect_placement_draws(doc, placements, &mut images, &mut draws, &mut report)?;
    }

    draws.apply(doc, &page_ids, &mut report)?;

    log::info!(
        "Placed {} stamps on {} of {} pages",
        report.stamps_placed,
        report.pages_stamped,
        page_ids.len()
    );
    Ok(report)
}
