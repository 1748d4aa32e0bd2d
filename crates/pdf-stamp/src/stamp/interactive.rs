//! Stamping from boxes drawn in the interactive placer

use crate::placement::PlacementSet;
use crate::types::*;
use lopdf::Document;

use super::compose::{ImageStore, PageDraws};
use super::io::page_sizes;

/// Queue one draw per resolved target of `placements`.
pub(super) fn collect_placement_draws(
    doc: &mut Document,
    placements: &PlacementSet,
    images: &mut ImageStore,
    draws: &mut PageDraws,
    report: &mut StampReport,
) -> Result<()> {
    let sizes = page_sizes(doc)?;
    let targets = placements.resolve_targets(&sizes)?;

    for target in targets {
        if let Some(image) = images.embed(doc, &target.image, report) {
            log::debug!(
                "{} on page {} at {:?}",
                target.tag,
                target.page_index,
                target.rect
            );
            draws.push(target.page_index, image.draw(target.rect));
        }
    }

    Ok(())
}
