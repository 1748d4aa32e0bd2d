//! Document I/O operations for stamping

use crate::geometry::PageSize;
use crate::render::PageGeometry;
use crate::types::*;
use lopdf::{Document, ObjectId};
use std::path::Path;

/// Load a single PDF document
pub async fn load_pdf(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::fs::read(&path).await?;
    let doc = tokio::task::spawn_blocking(move || Document::load_mem(&bytes)).await??;
    Ok(doc)
}

/// Compress and save the stamped document
pub async fn save_pdf(mut doc: Document, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::task::spawn_blocking(move || {
        doc.compress();
        let mut writer = Vec::new();
        doc.save_to(&mut writer)?;
        Ok::<_, StampError>(writer)
    })
    .await??;
    tokio::fs::write(&path, bytes).await?;
    Ok(())
}

/// Page object IDs in page order
pub fn page_ids(doc: &Document) -> Vec<ObjectId> {
    doc.get_pages().values().copied().collect()
}

/// Displayed size of every page, in page order
pub fn page_sizes(doc: &Document) -> Result<Vec<PageSize>> {
    page_ids(doc)
        .into_iter()
        .map(|id| PageGeometry::read(doc, id).map(|g| g.display_size()))
        .collect()
}
