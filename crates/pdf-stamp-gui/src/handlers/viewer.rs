use pdf_stamp_runtime::{DocumentId, StampUpdate};
use std::path::PathBuf;
use tokio::sync::mpsc;

use crate::viewer::ViewerState;

#[cfg(feature = "pdf-viewer")]
use crate::viewer::{CachedPage, init_pdfium};

#[cfg(feature = "pdf-viewer")]
use pdfium_render::prelude::*;

/// Rasterize one page at the placer's zoom, where one pixel is one point.
#[cfg(feature = "pdf-viewer")]
fn render_page(path: &std::path::Path, page_index: usize) -> Result<CachedPage, PdfiumError> {
    let pdfium = init_pdfium()?;
    let document = pdfium.load_pdf_from_file(path, None)?;
    let page = document.pages().get(page_index as u16)?;

    let config = PdfRenderConfig::new().scale_page_by_factor(pdf_stamp::constants::DEFAULT_ZOOM);

    let bitmap = page.render_with_config(&config)?;
    Ok(CachedPage {
        rgba_data: bitmap.as_rgba_bytes().to_vec(),
        width: bitmap.width() as usize,
        height: bitmap.height() as usize,
    })
}

#[cfg(feature = "pdf-viewer")]
pub async fn handle_load(
    path: PathBuf,
    state: &mut ViewerState,
    update_tx: &mpsc::UnboundedSender<StampUpdate>,
) {
    let path_clone = path.clone();

    match tokio::task::spawn_blocking(move || {
        let pdfium = init_pdfium()?;
        let document = pdfium.load_pdf_from_file(&path_clone, None)?;
        Ok::<_, PdfiumError>(document.pages().len() as usize)
    })
    .await
    {
        Ok(Ok(page_count)) => {
            let doc_id = state.add_document(path.clone());
            log::debug!("Opened {} as {:?}", path.display(), doc_id);
            let _ = update_tx.send(StampUpdate::Loaded {
                doc_id,
                path,
                page_count,
            });
        }
        Ok(Err(e)) => {
            let _ = update_tx.send(StampUpdate::Error {
                message: format!("Failed to load PDF: {}", e),
            });
        }
        Err(e) => {
            let _ = update_tx.send(StampUpdate::Error {
                message: format!("Task join error: {}", e),
            });
        }
    }
}

#[cfg(feature = "pdf-viewer")]
pub async fn handle_render_page(
    doc_id: DocumentId,
    page_index: usize,
    state: &mut ViewerState,
    update_tx: &mpsc::UnboundedSender<StampUpdate>,
) {
    let cache_key = (doc_id, page_index);

    let page = if let Some(cached) = state.get_from_cache(&cache_key) {
        cached.clone()
    } else if let Some(pdf_path) = state.document(doc_id).cloned() {
        match tokio::task::spawn_blocking(move || render_page(&pdf_path, page_index)).await {
            Ok(Ok(page)) => {
                state.add_to_cache(cache_key, page.clone());
                page
            }
            Ok(Err(e)) => {
                let _ = update_tx.send(StampUpdate::Error {
                    message: format!("Failed to render page {}: {}", page_index + 1, e),
                });
                return;
            }
            Err(e) => {
                let _ = update_tx.send(StampUpdate::Error {
                    message: format!("Task join error: {}", e),
                });
                return;
            }
        }
    } else {
        let _ = update_tx.send(StampUpdate::Error {
            message: format!("Document not found: {:?}", doc_id),
        });
        return;
    };

    let _ = update_tx.send(StampUpdate::PageRendered {
        doc_id,
        page_index,
        width: page.width,
        height: page.height,
        rgba_data: page.rgba_data,
    });
}

pub async fn handle_close(
    doc_id: DocumentId,
    state: &mut ViewerState,
    update_tx: &mpsc::UnboundedSender<StampUpdate>,
) {
    state.remove_document(doc_id);
    let _ = update_tx.send(StampUpdate::Closed { doc_id });
}

#[cfg(not(feature = "pdf-viewer"))]
pub async fn handle_viewer_unavailable(update_tx: &mpsc::UnboundedSender<StampUpdate>) {
    let _ = update_tx.send(StampUpdate::Error {
        message: "PDF preview not available (pdf-viewer feature disabled)".to_string(),
    });
}
