use pdf_stamp::{PlacementSet, StampError, StampImage, load_pdf, save_pdf, stamp_placements};
use pdf_stamp_runtime::{StampTag, StampUpdate};
use std::path::PathBuf;
use tokio::sync::mpsc;

pub async fn handle_save(
    source: PathBuf,
    placements: PlacementSet,
    output_path: PathBuf,
    update_tx: &mpsc::UnboundedSender<StampUpdate>,
) {
    let result = async {
        let doc = load_pdf(&source).await?;
        let (doc, report) = stamp_placements(doc, &placements).await?;
        save_pdf(doc, &output_path).await?;
        Ok::<_, StampError>(report)
    }
    .await;

    match result {
        Ok(report) => {
            for skipped in &report.skipped {
                log::warn!("Skipped unreadable image {}", skipped.display());
            }
            let _ = update_tx.send(StampUpdate::Saved {
                path: output_path,
                report,
            });
        }
        Err(e) => {
            let _ = update_tx.send(StampUpdate::Error {
                message: format!("Failed to save {}: {}", output_path.display(), e),
            });
        }
    }
}

pub async fn handle_save_layout(
    placements: PlacementSet,
    path: PathBuf,
    update_tx: &mpsc::UnboundedSender<StampUpdate>,
) {
    match placements.save(&path).await {
        Ok(()) => {
            let _ = update_tx.send(StampUpdate::LayoutSaved { path });
        }
        Err(e) => {
            let _ = update_tx.send(StampUpdate::Error {
                message: format!("Failed to save layout: {}", e),
            });
        }
    }
}

pub async fn handle_load_layout(path: PathBuf, update_tx: &mpsc::UnboundedSender<StampUpdate>) {
    match PlacementSet::load(&path).await {
        Ok(placements) => {
            let _ = update_tx.send(StampUpdate::LayoutLoaded { path, placements });
        }
        Err(e) => {
            let _ = update_tx.send(StampUpdate::Error {
                message: format!("Failed to load layout: {}", e),
            });
        }
    }
}

/// Decode a stamp image off the UI thread for its preview texture
pub async fn handle_load_image(
    tag: StampTag,
    path: PathBuf,
    update_tx: &mpsc::UnboundedSender<StampUpdate>,
) {
    let path_clone = path.clone();

    match tokio::task::spawn_blocking(move || {
        let image = StampImage::open(path_clone)?;
        let rgba = image.image().to_rgba8();
        let (width, height) = rgba.dimensions();
        Ok::<_, StampError>((width as usize, height as usize, rgba.into_raw()))
    })
    .await
    {
        Ok(Ok((width, height, rgba_data))) => {
            let _ = update_tx.send(StampUpdate::ImageLoaded {
                tag,
                path,
                width,
                height,
                rgba_data,
            });
        }
        Ok(Err(e)) => {
            log::warn!("Cannot preview {}: {}", path.display(), e);
        }
        Err(e) => {
            let _ = update_tx.send(StampUpdate::Error {
                message: format!("Task join error: {}", e),
            });
        }
    }
}
