use pdf_stamp_runtime::{StampCommand, StampUpdate};
use tokio::sync::mpsc;

use crate::{handlers, viewer};

/// Async worker task that processes stamping commands and sends updates
pub async fn worker_task(
    mut command_rx: mpsc::UnboundedReceiver<StampCommand>,
    update_tx: mpsc::UnboundedSender<StampUpdate>,
) {
    let mut viewer_state = viewer::ViewerState::new();

    while let Some(cmd) = command_rx.recv().await {
        process_command(cmd, &mut viewer_state, &mut command_rx, &update_tx).await;
    }
    log::debug!("Command channel closed, worker exiting");
}

async fn process_command(
    cmd: StampCommand,
    viewer_state: &mut viewer::ViewerState,
    command_rx: &mut mpsc::UnboundedReceiver<StampCommand>,
    update_tx: &mpsc::UnboundedSender<StampUpdate>,
) {
    match cmd {
        #[cfg(feature = "pdf-viewer")]
        StampCommand::Load { path } => {
            handlers::viewer::handle_load(path, viewer_state, update_tx).await;
        }
        #[cfg(feature = "pdf-viewer")]
        StampCommand::RenderPage {
            mut doc_id,
            mut page_index,
        } => {
            // Collapse a burst of navigation to the latest page
            while let Ok(next_cmd) = command_rx.try_recv() {
                if let StampCommand::RenderPage {
                    doc_id: new_doc_id,
                    page_index: new_page_index,
                } = next_cmd
                {
                    log::debug!("Discarding queued page render, using newer request");
                    doc_id = new_doc_id;
                    page_index = new_page_index;
                } else {
                    // Can't put it back, so run it before the render
                    Box::pin(process_command(next_cmd, viewer_state, command_rx, update_tx)).await;
                }
            }

            handlers::viewer::handle_render_page(doc_id, page_index, viewer_state, update_tx)
                .await;
        }
        #[cfg(not(feature = "pdf-viewer"))]
        StampCommand::Load { .. } | StampCommand::RenderPage { .. } => {
            handlers::viewer::handle_viewer_unavailable(update_tx).await;
        }
        StampCommand::Close { doc_id } => {
            handlers::viewer::handle_close(doc_id, viewer_state, update_tx).await;
        }
        StampCommand::LoadImage { tag, path } => {
            handlers::stamp::handle_load_image(tag, path, update_tx).await;
        }
        StampCommand::Save {
            source,
            placements,
            output_path,
        } => {
            handlers::stamp::handle_save(source, placements, output_path, update_tx).await;
        }
        StampCommand::SaveLayout { placements, path } => {
            handlers::stamp::handle_save_layout(placements, path, update_tx).await;
        }
        StampCommand::LoadLayout { path } => {
            handlers::stamp::handle_load_layout(path, update_tx).await;
        }
    }
}
