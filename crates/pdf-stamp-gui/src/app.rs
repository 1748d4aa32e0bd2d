use eframe::egui;
use pdf_stamp::PlacementSet;
use pdf_stamp_runtime::{StampCommand, StampTag, StampUpdate};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::mpsc;

use crate::actions::ActionEvent;
use crate::logger::AppLogger;
use crate::views::{PlacerEvent, PlacerState, ToolbarAction, show_placer, show_toolbar};

const UPDATE_POLL_INTERVAL: Duration = Duration::from_millis(150);

fn pick_image(tag: StampTag) -> Option<PathBuf> {
    let title = match tag {
        StampTag::Initials => "Choose initials image",
        StampTag::Signature => "Choose full signature image",
        StampTag::Other => "Choose other stamp image",
    };
    rfd::FileDialog::new()
        .set_title(title)
        .add_filter("Image Files", &["png", "jpg", "jpeg"])
        .pick_file()
}

pub struct StampApp {
    status: String,

    // Async infrastructure
    command_tx: mpsc::UnboundedSender<StampCommand>,
    update_rx: mpsc::UnboundedReceiver<StampUpdate>,

    // Editing session
    placer: Option<PlacerState>,
    placements: PlacementSet,
    previews: HashMap<StampTag, egui::TextureHandle>,
    busy: bool,

    logger: AppLogger,
    _tokio_handle: tokio::runtime::Handle,
}

impl StampApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        tokio_handle: tokio::runtime::Handle,
        logger: AppLogger,
    ) -> Self {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        tokio_handle.spawn(crate::worker::worker_task(command_rx, update_tx));

        Self {
            status: "Open a PDF to start placing stamps".to_string(),
            command_tx,
            update_rx,
            placer: None,
            placements: PlacementSet::new(),
            previews: HashMap::new(),
            busy: false,
            logger,
            _tokio_handle: tokio_handle,
        }
    }

    fn send(&mut self, command: StampCommand) {
        if self.command_tx.send(command).is_err() {
            self.status = "Error: background worker stopped".to_string();
            log::error!("Background worker stopped");
        }
    }

    fn open_pdf(&mut self, path: PathBuf) {
        ActionEvent::OpenPdf(path.clone()).emit();
        self.status = "Loading PDF...".to_string();
        self.busy = true;
        self.send(StampCommand::Load { path });
    }

    /// Point `tag` at a new image and refresh its preview.
    fn set_tag_image(&mut self, tag: StampTag, path: PathBuf) {
        ActionEvent::ImageSet {
            tag,
            path: path.clone(),
        }
        .emit();
        self.placements.set_image(tag, path.clone());
        self.previews.remove(&tag);
        self.send(StampCommand::LoadImage { tag, path });
    }

    fn handle_update(&mut self, ctx: &egui::Context, update: StampUpdate) {
        match update {
            StampUpdate::Loaded {
                doc_id,
                path,
                page_count,
            } => {
                if let Some(old) = self.placer.take() {
                    self.send(StampCommand::Close { doc_id: old.doc_id });
                }
                // A new document starts a new session
                self.placements = PlacementSet::new();
                self.previews.clear();

                let mut placer = PlacerState::new(doc_id, path, page_count);
                self.status = format!("Loaded PDF with {} pages", page_count);
                self.busy = false;
                placer.go_to(0, &self.command_tx);
                self.placer = Some(placer);
            }
            StampUpdate::PageRendered {
                doc_id,
                page_index,
                width,
                height,
                rgba_data,
            } => {
                if let Some(placer) = &mut self.placer {
                    if placer.doc_id == doc_id && placer.current_page == page_index {
                        placer.set_page(ctx, page_index, width, height, &rgba_data);
                    }
                }
            }
            StampUpdate::Closed { doc_id } => {
                log::debug!("Closed {:?}", doc_id);
            }
            StampUpdate::ImageLoaded {
                tag,
                path,
                width,
                height,
                rgba_data,
            } => {
                // Ignore previews of images replaced in the meantime
                if self.placements.image(tag) == Some(path.as_path()) {
                    let image = egui::ColorImage::from_rgba_unmultiplied([width, height], &rgba_data);
                    let texture =
                        ctx.load_texture(format!("stamp_{}", tag), image, egui::TextureOptions::LINEAR);
                    self.previews.insert(tag, texture);
                }
            }
            StampUpdate::Saved { path, report } => {
                self.busy = false;
                self.status = if report.skipped.is_empty() {
                    format!("Stamped {} images → {}", report.stamps_placed, path.display())
                } else {
                    format!(
                        "Stamped {} images → {} ({} unreadable skipped)",
                        report.stamps_placed,
                        path.display(),
                        report.skipped.len()
                    )
                };
                ActionEvent::Saved(path).emit();
            }
            StampUpdate::LayoutSaved { path } => {
                self.status = format!("Layout saved → {}", path.display());
                ActionEvent::LayoutSaved(path).emit();
            }
            StampUpdate::LayoutLoaded { path, placements } => {
                self.placements = placements;
                self.previews.clear();
                for tag in StampTag::ALL {
                    if let Some(image) = self.placements.image(tag).map(|p| p.to_path_buf()) {
                        self.send(StampCommand::LoadImage { tag, path: image });
                    }
                }
                self.status = format!(
                    "Loaded layout with {} boxes",
                    self.placements.placements().len()
                );
                ActionEvent::LayoutLoaded(path).emit();
            }
            StampUpdate::Error { message } => {
                log::error!("{}", message);
                self.status = format!("Error: {message}");
                self.busy = false;
            }
        }
    }

    fn handle_toolbar(&mut self, action: ToolbarAction) {
        match action {
            ToolbarAction::OpenPdf => {
                if let Some(path) = rfd::FileDialog::new()
                    .set_title("Open PDF")
                    .add_filter("PDF Files", &["pdf"])
                    .pick_file()
                {
                    self.open_pdf(path);
                }
            }
            ToolbarAction::FirstPage => self.navigate(|_, _| 0),
            ToolbarAction::PreviousPage => self.navigate(|current, _| current.saturating_sub(1)),
            ToolbarAction::NextPage => self.navigate(|current, _| current + 1),
            ToolbarAction::LastPage => self.navigate(|_, total| total.saturating_sub(1)),
            ToolbarAction::Add(tag) => {
                let Some(pixmap) = self.placer.as_ref().and_then(|p| p.pixmap) else {
                    return;
                };
                let Some(path) = pick_image(tag) else {
                    return;
                };
                self.set_tag_image(tag, path);
                let page_index = self.placer.as_ref().map_or(0, |p| p.current_page);
                let id = self.placements.add(tag, page_index, pixmap);
                log::debug!("Added {} box {:?} on page {}", tag, id, page_index + 1);
            }
            ToolbarAction::Remove(tag) => {
                let removed = self.placements.remove_tag(tag);
                self.previews.remove(&tag);
                log::debug!("Removed {} {} boxes", removed, tag);
                ActionEvent::RemovedTag(tag).emit();
            }
            ToolbarAction::SaveAs => {
                let Some(source) = self.placer.as_ref().map(|p| p.path.clone()) else {
                    return;
                };
                if let Some(output_path) = rfd::FileDialog::new()
                    .set_title("Save stamped PDF")
                    .add_filter("PDF Files", &["pdf"])
                    .save_file()
                {
                    self.status = "Saving...".to_string();
                    self.busy = true;
                    let placements = self.placements.clone();
                    self.send(StampCommand::Save {
                        source,
                        placements,
                        output_path,
                    });
                }
            }
            ToolbarAction::SaveLayout => {
                if let Some(path) = rfd::FileDialog::new()
                    .set_title("Save layout")
                    .add_filter("Layout", &["json"])
                    .save_file()
                {
                    let placements = self.placements.clone();
                    self.send(StampCommand::SaveLayout { placements, path });
                }
            }
            ToolbarAction::LoadLayout => {
                if let Some(path) = rfd::FileDialog::new()
                    .set_title("Load layout")
                    .add_filter("Layout", &["json"])
                    .pick_file()
                {
                    self.send(StampCommand::LoadLayout { path });
                }
            }
        }
    }

    /// Move to the page `target(current, total)` picks.
    fn navigate(&mut self, target: impl FnOnce(usize, usize) -> usize) {
        if let Some(placer) = &mut self.placer {
            let page_index = target(placer.current_page, placer.total_pages);
            placer.go_to(page_index, &self.command_tx);
        }
    }

    fn handle_placer_event(&mut self, event: PlacerEvent) {
        match event {
            PlacerEvent::BoxChanged(id) => {
                if let Some(placement) = self.placements.get(id) {
                    ActionEvent::Box {
                        tag: placement.tag,
                        page_index: placement.page_index,
                        rect: placement.rect,
                    }
                    .emit();
                }
            }
            PlacerEvent::Repick(tag) => {
                if let Some(path) = pick_image(tag) {
                    self.set_tag_image(tag, path);
                }
            }
        }
    }
}

impl eframe::App for StampApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Handle drag-and-drop for PDF files
        let dropped: Vec<PathBuf> = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .filter_map(|file| file.path.clone())
                .filter(|path| path.extension().and_then(|s| s.to_str()) == Some("pdf"))
                .collect()
        });
        if let Some(path) = dropped.into_iter().next() {
            self.open_pdf(path);
        }

        // Process all pending updates from worker
        while let Ok(update) = self.update_rx.try_recv() {
            self.handle_update(ctx, update);
        }

        let toolbar_action = egui::TopBottomPanel::top("toolbar")
            .show(ctx, |ui| show_toolbar(ui, self.placer.as_ref()))
            .inner;
        if let Some(action) = toolbar_action {
            self.handle_toolbar(action);
        }

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if self.busy {
                    ui.spinner();
                }
                ui.label(&self.status);
                if let Some(entry) = self.logger.latest_problem() {
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.colored_label(ui.visuals().warn_fg_color, entry.status_line());
                    });
                }
            });
        });

        let placer_event = egui::CentralPanel::default()
            .show(ctx, |ui| match &self.placer {
                Some(placer) => show_placer(ui, placer, &mut self.placements, &self.previews),
                None => {
                    ui.centered_and_justified(|ui| {
                        ui.label("Drop a PDF file here or click \"Open PDF…\"");
                    });
                    None
                }
            })
            .inner;
        if let Some(event) = placer_event {
            self.handle_placer_event(event);
        }

        // Worker updates arrive between frames
        if self.busy {
            ctx.request_repaint();
        } else {
            ctx.request_repaint_after(UPDATE_POLL_INTERVAL);
        }
    }
}
