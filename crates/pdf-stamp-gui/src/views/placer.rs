//! Page preview with draggable, resizable stamp boxes

use eframe::egui;
use pdf_stamp::geometry::fit_preserving_aspect;
use pdf_stamp::{NormalizedRect, Placement, PlacementId, PlacementSet, PixmapSize};
use pdf_stamp_runtime::{DocumentId, StampCommand, StampTag};
use std::collections::HashMap;
use std::path::PathBuf;
use tokio::sync::mpsc;

const RESIZE_HANDLE_SIZE: f32 = 10.0;

/// The open document and the page currently shown
pub struct PlacerState {
    pub doc_id: DocumentId,
    pub path: PathBuf,
    pub current_page: usize,
    pub total_pages: usize,
    pub page_texture: Option<egui::TextureHandle>,
    /// Pixmap of the page in `page_texture`
    pub pixmap: Option<PixmapSize>,
}

impl PlacerState {
    pub fn new(doc_id: DocumentId, path: PathBuf, page_count: usize) -> Self {
        Self {
            doc_id,
            path,
            current_page: 0,
            total_pages: page_count,
            page_texture: None,
            pixmap: None,
        }
    }

    /// Show another page, clamped to the document.
    ///
    /// The pixmap is cleared until the new page arrives, so no box can be
    /// added or dragged against the previous page's size.
    pub fn go_to(&mut self, page_index: usize, command_tx: &mpsc::UnboundedSender<StampCommand>) {
        let page_index = page_index.min(self.total_pages.saturating_sub(1));
        if page_index == self.current_page && self.pixmap.is_some() {
            return;
        }
        self.current_page = page_index;
        self.pixmap = None;
        let _ = command_tx.send(StampCommand::RenderPage {
            doc_id: self.doc_id,
            page_index,
        });
    }

    pub fn can_go_back(&self) -> bool {
        self.current_page > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.current_page + 1 < self.total_pages
    }

    /// Store a freshly rendered page pixmap.
    pub fn set_page(&mut self, ctx: &egui::Context, page_index: usize, width: usize, height: usize, rgba: &[u8]) {
        let image = egui::ColorImage::from_rgba_unmultiplied([width, height], rgba);
        match &mut self.page_texture {
            Some(texture) => texture.set(image, egui::TextureOptions::LINEAR),
            None => {
                self.page_texture =
                    Some(ctx.load_texture("pdf_page", image, egui::TextureOptions::LINEAR))
            }
        }
        self.current_page = page_index;
        self.pixmap = Some(PixmapSize::new(width as u32, height as u32));
    }
}

/// What the canvas asks the app to do
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlacerEvent {
    /// A drag or resize finished
    BoxChanged(PlacementId),
    /// A box was double-clicked to choose its tag's image again
    Repick(StampTag),
}

/// Maps boxes between their own pixmap and the screen rectangle of the shown page
#[derive(Debug, Clone, Copy)]
struct CanvasTransform {
    page_rect: egui::Rect,
}

impl CanvasTransform {
    fn to_screen(&self, placement: &Placement) -> Option<egui::Rect> {
        let n = NormalizedRect::from_pixels(&placement.rect, placement.pixmap).ok()?;
        let size = self.page_rect.size();
        Some(egui::Rect::from_min_size(
            self.page_rect.min + egui::vec2(n.x * size.x, n.y * size.y),
            egui::vec2(n.width * size.x, n.height * size.y),
        ))
    }

    /// A screen-space drag converted into the placement's pixmap pixels
    fn to_pixmap_delta(&self, placement: &Placement, delta: egui::Vec2) -> egui::Vec2 {
        let size = self.page_rect.size();
        if size.x <= 0.0 || size.y <= 0.0 {
            return egui::Vec2::ZERO;
        }
        egui::vec2(
            delta.x * placement.pixmap.width as f32 / size.x,
            delta.y * placement.pixmap.height as f32 / size.y,
        )
    }
}

fn tag_color(tag: StampTag) -> egui::Color32 {
    match tag {
        StampTag::Initials => egui::Color32::from_rgb(30, 110, 230),
        StampTag::Signature => egui::Color32::from_rgb(210, 40, 40),
        StampTag::Other => egui::Color32::from_rgb(30, 150, 60),
    }
}

fn dashed_outline(rect: egui::Rect, color: egui::Color32) -> Vec<egui::Shape> {
    let points = [
        rect.left_top(),
        rect.right_top(),
        rect.right_bottom(),
        rect.left_bottom(),
        rect.left_top(),
    ];
    egui::Shape::dashed_line(&points, egui::Stroke::new(1.5, color), 6.0, 4.0)
}

/// Draw the current page and its boxes, and handle dragging them.
pub fn show_placer(
    ui: &mut egui::Ui,
    state: &PlacerState,
    placements: &mut PlacementSet,
    previews: &HashMap<StampTag, egui::TextureHandle>,
) -> Option<PlacerEvent> {
    let (Some(texture), Some(_)) = (&state.page_texture, state.pixmap) else {
        ui.centered_and_justified(|ui| {
            ui.spinner();
        });
        return None;
    };

    // Fit the page into the available space
    let available = ui.available_size();
    let texture_size = texture.size_vec2();
    let scale = (available.x / texture_size.x)
        .min(available.y / texture_size.y)
        .max(0.05);
    let (area, _) = ui.allocate_exact_size(available, egui::Sense::hover());
    let page_rect = egui::Rect::from_center_size(area.center(), texture_size * scale);
    let transform = CanvasTransform { page_rect };

    let painter = ui.painter_at(area);
    let full_uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
    painter.image(texture.id(), page_rect, full_uv, egui::Color32::WHITE);

    let visible: Vec<Placement> = placements.visible_on(state.current_page).cloned().collect();
    let mut event = None;

    for placement in visible {
        let Some(screen_rect) = transform.to_screen(&placement) else {
            continue;
        };
        let color = tag_color(placement.tag);

        if let Some(preview) = previews.get(&placement.tag) {
            let [w, h] = preview.size();
            let bounds =
                pdf_stamp::Rect::new(screen_rect.min.x, screen_rect.min.y, screen_rect.width(), screen_rect.height());
            let fitted = fit_preserving_aspect(&bounds, w as u32, h as u32);
            let image_rect = egui::Rect::from_min_size(
                egui::pos2(fitted.x, fitted.y),
                egui::vec2(fitted.width, fitted.height),
            );
            painter.image(preview.id(), image_rect, full_uv, egui::Color32::WHITE);
        } else {
            painter.rect_filled(screen_rect, 0.0, color.gamma_multiply(0.15));
        }
        painter.extend(dashed_outline(screen_rect, color));
        painter.text(
            screen_rect.left_top() + egui::vec2(3.0, 2.0),
            egui::Align2::LEFT_TOP,
            placement.tag.as_str(),
            egui::FontId::proportional(11.0),
            color,
        );

        let body = ui
            .interact(
                screen_rect,
                ui.id().with(("stamp_box", placement.id.0)),
                egui::Sense::click_and_drag(),
            )
            .on_hover_cursor(egui::CursorIcon::Grab);

        let handle_rect = egui::Rect::from_min_size(
            screen_rect.right_bottom() - egui::Vec2::splat(RESIZE_HANDLE_SIZE),
            egui::Vec2::splat(RESIZE_HANDLE_SIZE),
        );
        painter.rect_filled(handle_rect, 0.0, color);
        let handle = ui
            .interact(
                handle_rect,
                ui.id().with(("stamp_resize", placement.id.0)),
                egui::Sense::drag(),
            )
            .on_hover_cursor(egui::CursorIcon::ResizeNwSe);

        if handle.dragged() {
            let delta = transform.to_pixmap_delta(&placement, handle.drag_delta());
            placements.resize_to(
                placement.id,
                placement.rect.width + delta.x,
                placement.rect.height + delta.y,
            );
        } else if body.dragged() {
            let delta = transform.to_pixmap_delta(&placement, body.drag_delta());
            placements.move_by(placement.id, delta.x, delta.y);
        }

        if handle.drag_stopped() || body.drag_stopped() {
            event = Some(PlacerEvent::BoxChanged(placement.id));
        } else if body.double_clicked() {
            event = Some(PlacerEvent::Repick(placement.tag));
        }
    }

    event
}
