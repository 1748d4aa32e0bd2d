use eframe::egui;
use pdf_stamp_runtime::StampTag;

use super::placer::PlacerState;

/// A toolbar button press
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToolbarAction {
    OpenPdf,
    FirstPage,
    PreviousPage,
    NextPage,
    LastPage,
    Add(StampTag),
    Remove(StampTag),
    SaveAs,
    SaveLayout,
    LoadLayout,
}

fn add_label(tag: StampTag) -> &'static str {
    match tag {
        StampTag::Initials => "Add initials (all pages)",
        StampTag::Signature => "Add full signature",
        StampTag::Other => "Add other stamp",
    }
}

fn remove_label(tag: StampTag) -> &'static str {
    match tag {
        StampTag::Initials => "Remove initials",
        StampTag::Signature => "Remove signature",
        StampTag::Other => "Remove other stamps",
    }
}

pub fn show_toolbar(ui: &mut egui::Ui, placer: Option<&PlacerState>) -> Option<ToolbarAction> {
    let mut action = None;
    let mut clicked = |response: egui::Response, value: ToolbarAction| {
        if response.clicked() {
            action = Some(value);
        }
    };

    let has_document = placer.is_some();
    let has_page = placer.is_some_and(|p| p.pixmap.is_some());
    let can_go_back = placer.is_some_and(PlacerState::can_go_back);
    let can_go_forward = placer.is_some_and(PlacerState::can_go_forward);

    ui.horizontal_wrapped(|ui| {
        clicked(ui.button("Open PDF…"), ToolbarAction::OpenPdf);
        ui.separator();

        clicked(
            ui.add_enabled(can_go_back, egui::Button::new("≪"))
                .on_hover_text("First page"),
            ToolbarAction::FirstPage,
        );
        clicked(
            ui.add_enabled(can_go_back, egui::Button::new("‹"))
                .on_hover_text("Previous page"),
            ToolbarAction::PreviousPage,
        );
        if let Some(placer) = placer {
            ui.label(format!(
                "Page {} of {}",
                placer.current_page + 1,
                placer.total_pages
            ));
        }
        clicked(
            ui.add_enabled(can_go_forward, egui::Button::new("›"))
                .on_hover_text("Next page"),
            ToolbarAction::NextPage,
        );
        clicked(
            ui.add_enabled(can_go_forward, egui::Button::new("≫"))
                .on_hover_text("Last page"),
            ToolbarAction::LastPage,
        );
        ui.separator();

        for tag in StampTag::ALL {
            clicked(
                ui.add_enabled(has_page, egui::Button::new(add_label(tag))),
                ToolbarAction::Add(tag),
            );
        }
        ui.separator();

        for tag in StampTag::ALL {
            clicked(ui.button(remove_label(tag)), ToolbarAction::Remove(tag));
        }
        ui.separator();

        clicked(
            ui.add_enabled(has_document, egui::Button::new("Save as…")),
            ToolbarAction::SaveAs,
        );
        clicked(ui.button("Save layout…"), ToolbarAction::SaveLayout);
        clicked(ui.button("Load layout…"), ToolbarAction::LoadLayout);
    });

    action
}
