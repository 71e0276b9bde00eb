//! Jump bar UI rendering
//!
//! A narrow strip beside the list with one label per section, placed at the
//! section's relative position in the content. Clicking a label scrolls the
//! list to that section's first group.

use eframe::egui;
use rshelf::GroupId;

use crate::app::view_state::ViewControl;

const LABEL_HEIGHT: f32 = 14.0;

/// Renders the jump bar for `view`; returns the clicked target's group.
pub fn render_jump_bar(ui: &mut egui::Ui, view: &mut dyn ViewControl) -> Option<GroupId> {
    let rect = ui.available_rect_before_wrap();
    ui.allocate_rect(rect, egui::Sense::hover());

    let track_height = rect.height() - LABEL_HEIGHT;
    if track_height <= 0.0 {
        return None;
    }

    // Labels closer than one label height would overlap
    let targets = view.jump_targets(LABEL_HEIGHT / track_height);
    let current = view.current_section();
    let font = egui::FontId::proportional(11.0);
    let mut clicked = None;

    for (index, target) in targets.iter().enumerate() {
        let top = rect.top() + target.fraction * track_height;
        let label_rect = egui::Rect::from_min_size(
            egui::pos2(rect.left(), top),
            egui::vec2(rect.width(), LABEL_HEIGHT),
        );
        let response = ui.interact(label_rect, ui.id().with(("jump_label", index)), egui::Sense::click());

        let is_current = current.as_deref() == Some(target.label.as_str());
        let visuals = ui.visuals();
        let color = if is_current || response.hovered() {
            visuals.strong_text_color()
        } else {
            visuals.weak_text_color()
        };
        if is_current {
            ui.painter().rect_filled(label_rect, 3.0, visuals.selection.bg_fill);
        }
        ui.painter().text(label_rect.center(), egui::Align2::CENTER_CENTER, &target.label, font.clone(), color);

        if response.clicked() {
            clicked = Some(target.group_id.clone());
        }
    }

    clicked
}
