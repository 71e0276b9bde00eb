//! Group header rendering
//!
//! Draws a section header: the group label, its member count and a rule
//! along the bottom edge. Fills whatever rect the caller positioned.

use eframe::egui;

use crate::rendering::text_utils::paint_clipped_text;
use crate::utils::format_count;

const COUNT_COLUMN_WIDTH: f32 = 80.0;

/// Renders a group header into the current UI's rect.
///
/// `is_current` highlights the header of the group the viewport is inside.
pub fn render_group_header(ui: &mut egui::Ui, label: &str, member_count: usize, is_current: bool) {
    let rect = ui.max_rect();
    let painter = ui.painter();
    let visuals = ui.visuals();

    let label_color = if is_current {
        visuals.strong_text_color()
    } else {
        visuals.text_color()
    };

    paint_clipped_text(
        painter,
        egui::pos2(rect.left() + 4.0, rect.center().y),
        egui::Align2::LEFT_CENTER,
        label,
        rect.width() - COUNT_COLUMN_WIDTH - 8.0,
        egui::FontId::proportional(16.0),
        label_color,
    );

    painter.text(
        egui::pos2(rect.right() - 4.0, rect.center().y),
        egui::Align2::RIGHT_CENTER,
        format_count(member_count),
        egui::FontId::proportional(12.0),
        visuals.weak_text_color(),
    );

    let rule_y = rect.bottom() - 2.0;
    painter.line_segment(
        [egui::pos2(rect.left(), rule_y), egui::pos2(rect.right(), rule_y)],
        egui::Stroke::new(1.0, visuals.widgets.noninteractive.bg_stroke.color),
    );
}
