//! Text rendering utilities
//!
//! Shared helpers for drawing single-line text that must stay inside a box.

use eframe::egui;

const ELLIPSIS: &str = "…";

fn text_width(painter: &egui::Painter, text: &str, font_id: &egui::FontId) -> f32 {
    painter
        .layout_no_wrap(text.to_string(), font_id.clone(), egui::Color32::WHITE)
        .size()
        .x
}

/// Shortens `text` with a trailing ellipsis until it fits in `max_width`.
///
/// Returns an empty string when not even the ellipsis fits.
pub fn truncate_text_to_fit(
    text: &str,
    max_width: f32,
    font_id: &egui::FontId,
    painter: &egui::Painter,
) -> String {
    if max_width <= 0.0 {
        return String::new();
    }
    if text_width(painter, text, font_id) <= max_width {
        return text.to_string();
    }

    let budget = max_width - text_width(painter, ELLIPSIS, font_id);
    if budget <= 0.0 {
        return String::new();
    }

    // Longest char prefix that fits, by binary search over prefix lengths
    let boundaries: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
    let fits = boundaries.partition_point(|&end| text_width(painter, &text[..end], font_id) <= budget);
    let end = fits.checked_sub(1).map(|i| boundaries[i]).unwrap_or(0);

    format!("{}{}", text[..end].trim_end(), ELLIPSIS)
}

/// Draws one line of text anchored at `pos`, truncated to `max_width`.
pub fn paint_clipped_text(
    painter: &egui::Painter,
    pos: egui::Pos2,
    anchor: egui::Align2,
    text: &str,
    max_width: f32,
    font_id: egui::FontId,
    color: egui::Color32,
) {
    let fitted = truncate_text_to_fit(text, max_width, &font_id, painter);
    if !fitted.is_empty() {
        painter.text(pos, anchor, fitted, font_id, color);
    }
}
