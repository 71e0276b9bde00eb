//! List row rendering
//!
//! Draws single-entity leaf rows for the list views: one artist per row in
//! the artist list, one track per row in the tracks view.

use eframe::egui;
use rshelf::{Artist, Track};

use crate::rendering::text_utils::paint_clipped_text;
use crate::utils::{format_duration, quality_badge};

const NUMBER_COLUMN_WIDTH: f32 = 36.0;
const DURATION_COLUMN_WIDTH: f32 = 56.0;
const BADGE_COLUMN_WIDTH: f32 = 104.0;

/// Allocates the row, paints its selection/hover background and returns the response.
fn row_background(ui: &mut egui::Ui, is_selected: bool) -> (egui::Rect, egui::Response) {
    let rect = ui.max_rect();
    let response = ui.allocate_rect(rect, egui::Sense::click());

    if is_selected {
        ui.painter().rect_filled(rect, 0.0, ui.visuals().selection.bg_fill);
    } else if response.hovered() {
        ui.painter().rect_filled(rect, 0.0, ui.visuals().widgets.hovered.weak_bg_fill);
    }

    (rect, response)
}

/// Renders one track row; returns true if it was clicked.
pub fn render_track_row(ui: &mut egui::Ui, track: &Track, is_selected: bool) -> bool {
    let (rect, response) = row_background(ui, is_selected);
    let painter = ui.painter();
    let visuals = ui.visuals();
    let font = egui::FontId::proportional(14.0);
    let y = rect.center().y;

    painter.text(
        egui::pos2(rect.left() + NUMBER_COLUMN_WIDTH - 8.0, y),
        egui::Align2::RIGHT_CENTER,
        track.track_number.to_string(),
        font.clone(),
        visuals.weak_text_color(),
    );

    let badge = quality_badge(track);
    let badge_width = if badge.is_some() { BADGE_COLUMN_WIDTH } else { 0.0 };
    let title_width = rect.width() - NUMBER_COLUMN_WIDTH - DURATION_COLUMN_WIDTH - badge_width;
    paint_clipped_text(
        painter,
        egui::pos2(rect.left() + NUMBER_COLUMN_WIDTH, y),
        egui::Align2::LEFT_CENTER,
        &track.title,
        title_width,
        font.clone(),
        visuals.text_color(),
    );

    if let Some(badge) = badge {
        painter.text(
            egui::pos2(rect.right() - DURATION_COLUMN_WIDTH - 8.0, y),
            egui::Align2::RIGHT_CENTER,
            badge,
            egui::FontId::monospace(11.0),
            visuals.weak_text_color(),
        );
    }

    painter.text(
        egui::pos2(rect.right() - 8.0, y),
        egui::Align2::RIGHT_CENTER,
        format_duration(track.duration_secs),
        font,
        visuals.text_color(),
    );

    response.clicked()
}

/// Renders one artist row; returns true if it was clicked.
pub fn render_artist_row(ui: &mut egui::Ui, artist: &Artist, album_count: usize, is_selected: bool) -> bool {
    let (rect, response) = row_background(ui, is_selected);
    let painter = ui.painter();
    let visuals = ui.visuals();
    let y = rect.center().y;

    let star = if artist.starred { "★" } else { "" };
    painter.text(
        egui::pos2(rect.left() + 12.0, y),
        egui::Align2::CENTER_CENTER,
        star,
        egui::FontId::proportional(14.0),
        egui::Color32::GOLD,
    );

    paint_clipped_text(
        painter,
        egui::pos2(rect.left() + 28.0, y),
        egui::Align2::LEFT_CENTER,
        &artist.name,
        rect.width() - 28.0 - DURATION_COLUMN_WIDTH * 2.0,
        egui::FontId::proportional(14.0),
        visuals.text_color(),
    );

    painter.text(
        egui::pos2(rect.right() - 8.0, y),
        egui::Align2::RIGHT_CENTER,
        format!("{} albums", album_count),
        egui::FontId::proportional(12.0),
        visuals.weak_text_color(),
    );

    response.clicked()
}
