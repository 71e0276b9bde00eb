//! Status bar UI rendering
//!
//! Handles the bottom status bar: memory usage, library totals, the active
//! view's layout figures and the selected track.

use eframe::egui;
use egui::RichText;
use crate::app::AppState;
use crate::utils::{format_count, format_duration, format_memory_mb, get_current_memory_mb, quality_badge};

/// Renders the status panel at the bottom of the window.
pub fn render_status_bar(ui: &mut egui::Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        let memory_text = format_memory_mb(get_current_memory_mb());
        ui.label(RichText::new(&memory_text).strong());
        ui.label(RichText::new("|").strong());

        let Some(library) = state.library() else {
            ui.label(RichText::new("No library loaded").strong());
            return;
        };

        let source = match (state.file_path(), state.file_header()) {
            (Some(path), Some(header)) => format!(
                "{} (v{})",
                path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default(),
                header.version
            ),
            _ => "Demo Library | Seed: 42".to_string(),
        };
        ui.label(RichText::new(format!(
            "{} | Artists: {} | Albums: {} | Tracks: {}",
            source,
            format_count(library.artists().len()),
            format_count(library.albums().len()),
            format_count(library.tracks().len()),
        )).strong());

        let selected = state
            .selection
            .track
            .and_then(|id| library.tracks().iter().find(|t| t.id == id))
            .map(|track| {
                let badge = quality_badge(track).map(|b| format!(" | {}", b)).unwrap_or_default();
                format!("▶ {} ({}){}", track.title, format_duration(track.duration_secs), badge)
            });

        let stats = state.views.active_view().stats();
        ui.label(RichText::new("|").strong());
        ui.label(format!(
            "Groups: {} | Items: {} | Rendered: {} | Columns: {}",
            format_count(stats.groups),
            format_count(stats.items),
            stats.rendered,
            stats.columns,
        ));

        if let Some(selected) = selected {
            ui.label(RichText::new("|").strong());
            ui.label(RichText::new(selected).color(egui::Color32::YELLOW));
        }
    });
}
