//! Header panel UI rendering
//!
//! Handles the top bar with file controls, the filter box and layout toggles.

use eframe::egui;
use egui::Color32;
use rshelf::EmptyGroupPolicy;
use std::path::PathBuf;
use crate::app::AppState;

/// Result of user interaction with the header panel
pub enum HeaderInteraction {
    /// User picked a library file
    OpenFileRequested(PathBuf),
    /// User clicked "Demo Library"
    OpenDemoRequested,
    /// The filter text was edited
    FilterChanged,
    ShowHeadersToggled(bool),
    EmptyGroupPolicyChanged(EmptyGroupPolicy),
    /// User asked to scroll to the selected track
    RevealSelectedTrack,
}

fn pick_library_file() -> Option<PathBuf> {
    let mut dialog = rfd::FileDialog::new()
        .add_filter("Library Files", &["jsonl", "br"])
        .add_filter("All Files", &["*"]);

    if let Some(dir) = dirs::audio_dir().or_else(|| std::env::current_dir().ok()) {
        dialog = dialog.set_directory(dir);
    }

    dialog.pick_file()
}

/// Renders the application header.
pub fn render_header(ui: &mut egui::Ui, state: &mut AppState) -> Option<HeaderInteraction> {
    let mut interaction = None;

    ui.horizontal(|ui| {
        if ui.button("📁 Open Library").clicked() {
            if let Some(path) = pick_library_file() {
                interaction = Some(HeaderInteraction::OpenFileRequested(path));
            }
        }

        if ui.button("🔮 Demo Library").clicked() {
            interaction = Some(HeaderInteraction::OpenDemoRequested);
        }

        ui.separator();

        let filter = egui::TextEdit::singleline(&mut state.filter_text)
            .hint_text("🔍 Filter")
            .desired_width(220.0);
        if ui.add(filter).changed() {
            interaction = Some(HeaderInteraction::FilterChanged);
        }
        if !state.filter_text.is_empty() && ui.small_button("✖").clicked() {
            state.filter_text.clear();
            interaction = Some(HeaderInteraction::FilterChanged);
        }

        ui.separator();

        let mut show_headers = state.views.show_headers();
        if ui.checkbox(&mut show_headers, "Group headers").changed() {
            interaction = Some(HeaderInteraction::ShowHeadersToggled(show_headers));
        }

        let mut hide_empty = state.views.empty_group_policy() == EmptyGroupPolicy::Hide;
        let hide_response = ui.checkbox(&mut hide_empty, "Hide empty groups");
        if hide_response.changed() {
            let policy = if hide_empty {
                EmptyGroupPolicy::Hide
            } else {
                EmptyGroupPolicy::ShowHeader
            };
            interaction = Some(HeaderInteraction::EmptyGroupPolicyChanged(policy));
        }
        hide_response.on_hover_text("Skip the header of groups that have no members");

        if state.selection.track.is_some() {
            ui.separator();
            if ui.button("⌖ Reveal Selected").clicked() {
                interaction = Some(HeaderInteraction::RevealSelectedTrack);
            }
        }
    });

    if let Some(err) = &state.error_message {
        ui.colored_label(Color32::RED, err);
    }

    interaction
}
