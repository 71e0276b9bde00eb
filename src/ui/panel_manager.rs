//! Panel orchestration and layout management.
//!
//! Coordinates all UI panels (header, tabs, jump bar, library list, status)
//! and forwards their interactions to the application.

use std::path::PathBuf;

use rshelf::{EmptyGroupPolicy, GroupId};

use crate::app::view_state::Tab;
use crate::app::AppState;
use crate::io::AsyncLoader;
use crate::ui::header::{self, HeaderInteraction};
use crate::ui::library_panel::{self, LibraryPanelInteraction};
use crate::ui::{jump_bar, status_bar, tab_bar};

const JUMP_BAR_WIDTH: f32 = 28.0;

/// Result of panel interactions that need to be handled by the application coordinator.
pub enum PanelInteraction {
    /// User requested to open a file
    OpenFileRequested(PathBuf),
    /// User requested the generated demo library
    OpenDemoRequested,
    FilterChanged,
    ShowHeadersToggled(bool),
    EmptyGroupPolicyChanged(EmptyGroupPolicy),
    RevealSelectedTrack,
    TabSelected(Tab),
    /// A jump bar label was clicked
    JumpRequested(GroupId),
    AlbumActivated(u64),
    ArtistActivated(u64),
    TrackSelected(u64),
}

impl From<HeaderInteraction> for PanelInteraction {
    fn from(interaction: HeaderInteraction) -> Self {
        match interaction {
            HeaderInteraction::OpenFileRequested(path) => PanelInteraction::OpenFileRequested(path),
            HeaderInteraction::OpenDemoRequested => PanelInteraction::OpenDemoRequested,
            HeaderInteraction::FilterChanged => PanelInteraction::FilterChanged,
            HeaderInteraction::ShowHeadersToggled(show) => PanelInteraction::ShowHeadersToggled(show),
            HeaderInteraction::EmptyGroupPolicyChanged(policy) => {
                PanelInteraction::EmptyGroupPolicyChanged(policy)
            }
            HeaderInteraction::RevealSelectedTrack => PanelInteraction::RevealSelectedTrack,
        }
    }
}

impl From<LibraryPanelInteraction> for PanelInteraction {
    fn from(interaction: LibraryPanelInteraction) -> Self {
        match interaction {
            LibraryPanelInteraction::AlbumActivated(id) => PanelInteraction::AlbumActivated(id),
            LibraryPanelInteraction::ArtistActivated(id) => PanelInteraction::ArtistActivated(id),
            LibraryPanelInteraction::TrackSelected(id) => PanelInteraction::TrackSelected(id),
        }
    }
}

/// Manages the layout and rendering of all UI panels.
pub struct PanelManager;

impl PanelManager {
    /// Renders all panels in the application window.
    ///
    /// Called from the eframe::App::update() implementation. At most one
    /// interaction is reported per frame; the last panel to report wins.
    pub fn render_all_panels(
        ctx: &egui::Context,
        state: &mut AppState,
        loader: &AsyncLoader,
    ) -> Option<PanelInteraction> {
        let mut interaction: Option<PanelInteraction> = None;

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            if let Some(header_interaction) = header::render_header(ui, state) {
                interaction = Some(header_interaction.into());
            }
        });

        egui::TopBottomPanel::top("tabs").show(ctx, |ui| {
            if let Some(tab) = tab_bar::render_tab_bar(ui, state.views.active()) {
                interaction = Some(PanelInteraction::TabSelected(tab));
            }
        });

        egui::TopBottomPanel::bottom("status_panel").show(ctx, |ui| {
            status_bar::render_status_bar(ui, state);
        });

        if state.library().is_some() && state.views.show_headers() {
            egui::SidePanel::right("jump_bar")
                .exact_width(JUMP_BAR_WIDTH)
                .resizable(false)
                .show(ctx, |ui| {
                    if let Some(group_id) = jump_bar::render_jump_bar(ui, state.views.active_view()) {
                        interaction = Some(PanelInteraction::JumpRequested(group_id));
                    }
                });
        }

        let list_frame = egui::Frame::default()
            .inner_margin(egui::Margin::same(4))
            .fill(ctx.style().visuals.panel_fill);

        egui::CentralPanel::default()
            .frame(list_frame)
            .show(ctx, |ui| {
                if loader.is_loading() {
                    ui.centered_and_justified(|ui| {
                        ui.spinner();
                    });
                    ctx.request_repaint_after(std::time::Duration::from_secs_f32(0.1));
                    return;
                }

                let (library, views, selection) = state.parts_mut();
                let Some(library) = library else {
                    ui.centered_and_justified(|ui| {
                        ui.label("No library loaded. Open a file or load the demo library.");
                    });
                    return;
                };

                if let Some(panel_interaction) =
                    library_panel::render_library_panel(ui, library, views, selection)
                {
                    interaction = Some(panel_interaction.into());
                }
            });

        interaction
    }
}
