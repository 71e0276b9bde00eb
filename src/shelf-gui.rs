//! Shelf Library Viewer GUI Application
//!
//! An interactive browser for music library files built on egui. The viewer
//! features:
//! - Album and artist grids, an artist list and a track list, all virtualized
//! - Grouped sections with a jump bar for fast navigation
//! - Asynchronous file loading with a loading indicator
//! - Text filtering across every view
//! - Persistent layout preferences
//!
//! The application is built with a modular architecture:
//! - `app/` - Application state management and coordination
//! - `io/` - Background file loading
//! - `utils/` - Utility functions for formatting
//! - `ui/` - UI panel rendering and interaction
//! - `rendering/` - Low-level drawing of headers, cards and rows

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use eframe::egui;
use std::path::PathBuf;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod utils;
mod io;
mod app;
mod rendering;
mod ui;

use app::{AppState, ApplicationCoordinator, SettingsCoordinator};
use io::AsyncLoader;
use ui::panel_manager::{PanelInteraction, PanelManager};

/// Main application entry point that initializes and launches the library viewer GUI.
fn main() -> eframe::Result {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("rshelf=info,shelf_gui=info")),
        )
        .init();

    // Parse command-line arguments to check for initial file to load
    let initial_file = std::env::args()
        .nth(1)
        .map(PathBuf::from);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_title("Shelf Library Viewer"),
        ..Default::default()
    };

    eframe::run_native(
        "Shelf Library Viewer",
        options,
        Box::new(move |cc| Ok(Box::new(ShelfViewerApp::new(cc, initial_file)))),
    )
}

/// The main library viewer application.
///
/// Delegates most functionality to coordinators:
/// - `ApplicationCoordinator` handles loading, navigation and selection
/// - `SettingsCoordinator` handles preference persistence
/// - `PanelManager` handles UI panel layout and rendering
struct ShelfViewerApp {
    /// Centralized application state
    state: AppState,
    /// Asynchronous file loader
    loader: AsyncLoader,
    /// Optional file to load on first frame
    pending_file_load: Option<PathBuf>,
}

impl ShelfViewerApp {
    /// Creates a new viewer instance with view settings loaded from persistent storage.
    /// Optionally accepts an initial file path to load on startup.
    fn new(cc: &eframe::CreationContext, initial_file: Option<PathBuf>) -> Self {
        let settings = SettingsCoordinator::load_view_settings(cc.storage);

        Self {
            state: AppState::new(&settings),
            loader: AsyncLoader::new(),
            pending_file_load: initial_file,
        }
    }

    /// Handles panel interactions by delegating to ApplicationCoordinator.
    fn handle_panel_interaction(&mut self, interaction: PanelInteraction, ctx: &egui::Context) {
        match interaction {
            PanelInteraction::OpenFileRequested(path) => {
                ApplicationCoordinator::open_file(&mut self.state, &mut self.loader, path, ctx);
            }
            PanelInteraction::OpenDemoRequested => {
                ApplicationCoordinator::open_demo_library(&mut self.state, &self.loader);
            }
            PanelInteraction::FilterChanged => {
                ApplicationCoordinator::apply_filter(&mut self.state);
            }
            PanelInteraction::ShowHeadersToggled(show_headers) => {
                ApplicationCoordinator::set_show_headers(&mut self.state, show_headers);
            }
            PanelInteraction::EmptyGroupPolicyChanged(policy) => {
                ApplicationCoordinator::set_empty_group_policy(&mut self.state, policy);
            }
            PanelInteraction::RevealSelectedTrack => {
                ApplicationCoordinator::reveal_selected_track(&mut self.state);
            }
            PanelInteraction::TabSelected(tab) => {
                ApplicationCoordinator::select_tab(&mut self.state, tab);
            }
            PanelInteraction::JumpRequested(group_id) => {
                ApplicationCoordinator::jump_to_group(&mut self.state, &group_id);
            }
            PanelInteraction::AlbumActivated(album_id) => {
                ApplicationCoordinator::activate_album(&mut self.state, album_id);
            }
            PanelInteraction::ArtistActivated(artist_id) => {
                ApplicationCoordinator::activate_artist(&mut self.state, artist_id);
            }
            PanelInteraction::TrackSelected(track_id) => {
                ApplicationCoordinator::select_track(&mut self.state, track_id);
            }
        }
        // Scroll requests queued above are applied on the next frame
        ctx.request_repaint();
    }
}

impl eframe::App for ShelfViewerApp {
    /// Called when the app is being shut down - ensures preferences are saved.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        SettingsCoordinator::save_view_settings(storage, &self.state.views.settings());
    }

    /// Main update loop that renders all UI panels and handles application state.
    ///
    /// 1. Check for async loading completion
    /// 2. Load initial file if specified via command line
    /// 3. Render all panels via PanelManager
    /// 4. Handle panel interactions
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ApplicationCoordinator::check_loading_completion(&mut self.state, &mut self.loader);

        // Load initial file if specified via command line (only on first frame)
        if let Some(path) = self.pending_file_load.take() {
            ApplicationCoordinator::open_file(&mut self.state, &mut self.loader, path, ctx);
        }

        if let Some(interaction) = PanelManager::render_all_panels(ctx, &mut self.state, &self.loader) {
            self.handle_panel_interaction(interaction, ctx);
        }
    }
}
