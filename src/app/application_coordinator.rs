//! Application-level coordination and workflow management.
//!
//! Handles high-level operations like library loading, tab switching and
//! cross-view navigation, and keeps the error state consistent.

use crate::app::view_state::Tab;
use crate::app::AppState;
use crate::io::{AsyncLoader, LoadResult};
use rshelf::{EmptyGroupPolicy, GroupId, ScrollBehavior};
use std::path::PathBuf;
use tracing::debug;

/// Coordinates application-level operations and workflows.
pub struct ApplicationCoordinator;

impl ApplicationCoordinator {
    /// Initiates asynchronous file loading.
    ///
    /// Immediately clears the previous library to show the loading indicator.
    pub fn open_file(
        state: &mut AppState,
        loader: &mut AsyncLoader,
        path: PathBuf,
        ctx: &egui::Context,
    ) {
        state.reset_library_state();
        loader.start_file_load(path, ctx);
    }

    /// Checks for loading completion and applies results to application state.
    ///
    /// Returns true if a load operation completed (success or error).
    pub fn check_loading_completion(state: &mut AppState, loader: &mut AsyncLoader) -> bool {
        match loader.check_completion() {
            LoadResult::Success { data, path } => {
                state.load_library(data.library, Some(data.header), Some(path));
                true
            }
            LoadResult::Error(error_msg) => {
                state.reset_library_state();
                state.error_message = Some(format!("Error loading library: {}", error_msg));
                true
            }
            LoadResult::None => false,
        }
    }

    /// Generates and loads the demo library.
    pub fn open_demo_library(state: &mut AppState, loader: &AsyncLoader) {
        let library = loader.load_demo_library();
        state.load_library(library, None, None);
    }

    pub fn apply_filter(state: &mut AppState) {
        state.rebuild_groups();
    }

    pub fn select_tab(state: &mut AppState, tab: Tab) {
        state.views.activate(tab);
    }

    pub fn set_show_headers(state: &mut AppState, show_headers: bool) {
        state.views.set_show_headers(show_headers);
    }

    pub fn set_empty_group_policy(state: &mut AppState, policy: EmptyGroupPolicy) {
        state.views.set_empty_group_policy(policy);
    }

    /// Smooth-scrolls the active view to a group (jump bar click).
    pub fn jump_to_group(state: &mut AppState, group_id: &GroupId) {
        state.views.active_view().scroll_to_group(group_id, ScrollBehavior::Smooth);
    }

    /// Opens an album: selects it and shows its tracks.
    pub fn activate_album(state: &mut AppState, album_id: u64) {
        state.selection.album = Some(album_id);
        Self::select_tab(state, Tab::Tracks);
        let group_id = GroupId::new(format!("album:{}", album_id));
        if state.views.tracks.list.scroll_to_group(&group_id, ScrollBehavior::Instant).is_none() {
            debug!(album_id, "album has no group in the tracks view");
        }
    }

    /// Opens an artist: selects it and shows the tracks of its first album.
    pub fn activate_artist(state: &mut AppState, artist_id: u64) {
        state.selection.artist = Some(artist_id);
        let Some(library) = state.library() else {
            return;
        };
        let group_ids: Vec<GroupId> = library
            .artist_albums(artist_id)
            .map(|album| GroupId::new(format!("album:{}", album.id)))
            .collect();

        Self::select_tab(state, Tab::Tracks);
        let tracks = &mut state.views.tracks.list;
        let first = group_ids
            .iter()
            .filter_map(|id| tracks.group_positions().offset_of(id).map(|offset| (offset, id)))
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, id)| id.clone());

        match first {
            Some(id) => {
                tracks.scroll_to_group(&id, ScrollBehavior::Instant);
            }
            None => debug!(artist_id, "artist has no albums in the tracks view"),
        }
    }

    pub fn select_track(state: &mut AppState, track_id: u64) {
        state.selection.track = Some(track_id);
    }

    /// Scrolls the tracks view to the selected track.
    pub fn reveal_selected_track(state: &mut AppState) {
        let Some(track_id) = state.selection.track else {
            return;
        };
        Self::select_tab(state, Tab::Tracks);
        state.views.tracks.list.scroll_to_entity(&track_id, ScrollBehavior::Smooth);
    }
}
