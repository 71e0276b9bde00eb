//! Library panel UI rendering
//!
//! Drives one `VirtualList` from an egui scroll area: the scroll area is the
//! surface whose geometry the list observes, the content is sized to the
//! list's total height, and only the buffered visible window is laid out,
//! each item at its absolute offset.

use eframe::egui;
use rshelf::{Entity, Library, ScrollBehavior, ScrollRequest, VisibleItem};

use crate::app::view_state::{LibraryView, LibraryViews, Tab};
use crate::app::Selection;
use crate::rendering::{card_renderer, header_renderer, row_renderer};

/// Result of library panel interactions that need to be handled by the application.
pub enum LibraryPanelInteraction {
    AlbumActivated(u64),
    ArtistActivated(u64),
    TrackSelected(u64),
}

/// Shows a virtual list inside a vertical scroll area.
///
/// Headers are drawn here; every other item is handed to `render_members`
/// with a UI whose max rect is the item's rect.
pub fn show_virtual_list<T: Entity, R>(
    ui: &mut egui::Ui,
    id_salt: &str,
    view: &mut LibraryView<T>,
    mut render_members: impl FnMut(&mut egui::Ui, &VisibleItem<'_, T>) -> Option<R>,
) -> Option<R> {
    let LibraryView { list, surface } = view;
    let request = list.take_scroll_request();

    let mut scroll_area = egui::ScrollArea::vertical()
        .id_salt(id_salt)
        .auto_shrink([false, false]);
    if let Some(ScrollRequest { offset, behavior: ScrollBehavior::Instant }) = request {
        scroll_area = scroll_area.vertical_scroll_offset(offset);
    }

    scroll_area
        .show_viewport(ui, |ui, viewport| {
            surface.observe(viewport.top(), viewport.width(), viewport.height());
            list.sync_viewport();

            ui.set_height(list.total_height());
            let origin = ui.min_rect().min;
            let width = ui.max_rect().width();

            if let Some(ScrollRequest { offset, behavior: ScrollBehavior::Smooth }) = request {
                let target = egui::Rect::from_min_size(
                    origin + egui::vec2(0.0, offset),
                    egui::vec2(width, viewport.height()),
                );
                ui.scroll_to_rect(target, Some(egui::Align::TOP));
            }

            let current = list.current_group().map(|group| group.id.clone());
            let mut interaction = None;

            for entry in list.visible_items() {
                let rect = egui::Rect::from_min_size(
                    origin + egui::vec2(0.0, entry.item.top),
                    egui::vec2(width, entry.item.height),
                );
                ui.push_id(&entry.key, |ui| {
                    ui.scope_builder(egui::UiBuilder::new().max_rect(rect), |ui| {
                        if entry.item.is_header() {
                            let is_current = current.as_ref() == Some(&entry.group.id);
                            header_renderer::render_group_header(
                                ui,
                                &entry.group.label,
                                entry.group.members.len(),
                                is_current,
                            );
                        } else if let Some(result) = render_members(ui, &entry) {
                            interaction = Some(result);
                        }
                    });
                });
            }

            interaction
        })
        .inner
}

/// Renders the active library view.
pub fn render_library_panel(
    ui: &mut egui::Ui,
    library: &Library,
    views: &mut LibraryViews,
    selection: Selection,
) -> Option<LibraryPanelInteraction> {
    match views.active() {
        Tab::Albums => {
            let config = views.albums.list.config().clone();
            show_virtual_list(ui, "albums_grid", &mut views.albums, |ui, entry| {
                card_renderer::render_album_row(ui, entry.members, library, &config, selection.album)
            })
            .map(LibraryPanelInteraction::AlbumActivated)
        }
        Tab::Artists => {
            let config = views.artists.list.config().clone();
            let album_count = |artist_id: u64| library.artist_albums(artist_id).count();
            show_virtual_list(ui, "artists_grid", &mut views.artists, |ui, entry| {
                card_renderer::render_artist_row(ui, entry.members, &album_count, &config, selection.artist)
            })
            .map(LibraryPanelInteraction::ArtistActivated)
        }
        Tab::ArtistList => {
            show_virtual_list(ui, "artist_list", &mut views.artist_list, |ui, entry| {
                let artist = entry.members.first()?;
                let albums = library.artist_albums(artist.id).count();
                row_renderer::render_artist_row(ui, artist, albums, selection.artist == Some(artist.id))
                    .then_some(artist.id)
            })
            .map(LibraryPanelInteraction::ArtistActivated)
        }
        Tab::Tracks => {
            show_virtual_list(ui, "tracks_list", &mut views.tracks, |ui, entry| {
                let track = entry.members.first()?;
                row_renderer::render_track_row(ui, track, selection.track == Some(track.id))
                    .then_some(track.id)
            })
            .map(LibraryPanelInteraction::TrackSelected)
        }
    }
}
