//! Centralized application state for the library viewer.
//!
//! Composes the loaded library, the four list views and the small amount of
//! UI state shared between panels (filter text, selection, errors).

use std::path::{Path, PathBuf};

use rshelf::domain::grouping::{self, TextFilter};
use rshelf::{Library, LibraryHeader};

use crate::app::view_state::{LibraryViews, ViewSettings};

/// What the user has clicked on, per entity kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    pub album: Option<u64>,
    pub artist: Option<u64>,
    pub track: Option<u64>,
}

impl Selection {
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

pub struct AppState {
    /// Loaded library (None until a file or the demo is loaded)
    library: Option<Library>,

    /// Header of the loaded file (None for the demo library)
    file_header: Option<LibraryHeader>,

    /// Path of the loaded file (None for the demo library)
    file_path: Option<PathBuf>,

    /// One virtual list per tab
    pub views: LibraryViews,

    /// Text of the filter box
    pub filter_text: String,

    pub selection: Selection,

    /// Current error message to display (if any)
    pub error_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&ViewSettings::default())
    }
}

impl AppState {
    pub fn new(settings: &ViewSettings) -> Self {
        Self {
            library: None,
            file_header: None,
            file_path: None,
            views: LibraryViews::new(settings),
            filter_text: String::new(),
            selection: Selection::default(),
            error_message: None,
        }
    }

    pub fn library(&self) -> Option<&Library> {
        self.library.as_ref()
    }

    pub fn file_header(&self) -> Option<&LibraryHeader> {
        self.file_header.as_ref()
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Splits the state so the views can be driven while the library is read.
    pub fn parts_mut(&mut self) -> (Option<&Library>, &mut LibraryViews, Selection) {
        (self.library.as_ref(), &mut self.views, self.selection)
    }

    /// Drops the loaded library and empties every view.
    pub fn reset_library_state(&mut self) {
        self.library = None;
        self.file_header = None;
        self.file_path = None;
        self.selection.clear();
        self.error_message = None;
        self.rebuild_groups();
    }

    /// Installs a freshly loaded library and regroups every view.
    pub fn load_library(&mut self, library: Library, header: Option<LibraryHeader>, path: Option<PathBuf>) {
        self.library = Some(library);
        self.file_header = header;
        self.file_path = path;
        self.selection.clear();
        self.error_message = None;
        self.rebuild_groups();
    }

    /// Recomputes the groups of all four views from the library and filter.
    pub fn rebuild_groups(&mut self) {
        let filter = TextFilter::new(&self.filter_text);
        let views = &mut self.views;
        match &self.library {
            Some(library) => {
                views.albums.list.set_groups(grouping::album_groups_by_initial(library, &filter));
                let artists = grouping::artist_groups_by_initial(library, &filter);
                views.artists.list.set_groups(artists.clone());
                views.artist_list.list.set_groups(artists);
                views.tracks.list.set_groups(grouping::track_groups_by_album(library, &filter));
            }
            None => {
                views.albums.list.set_groups(Vec::new());
                views.artists.list.set_groups(Vec::new());
                views.artist_list.list.set_groups(Vec::new());
                views.tracks.list.set_groups(Vec::new());
            }
        }
    }
}
