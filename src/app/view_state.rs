//! Per-tab list state.
//!
//! Each tab owns one `VirtualList` instance and the scroll surface it
//! observes. Only the active tab's list is attached; switching tabs releases
//! the other lists' subscriptions.

use rshelf::domain::jump_bar::{section_label, JumpTarget};
use rshelf::{
    Album, Artist, EmptyGroupPolicy, Entity, GroupId, ListConfig, ScrollBehavior,
    ScrollRequest, SurfaceEvent, SurfaceEvents, Track, ViewMode, VirtualList,
};
use serde::{Deserialize, Serialize};

/// The library views, one per tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Tab {
    #[default]
    Albums,
    Artists,
    ArtistList,
    Tracks,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Albums, Tab::Artists, Tab::ArtistList, Tab::Tracks];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Albums => "💿 Albums",
            Tab::Artists => "🎤 Artists",
            Tab::ArtistList => "☰ Artist List",
            Tab::Tracks => "🎵 Tracks",
        }
    }
}

/// Persisted view preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewSettings {
    /// Config of the list-mode views
    pub list: ListConfig,
    /// Config of the grid-mode views
    pub grid: ListConfig,
    pub active_tab: Tab,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            list: ListConfig::default(),
            grid: ListConfig::grid(),
            active_tab: Tab::default(),
        }
    }
}

/// Scroll surface adapter.
///
/// The GUI polls scroll offset and viewport size each frame; this turns the
/// polled geometry into scroll and resize events, emitted only on change.
pub struct ScrollSurface {
    events: SurfaceEvents,
    last_top: Option<f32>,
    last_size: Option<(f32, f32)>,
}

impl ScrollSurface {
    pub fn new() -> Self {
        Self {
            events: SurfaceEvents::new(),
            last_top: None,
            last_size: None,
        }
    }

    pub fn events(&self) -> &SurfaceEvents {
        &self.events
    }

    pub fn observe(&mut self, top: f32, width: f32, height: f32) {
        if self.last_size != Some((width, height)) {
            self.last_size = Some((width, height));
            self.events.emit(SurfaceEvent::Resized { width, height });
        }
        if self.last_top != Some(top) {
            self.last_top = Some(top);
            self.events.emit(SurfaceEvent::Scrolled { top });
        }
    }

    /// Forgets the last observed geometry so the next frame re-emits it.
    pub fn reset(&mut self) {
        self.last_top = None;
        self.last_size = None;
    }
}

impl Default for ScrollSurface {
    fn default() -> Self {
        Self::new()
    }
}

/// One list instance plus its surface.
pub struct LibraryView<T: Entity> {
    pub list: VirtualList<T>,
    pub surface: ScrollSurface,
}

impl<T: Entity> LibraryView<T> {
    fn new(config: ListConfig, mode: ViewMode) -> Self {
        Self {
            list: VirtualList::new(config, mode),
            surface: ScrollSurface::new(),
        }
    }
}

/// Snapshot of a view for the status bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewStats {
    pub groups: usize,
    pub items: usize,
    pub rendered: usize,
    pub columns: usize,
}

/// Type-erased access to the active view.
pub trait ViewControl {
    fn attach(&mut self);
    fn detach(&mut self);
    fn is_attached(&self) -> bool;
    fn jump_targets(&mut self, cluster_threshold: f32) -> Vec<JumpTarget>;
    /// Jump bar label of the group the viewport is inside.
    fn current_section(&mut self) -> Option<String>;
    fn scroll_to_group(&mut self, id: &GroupId, behavior: ScrollBehavior) -> Option<ScrollRequest>;
    fn stats(&mut self) -> ViewStats;
}

impl<T: Entity> ViewControl for LibraryView<T> {
    fn attach(&mut self) {
        self.surface.reset();
        self.list.attach(self.surface.events());
    }

    fn detach(&mut self) {
        self.list.detach();
    }

    fn is_attached(&self) -> bool {
        self.list.is_attached()
    }

    fn jump_targets(&mut self, cluster_threshold: f32) -> Vec<JumpTarget> {
        self.list.jump_targets(cluster_threshold)
    }

    fn current_section(&mut self) -> Option<String> {
        self.list.current_group().map(|group| section_label(&group.label))
    }

    fn scroll_to_group(&mut self, id: &GroupId, behavior: ScrollBehavior) -> Option<ScrollRequest> {
        self.list.scroll_to_group(id, behavior)
    }

    fn stats(&mut self) -> ViewStats {
        let rendered = self.list.visible_range().map(|r| r.count()).unwrap_or(0);
        ViewStats {
            groups: self.list.groups().len(),
            items: self.list.items().len(),
            rendered,
            columns: self.list.columns(),
        }
    }
}

/// The four library views.
pub struct LibraryViews {
    pub albums: LibraryView<Album>,
    pub artists: LibraryView<Artist>,
    pub artist_list: LibraryView<Artist>,
    pub tracks: LibraryView<Track>,
    active: Tab,
}

impl LibraryViews {
    pub fn new(settings: &ViewSettings) -> Self {
        let mut views = Self {
            albums: LibraryView::new(settings.grid.clone(), ViewMode::Grid),
            artists: LibraryView::new(settings.grid.clone(), ViewMode::Grid),
            artist_list: LibraryView::new(settings.list.clone(), ViewMode::List),
            tracks: LibraryView::new(settings.list.clone(), ViewMode::List),
            active: settings.active_tab,
        };
        views.view_mut(settings.active_tab).attach();
        views
    }

    pub fn active(&self) -> Tab {
        self.active
    }

    pub fn view_mut(&mut self, tab: Tab) -> &mut dyn ViewControl {
        match tab {
            Tab::Albums => &mut self.albums,
            Tab::Artists => &mut self.artists,
            Tab::ArtistList => &mut self.artist_list,
            Tab::Tracks => &mut self.tracks,
        }
    }

    pub fn active_view(&mut self) -> &mut dyn ViewControl {
        self.view_mut(self.active)
    }

    /// Makes `tab` the active view, attaching it and detaching the others.
    pub fn activate(&mut self, tab: Tab) {
        for other in Tab::ALL {
            if other != tab {
                self.view_mut(other).detach();
            }
        }
        if !self.view_mut(tab).is_attached() {
            self.view_mut(tab).attach();
        }
        self.active = tab;
    }

    pub fn set_show_headers(&mut self, show_headers: bool) {
        self.albums.list.set_show_headers(show_headers);
        self.artists.list.set_show_headers(show_headers);
        self.artist_list.list.set_show_headers(show_headers);
        self.tracks.list.set_show_headers(show_headers);
    }

    pub fn set_empty_group_policy(&mut self, policy: EmptyGroupPolicy) {
        self.albums.list.set_empty_group_policy(policy);
        self.artists.list.set_empty_group_policy(policy);
        self.artist_list.list.set_empty_group_policy(policy);
        self.tracks.list.set_empty_group_policy(policy);
    }

    pub fn show_headers(&self) -> bool {
        self.tracks.list.config().show_headers
    }

    pub fn empty_group_policy(&self) -> EmptyGroupPolicy {
        self.tracks.list.config().empty_groups
    }

    pub fn settings(&self) -> ViewSettings {
        ViewSettings {
            list: self.tracks.list.config().clone(),
            grid: self.albums.list.config().clone(),
            active_tab: self.active,
        }
    }
}
