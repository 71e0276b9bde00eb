//! Generic virtualized, grouped list.
//!
//! `VirtualList` ties the pure layout stages together for one list instance:
//! it owns the groups, the observed viewport and a memoized layout, and
//! answers the per-frame questions a renderer asks (what is the content
//! height, which items are visible, where does group X start).
//!
//! Derived values are recomputed lazily: flattening reruns only when the
//! groups, the config, the view mode or the grid column count change;
//! resolving the visible window is a binary search over the cached items.

use std::ops::RangeInclusive;

use tracing::debug;

use crate::cache::{LayoutCache, LayoutKey};
use crate::domain::flatten::{self, ItemKey, ViewMode, VirtualItem};
use crate::domain::jump_bar::{self, JumpTarget};
use crate::domain::positions::{self, GroupPositionMap};
use crate::domain::visible_range;
use crate::state::{EmptyGroupPolicy, ListConfig, SurfaceEvents, ViewportState, ViewportTracker};
use crate::traits::{Entity, Group, GroupId};

/// How the host surface should move to a requested offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Smooth,
    Instant,
}

/// A scroll offset change the host surface should apply.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollRequest {
    pub offset: f32,
    pub behavior: ScrollBehavior,
}

/// One item of the buffered visible window, resolved against its group.
pub struct VisibleItem<'a, T: Entity> {
    /// Index into the flattened items
    pub index: usize,
    pub item: &'a VirtualItem,
    pub key: ItemKey<T::Id>,
    pub group: &'a Group<T>,
    /// Entities shown by this item (empty for headers)
    pub members: &'a [T],
}

/// Position of the content at the top of the viewport, in layout-independent terms.
#[derive(Debug, Clone, Copy)]
struct Anchor {
    group_index: usize,
    /// First member shown by the anchored item; `None` for a header
    member: Option<usize>,
    /// Distance from the item's top edge to the viewport's top edge
    within: f32,
}

pub struct VirtualList<T: Entity> {
    groups: Vec<Group<T>>,
    config: ListConfig,
    mode: ViewMode,
    /// Bumped whenever groups or config are replaced
    revision: u64,
    viewport: ViewportState,
    tracker: Option<ViewportTracker>,
    cache: LayoutCache,
    pending_scroll: Option<ScrollRequest>,
}

impl<T: Entity> VirtualList<T> {
    pub fn new(config: ListConfig, mode: ViewMode) -> Self {
        Self {
            groups: Vec::new(),
            config,
            mode,
            revision: 0,
            viewport: ViewportState::new(),
            tracker: None,
            cache: LayoutCache::new(),
            pending_scroll: None,
        }
    }

    // ===== Inputs =====

    /// Replaces the groups; the next read reflattens.
    pub fn set_groups(&mut self, groups: Vec<Group<T>>) {
        self.groups = groups;
        self.bump_revision();
    }

    pub fn groups(&self) -> &[Group<T>] {
        &self.groups
    }

    pub fn config(&self) -> &ListConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: ListConfig) {
        if config != self.config {
            self.config = config;
            self.bump_revision();
        }
    }

    pub fn set_show_headers(&mut self, show_headers: bool) {
        if self.config.show_headers != show_headers {
            self.config.show_headers = show_headers;
            self.bump_revision();
        }
    }

    pub fn set_empty_group_policy(&mut self, policy: EmptyGroupPolicy) {
        if self.config.empty_groups != policy {
            self.config.empty_groups = policy;
            self.bump_revision();
        }
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: ViewMode) {
        self.mode = mode;
    }

    fn bump_revision(&mut self) {
        self.revision += 1;
        self.cache.invalidate();
    }

    // ===== Viewport =====

    /// Starts following scroll and resize events from `events`.
    ///
    /// Replaces any previous attachment; the old subscriptions are released.
    pub fn attach(&mut self, events: &SurfaceEvents) {
        self.tracker = Some(ViewportTracker::attach(events, self.viewport));
    }

    /// Stops following the surface and releases its subscriptions.
    pub fn detach(&mut self) {
        self.tracker = None;
    }

    pub fn is_attached(&self) -> bool {
        self.tracker.is_some()
    }

    /// Pulls the latest observed geometry from the attached surface.
    ///
    /// Returns true if anything changed since the last sync.
    pub fn sync_viewport(&mut self) -> bool {
        let Some(tracker) = &self.tracker else {
            return false;
        };
        if !tracker.take_changed() {
            return false;
        }
        let viewport = tracker.viewport();
        self.set_viewport(viewport);
        true
    }

    pub fn viewport(&self) -> ViewportState {
        self.viewport
    }

    /// Applies new viewport geometry.
    ///
    /// When a resize changes the grid's column count, the entity at the top
    /// of the viewport is kept in place by queueing an instant scroll to its
    /// new offset. The anchor is read at the incoming scroll offset against
    /// the old layout, so a scroll arriving with the resize is not lost.
    pub fn set_viewport(&mut self, viewport: ViewportState) {
        let old_columns = self.columns();
        let anchor = self.anchor(viewport.scroll_top());
        self.viewport = viewport;

        if self.columns() == old_columns {
            return;
        }
        let Some(anchor) = anchor else {
            return;
        };

        self.ensure_layout();
        if let Some(offset) = self.resolve_anchor(&anchor) {
            debug!(
                old_columns,
                new_columns = self.columns(),
                offset,
                "re-anchoring grid after column change"
            );
            self.viewport.set_scroll_top(offset);
            self.pending_scroll = Some(ScrollRequest {
                offset,
                behavior: ScrollBehavior::Instant,
            });
        }
    }

    // ===== Derived values =====

    /// Columns per grid row (always 1 in list mode).
    pub fn columns(&self) -> usize {
        match self.mode {
            ViewMode::List => 1,
            ViewMode::Grid => flatten::grid_columns(
                self.viewport.container_width(),
                self.config.card_width,
                self.config.gap,
            ),
        }
    }

    fn layout_key(&self) -> LayoutKey {
        LayoutKey {
            revision: self.revision,
            mode: self.mode,
            columns: self.columns(),
        }
    }

    fn ensure_layout(&mut self) {
        let key = self.layout_key();
        if self.cache.is_valid_for(&key) {
            return;
        }
        let items = flatten::flatten(&self.groups, key.mode, key.columns, &self.config);
        let total_height = positions::total_height(&items, self.config.bottom_padding);
        debug!(
            groups = self.groups.len(),
            items = items.len(),
            columns = key.columns,
            total_height,
            "flattened list layout"
        );
        self.cache.store(key, items, total_height);
    }

    /// Flattened, position-annotated items.
    pub fn items(&mut self) -> &[VirtualItem] {
        self.ensure_layout();
        &self.cache.items
    }

    /// Scrollable content height, bottom padding included.
    pub fn total_height(&mut self) -> f32 {
        self.ensure_layout();
        self.cache.total_height
    }

    pub fn group_positions(&mut self) -> &GroupPositionMap {
        self.ensure_layout();
        &self.cache.group_positions
    }

    /// Number of times the layout has been recomputed.
    pub fn layout_seq(&self) -> u64 {
        self.cache.layout_seq
    }

    /// Buffered range of item indices to render for the current viewport.
    pub fn visible_range(&mut self) -> Option<RangeInclusive<usize>> {
        self.ensure_layout();
        visible_range::visible_range(
            &self.cache.items,
            self.viewport.scroll_top(),
            self.viewport.scroll_bottom(),
            self.config.buffer,
        )
    }

    /// Resolved items of the buffered visible window.
    pub fn visible_items(&mut self) -> Vec<VisibleItem<'_, T>> {
        let range = self.visible_range();
        let Some(range) = range else {
            return Vec::new();
        };

        let groups = &self.groups;
        self.cache.items[range.clone()]
            .iter()
            .zip(range)
            .filter_map(|(item, index)| {
                let group = groups.get(item.group_index)?;
                let key = item.key(groups)?;
                let members = group.members.get(item.member_range())?;
                Some(VisibleItem {
                    index,
                    item,
                    key,
                    group,
                    members,
                })
            })
            .collect()
    }

    /// Entities shown by `item` (empty for headers or stale items).
    pub fn members(&self, item: &VirtualItem) -> &[T] {
        self.groups
            .get(item.group_index)
            .and_then(|group| group.members.get(item.member_range()))
            .unwrap_or(&[])
    }

    /// Group the viewport is currently inside.
    ///
    /// Uses the last header at or above the viewport's top edge, unless the
    /// first visible item belongs to a later group (one drawn without a
    /// header); without headers, the group of the first visible item.
    pub fn current_group(&mut self) -> Option<&Group<T>> {
        self.ensure_layout();
        let items = &self.cache.items;
        let top = self.viewport.scroll_top();

        let by_header = self
            .cache
            .group_positions
            .header_at_or_above(top)
            .and_then(|index| items.get(index))
            .map(|item| item.group_index);
        let by_first = items
            .get(visible_range::find_first(items, top))
            .map(|item| item.group_index);

        let group_index = match (by_header, by_first) {
            (Some(header), Some(first)) => header.max(first),
            (header, first) => header.or(first)?,
        };
        self.groups.get(group_index)
    }

    /// Jump bar labels for the current layout.
    ///
    /// See [`jump_bar::compute_positions`] for the clustering rule.
    pub fn jump_targets(&mut self, cluster_threshold: f32) -> Vec<JumpTarget> {
        self.ensure_layout();
        jump_bar::compute_positions(
            &self.cache.items,
            &self.groups,
            self.cache.total_height,
            cluster_threshold,
        )
    }

    // ===== Navigation =====

    /// Requests a scroll to the header of group `id`.
    ///
    /// Unknown ids, groups filtered out of the current groups and groups
    /// without a header in this layout are a silent no-op.
    pub fn scroll_to_group(&mut self, id: &GroupId, behavior: ScrollBehavior) -> Option<ScrollRequest> {
        let offset = self.group_positions().offset_of(id);
        let Some(offset) = offset else {
            debug!(group = %id, "scroll_to_group: group has no header in this layout");
            return None;
        };
        let request = ScrollRequest { offset, behavior };
        self.pending_scroll = Some(request);
        Some(request)
    }

    /// Requests a scroll to the first item showing entity `id`.
    pub fn scroll_to_entity(&mut self, id: &T::Id, behavior: ScrollBehavior) -> Option<ScrollRequest> {
        self.ensure_layout();
        let groups = &self.groups;
        let offset = self.cache.items.iter().find_map(|item| {
            let group = groups.get(item.group_index)?;
            let members = group.members.get(item.member_range())?;
            members
                .iter()
                .any(|member| member.entity_id() == *id)
                .then_some(item.top)
        });
        let Some(offset) = offset else {
            debug!(entity = ?id, "scroll_to_entity: entity not in this list");
            return None;
        };
        let request = ScrollRequest { offset, behavior };
        self.pending_scroll = Some(request);
        Some(request)
    }

    /// Hands the queued scroll request to the host surface, at most once.
    pub fn take_scroll_request(&mut self) -> Option<ScrollRequest> {
        self.pending_scroll.take()
    }

    // ===== Anchoring =====

    fn anchor(&self, top: f32) -> Option<Anchor> {
        if self.mode != ViewMode::Grid || !self.cache.is_valid_for(&self.layout_key()) {
            return None;
        }
        let items = &self.cache.items;
        let item = items.get(visible_range::find_first(items, top))?;
        Some(Anchor {
            group_index: item.group_index,
            member: (!item.is_header()).then(|| item.member_range().start),
            within: top - item.top,
        })
    }

    fn resolve_anchor(&self, anchor: &Anchor) -> Option<f32> {
        let item = self.cache.items.iter().find(|item| {
            item.group_index == anchor.group_index
                && match anchor.member {
                    None => item.is_header(),
                    Some(member) => item.member_range().contains(&member),
                }
        })?;
        Some(item.top + anchor.within.clamp(0.0, item.height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::SurfaceEvent;

    fn groups(sizes: &[usize]) -> Vec<Group<u64>> {
        let mut next = 0u64;
        sizes
            .iter()
            .enumerate()
            .map(|(i, &size)| {
                let members = (next..next + size as u64).collect();
                next += size as u64;
                Group::new(format!("g{}", i), format!("Group {}", i), members)
            })
            .collect()
    }

    fn list_config() -> ListConfig {
        ListConfig {
            bottom_padding: 0.0,
            ..ListConfig::default()
        }
    }

    #[test]
    fn test_empty_list() {
        let mut list: VirtualList<u64> = VirtualList::new(list_config(), ViewMode::List);
        assert!(list.items().is_empty());
        assert_eq!(list.total_height(), 0.0);
        assert!(list.visible_range().is_none());
        assert!(list.visible_items().is_empty());
        assert!(list.current_group().is_none());
        assert_eq!(list.scroll_to_group(&GroupId::from("g0"), ScrollBehavior::Smooth), None);
    }

    #[test]
    fn test_layout_is_memoized() {
        let mut list = VirtualList::new(list_config(), ViewMode::List);
        list.set_groups(groups(&[3, 3]));
        list.items();
        list.total_height();
        list.set_viewport(ViewportState::with_size(300.0, 200.0));
        list.visible_range();
        assert_eq!(list.layout_seq(), 1);

        list.set_show_headers(false);
        assert_eq!(list.items().len(), 6);
        assert_eq!(list.layout_seq(), 2);
    }

    #[test]
    fn test_scroll_to_group() {
        let mut list = VirtualList::new(list_config(), ViewMode::List);
        list.set_groups(groups(&[3, 3]));
        let h = list.config().heights;

        let request = list.scroll_to_group(&GroupId::from("g1"), ScrollBehavior::Smooth);
        let expected = ScrollRequest {
            offset: h.header + 3.0 * h.leaf,
            behavior: ScrollBehavior::Smooth,
        };
        assert_eq!(request, Some(expected));
        assert_eq!(list.take_scroll_request(), Some(expected));
        assert_eq!(list.take_scroll_request(), None);
    }

    #[test]
    fn test_scroll_to_filtered_group_is_noop() {
        let mut list = VirtualList::new(list_config(), ViewMode::List);
        list.set_groups(groups(&[3, 3]));
        list.set_viewport(ViewportState::with_size(300.0, 100.0));
        let before = list.viewport();

        assert_eq!(list.scroll_to_group(&GroupId::from("g7"), ScrollBehavior::Instant), None);
        assert_eq!(list.take_scroll_request(), None);
        assert_eq!(list.viewport(), before);
    }

    #[test]
    fn test_scroll_to_group_without_headers_is_noop() {
        let mut list = VirtualList::new(list_config(), ViewMode::List);
        list.set_groups(groups(&[3, 3]));
        list.set_show_headers(false);
        assert_eq!(list.scroll_to_group(&GroupId::from("g1"), ScrollBehavior::Smooth), None);
    }

    #[test]
    fn test_scroll_to_entity_in_grid() {
        let mut list = VirtualList::new(ListConfig::grid(), ViewMode::Grid);
        list.set_groups(groups(&[7]));
        // 504px fits exactly 3 columns of 160 + 12 gap
        list.set_viewport(ViewportState::with_size(504.0, 400.0));
        let h = list.config().heights;

        let request = list.scroll_to_entity(&4, ScrollBehavior::Instant).unwrap();
        assert_eq!(request.offset, h.header + h.row);
        assert_eq!(list.scroll_to_entity(&99, ScrollBehavior::Instant), None);
    }

    #[test]
    fn test_current_group_follows_scroll() {
        let mut list = VirtualList::new(list_config(), ViewMode::List);
        list.set_groups(groups(&[3, 3]));
        let h = list.config().heights;
        let mut viewport = ViewportState::with_size(300.0, 100.0);

        viewport.set_scroll_top(h.header + 3.0 * h.leaf + 1.0);
        list.set_viewport(viewport);
        assert_eq!(list.current_group().map(|g| g.id.clone()), Some(GroupId::from("g1")));

        list.set_show_headers(false);
        viewport.set_scroll_top(h.leaf * 2.5);
        list.set_viewport(viewport);
        assert_eq!(list.current_group().map(|g| g.id.clone()), Some(GroupId::from("g0")));
    }

    #[test]
    fn test_current_group_in_unlabelled_group() {
        let mut list = VirtualList::new(list_config(), ViewMode::List);
        list.set_groups(vec![
            Group::new("labelled", "A", vec![0u64, 1]),
            Group::new("unlabelled", "", vec![2u64, 3, 4]),
        ]);
        let h = list.config().heights;
        let mut viewport = ViewportState::with_size(300.0, 100.0);

        viewport.set_scroll_top(h.header + 3.0 * h.leaf);
        list.set_viewport(viewport);
        assert_eq!(list.current_group().map(|g| g.id.clone()), Some(GroupId::from("unlabelled")));

        viewport.set_scroll_top(h.header);
        list.set_viewport(viewport);
        assert_eq!(list.current_group().map(|g| g.id.clone()), Some(GroupId::from("labelled")));
    }

    #[test]
    fn test_visible_items_are_keyed_by_entity() {
        let mut list = VirtualList::new(list_config(), ViewMode::List);
        list.set_groups(groups(&[50]));
        let h = list.config().heights;
        let mut viewport = ViewportState::with_size(300.0, 5.0 * h.leaf);
        viewport.set_scroll_top(h.header + 20.0 * h.leaf);
        list.set_viewport(viewport);

        let visible = list.visible_items();
        let buffer = list_config().buffer;
        assert_eq!(visible.first().map(|v| v.index), Some(21 - buffer));
        for entry in &visible {
            assert_eq!(entry.members.len(), 1);
            assert_eq!(
                entry.key,
                ItemKey::Leaf {
                    group: GroupId::from("g0"),
                    entity: entry.members[0],
                }
            );
        }
    }

    #[test]
    fn test_resize_keeps_top_entity_anchored() {
        let config = ListConfig {
            show_headers: false,
            ..ListConfig::grid()
        };
        let mut list = VirtualList::new(config, ViewMode::Grid);
        list.set_groups(groups(&[60]));
        let row = list.config().heights.row;

        // 3 columns, scrolled so row 4 (members 12..15) is at the top
        let mut viewport = ViewportState::with_size(504.0, 400.0);
        viewport.set_scroll_top(4.0 * row + 10.0);
        list.set_viewport(viewport);
        list.items();
        assert_eq!(list.columns(), 3);

        // Shrink to 2 columns: member 12 now lives in row 6
        viewport.set_size(332.0, 400.0);
        list.set_viewport(viewport);
        assert_eq!(list.columns(), 2);
        let request = list.take_scroll_request().unwrap();
        assert_eq!(request.behavior, ScrollBehavior::Instant);
        assert_eq!(request.offset, 6.0 * row + 10.0);
        assert_eq!(list.viewport().scroll_top(), 6.0 * row + 10.0);
    }

    #[test]
    fn test_resize_anchors_on_incoming_scroll_offset() {
        let config = ListConfig {
            show_headers: false,
            ..ListConfig::grid()
        };
        let events = SurfaceEvents::new();
        let mut list = VirtualList::new(config, ViewMode::Grid);
        list.set_groups(groups(&[60]));
        list.attach(&events);
        let row = list.config().heights.row;

        events.emit(SurfaceEvent::Resized { width: 504.0, height: 400.0 });
        assert!(list.sync_viewport());
        list.items();
        assert_eq!(list.columns(), 3);

        // Scroll to row 4 (members 12..15) and shrink to 2 columns in one batch
        events.emit(SurfaceEvent::Scrolled { top: 4.0 * row + 10.0 });
        events.emit(SurfaceEvent::Resized { width: 332.0, height: 400.0 });
        assert!(list.sync_viewport());

        assert_eq!(list.columns(), 2);
        let request = list.take_scroll_request().unwrap();
        assert_eq!(request.offset, 6.0 * row + 10.0);
        assert_eq!(list.viewport().scroll_top(), 6.0 * row + 10.0);
    }

    #[test]
    fn test_attach_follows_surface_and_detach_releases() {
        let events = SurfaceEvents::new();
        let mut list = VirtualList::new(list_config(), ViewMode::List);
        list.set_groups(groups(&[100]));
        list.attach(&events);
        assert_eq!(events.listener_count(), 2);

        events.emit(SurfaceEvent::Resized { width: 300.0, height: 280.0 });
        events.emit(SurfaceEvent::Scrolled { top: 500.0 });
        assert!(list.sync_viewport());
        assert!(!list.sync_viewport());
        assert_eq!(list.viewport().scroll_top(), 500.0);

        list.detach();
        assert_eq!(events.listener_count(), 0);
        assert!(!list.sync_viewport());
    }

    #[test]
    fn test_dropping_list_releases_subscriptions() {
        let events = SurfaceEvents::new();
        {
            let mut list: VirtualList<u64> = VirtualList::new(list_config(), ViewMode::List);
            list.attach(&events);
            list.attach(&events);
            assert_eq!(events.listener_count(), 2);
        }
        assert_eq!(events.listener_count(), 0);
    }
}
