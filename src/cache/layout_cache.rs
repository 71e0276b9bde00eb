//! Caching of derived layout values.

use crate::domain::flatten::{ViewMode, VirtualItem};
use crate::domain::positions::GroupPositionMap;

/// Inputs a cached layout was derived from.
///
/// A layout is valid only while every one of these matches the list's
/// current inputs; scroll offset and container height are deliberately not
/// part of it since they never change the flattened items.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutKey {
    /// Bumped whenever the groups or the list config are replaced
    pub revision: u64,
    pub mode: ViewMode,
    pub columns: usize,
}

/// Cache for the flattened item array and the values derived from it.
///
/// Flattening is O(total items); everything per-frame (visible range,
/// current group) reads from this cache instead of reflattening.
#[derive(Debug, Default)]
pub struct LayoutCache {
    key: Option<LayoutKey>,

    /// Flattened, position-annotated items
    pub items: Vec<VirtualItem>,

    /// Scrollable content height including bottom padding
    pub total_height: f32,

    /// Group id -> header offset
    pub group_positions: GroupPositionMap,

    /// Number of relayouts performed; handy for tests and debug overlays.
    pub layout_seq: u64,
}

impl LayoutCache {
    /// Creates a new empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks if the cached layout was derived from `key`.
    pub fn is_valid_for(&self, key: &LayoutKey) -> bool {
        self.key.as_ref() == Some(key)
    }

    /// Key of the cached layout, if any.
    pub fn key(&self) -> Option<LayoutKey> {
        self.key
    }

    /// Replaces the cached layout.
    pub fn store(&mut self, key: LayoutKey, items: Vec<VirtualItem>, total_height: f32) {
        self.group_positions = GroupPositionMap::build(&items);
        self.items = items;
        self.total_height = total_height;
        self.key = Some(key);
        self.layout_seq += 1;
    }

    /// Invalidates all cached data.
    ///
    /// The next read through the owning list reflattens.
    pub fn invalidate(&mut self) {
        self.key = None;
    }
}
