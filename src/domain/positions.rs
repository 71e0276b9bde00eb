//! Content extent and group offsets.
//!
//! Pure functions over the flattened item array:
//! - total scrollable height (optionally padded at the bottom)
//! - group id -> header offset map used for navigation
//! - offset -> current group lookup

use std::collections::HashMap;

use crate::domain::flatten::VirtualItem;
use crate::traits::GroupId;

/// Total height of the content, used verbatim as the scroll extent.
///
/// Zero for an empty list; the padding is only added when there is content.
pub fn total_height(items: &[VirtualItem], bottom_padding: f32) -> f32 {
    match items.last() {
        Some(last) => last.bottom() + bottom_padding.max(0.0),
        None => 0.0,
    }
}

/// Maps each group with a visible header to that header's offset.
///
/// Rebuilt from scratch whenever the flattened items change.
#[derive(Debug, Clone, Default)]
pub struct GroupPositionMap {
    offsets: HashMap<GroupId, f32>,
    /// Headers in list order as (top, item index)
    headers: Vec<(f32, usize)>,
}

impl GroupPositionMap {
    pub fn build(items: &[VirtualItem]) -> Self {
        let mut offsets = HashMap::new();
        let mut headers = Vec::new();
        for (index, item) in items.iter().enumerate() {
            if let Some(id) = &item.group_id {
                offsets.entry(id.clone()).or_insert(item.top);
                headers.push((item.top, index));
            }
        }
        Self { offsets, headers }
    }

    /// Offset of the group's header, if the group has one in this layout.
    pub fn offset_of(&self, id: &GroupId) -> Option<f32> {
        self.offsets.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Index of the last header at or above `offset`.
    ///
    /// This is the header of the group the viewport is currently inside.
    pub fn header_at_or_above(&self, offset: f32) -> Option<usize> {
        let after = self.headers.partition_point(|&(top, _)| top <= offset);
        after.checked_sub(1).map(|i| self.headers[i].1)
    }
}
