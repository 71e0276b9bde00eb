//! Visible window resolution.
//!
//! Items come out of the flattener sorted by `top` with non-overlapping,
//! contiguous extents, so both edges of the viewport can be located with a
//! binary search. The result is widened by a fixed buffer on each side so
//! fast scrolling does not reveal unmounted rows.

use std::ops::RangeInclusive;

use crate::domain::flatten::VirtualItem;

/// Smallest index whose bottom edge lies below `target`.
///
/// This is the first item at least partially visible when `target` is the
/// viewport's top edge. Returns `items.len()` when every item ends at or
/// above `target`.
pub fn find_first(items: &[VirtualItem], target: f32) -> usize {
    items.partition_point(|item| item.bottom() <= target)
}

/// Largest index whose top edge is at or above `target`, searching from `start_from`.
///
/// `target` is the viewport's bottom edge and `start_from` the already
/// resolved first visible index; every item before it is known to start
/// above the viewport. Returns `None` when no item starts at or before
/// `target`.
pub fn find_last(items: &[VirtualItem], target: f32, start_from: usize) -> Option<usize> {
    let start_from = start_from.min(items.len());
    let past = start_from + items[start_from..].partition_point(|item| item.top <= target);
    past.checked_sub(1)
}

/// Widens `[first, last]` by `buffer` items on each side, clamped to the list.
///
/// `last` of `None` means nothing starts above the bottom edge (the viewport
/// is entirely above the content).
pub fn buffered_window(
    len: usize,
    first: usize,
    last: Option<usize>,
    buffer: usize,
) -> Option<RangeInclusive<usize>> {
    if len == 0 {
        return None;
    }
    let max_index = len - 1;
    let start = first.saturating_sub(buffer).min(max_index);
    let end = match last {
        Some(last) => last.saturating_add(buffer).min(max_index),
        None => buffer.saturating_sub(1).min(max_index),
    };
    Some(start..=end.max(start))
}

/// Buffered range of item indices intersecting `[viewport_top, viewport_bottom]`.
///
/// `None` for an empty list. A viewport entirely above or below the content
/// resolves to the first or last buffer's worth of items.
pub fn visible_range(
    items: &[VirtualItem],
    viewport_top: f32,
    viewport_bottom: f32,
    buffer: usize,
) -> Option<RangeInclusive<usize>> {
    let viewport_bottom = viewport_bottom.max(viewport_top);
    let first = find_first(items, viewport_top);
    let last = find_last(items, viewport_bottom, first);
    buffered_window(items.len(), first, last, buffer)
}
