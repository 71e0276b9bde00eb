//! Group flattening.
//!
//! Turns an ordered list of groups into one flat, position-annotated sequence
//! of virtual items (headers, grid rows, list leaves). Every later stage works
//! on this sequence: the total height is read off its last item, the visible
//! window is binary-searched over it and the group navigator indexes its
//! headers.
//!
//! Items refer to their entities by index into the source groups rather than
//! by reference, so the flattened output can be cached independently of the
//! borrow on the groups it was built from.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::state::{EmptyGroupPolicy, ListConfig};
use crate::traits::{Entity, Group, GroupId};

/// How members of a group are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ViewMode {
    /// One leaf per member
    #[default]
    List,
    /// Members chunked into rows of cards
    Grid,
}

/// Which variant a virtual item is, plus the members it covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemKind {
    Header,
    /// Indices into the owning group's members; never empty, at most `columns` long
    Row { members: Range<usize> },
    /// Index into the owning group's members
    Leaf { member: usize },
}

/// One renderable unit of the flattened list.
#[derive(Debug, Clone, PartialEq)]
pub struct VirtualItem {
    pub kind: ItemKind,
    /// Index of the owning group in the flattened input
    pub group_index: usize,
    /// Offset of the item's top edge from the start of the list, in pixels
    pub top: f32,
    pub height: f32,
    /// Set on headers only; feeds the group position map
    pub group_id: Option<GroupId>,
}

impl VirtualItem {
    /// Offset of the item's bottom edge.
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    pub fn is_header(&self) -> bool {
        matches!(self.kind, ItemKind::Header)
    }

    /// Range of member indices this item shows (empty for headers).
    pub fn member_range(&self) -> Range<usize> {
        match &self.kind {
            ItemKind::Header => 0..0,
            ItemKind::Row { members } => members.clone(),
            ItemKind::Leaf { member } => *member..*member + 1,
        }
    }

    /// Identity used for widget diffing.
    ///
    /// Derived from what the item shows, never from its position in the
    /// flattened array: the visible window shifts on every scroll tick while
    /// the same entities stay mounted.
    pub fn key<T: Entity>(&self, groups: &[Group<T>]) -> Option<ItemKey<T::Id>> {
        let group = groups.get(self.group_index)?;
        match &self.kind {
            ItemKind::Header => Some(ItemKey::Header(group.id.clone())),
            ItemKind::Row { members } => {
                let first = group.members.get(members.start)?;
                Some(ItemKey::Row {
                    group: group.id.clone(),
                    first: first.entity_id(),
                })
            }
            ItemKind::Leaf { member } => {
                let entity = group.members.get(*member)?;
                Some(ItemKey::Leaf {
                    group: group.id.clone(),
                    entity: entity.entity_id(),
                })
            }
        }
    }
}

/// Stable identity of a rendered item.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ItemKey<Id> {
    Header(GroupId),
    Row { group: GroupId, first: Id },
    Leaf { group: GroupId, entity: Id },
}

/// Number of card columns that fit in the container.
///
/// Always at least 1, including for a zero-width or detached container.
pub fn grid_columns(container_width: f32, card_width: f32, gap: f32) -> usize {
    let span = card_width + gap;
    if !container_width.is_finite() || !span.is_finite() || span <= 0.0 {
        return 1;
    }
    let columns = ((container_width + gap) / span).floor();
    if columns.is_finite() && columns >= 1.0 {
        columns as usize
    } else {
        1
    }
}

/// Flattens groups into position-annotated virtual items.
///
/// Output order matches group order and member order exactly. In grid mode a
/// group with `n` members yields `ceil(n / columns)` rows, only the last of
/// which may be short. A group with no members yields at most its header and
/// never an empty row.
pub fn flatten<T>(
    groups: &[Group<T>],
    mode: ViewMode,
    columns: usize,
    config: &ListConfig,
) -> Vec<VirtualItem> {
    let columns = columns.max(1);
    let heights = config.heights;
    let mut items = Vec::new();
    let mut top = 0.0f32;

    let mut push = |items: &mut Vec<VirtualItem>, kind: ItemKind, group_index: usize, height: f32, group_id: Option<GroupId>| {
        items.push(VirtualItem {
            kind,
            group_index,
            top,
            height,
            group_id,
        });
        top += height;
    };

    for (group_index, group) in groups.iter().enumerate() {
        if group.is_empty() && config.empty_groups == EmptyGroupPolicy::Hide {
            continue;
        }

        if config.show_headers && !group.label.is_empty() {
            push(&mut items, ItemKind::Header, group_index, heights.header, Some(group.id.clone()));
        }

        match mode {
            ViewMode::List => {
                for member in 0..group.members.len() {
                    push(&mut items, ItemKind::Leaf { member }, group_index, heights.leaf, None);
                }
            }
            ViewMode::Grid => {
                let len = group.members.len();
                let mut start = 0;
                while start < len {
                    let end = (start + columns).min(len);
                    push(&mut items, ItemKind::Row { members: start..end }, group_index, heights.row, None);
                    start = end;
                }
            }
        }
    }

    items
}

#[cfg(test)]
mod tests {
    use super::*;

    fn groups(sizes: &[usize]) -> Vec<Group<u64>> {
        let mut next = 0u64;
        sizes
            .iter()
            .enumerate()
            .map(|(i, &size)| {
                let members = (0..size as u64).map(|m| next + m).collect();
                next += size as u64;
                Group::new(format!("g{}", i + 1), format!("Group {}", i + 1), members)
            })
            .collect()
    }

    fn kinds(items: &[VirtualItem]) -> Vec<&'static str> {
        items
            .iter()
            .map(|item| match item.kind {
                ItemKind::Header => "header",
                ItemKind::Row { .. } => "row",
                ItemKind::Leaf { .. } => "leaf",
            })
            .collect()
    }

    #[test]
    fn test_list_mode_keeps_empty_group_header() {
        let config = ListConfig::default();
        let items = flatten(&groups(&[2, 0, 3]), ViewMode::List, 1, &config);
        assert_eq!(
            kinds(&items),
            ["header", "leaf", "leaf", "header", "header", "leaf", "leaf", "leaf"]
        );
        assert_eq!(items[3].group_id, Some(GroupId::from("g2")));
    }

    #[test]
    fn test_list_mode_hides_empty_group() {
        let config = ListConfig {
            empty_groups: EmptyGroupPolicy::Hide,
            ..ListConfig::default()
        };
        let items = flatten(&groups(&[2, 0, 3]), ViewMode::List, 1, &config);
        assert_eq!(kinds(&items), ["header", "leaf", "leaf", "header", "leaf", "leaf", "leaf"]);
        assert_eq!(items[3].group_id, Some(GroupId::from("g3")));
    }

    #[test]
    fn test_grid_chunks_seven_into_three_columns() {
        let config = ListConfig {
            show_headers: false,
            ..ListConfig::grid()
        };
        let items = flatten(&groups(&[7]), ViewMode::Grid, 3, &config);
        let ranges: Vec<_> = items.iter().map(|i| i.member_range()).collect();
        assert_eq!(ranges, vec![0..3, 3..6, 6..7]);
        let h = config.heights.row;
        let tops: Vec<_> = items.iter().map(|i| i.top).collect();
        assert_eq!(tops, vec![0.0, h, 2.0 * h]);
    }

    #[test]
    fn test_empty_group_never_emits_row() {
        let config = ListConfig::grid();
        let items = flatten(&groups(&[0]), ViewMode::Grid, 4, &config);
        assert_eq!(kinds(&items), ["header"]);
    }

    #[test]
    fn test_unlabelled_group_has_no_header() {
        let config = ListConfig::default();
        let groups = vec![Group::new("anon", "", vec![1u64, 2])];
        let items = flatten(&groups, ViewMode::List, 1, &config);
        assert_eq!(kinds(&items), ["leaf", "leaf"]);
    }

    #[test]
    fn test_zero_columns_treated_as_one() {
        let config = ListConfig::grid();
        let items = flatten(&groups(&[2]), ViewMode::Grid, 0, &config);
        assert_eq!(kinds(&items), ["header", "row", "row"]);
    }

    #[test]
    fn test_grid_columns_clamps_to_one() {
        assert_eq!(grid_columns(0.0, 160.0, 12.0), 1);
        assert_eq!(grid_columns(-50.0, 160.0, 12.0), 1);
        assert_eq!(grid_columns(f32::NAN, 160.0, 12.0), 1);
        assert_eq!(grid_columns(100.0, 0.0, 0.0), 1);
    }

    #[test]
    fn test_grid_columns_counts_gaps() {
        // 3 cards + 2 gaps = 504 exactly
        assert_eq!(grid_columns(504.0, 160.0, 12.0), 3);
        assert_eq!(grid_columns(503.0, 160.0, 12.0), 2);
        assert_eq!(grid_columns(160.0, 160.0, 12.0), 1);
    }

    #[test]
    fn test_keys_follow_entities() {
        let config = ListConfig::default();
        let groups = groups(&[2, 1]);
        let items = flatten(&groups, ViewMode::List, 1, &config);
        assert_eq!(items[0].key(&groups), Some(ItemKey::Header(GroupId::from("g1"))));
        assert_eq!(
            items[4].key(&groups),
            Some(ItemKey::Leaf { group: GroupId::from("g2"), entity: 2 })
        );
    }
}
