use rshelf::domain::flatten::{flatten, grid_columns};
use rshelf::domain::grouping::{self, TextFilter};
use rshelf::domain::positions::total_height;
use rshelf::domain::visible_range::{find_first, find_last, visible_range};
use rshelf::{
    parse_library, Artist, ItemKey, Library, EmptyGroupPolicy, Group, GroupId, ItemKind, LibraryWriter, ListConfig,
    ScrollBehavior, SurfaceEvent, SurfaceEvents, ViewMode, ViewportState, VirtualItem,
    VirtualLibrary, VirtualList,
};
use anyhow::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::env;
use std::fs;
use std::panic::{self, AssertUnwindSafe};

fn numbered_groups(sizes: &[usize]) -> Vec<Group<u64>> {
    let mut next = 0u64;
    sizes
        .iter()
        .enumerate()
        .map(|(i, &size)| {
            let members = (next..next + size as u64).collect();
            next += size as u64;
            Group::new(format!("g{}", i + 1), format!("Group {}", i + 1), members)
        })
        .collect()
}

fn member_order(items: &[VirtualItem], groups: &[Group<u64>]) -> Vec<u64> {
    items
        .iter()
        .flat_map(|item| {
            let members = &groups[item.group_index].members;
            members[item.member_range()].iter().copied()
        })
        .collect()
}

#[test]
fn test_flatten_preserves_order_and_offsets() {
    let groups = numbered_groups(&[5, 0, 12, 1, 7]);
    let config = ListConfig::default();

    for (mode, columns) in [(ViewMode::List, 1), (ViewMode::Grid, 3), (ViewMode::Grid, 4)] {
        let items = flatten(&groups, mode, columns, &config);

        let expected: Vec<u64> = (0..25).collect();
        assert_eq!(member_order(&items, &groups), expected);

        let mut expected_top = 0.0;
        for item in &items {
            assert_eq!(item.top, expected_top);
            assert!(item.height > 0.0);
            expected_top += item.height;
        }

        let last = items.last().unwrap();
        assert_eq!(
            total_height(&items, config.bottom_padding),
            last.bottom() + config.bottom_padding
        );
    }
}

#[test]
fn test_grid_rows_only_last_is_short() {
    let groups = numbered_groups(&[7, 9, 2]);
    let items = flatten(&groups, ViewMode::Grid, 3, &ListConfig::default());

    for group_index in 0..groups.len() {
        let sizes: Vec<usize> = items
            .iter()
            .filter(|item| item.group_index == group_index && !item.is_header())
            .map(|item| item.member_range().len())
            .collect();
        let (last, full) = sizes.split_last().unwrap();
        assert!(full.iter().all(|&size| size == 3));
        assert!(*last >= 1 && *last <= 3);
    }
}

#[test]
fn test_list_scenario_with_empty_group() {
    let groups = numbered_groups(&[2, 0, 3]);

    let shown = flatten(&groups, ViewMode::List, 1, &ListConfig::default());
    let headers: Vec<usize> = shown
        .iter()
        .filter(|item| item.is_header())
        .map(|item| item.group_index)
        .collect();
    assert_eq!(headers, vec![0, 1, 2]);
    assert_eq!(shown.len(), 8);

    let config = ListConfig {
        empty_groups: EmptyGroupPolicy::Hide,
        ..ListConfig::default()
    };
    let hidden = flatten(&groups, ViewMode::List, 1, &config);
    let kinds: Vec<(usize, bool)> = hidden.iter().map(|i| (i.group_index, i.is_header())).collect();
    assert_eq!(
        kinds,
        vec![
            (0, true),
            (0, false),
            (0, false),
            (2, true),
            (2, false),
            (2, false),
            (2, false),
        ]
    );
}

#[test]
fn test_grid_scenario_seven_by_three() {
    let groups = numbered_groups(&[7]);
    let config = ListConfig {
        show_headers: false,
        ..ListConfig::grid()
    };
    let items = flatten(&groups, ViewMode::Grid, 3, &config);
    let row = config.heights.row;

    let rows: Vec<(usize, f32)> = items
        .iter()
        .map(|item| match &item.kind {
            ItemKind::Row { members } => (members.len(), item.top),
            other => panic!("unexpected item {:?}", other),
        })
        .collect();
    assert_eq!(rows, vec![(3, 0.0), (3, row), (1, 2.0 * row)]);
}

#[test]
fn test_grid_columns() {
    assert_eq!(grid_columns(504.0, 160.0, 12.0), 3);
    assert_eq!(grid_columns(332.0, 160.0, 12.0), 2);
    assert_eq!(grid_columns(100.0, 160.0, 12.0), 1);
    assert_eq!(grid_columns(0.0, 160.0, 12.0), 1);
}

#[test]
fn test_binary_search_matches_linear_scan() {
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..1000 {
        let len = rng.gen_range(0..60);
        let mut top = 0.0f32;
        let items: Vec<VirtualItem> = (0..len)
            .map(|member| {
                let height = [24.0, 28.0, 212.0][rng.gen_range(0..3)];
                let item = VirtualItem {
                    kind: ItemKind::Leaf { member },
                    group_index: 0,
                    top,
                    height,
                    group_id: None,
                };
                top += height;
                item
            })
            .collect();

        let viewport_top = rng.gen_range(0.0..top.max(1.0) + 200.0);
        let viewport_bottom = viewport_top + rng.gen_range(0.0..600.0);

        let expected_first = items
            .iter()
            .position(|item| item.bottom() > viewport_top)
            .unwrap_or(items.len());
        let expected_last = items.iter().rposition(|item| item.top <= viewport_bottom);

        let first = find_first(&items, viewport_top);
        assert_eq!(first, expected_first);
        assert_eq!(find_last(&items, viewport_bottom, first), expected_last);

        let buffer = rng.gen_range(0..=ListConfig::default().buffer);
        match visible_range(&items, viewport_top, viewport_bottom, buffer) {
            None => assert!(items.is_empty()),
            Some(range) => {
                assert!(*range.end() < items.len());
                let intersecting: Vec<usize> = (0..items.len())
                    .filter(|&i| items[i].bottom() > viewport_top && items[i].top <= viewport_bottom)
                    .collect();

                // Every item intersecting the viewport is inside the window
                for index in &intersecting {
                    assert!(range.contains(index), "item {} outside {:?}", index, range);
                }

                // Every window item intersects or lies within `buffer` of one that does
                if let (Some(&lo), Some(&hi)) = (intersecting.first(), intersecting.last()) {
                    for index in range.clone() {
                        assert!(
                            index + buffer >= lo && index <= hi + buffer,
                            "item {} too far from {}..={} with buffer {}",
                            index, lo, hi, buffer
                        );
                    }
                } else {
                    // Viewport past the content: only the trailing buffer is kept
                    assert!(range.clone().count() <= buffer.max(1));
                    assert_eq!(*range.end(), items.len() - 1);
                }
            }
        }
    }
}

#[test]
fn test_layout_is_idempotent() {
    let groups = numbered_groups(&[4, 11, 0, 3]);
    let config = ListConfig::grid();

    let first = flatten(&groups, ViewMode::Grid, 3, &config);
    let second = flatten(&groups, ViewMode::Grid, 3, &config);
    assert_eq!(first, second);

    let mut list = VirtualList::new(config, ViewMode::Grid);
    list.set_groups(groups);
    list.set_viewport(ViewportState::with_size(504.0, 400.0));
    let range = list.visible_range();
    let seq = list.layout_seq();
    assert_eq!(list.visible_range(), range);
    assert_eq!(list.layout_seq(), seq);
}

#[test]
fn test_scroll_to_filtered_group_is_noop() {
    let library = VirtualLibrary::with_config(30, (1, 3), (1, 2), 5).generate();
    let filter = TextFilter::new("");
    let groups = grouping::album_groups_by_initial(&library, &filter);

    let mut list = VirtualList::new(ListConfig::grid(), ViewMode::Grid);
    list.set_groups(groups);
    list.set_viewport(ViewportState::with_size(504.0, 600.0));

    let before = list.viewport();
    assert!(list
        .scroll_to_group(&GroupId::from("albums:not-a-group"), ScrollBehavior::Smooth)
        .is_none());
    assert!(list.take_scroll_request().is_none());
    assert_eq!(list.viewport(), before);

    let target = list.groups().last().unwrap().id.clone();
    let request = list.scroll_to_group(&target, ScrollBehavior::Instant).unwrap();
    assert_eq!(Some(request.offset), list.group_positions().offset_of(&target));
}

#[test]
fn test_letter_buckets_have_unique_headers() {
    let artist = |id, name: &str| Artist { id, name: name.into(), starred: false };
    let library = Library::new(
        vec![artist(1, "'Zed"), artist(2, "Apple"), artist(3, "Zoo")],
        Vec::new(),
        Vec::new(),
    );
    let groups = grouping::artist_groups_by_initial(&library, &TextFilter::new(""));

    let mut list = VirtualList::new(ListConfig::default(), ViewMode::List);
    list.set_groups(groups);

    let headers: Vec<GroupId> = list
        .items()
        .iter()
        .filter_map(|item| item.group_id.clone())
        .collect();
    assert_eq!(headers, vec![GroupId::from("artists:A"), GroupId::from("artists:Z")]);

    list.set_viewport(ViewportState::with_size(400.0, 2000.0));
    let header_keys: Vec<ItemKey<u64>> = list
        .visible_items()
        .into_iter()
        .filter(|entry| entry.item.is_header())
        .map(|entry| entry.key)
        .collect();
    assert_eq!(header_keys.len(), 2);
    assert_ne!(header_keys[0], header_keys[1]);

    let a = list.group_positions().offset_of(&GroupId::from("artists:A")).unwrap();
    let z = list
        .scroll_to_group(&GroupId::from("artists:Z"), ScrollBehavior::Instant)
        .unwrap()
        .offset;
    assert!(z > a);
}

#[test]
fn test_surface_drives_list_viewport() {
    let events = SurfaceEvents::new();
    let mut list = VirtualList::new(ListConfig::default(), ViewMode::List);
    list.set_groups(numbered_groups(&[200]));
    list.attach(&events);

    events.emit(SurfaceEvent::Resized { width: 400.0, height: 280.0 });
    events.emit(SurfaceEvent::Scrolled { top: 1000.0 });
    assert!(list.sync_viewport());
    assert_eq!(list.viewport().scroll_top(), 1000.0);

    let range = list.visible_range().unwrap();
    let items = list.items().to_vec();
    assert!(items[*range.start()].top <= 1000.0);
    assert!(items[*range.end()].bottom() >= 1280.0);
}

#[test]
fn test_subscriptions_released_on_drop() {
    let events = SurfaceEvents::new();
    {
        let mut list: VirtualList<u64> = VirtualList::new(ListConfig::default(), ViewMode::List);
        list.attach(&events);
        assert_eq!(events.listener_count(), 2);
    }
    assert_eq!(events.listener_count(), 0);
}

#[test]
fn test_subscriptions_released_on_panic() {
    let events = SurfaceEvents::new();

    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        let mut list: VirtualList<u64> = VirtualList::new(ListConfig::default(), ViewMode::List);
        list.attach(&events);
        assert_eq!(events.listener_count(), 2);
        panic!("render failed");
    }));

    assert!(result.is_err());
    assert_eq!(events.listener_count(), 0);
    // Emitting after release must not reach the dropped list
    events.emit(SurfaceEvent::Scrolled { top: 10.0 });
}

#[test]
fn test_write_and_read_library() -> Result<()> {
    let library = VirtualLibrary::with_config(15, (1, 4), (3, 9), 11).generate();

    for name in ["rshelf_roundtrip.jsonl", "rshelf_roundtrip.jsonl.br"] {
        let path = env::temp_dir().join(name);
        let path = path.to_str().unwrap();
        let _ = fs::remove_file(path);

        {
            let mut writer = LibraryWriter::new(path)?;
            writer.write_library(&library, serde_json::json!({ "source": "integration test" }))?;
        }

        let data = parse_library(path)?;
        assert_eq!(data.header.metadata["source"], "integration test");
        assert_eq!(data.library.artists(), library.artists());
        assert_eq!(data.library.albums(), library.albums());
        assert_eq!(data.library.tracks(), library.tracks());

        let footer = data.footer.unwrap();
        assert_eq!(footer.total_tracks, Some(library.tracks().len()));

        fs::remove_file(path)?;
    }

    Ok(())
}
