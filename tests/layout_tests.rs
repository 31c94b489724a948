// Tests for row layout, gap markers and diagram geometry

use memviz::layout::diagram::{Canvas, Density, Diagram, Palette, RenderMode, StyleToken};
use memviz::layout::{layout, LayoutDirection, LayoutMetrics, Region, Row, GAP_MARKER_TEXT};
use memviz::memory::types::{BaseType, TypeNode};
use memviz::memory::value::MemoryCell;
use memviz::memory::{MemorySnapshot, MemoryView};
use memviz::records::RecordDetailsMap;
use proptest::prelude::*;

fn snapshot_of(addresses: &[u64]) -> MemorySnapshot {
    addresses
        .iter()
        .map(|&addr| (addr, MemoryCell::typed(addr as i64, vec![TypeNode::base(BaseType::Int)])))
        .collect()
}

fn shape(rows: &[Row]) -> Vec<String> {
    rows.iter()
        .map(|row| match row.address() {
            Some(addr) => addr.to_string(),
            None => "gap".to_string(),
        })
        .collect()
}

#[test]
fn test_gap_collapses_unrecorded_run() {
    let stack = snapshot_of(&[0, 1, 5]);
    let heap = MemorySnapshot::new();
    let view = MemoryView::new(&stack, &heap);
    let metrics = LayoutMetrics::FULL;

    let rows = layout(&stack, &view, &RecordDetailsMap::new(), LayoutDirection::Ascending, &metrics);

    assert_eq!(shape(&rows), vec!["0", "1", "gap", "5"]);
    assert_eq!(rows[2].content(), GAP_MARKER_TEXT);
    assert!(rows[2].as_cell().is_none());

    let offsets: Vec<u32> = rows.iter().map(|row| row.vertical_offset).collect();
    assert_eq!(offsets, vec![71, 102, 133, 164]);
    assert_eq!(rows[0].top(&metrics), 41);
}

#[test]
fn test_descending_layout_for_heap() {
    let heap = snapshot_of(&[100, 99, 97]);
    let stack = MemorySnapshot::new();
    let view = MemoryView::new(&stack, &heap);

    let rows = layout(&heap, &view, &RecordDetailsMap::new(), LayoutDirection::Descending, &LayoutMetrics::FULL);
    assert_eq!(shape(&rows), vec!["100", "99", "gap", "97"]);
}

#[test]
fn test_empty_and_single_cell_regions() {
    let empty = MemorySnapshot::new();
    let view = MemoryView::new(&empty, &empty);
    assert!(layout(&empty, &view, &RecordDetailsMap::new(), LayoutDirection::Ascending, &LayoutMetrics::FULL).is_empty());

    let single = snapshot_of(&[42]);
    let view = MemoryView::new(&single, &empty);
    let rows = layout(&single, &view, &RecordDetailsMap::new(), LayoutDirection::Ascending, &LayoutMetrics::FULL);
    assert_eq!(shape(&rows), vec!["42"]);
}

#[test]
fn test_diagram_places_heap_beside_stack() {
    let stack = snapshot_of(&[0, 1]);
    let heap = snapshot_of(&[50]);
    let view = MemoryView::new(&stack, &heap);
    let mode = RenderMode::new(Density::Full, Palette::Dark);
    let metrics = LayoutMetrics::FULL;

    let diagram = Diagram::build(mode, 1, metrics, &view, &RecordDetailsMap::new(), Canvas::new(800, 600));

    assert_eq!(diagram.stack.x, 0);
    assert_eq!(diagram.heap.x, metrics.grid_width() + metrics.grid_gap);
    assert_eq!(diagram.width, diagram.heap.x + metrics.grid_width());
    assert_eq!(diagram.height, metrics.title_height + 2 * metrics.row_pitch());
    assert_eq!(diagram.grid(Region::Heap).addresses(), vec![50]);
    assert_eq!(diagram.stack.title(), "Runtime Stack");
    assert_eq!(diagram.background(), StyleToken::SaBlue);
    assert_eq!(diagram.foreground(), StyleToken::SaWhite);
    assert!(diagram.shows_labels());
}

#[test]
fn test_render_modes() {
    let light = RenderMode::from_flags(true, true);
    assert_eq!(light, RenderMode::new(Density::Compact, Palette::Light));
    assert_eq!(light.palette.background(), StyleToken::PrintBackground);
    assert_eq!(light.palette.foreground(), StyleToken::SaBlue);

    let indices: Vec<usize> = RenderMode::ALL.iter().map(|mode| mode.index()).collect();
    assert_eq!(indices, vec![0, 1, 2, 3]);
    assert!(!LayoutMetrics::COMPACT.shows_labels());
}

#[test]
fn test_canvas_growth() {
    let stage = Canvas::new(100, 100);
    assert!(stage.contains(Canvas::new(100, 40)));
    assert!(!stage.contains(Canvas::new(101, 40)));
    assert_eq!(stage.union(Canvas::new(50, 300)), Canvas::new(100, 300));
    assert_eq!(Canvas::new(9000, 20).clamp_to(Canvas::new(5000, 5000)), Canvas::new(5000, 20));
}

proptest! {
    #[test]
    fn prop_rows_follow_direction_and_offsets_grow(
        addresses in proptest::collection::btree_set(0u64..200, 0..40),
        descending in any::<bool>(),
    ) {
        let addresses: Vec<u64> = addresses.into_iter().collect();
        let region = snapshot_of(&addresses);
        let empty = MemorySnapshot::new();
        let view = MemoryView::new(&region, &empty);
        let direction = if descending { LayoutDirection::Descending } else { LayoutDirection::Ascending };
        let metrics = LayoutMetrics::FULL;

        let rows = layout(&region, &view, &RecordDetailsMap::new(), direction, &metrics);

        // Every recorded cell appears exactly once, in direction order
        let drawn: Vec<u64> = rows.iter().filter_map(Row::address).collect();
        let mut expected = addresses.clone();
        if descending {
            expected.reverse();
        }
        prop_assert_eq!(drawn, expected);

        for pair in rows.windows(2) {
            prop_assert!(pair[1].vertical_offset > pair[0].vertical_offset);
        }
        if let Some(first) = rows.first() {
            prop_assert!(!first.is_gap_marker());
        }
    }

    #[test]
    fn prop_gap_exactly_between_non_adjacent_keys(
        addresses in proptest::collection::btree_set(0u64..100, 1..30),
    ) {
        let addresses: Vec<u64> = addresses.into_iter().collect();
        let region = snapshot_of(&addresses);
        let empty = MemorySnapshot::new();
        let view = MemoryView::new(&region, &empty);

        let rows = layout(&region, &view, &RecordDetailsMap::new(), LayoutDirection::Ascending, &LayoutMetrics::COMPACT);

        let gaps = rows.iter().filter(|row| row.is_gap_marker()).count();
        let expected = addresses.windows(2).filter(|w| w[1] > w[0] + 1).count();
        prop_assert_eq!(gaps, expected);
        prop_assert_eq!(rows.len(), addresses.len() + expected);
        for pair in rows.windows(2) {
            prop_assert!(!(pair[0].is_gap_marker() && pair[1].is_gap_marker()));
        }
    }
}
