// Tests for snapshot files and configuration loading

use memviz::annotate::{annotate_row, describe_reference, describe_value};
use memviz::config::VisualizerConfig;
use memviz::errors::VisualizerError;
use memviz::layout::diagram::Density;
use memviz::layout::{LayoutMetrics, Region};
use memviz::memory::MemoryView;
use memviz::records;
use memviz::session::Session;
use memviz::snapshot::ProgramState;
use std::time::Duration;

fn sample() -> ProgramState {
    ProgramState::load(concat!(env!("CARGO_MANIFEST_DIR"), "/demos/sample.json"))
        .expect("sample snapshot should load")
}

#[test]
fn test_sample_snapshot_loads() {
    let state = sample();
    assert_eq!(state.stack_top, 8);
    assert_eq!(state.frames.len(), 2);
    assert_eq!(state.stack.get(0).map(|c| c.int_value()), Some(-1));
    assert_eq!(state.heap.get(9999).map(|c| c.int_value()), Some(99));
    assert_eq!(state.stack.extent(), 13);
}

#[test]
fn test_sample_annotations() {
    let state = sample();
    let map = records::build(&state.frames, state.stack_top, &state.stack).unwrap();
    let view = MemoryView::new(&state.stack, &state.heap);

    let p = state.stack.get(2).unwrap();
    assert_eq!(describe_value(p, &view, &map), "pointer to 99");

    let fp = state.stack.get(7).unwrap();
    assert_eq!(describe_value(fp, &view, &map), "pointer to function add");
    assert!(describe_reference(&map.details_at(7)[0], &view, &map)
        .ends_with("\nValue: Pointer to function add"));

    let arr = describe_reference(&map.details_at(3)[0], &view, &map);
    assert!(arr.ends_with("\nArray Value: [1, 2, 3]"));

    let c = annotate_row(state.stack.get(6).unwrap(), map.details_at(6), &view, &map);
    assert_eq!(c.content, "'a'");
    assert_eq!(c.label, "main.c");

    let link = annotate_row(state.stack.get(8).unwrap(), map.details_at(8), &view, &map);
    assert_eq!(link.label, "add stack pointer");
}

#[test]
fn test_sample_renders_both_regions() {
    let mut session = Session::new(VisualizerConfig::default(), 5000, 5000);
    session.on_snapshot(&sample()).unwrap();
    let rendered = session.render().unwrap();
    let diagram = rendered.diagram().unwrap();

    let stack = diagram.grid(Region::Stack);
    assert_eq!(stack.addresses(), vec![0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 12]);
    assert!(stack.rows[11].is_gap_marker());
    assert_eq!(diagram.grid(Region::Heap).addresses(), vec![9999, 9998]);
}

#[test]
fn test_malformed_and_missing_files() {
    let err = ProgramState::from_json("{\"stack\": 3}").unwrap_err();
    assert!(matches!(err, VisualizerError::Json(_)));

    let bad_bits = r#"{"stack": {"cells": {"0": {"bits": "012"}}}, "heap": {"cells": {}}, "frames": [], "stackTop": -1}"#;
    assert!(ProgramState::from_json(bad_bits).is_err());

    let err = ProgramState::load("/nonexistent/snapshot.json").unwrap_err();
    assert!(matches!(err, VisualizerError::Io { .. }));
}

#[test]
fn test_snapshot_round_trips_through_json() {
    let state = sample();
    let text = serde_json::to_string(&state).unwrap();
    assert_eq!(ProgramState::from_json(&text).unwrap(), state);
}

#[test]
fn test_config_defaults_and_overrides() {
    let config = VisualizerConfig::default();
    assert_eq!(config.resize_debounce(), Duration::from_millis(300));
    assert_eq!(config.metrics(Density::Full), LayoutMetrics::FULL);
    assert_eq!(config.screen_bounds().width, 5000);

    let config = VisualizerConfig::from_toml(
        "compact = false\nresize_debounce_ms = 50\n\n[full]\nrow_height = 24\n",
    )
    .unwrap();
    assert!(!config.compact);
    assert_eq!(config.resize_debounce(), Duration::from_millis(50));
    assert_eq!(config.metrics(Density::Full).row_height, 24);
    assert_eq!(config.metrics(Density::Full).details_width, 150);
    assert_eq!(config.metrics(Density::Compact), LayoutMetrics::COMPACT);

    let err = VisualizerConfig::from_toml("compact = \"yes\"").unwrap_err();
    assert!(matches!(err, VisualizerError::Config(_)));
}

#[test]
fn test_partial_compact_table_keeps_compact_defaults() {
    let config = VisualizerConfig::from_toml("[compact_metrics]\nrow_height = 18\n").unwrap();
    let compact = config.metrics(Density::Compact);
    assert_eq!(compact.row_height, 18);
    assert_eq!(compact.details_width, 0);
    assert_eq!(compact.content_width, LayoutMetrics::COMPACT.content_width);
    assert!(!compact.shows_labels());
    assert_eq!(config.metrics(Density::Full), LayoutMetrics::FULL);

    let err = VisualizerConfig::from_toml("[compact_metrics]\nrow_height = \"tall\"\n").unwrap_err();
    assert!(matches!(err, VisualizerError::Config(_)));
}
