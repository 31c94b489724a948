// Tests for the record-detail index and frame-link walk

use memviz::errors::VisualizerError;
use memviz::memory::types::{BaseType, TypeNode};
use memviz::memory::value::MemoryCell;
use memviz::memory::MemorySnapshot;
use memviz::records::{self, RecordDetail};
use memviz::snapshot::{ScopeFrame, VariableScope};

fn int() -> Vec<TypeNode> {
    vec![TypeNode::base(BaseType::Int)]
}

fn two_frame_stack() -> MemorySnapshot {
    [
        (0, MemoryCell::untyped(-1)),
        (1, MemoryCell::typed(5, int())),
        (2, MemoryCell::untyped(0)),
        (3, MemoryCell::typed(9, int())),
    ]
    .into_iter()
    .collect()
}

fn two_frames() -> Vec<ScopeFrame> {
    let globals = VariableScope::new().with_function("main", 0).with_function("helper", 1);
    vec![
        ScopeFrame::new("main", globals.clone().nested().with_variable("x", int(), 1)),
        ScopeFrame::new("helper", globals.nested().with_variable("y", int(), 3)),
    ]
}

fn names_at(map: &records::RecordDetailsMap, address: u64) -> Vec<String> {
    map.details_at(address)
        .iter()
        .map(|detail| match detail {
            RecordDetail::StackPointer(sp) => format!("sp:{}", sp.func_name),
            RecordDetail::Variable(var) => format!("{}.{}", var.func_name, var.var_name),
            RecordDetail::Function(f) => format!("fn:{}", f.func_name),
        })
        .collect()
}

#[test]
fn test_frame_links_name_each_frame() {
    let map = records::build(&two_frames(), 2, &two_frame_stack()).unwrap();

    assert_eq!(names_at(&map, 2), vec!["sp:helper"]);
    assert_eq!(names_at(&map, 0), vec!["sp:main"]);
    assert_eq!(names_at(&map, 1), vec!["main.x"]);
    assert_eq!(names_at(&map, 3), vec!["helper.y"]);
    assert!(map.details_at(7).is_empty());
}

#[test]
fn test_function_bindings_are_indexed() {
    let map = records::build(&two_frames(), 2, &two_frame_stack()).unwrap();

    assert_eq!(map.function(1).map(|f| f.func_name.as_str()), Some("helper"));
    assert_eq!(map.function(0).map(|f| f.func_name.as_str()), Some("main"));
    assert!(map.function(7).is_none());
    assert!(map.function(-1).is_none());
}

#[test]
fn test_shared_address_keeps_insertion_order() {
    // Inner scope shadows an outer variable at the same slot
    let outer = VariableScope::new().with_variable("outer", int(), 1);
    let inner = outer.nested().with_variable("inner", int(), 1);
    let frames = vec![ScopeFrame::new("main", inner)];
    let stack: MemorySnapshot = [(0, MemoryCell::untyped(-1)), (1, MemoryCell::typed(3, int()))]
        .into_iter()
        .collect();

    let map = records::build(&frames, 0, &stack).unwrap();
    assert_eq!(names_at(&map, 1), vec!["main.inner", "main.outer"]);
}

#[test]
fn test_variables_precede_frame_links() {
    let frames = vec![ScopeFrame::new(
        "main",
        VariableScope::new().with_variable("slot", int(), 0),
    )];
    let stack: MemorySnapshot = [(0, MemoryCell::untyped(-1))].into_iter().collect();

    let map = records::build(&frames, 0, &stack).unwrap();
    assert_eq!(names_at(&map, 0), vec!["main.slot", "sp:main"]);
}

#[test]
fn test_build_is_deterministic() {
    let a = records::build(&two_frames(), 2, &two_frame_stack()).unwrap();
    let b = records::build(&two_frames(), 2, &two_frame_stack()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_no_frames_with_sentinel_top() {
    let map = records::build(&[], -1, &MemorySnapshot::new()).unwrap();
    assert!(map.memory.is_empty());
}

#[test]
fn test_cyclic_chain_runs_out_of_frames() {
    // The link at 2 points back at itself
    let stack: MemorySnapshot = [(0, MemoryCell::untyped(-1)), (2, MemoryCell::untyped(2))]
        .into_iter()
        .collect();

    let err = records::build(&two_frames(), 2, &stack).unwrap_err();
    assert!(matches!(
        err,
        VisualizerError::FrameChainExhausted { hops: 2, frames: 2 }
    ));
}

#[test]
fn test_missing_and_invalid_links() {
    let err = records::build(&two_frames(), 5, &two_frame_stack()).unwrap_err();
    assert!(matches!(err, VisualizerError::MissingFrameLink { address: 5 }));

    let stack: MemorySnapshot = [(2, MemoryCell::untyped(-7))].into_iter().collect();
    let err = records::build(&two_frames(), 2, &stack).unwrap_err();
    assert!(matches!(
        err,
        VisualizerError::InvalidFrameLink { address: 2, value: -7 }
    ));

    let err = records::build(&two_frames(), -3, &stack).unwrap_err();
    assert!(matches!(err, VisualizerError::InvalidStackTop { value: -3 }));
    assert!(!err.is_recoverable());
}
