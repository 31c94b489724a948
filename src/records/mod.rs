//! Record-detail index
//!
//! Symbolic annotations attached to memory, rebuilt from scratch for every
//! snapshot:
//!
//! - `memory`: address → every variable and saved frame link living there
//! - `func`: function index → the identifier bound to that function
//!
//! # Ordering
//!
//! Several records may share an address (a reused slot, a shadowed outer
//! variable). Lists keep insertion order: frames in declaration order, each
//! frame's scopes innermost first, and frame links after all variables. The
//! first entry is the one a row labels itself with.
//!
//! # Frame-link chain
//!
//! Every call frame starts with a saved link to the previous frame's base.
//! Walking from the stack top:
//!
//! ```text
//! stack_top ──▶ [link: 7] ──▶ [link: 0] ──▶ [link: -1]   (sentinel, stop)
//!               innermost      ...          main
//! ```
//!
//! Each hop consumes one frame name, last frame first.

use crate::errors::{Result, VisualizerError};
use crate::memory::types::TypeChain;
use crate::memory::value::Address;
use crate::memory::MemorySnapshot;
use crate::snapshot::{Record, ScopeFrame};
use rustc_hash::FxHashMap;

/// Value stored in the outermost frame link
pub const FRAME_LINK_SENTINEL: i64 = -1;

/// Saved frame link at the base of a call frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackPointerDetail {
    pub func_name: String,
    pub address: Address,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableDetail {
    pub func_name: String,
    pub var_name: String,
    pub var_type: TypeChain,
    pub address: Address,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDetail {
    pub func_name: String,
    pub func_index: u64,
}

/// A symbolic annotation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordDetail {
    StackPointer(StackPointerDetail),
    Variable(VariableDetail),
    Function(FunctionDetail),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordDetailsMap {
    pub memory: FxHashMap<Address, Vec<RecordDetail>>,
    pub func: FxHashMap<u64, FunctionDetail>,
}

impl RecordDetailsMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Details recorded at an address, in insertion order
    pub fn details_at(&self, address: Address) -> &[RecordDetail] {
        self.memory
            .get(&address)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Function bound to a function index
    pub fn function(&self, func_index: i64) -> Option<&FunctionDetail> {
        u64::try_from(func_index)
            .ok()
            .and_then(|index| self.func.get(&index))
    }

    fn push(&mut self, address: Address, detail: RecordDetail) {
        self.memory.entry(address).or_default().push(detail);
    }
}

/// Build the index for one snapshot.
///
/// Fails when the frame-link chain disagrees with the frame list; a diagram
/// that attributes a stack slot to the wrong function is worse than none.
pub fn build(
    frames: &[ScopeFrame],
    stack_top: i64,
    stack: &MemorySnapshot,
) -> Result<RecordDetailsMap> {
    let mut map = RecordDetailsMap::new();
    index_variables(&mut map, frames);
    index_frame_links(&mut map, frames, stack_top, stack)?;
    tracing::debug!(
        addresses = map.memory.len(),
        functions = map.func.len(),
        "record-detail index built"
    );
    Ok(map)
}

fn index_variables(map: &mut RecordDetailsMap, frames: &[ScopeFrame]) {
    for frame in frames {
        for scope in frame.variables.chain() {
            for entry in &scope.records {
                match &entry.record {
                    Record::Variable { var_type, address } => map.push(
                        *address,
                        RecordDetail::Variable(VariableDetail {
                            func_name: frame.name.clone(),
                            var_name: entry.name.clone(),
                            var_type: var_type.clone(),
                            address: *address,
                        }),
                    ),
                    Record::FunctionBinding { func_index } => {
                        map.func.insert(
                            *func_index,
                            FunctionDetail {
                                func_name: entry.name.clone(),
                                func_index: *func_index,
                            },
                        );
                    }
                }
            }
        }
    }
}

fn index_frame_links(
    map: &mut RecordDetailsMap,
    frames: &[ScopeFrame],
    stack_top: i64,
    stack: &MemorySnapshot,
) -> Result<()> {
    let mut current = stack_top;
    let mut owners = frames.iter().rev();
    let mut hops = 0;

    while current != FRAME_LINK_SENTINEL {
        let address = Address::try_from(current)
            .map_err(|_| VisualizerError::InvalidStackTop { value: current })?;
        let owner = owners.next().ok_or(VisualizerError::FrameChainExhausted {
            hops,
            frames: frames.len(),
        })?;

        map.push(
            address,
            RecordDetail::StackPointer(StackPointerDetail {
                func_name: owner.name.clone(),
                address,
            }),
        );

        let link = stack
            .get(address)
            .ok_or(VisualizerError::MissingFrameLink { address })?;
        let next = link.int_value();
        if next < 0 && next != FRAME_LINK_SENTINEL {
            return Err(VisualizerError::InvalidFrameLink {
                address,
                value: next,
            });
        }
        current = next;
        hops += 1;
    }

    Ok(())
}
