//! Memory model for snapshot rendering
//!
//! This module provides the read-only memory abstractions:
//! - [`value`]: Raw cell contents ([`value::Bits`], [`value::MemoryCell`]) and literal formatting
//! - [`types`]: Type descriptor chains and their English explanations
//! - [`MemorySnapshot`]: One region's sparse address → cell map
//! - [`MemoryView`]: Stack and heap treated as one logical address space
//!
//! # Address Space
//!
//! Stack and heap share one word-addressed space. The runtime stack grows
//! upward from address 0; the heap grows downward from the top:
//!
//! ```text
//! 0 ──────────── stack extent ............ heap ──── top
//!   ↑ stack grows                  heap grows ↓
//! ```
//!
//! Any address below the stack's extent belongs to the stack, recorded or
//! not. Everything else is looked up in the heap.

pub mod types;
pub mod value;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use value::{Address, MemoryCell};

/// One region's captured contents
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemorySnapshot {
    cells: BTreeMap<Address, MemoryCell>,
    /// Explicit high-water mark; defaults to one past the highest key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    extent: Option<Address>,
}

impl MemorySnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_extent(mut self, extent: Address) -> Self {
        self.extent = Some(extent);
        self
    }

    pub fn insert(&mut self, address: Address, cell: MemoryCell) {
        self.cells.insert(address, cell);
    }

    pub fn get(&self, address: Address) -> Option<&MemoryCell> {
        self.cells.get(&address)
    }

    pub fn contains(&self, address: Address) -> bool {
        self.cells.contains_key(&address)
    }

    /// Recorded cells in ascending address order
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (Address, &MemoryCell)> {
        self.cells.iter().map(|(addr, cell)| (*addr, cell))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// First address past the region's domain
    pub fn extent(&self) -> Address {
        self.extent.unwrap_or_else(|| {
            self.cells
                .last_key_value()
                .map(|(addr, _)| addr + 1)
                .unwrap_or(0)
        })
    }
}

impl FromIterator<(Address, MemoryCell)> for MemorySnapshot {
    fn from_iter<I: IntoIterator<Item = (Address, MemoryCell)>>(iter: I) -> Self {
        MemorySnapshot {
            cells: iter.into_iter().collect(),
            extent: None,
        }
    }
}

/// Stack and heap snapshots viewed as a single address space
#[derive(Debug, Clone, Copy)]
pub struct MemoryView<'a> {
    pub stack: &'a MemorySnapshot,
    pub heap: &'a MemorySnapshot,
}

impl<'a> MemoryView<'a> {
    pub fn new(stack: &'a MemorySnapshot, heap: &'a MemorySnapshot) -> Self {
        MemoryView { stack, heap }
    }

    /// Look up the cell that defines an address.
    ///
    /// Stack residency is decided by bounds, not presence: an unrecorded
    /// address below the stack extent resolves to `None` without consulting
    /// the heap.
    pub fn resolve(&self, address: Address) -> Option<&'a MemoryCell> {
        if address < self.stack.extent() {
            self.stack.get(address)
        } else {
            self.heap.get(address)
        }
    }

    /// Resolve a signed pointer value; negative targets never resolve
    pub fn resolve_pointer(&self, target: i64) -> Option<&'a MemoryCell> {
        Address::try_from(target)
            .ok()
            .and_then(|address| self.resolve(address))
    }
}
