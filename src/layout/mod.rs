//! Row layout for memory regions
//!
//! A region's sparse snapshot becomes an ordered list of drawable [`Row`]s:
//!
//! ```text
//! addr  content   owner                 snapshot {0, 1, 5}
//! ┌──┬────────┐
//! │ 0│ empty  │  main stack pointer
//! │ 1│    5   │  main.x
//! │  │  ...   │                         ← one gap marker for 2..=4
//! │ 5│   99   │  main.y
//! └──┴────────┘
//! ```
//!
//! The stack is laid out in ascending address order; the heap grows down
//! from the top of the shared address space, so it is laid out descending.
//!
//! Submodules:
//! - [`diagram`]: both regions plus render mode and canvas size
//! - [`cache`]: one diagram slot per render mode

pub mod cache;
pub mod diagram;

use crate::annotate::{annotate_row, RowAnnotation};
use crate::memory::value::{Address, MemoryCell};
use crate::memory::{MemorySnapshot, MemoryView};
use crate::records::{RecordDetail, RecordDetailsMap};
use serde::{Deserialize, Serialize};

/// Content shown in a gap marker
pub const GAP_MARKER_TEXT: &str = "...";

/// Order in which a region's addresses are drawn, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutDirection {
    Ascending,
    Descending,
}

/// The two memory regions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Stack,
    Heap,
}

impl Region {
    pub fn direction(self) -> LayoutDirection {
        match self {
            Region::Stack => LayoutDirection::Ascending,
            Region::Heap => LayoutDirection::Descending,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Region::Stack => "Runtime Stack",
            Region::Heap => "Heap",
        }
    }

    pub fn other(self) -> Self {
        match self {
            Region::Stack => Region::Heap,
            Region::Heap => Region::Stack,
        }
    }
}

/// Geometry of one density, in abstract drawing units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutMetrics {
    pub row_height: u32,
    pub row_separator: u32,
    pub title_height: u32,
    pub address_width: u32,
    pub content_width: u32,
    pub details_left_padding: u32,
    /// Zero hides the owner column
    pub details_width: u32,
    /// Horizontal gap between the stack and heap grids
    pub grid_gap: u32,
    pub text_padding_x: u32,
    pub text_padding_y: u32,
}

impl LayoutMetrics {
    pub const FULL: LayoutMetrics = LayoutMetrics {
        row_height: 30,
        row_separator: 1,
        title_height: 40,
        address_width: 30,
        content_width: 120,
        details_left_padding: 10,
        details_width: 150,
        grid_gap: 40,
        text_padding_x: 5,
        text_padding_y: 5,
    };

    pub const COMPACT: LayoutMetrics = LayoutMetrics {
        row_height: 20,
        row_separator: 1,
        title_height: 30,
        address_width: 30,
        content_width: 100,
        details_left_padding: 0,
        details_width: 0,
        grid_gap: 20,
        text_padding_x: 5,
        text_padding_y: 5,
    };

    /// Vertical space consumed by one row
    pub fn row_pitch(&self) -> u32 {
        self.row_height + self.row_separator
    }

    pub fn grid_width(&self) -> u32 {
        self.address_width + self.content_width + self.details_left_padding + self.details_width
    }

    pub fn shows_labels(&self) -> bool {
        self.details_width > 0
    }
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        LayoutMetrics::FULL
    }
}

/// A drawn memory cell
#[derive(Debug, Clone, PartialEq)]
pub struct CellRow {
    pub address: Address,
    pub cell: MemoryCell,
    pub details: Vec<RecordDetail>,
    pub annotation: RowAnnotation,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RowKind {
    Cell(CellRow),
    /// Placeholder for a run of unrecorded addresses
    Gap,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub kind: RowKind,
    /// Running height of the grid up to and including this row
    pub vertical_offset: u32,
}

impl Row {
    pub fn is_gap_marker(&self) -> bool {
        matches!(self.kind, RowKind::Gap)
    }

    pub fn address(&self) -> Option<Address> {
        match &self.kind {
            RowKind::Cell(cell) => Some(cell.address),
            RowKind::Gap => None,
        }
    }

    pub fn as_cell(&self) -> Option<&CellRow> {
        match &self.kind {
            RowKind::Cell(cell) => Some(cell),
            RowKind::Gap => None,
        }
    }

    /// Text drawn inside the row's box
    pub fn content(&self) -> &str {
        match &self.kind {
            RowKind::Cell(cell) => &cell.annotation.content,
            RowKind::Gap => GAP_MARKER_TEXT,
        }
    }

    /// Top edge of the row
    pub fn top(&self, metrics: &LayoutMetrics) -> u32 {
        self.vertical_offset.saturating_sub(metrics.row_height)
    }
}

fn is_adjacent(previous: Address, current: Address, direction: LayoutDirection) -> bool {
    match direction {
        LayoutDirection::Ascending => current <= previous.saturating_add(1),
        LayoutDirection::Descending => current.saturating_add(1) >= previous,
    }
}

/// Lay out one region's snapshot.
///
/// A run of unrecorded addresses between two consecutive keys collapses into
/// one gap marker. The first key never gets a marker.
pub fn layout(
    snapshot: &MemorySnapshot,
    view: &MemoryView,
    map: &RecordDetailsMap,
    direction: LayoutDirection,
    metrics: &LayoutMetrics,
) -> Vec<Row> {
    let cells: Box<dyn Iterator<Item = (Address, &MemoryCell)> + '_> = match direction {
        LayoutDirection::Ascending => Box::new(snapshot.iter()),
        LayoutDirection::Descending => Box::new(snapshot.iter().rev()),
    };

    let mut rows = Vec::with_capacity(snapshot.len());
    let mut offset = metrics.title_height;
    let mut previous: Option<Address> = None;

    for (address, cell) in cells {
        if previous.is_some_and(|prev| !is_adjacent(prev, address, direction)) {
            offset += metrics.row_pitch();
            rows.push(Row {
                kind: RowKind::Gap,
                vertical_offset: offset,
            });
        }

        let details = map.details_at(address).to_vec();
        let annotation = annotate_row(cell, &details, view, map);
        offset += metrics.row_pitch();
        rows.push(Row {
            kind: RowKind::Cell(CellRow {
                address,
                cell: cell.clone(),
                details,
                annotation,
            }),
            vertical_offset: offset,
        });
        previous = Some(address);
    }

    rows
}

/// One region's laid-out column
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    pub region: Region,
    /// Left edge within the diagram
    pub x: u32,
    pub width: u32,
    pub height: u32,
    pub rows: Vec<Row>,
}

impl Grid {
    pub fn build(
        region: Region,
        x: u32,
        view: &MemoryView,
        map: &RecordDetailsMap,
        metrics: &LayoutMetrics,
    ) -> Self {
        let snapshot = match region {
            Region::Stack => view.stack,
            Region::Heap => view.heap,
        };
        let rows = layout(snapshot, view, map, region.direction(), metrics);
        let height = rows
            .last()
            .map(|row| row.vertical_offset)
            .unwrap_or(metrics.title_height);

        Grid {
            region,
            x,
            width: metrics.grid_width(),
            height,
            rows,
        }
    }

    pub fn title(&self) -> &'static str {
        self.region.title()
    }

    /// Addresses of the drawn cells, in drawing order
    pub fn addresses(&self) -> Vec<Address> {
        self.rows.iter().filter_map(Row::address).collect()
    }
}
