//! A fully laid-out diagram for one render mode
//!
//! The diagram places the stack grid on the left and the heap grid to its
//! right, and names the style tokens the host should paint with. Concrete
//! colours are the host's business.

use super::{Grid, LayoutMetrics, Region};
use crate::memory::MemoryView;
use crate::records::RecordDetailsMap;

/// Row density
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Density {
    Compact,
    Full,
}

/// Colour scheme: dark for on-screen use, light for printing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Palette {
    Dark,
    Light,
}

/// Named styles a host maps to concrete colours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleToken {
    SaBlue,
    SaWhite,
    PrintBackground,
    Hovered,
}

impl Palette {
    pub fn background(self) -> StyleToken {
        match self {
            Palette::Dark => StyleToken::SaBlue,
            Palette::Light => StyleToken::PrintBackground,
        }
    }

    /// Stroke and text colour of unhovered boxes
    pub fn foreground(self) -> StyleToken {
        match self {
            Palette::Dark => StyleToken::SaWhite,
            Palette::Light => StyleToken::SaBlue,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderMode {
    pub density: Density,
    pub palette: Palette,
}

impl RenderMode {
    pub const ALL: [RenderMode; 4] = [
        RenderMode::new(Density::Compact, Palette::Dark),
        RenderMode::new(Density::Compact, Palette::Light),
        RenderMode::new(Density::Full, Palette::Dark),
        RenderMode::new(Density::Full, Palette::Light),
    ];

    pub const fn new(density: Density, palette: Palette) -> Self {
        RenderMode { density, palette }
    }

    pub fn from_flags(compact: bool, printable: bool) -> Self {
        RenderMode::new(
            if compact { Density::Compact } else { Density::Full },
            if printable { Palette::Light } else { Palette::Dark },
        )
    }

    /// Position in [`RenderMode::ALL`]
    pub fn index(self) -> usize {
        let density = match self.density {
            Density::Compact => 0,
            Density::Full => 2,
        };
        let palette = match self.palette {
            Palette::Dark => 0,
            Palette::Light => 1,
        };
        density + palette
    }
}

/// Allocated drawing-surface bounds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Canvas { width, height }
    }

    /// Whether `other` fits within these bounds
    pub fn contains(&self, other: Canvas) -> bool {
        other.width <= self.width && other.height <= self.height
    }

    /// Smallest bounds containing both
    pub fn union(self, other: Canvas) -> Canvas {
        Canvas::new(self.width.max(other.width), self.height.max(other.height))
    }

    pub fn clamp_to(self, bounds: Canvas) -> Canvas {
        Canvas::new(self.width.min(bounds.width), self.height.min(bounds.height))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Diagram {
    pub mode: RenderMode,
    /// Identity of the snapshot this diagram was built from
    pub snapshot_id: u64,
    pub metrics: LayoutMetrics,
    pub stack: Grid,
    pub heap: Grid,
    pub width: u32,
    pub height: u32,
    /// Surface size the diagram was drawn for
    pub canvas: Canvas,
}

impl Diagram {
    pub fn build(
        mode: RenderMode,
        snapshot_id: u64,
        metrics: LayoutMetrics,
        view: &MemoryView,
        map: &RecordDetailsMap,
        canvas: Canvas,
    ) -> Self {
        let stack = Grid::build(Region::Stack, 0, view, map, &metrics);
        let heap_x = stack.width + metrics.grid_gap;
        let heap = Grid::build(Region::Heap, heap_x, view, map, &metrics);
        let width = heap.x + heap.width;
        let height = stack.height.max(heap.height);

        Diagram {
            mode,
            snapshot_id,
            metrics,
            stack,
            heap,
            width,
            height,
            canvas,
        }
    }

    pub fn grid(&self, region: Region) -> &Grid {
        match region {
            Region::Stack => &self.stack,
            Region::Heap => &self.heap,
        }
    }

    pub fn size(&self) -> Canvas {
        Canvas::new(self.width, self.height)
    }

    pub fn background(&self) -> StyleToken {
        self.mode.palette.background()
    }

    pub fn foreground(&self) -> StyleToken {
        self.mode.palette.foreground()
    }

    pub fn shows_labels(&self) -> bool {
        self.metrics.shows_labels()
    }
}
