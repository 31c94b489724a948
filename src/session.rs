//! Visualizer session
//!
//! A [`Session`] owns everything that lives between breakpoint pauses: the
//! deep copy of the latest program state, its record-detail index, the
//! current render mode, the per-mode diagram cache, the allocated stage, and
//! the single hover slot.
//!
//! # Re-entry points
//!
//! - [`Session::on_snapshot`]: a new pause; all cached diagrams are dropped
//!   before anything derived from the new state is published
//! - [`Session::on_viewport_resize`] + [`Session::poll_resize`]: debounced resize
//! - [`Session::toggle_compact`] / [`Session::toggle_printable`]: mode switches
//! - [`Session::on_row_hover_enter`] / [`Session::on_row_hover_leave`]: tooltip slot only
//!
//! Everything runs on the caller's thread and finishes before returning.

use crate::config::VisualizerConfig;
use crate::errors::{Result, VisualizerError};
use crate::layout::cache::DiagramCache;
use crate::layout::diagram::{Canvas, Diagram, RenderMode, StyleToken};
use crate::layout::Region;
use crate::memory::MemoryView;
use crate::records::{self, RecordDetailsMap};
use crate::snapshot::{ExecutionState, ProgramState};
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Result of a render request
#[derive(Debug, Clone)]
pub enum Rendered {
    /// No snapshot has arrived yet
    NothingToShow,
    Diagram(Rc<Diagram>),
}

impl Rendered {
    pub fn diagram(&self) -> Option<&Rc<Diagram>> {
        match self {
            Rendered::Diagram(diagram) => Some(diagram),
            Rendered::NothingToShow => None,
        }
    }
}

/// Host hook that displays rendered output
pub trait DrawSurface {
    fn present(&mut self, rendered: &Rendered) -> Result<()>;
}

/// Hover text and where to anchor it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tooltip {
    pub text: String,
    pub anchor_x: u32,
    pub anchor_y: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoverTarget {
    pub region: Region,
    pub row: usize,
}

/// Collapses a burst of resize events into one, a fixed delay after the last
#[derive(Debug)]
pub struct ResizeDebouncer {
    delay: Duration,
    pending: Option<(u32, u32)>,
    last_event: Option<Instant>,
}

impl ResizeDebouncer {
    pub fn new(delay: Duration) -> Self {
        ResizeDebouncer {
            delay,
            pending: None,
            last_event: None,
        }
    }

    pub fn record(&mut self, width: u32, height: u32, now: Instant) {
        self.pending = Some((width, height));
        self.last_event = Some(now);
    }

    /// The latest dimensions, once no event arrived for the full delay
    pub fn take_ready(&mut self, now: Instant) -> Option<(u32, u32)> {
        let last = self.last_event?;
        if now.saturating_duration_since(last) < self.delay {
            return None;
        }
        self.last_event = None;
        self.pending.take()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

struct LoadedSnapshot {
    id: u64,
    state: ProgramState,
    records: RecordDetailsMap,
}

impl LoadedSnapshot {
    fn view(&self) -> MemoryView<'_> {
        MemoryView::new(&self.state.stack, &self.state.heap)
    }
}

pub struct Session {
    config: VisualizerConfig,
    current: Option<LoadedSnapshot>,
    snapshots_seen: u64,
    compact: bool,
    printable: bool,
    cache: DiagramCache,
    stage: Canvas,
    viewport: Canvas,
    resize: ResizeDebouncer,
    hovered: Option<HoverTarget>,
    tooltip: Option<Tooltip>,
    surface: Option<Box<dyn DrawSurface>>,
}

impl Session {
    /// Create a session for a visible area of the given size
    pub fn new(config: VisualizerConfig, visible_width: u32, visible_height: u32) -> Self {
        let viewport = Canvas::new(visible_width, visible_height);
        Session {
            compact: config.compact,
            printable: config.printable,
            resize: ResizeDebouncer::new(config.resize_debounce()),
            config,
            current: None,
            snapshots_seen: 0,
            cache: DiagramCache::new(),
            stage: viewport,
            viewport,
            hovered: None,
            tooltip: None,
            surface: None,
        }
    }

    /// Take a new pause's state.
    ///
    /// The state is deep-copied before use. Malformed frame data aborts the
    /// load and leaves the session with nothing to show.
    pub fn on_snapshot<S: ExecutionState + ?Sized>(&mut self, state: &S) -> Result<()> {
        self.cache.invalidate_all();
        self.current = None;
        self.on_row_hover_leave();

        let state = ProgramState::capture(state);
        let records = records::build(&state.frames, state.stack_top, &state.stack)?;

        self.snapshots_seen += 1;
        tracing::info!(
            snapshot_id = self.snapshots_seen,
            stack_cells = state.stack.len(),
            heap_cells = state.heap.len(),
            frames = state.frames.len(),
            "snapshot received"
        );
        self.current = Some(LoadedSnapshot {
            id: self.snapshots_seen,
            state,
            records,
        });
        Ok(())
    }

    pub fn snapshot_id(&self) -> Option<u64> {
        self.current.as_ref().map(|loaded| loaded.id)
    }

    /// The session's own copy of the current program state
    pub fn state(&self) -> Option<&ProgramState> {
        self.current.as_ref().map(|loaded| &loaded.state)
    }

    pub fn records(&self) -> Option<&RecordDetailsMap> {
        self.current.as_ref().map(|loaded| &loaded.records)
    }

    pub fn mode(&self) -> RenderMode {
        RenderMode::from_flags(self.compact, self.printable)
    }

    /// Render in the current mode
    pub fn render(&mut self) -> Result<Rendered> {
        self.render_mode(self.mode())
    }

    /// Render in a specific mode, reusing the cached diagram when possible.
    ///
    /// When the diagram no longer fits the allocated stage, every slot is
    /// dropped and the stage grows before the diagram is rebuilt.
    pub fn render_mode(&mut self, mode: RenderMode) -> Result<Rendered> {
        let Some(diagram) = self.diagram_for(mode)? else {
            return Ok(Rendered::NothingToShow);
        };

        let footprint = diagram.size().clamp_to(self.config.screen_bounds());
        if self.stage.contains(footprint) {
            return Ok(Rendered::Diagram(diagram));
        }

        self.cache.invalidate_all();
        self.stage = self.stage.union(footprint);
        tracing::info!(
            width = self.stage.width,
            height = self.stage.height,
            "stage grown"
        );
        Ok(self
            .diagram_for(mode)?
            .map_or(Rendered::NothingToShow, Rendered::Diagram))
    }

    fn diagram_for(&mut self, mode: RenderMode) -> Result<Option<Rc<Diagram>>> {
        let Some(loaded) = self.current.as_ref() else {
            return Ok(None);
        };
        let metrics = self.config.metrics(mode.density);
        let canvas = self.stage;
        let diagram = self.cache.get_or_build(mode, loaded.id, || {
            let diagram = Diagram::build(mode, loaded.id, metrics, &loaded.view(), &loaded.records, canvas);
            tracing::debug!(
                ?mode,
                stack_rows = diagram.stack.rows.len(),
                heap_rows = diagram.heap.rows.len(),
                "diagram laid out"
            );
            Ok(diagram)
        })?;
        Ok(Some(diagram))
    }

    /// The diagram currently on display, without building one
    pub fn current_diagram(&self) -> Option<Rc<Diagram>> {
        let id = self.snapshot_id()?;
        self.cache.get(self.mode(), id)
    }

    pub fn toggle_compact(&mut self) {
        self.compact = !self.compact;
        self.on_row_hover_leave();
    }

    pub fn toggle_printable(&mut self) {
        self.printable = !self.printable;
        self.on_row_hover_leave();
    }

    pub fn is_compact(&self) -> bool {
        self.compact
    }

    pub fn is_printable(&self) -> bool {
        self.printable
    }

    /// Record a viewport resize; applied by [`Session::poll_resize`] once events stop
    pub fn on_viewport_resize(&mut self, width: u32, height: u32, now: Instant) {
        self.resize.record(width, height, now);
    }

    /// Apply a pending resize whose quiet period has elapsed.
    ///
    /// Returns whether the viewport changed.
    pub fn poll_resize(&mut self, now: Instant) -> Result<bool> {
        match self.resize.take_ready(now) {
            Some((width, height)) if Canvas::new(width, height) != self.viewport => {
                self.update_dimensions(width, height)?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    pub fn resize_pending(&self) -> bool {
        self.resize.is_pending()
    }

    /// Apply new visible dimensions immediately
    pub fn update_dimensions(&mut self, width: u32, height: u32) -> Result<()> {
        self.viewport = Canvas::new(width, height);
        tracing::debug!(width, height, "viewport resized");
        if self.current.is_some() {
            self.render()?;
        }
        Ok(())
    }

    pub fn viewport(&self) -> Canvas {
        self.viewport
    }

    pub fn stage(&self) -> Canvas {
        self.stage
    }

    /// Scroll buffer on each side: half of the stage's overhang past the viewport
    pub fn invisible_padding(&self) -> (u32, u32) {
        (
            self.stage.width.saturating_sub(self.viewport.width) / 2,
            self.stage.height.saturating_sub(self.viewport.height) / 2,
        )
    }

    /// Hover a row of the displayed diagram.
    ///
    /// Gap markers take the hover style but carry no tooltip.
    pub fn on_row_hover_enter(&mut self, region: Region, index: usize) -> Option<Tooltip> {
        let diagram = self.current_diagram()?;
        let grid = diagram.grid(region);
        let row = grid.rows.get(index)?;

        self.hovered = Some(HoverTarget { region, row: index });
        self.tooltip = row.as_cell().map(|cell| Tooltip {
            text: cell.annotation.tooltip.clone(),
            anchor_x: grid.x + grid.width + diagram.metrics.text_padding_x * 2,
            anchor_y: row.top(&diagram.metrics).saturating_sub(diagram.metrics.text_padding_y),
        });
        self.tooltip.clone()
    }

    pub fn on_row_hover_leave(&mut self) {
        self.hovered = None;
        self.tooltip = None;
    }

    pub fn hovered(&self) -> Option<HoverTarget> {
        self.hovered
    }

    pub fn active_tooltip(&self) -> Option<&Tooltip> {
        self.tooltip.as_ref()
    }

    /// Stroke token for a row, accounting for hover
    pub fn row_style(&self, region: Region, index: usize) -> StyleToken {
        if self.hovered == Some(HoverTarget { region, row: index }) {
            StyleToken::Hovered
        } else {
            self.mode().palette.foreground()
        }
    }

    pub fn attach_surface(&mut self, surface: Box<dyn DrawSurface>) {
        self.surface = Some(surface);
    }

    /// Push the current render to the attached surface
    pub fn redraw(&mut self) -> Result<()> {
        if self.surface.is_none() {
            tracing::warn!("redraw requested with no surface attached");
            return Err(VisualizerError::SurfaceUnavailable { hook: "present" });
        }
        let rendered = self.render()?;
        match self.surface.as_mut() {
            Some(surface) => surface.present(&rendered),
            None => Err(VisualizerError::SurfaceUnavailable { hook: "present" }),
        }
    }

    /// Diagrams built so far; a cache hit leaves this unchanged
    pub fn diagram_builds(&self) -> usize {
        self.cache.builds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debouncer_waits_for_quiet_period() {
        let start = Instant::now();
        let mut debouncer = ResizeDebouncer::new(Duration::from_millis(300));
        debouncer.record(100, 100, start);
        debouncer.record(120, 90, start + Duration::from_millis(200));

        assert_eq!(debouncer.take_ready(start + Duration::from_millis(400)), None);
        assert_eq!(
            debouncer.take_ready(start + Duration::from_millis(500)),
            Some((120, 90))
        );
        assert_eq!(debouncer.take_ready(start + Duration::from_millis(900)), None);
    }
}
