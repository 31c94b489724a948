//! Main TUI application state and logic

use crate::errors::{Result, VisualizerError};
use crate::layout::Region;
use crate::session::{DrawSurface, Rendered, Session};
use crate::snapshot::ProgramState;
use crate::ui::panes::{
    render_intro_pane, render_memory_pane, render_status_bar, render_tooltip_pane,
    GridRenderData, GridScrollState, StatusRenderData,
};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::cell::RefCell;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Drawing units per terminal column
pub const CELL_UNITS_X: u32 = 8;
/// Drawing units per terminal row
pub const CELL_UNITS_Y: u32 = 16;

const TOOLTIP_HEIGHT: u16 = 10;

/// Drawing-unit size of a terminal of `columns` × `rows`
pub fn viewport_units(columns: u16, rows: u16) -> (u32, u32) {
    (u32::from(columns) * CELL_UNITS_X, u32::from(rows) * CELL_UNITS_Y)
}

/// Surface that keeps the latest presented render for the next frame
struct VisSlot {
    shown: Rc<RefCell<Rendered>>,
}

impl DrawSurface for VisSlot {
    fn present(&mut self, rendered: &Rendered) -> Result<()> {
        *self.shown.borrow_mut() = rendered.clone();
        Ok(())
    }
}

/// The main application state
pub struct App {
    session: Session,

    /// What the surface last received
    shown: Rc<RefCell<Rendered>>,

    /// Snapshot file reloaded with `r`
    snapshot_path: Option<PathBuf>,

    /// Region receiving ↑/↓
    pub focused: Region,

    pub stack_selected: Option<usize>,
    pub heap_selected: Option<usize>,
    stack_scroll: GridScrollState,
    heap_scroll: GridScrollState,

    /// Set when the surface needs a fresh render
    dirty: bool,

    pub should_quit: bool,
    pub status_message: String,
    pub is_error: bool,
}

impl App {
    pub fn new(mut session: Session, snapshot_path: Option<PathBuf>) -> Self {
        let shown = Rc::new(RefCell::new(Rendered::NothingToShow));
        session.attach_surface(Box::new(VisSlot {
            shown: Rc::clone(&shown),
        }));

        App {
            session,
            shown,
            snapshot_path,
            focused: Region::Stack,
            stack_selected: None,
            heap_selected: None,
            stack_scroll: GridScrollState::default(),
            heap_scroll: GridScrollState::default(),
            dirty: true,
            should_quit: false,
            status_message: String::from("Ready!"),
            is_error: false,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        if self.snapshot_path.is_some() {
            self.reload_snapshot();
        }

        loop {
            match self.session.poll_resize(Instant::now()) {
                Ok(true) => self.dirty = true,
                Ok(false) => {}
                Err(e) => self.report_error(e),
            }

            if self.dirty {
                self.refresh();
            }

            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if event::poll(Duration::from_millis(50))? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        self.handle_key_event(key)
                    }
                    Event::Resize(columns, rows) => {
                        let (width, height) = viewport_units(columns, rows);
                        self.session
                            .on_viewport_resize(width, height, Instant::now());
                    }
                    _ => {}
                }
            }
        }

        Ok(())
    }

    /// Push a fresh render to the surface and restore the hover
    fn refresh(&mut self) {
        self.dirty = false;
        if let Err(e) = self.session.redraw() {
            self.report_error(e);
            return;
        }
        self.apply_selection();
    }

    fn apply_selection(&mut self) {
        let rows = self.row_count(self.focused);
        let selected = match self.focused {
            Region::Stack => &mut self.stack_selected,
            Region::Heap => &mut self.heap_selected,
        };
        *selected = selected.map(|row| row.min(rows.saturating_sub(1)));
        match *selected {
            Some(row) if rows > 0 => {
                self.session.on_row_hover_enter(self.focused, row);
            }
            _ => self.session.on_row_hover_leave(),
        }
    }

    fn row_count(&self, region: Region) -> usize {
        self.session
            .current_diagram()
            .map(|diagram| diagram.grid(region).rows.len())
            .unwrap_or(0)
    }

    fn reload_snapshot(&mut self) {
        let Some(path) = self.snapshot_path.clone() else {
            self.status_message = "No snapshot file to reload".to_string();
            return;
        };

        match ProgramState::load(&path).and_then(|state| self.session.on_snapshot(&state)) {
            Ok(()) => {
                self.status_message = format!("Loaded {}", path.display());
                self.is_error = false;
            }
            Err(e) => self.report_error(e),
        }
        self.dirty = true;
    }

    fn report_error(&mut self, error: VisualizerError) {
        tracing::error!(%error, "visualizer error");
        self.status_message = error.to_string();
        self.is_error = true;
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(TOOLTIP_HEIGHT),
                Constraint::Length(1),
            ])
            .split(size);

        let shown = self.shown.borrow().clone();
        match shown.diagram() {
            None => {
                let intro = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(0), Constraint::Length(1)])
                    .split(size);
                render_intro_pane(frame, intro[0]);
            }
            Some(diagram) => {
                let columns = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                    .split(main_chunks[0]);

                for (region, area) in [(Region::Stack, columns[0]), (Region::Heap, columns[1])] {
                    let row_styles: Vec<_> = (0..diagram.grid(region).rows.len())
                        .map(|row| self.session.row_style(region, row))
                        .collect();
                    let (selected, scroll) = match region {
                        Region::Stack => (self.stack_selected, &mut self.stack_scroll),
                        Region::Heap => (self.heap_selected, &mut self.heap_scroll),
                    };
                    render_memory_pane(
                        frame,
                        area,
                        GridRenderData {
                            diagram,
                            region,
                            row_styles: &row_styles,
                        },
                        self.focused == region,
                        selected,
                        scroll,
                    );
                }

                render_tooltip_pane(frame, main_chunks[1], self.session.active_tooltip());
            }
        }

        render_status_bar(
            frame,
            main_chunks[2],
            StatusRenderData {
                message: &self.status_message,
                snapshot_id: self.session.snapshot_id(),
                compact: self.session.is_compact(),
                printable: self.session.is_printable(),
                is_error: self.is_error,
            },
        );
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Tab | KeyCode::BackTab => {
                self.focused = self.focused.other();
                self.apply_selection();
            }
            KeyCode::Up => self.move_selection(-1),
            KeyCode::Down => self.move_selection(1),
            KeyCode::Esc => {
                self.stack_selected = None;
                self.heap_selected = None;
                self.session.on_row_hover_leave();
            }
            KeyCode::Char('c') => {
                self.session.toggle_compact();
                self.status_message = if self.session.is_compact() {
                    "Compact layout".to_string()
                } else {
                    "Full layout".to_string()
                };
                self.dirty = true;
            }
            KeyCode::Char('p') => {
                self.session.toggle_printable();
                self.status_message = if self.session.is_printable() {
                    "Printable colours".to_string()
                } else {
                    "Screen colours".to_string()
                };
                self.dirty = true;
            }
            KeyCode::Char('r') => self.reload_snapshot(),
            _ => {}
        }
    }

    fn move_selection(&mut self, delta: isize) {
        let rows = self.row_count(self.focused);
        if rows == 0 {
            return;
        }
        let selected = match self.focused {
            Region::Stack => &mut self.stack_selected,
            Region::Heap => &mut self.heap_selected,
        };
        *selected = Some(match *selected {
            None => 0,
            Some(row) => row.saturating_add_signed(delta).min(rows - 1),
        });
        self.apply_selection();
    }
}
