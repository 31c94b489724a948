//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`memory`]: one memory region of the current diagram as a column of boxes
//! - [`tooltip`]: hover details for the selected row, and the intro text
//! - [`status`]: status bar with keybindings and render mode
//!
//! Each pane exports a `render_*` function taking a [`ratatui::Frame`] and
//! the area to draw into; panes hold no state beyond their scroll offsets.

pub mod memory;
pub mod status;
pub mod tooltip;

pub use memory::{render_memory_pane, GridRenderData, GridScrollState};
pub use status::{render_status_bar, StatusRenderData};
pub use tooltip::{render_intro_pane, render_tooltip_pane};
