//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into three layers:
//!
//! - **[`app`]**: application state, keyboard event loop, region focus, row selection
//! - **[`panes`]**: render functions for the memory grids, hover details and status bar
//! - **[`theme`]**: maps diagram style tokens and UI chrome to concrete colours
//!
//! The entry point for consumers is [`App`]: construct it with a [`Session`] and
//! call [`App::run`] to start the event loop. The app attaches itself to the
//! session as the draw surface.
//!
//! [`Session`]: crate::session::Session
//! [`App::run`]: app::App::run

pub mod app;
pub mod panes;
pub mod theme;

pub use app::App;
