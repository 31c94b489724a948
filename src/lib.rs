//! # Introduction
//!
//! memviz turns a paused C program's runtime stack and heap into an annotated
//! diagram: every recorded memory cell becomes a labelled box, and hovering a
//! box explains the variables and frame links that live there in plain English.
//!
//! ## Rendering pipeline
//!
//! ```text
//! ProgramState → RecordDetailsMap → Rows → Diagram → (cache) → DrawSurface
//! ```
//!
//! 1. [`snapshot`]: the program state handed over at a pause: memory
//!    snapshots, scope frames and the stack top.
//! 2. [`memory`]: cells, bit patterns, type chains, and address resolution
//!    across the stack/heap split.
//! 3. [`records`]: indexes which variables, frame links and functions own
//!    each address.
//! 4. [`annotate`]: value and reference descriptions shown in tooltips.
//! 5. [`layout`]: row layout with gap markers, full diagrams per render
//!    mode, and the per-mode diagram cache.
//! 6. [`session`]: owns the current snapshot, render mode, stage size and
//!    hover state; the single entry point for hosts.
//! 7. [`ui`]: ratatui-based terminal host; not part of the stable library API.
//!
//! ## Render modes
//!
//! Density (`compact` / `full`) × palette (`dark` / `light`), four modes in
//! total, each cached independently for the current snapshot.

pub mod annotate;
pub mod config;
pub mod errors;
pub mod layout;
pub mod memory;
pub mod records;
pub mod session;
pub mod snapshot;
pub mod ui;

pub use errors::{Result, VisualizerError};
pub use session::{Rendered, Session, Tooltip};
