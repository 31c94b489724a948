//! Error types for the visualizer
//!
//! [`VisualizerError`] covers malformed interpreter data (fatal to the render
//! that hit it), missing host hooks (recoverable at the call site) and file
//! loading in the terminal host.
//!
//! Lookup misses are not errors. An address that resolves nowhere is shown as
//! a garbage value in the diagram text.

use crate::memory::value::Address;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VisualizerError {
    /// The frame-link chain has more hops than there are scope frames
    #[error("frame-link chain has more than {frames} hop(s); stopped at hop {hops}")]
    FrameChainExhausted { hops: usize, frames: usize },

    /// A frame link points at a stack address with no recorded cell
    #[error("no saved frame link recorded at stack address {address}")]
    MissingFrameLink { address: Address },

    /// A saved frame link holds a negative value other than the -1 sentinel
    #[error("invalid frame link {value} stored at stack address {address}")]
    InvalidFrameLink { address: Address, value: i64 },

    /// The stack top is negative but not the -1 sentinel
    #[error("invalid stack top {value}")]
    InvalidStackTop { value: i64 },

    /// The host has not attached the drawing hook being requested
    #[error("drawing surface unavailable: {hook}")]
    SurfaceUnavailable { hook: &'static str },

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed snapshot: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

impl VisualizerError {
    /// Whether the rest of the engine can keep going after this error
    pub fn is_recoverable(&self) -> bool {
        matches!(self, VisualizerError::SurfaceUnavailable { .. })
    }
}

pub type Result<T> = std::result::Result<T, VisualizerError>;
