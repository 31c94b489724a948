//! Per-mode diagram memoization
//!
//! Four slots, one per [`RenderMode`]. A slot is only a hit for the snapshot
//! it was built from; every slot is emptied when a new snapshot arrives or
//! the canvas grows.

use super::diagram::{Diagram, RenderMode};
use crate::errors::Result;
use std::rc::Rc;

#[derive(Debug, Default)]
pub struct DiagramCache {
    slots: [Option<Rc<Diagram>>; 4],
    builds: usize,
}

impl DiagramCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached diagram for a mode, if it was built from `snapshot_id`
    pub fn get(&self, mode: RenderMode, snapshot_id: u64) -> Option<Rc<Diagram>> {
        self.slots[mode.index()]
            .as_ref()
            .filter(|diagram| diagram.snapshot_id == snapshot_id)
            .cloned()
    }

    pub fn get_or_build<F>(&mut self, mode: RenderMode, snapshot_id: u64, build: F) -> Result<Rc<Diagram>>
    where
        F: FnOnce() -> Result<Diagram>,
    {
        if let Some(diagram) = self.get(mode, snapshot_id) {
            tracing::debug!(?mode, snapshot_id, "diagram cache hit");
            return Ok(diagram);
        }

        tracing::debug!(?mode, snapshot_id, "diagram cache miss");
        let diagram = Rc::new(build()?);
        self.builds += 1;
        self.slots[mode.index()] = Some(Rc::clone(&diagram));
        Ok(diagram)
    }

    pub fn invalidate_all(&mut self) {
        self.slots = Default::default();
    }

    pub fn is_populated(&self, mode: RenderMode) -> bool {
        self.slots[mode.index()].is_some()
    }

    /// Number of diagrams built over the cache's lifetime
    pub fn builds(&self) -> usize {
        self.builds
    }
}
