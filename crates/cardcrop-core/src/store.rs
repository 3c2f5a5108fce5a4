//! Committed crop region and its undo/redo history.
//!
//! The store is the single owner of the durable editor state. It knows
//! nothing about pointers or handles: the drag controller hands it finished
//! regions through [`CropRegionStore::commit`], which is the only way the
//! history grows.
//!
//! History is linear. Committing while the cursor is behind the tail drops
//! the redo branch, and the oldest snapshot is evicted once `limit` entries
//! are held.

use std::collections::VecDeque;

use log::debug;

use crate::geometry::CropRegion;

/// Owner of the committed region and the bounded snapshot history.
#[derive(Debug, Clone)]
pub struct CropRegionStore {
    current: CropRegion,
    history: VecDeque<CropRegion>,
    index: usize,
    limit: usize,
}

impl CropRegionStore {
    /// Create a store whose first history entry is `initial`.
    ///
    /// A `limit` of zero is treated as one.
    pub fn new(initial: CropRegion, limit: usize) -> Self {
        let mut history = VecDeque::with_capacity(limit.clamp(1, 64));
        history.push_back(initial);
        Self {
            current: initial,
            history,
            index: 0,
            limit: limit.max(1),
        }
    }

    /// The last committed (or explicitly set) region.
    pub fn current_region(&self) -> CropRegion {
        self.current
    }

    /// Replace the current region without touching history.
    ///
    /// Callers that want the change to be undoable follow up with
    /// [`commit`](Self::commit).
    pub fn set_region(&mut self, region: CropRegion) {
        self.current = region;
    }

    /// Record `region` as a new snapshot and make it current.
    pub fn commit(&mut self, region: CropRegion) {
        self.history.truncate(self.index + 1);
        self.history.push_back(region);
        if self.history.len() > self.limit {
            self.history.pop_front();
        }
        self.index = self.history.len() - 1;
        self.current = region;
        debug!(
            "Committed crop region {:?} ({}/{})",
            region,
            self.index + 1,
            self.history.len()
        );
    }

    /// Step back one snapshot. Returns `None` at the oldest entry.
    pub fn undo(&mut self) -> Option<CropRegion> {
        if !self.can_undo() {
            return None;
        }
        self.index -= 1;
        self.current = self.history[self.index];
        Some(self.current)
    }

    /// Step forward one snapshot. Returns `None` at the newest entry.
    pub fn redo(&mut self) -> Option<CropRegion> {
        if !self.can_redo() {
            return None;
        }
        self.index += 1;
        self.current = self.history[self.index];
        Some(self.current)
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.history.len()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn history_index(&self) -> usize {
        self.index
    }
}
