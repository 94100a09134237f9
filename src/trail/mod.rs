// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Trail-based backtracking for the activation state.
//!
//! Every activation is recorded on the trail together with the cumulative
//! weight it replaced. Backtracking rewinds the trail to a checkpoint and hands
//! each undone entry back, newest first, so the caller can restore its state
//! exactly as it was when the checkpoint was taken.

use crate::graph::{NodeId, MAX_NODES};

/// A single entry in the trail, recording one activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrailEntry {
    /// The node that was activated.
    pub node: NodeId,
    /// The cumulative weight before the activation.
    pub prior_weight: u64,
}

/// The undo log of activations.
///
/// A node is activated at most once along any search path, so the trail never
/// grows beyond the node count.
///
/// # Example
///
/// ```
/// use skill_search::trail::Trail;
///
/// let mut trail = Trail::new();
/// trail.record(0, 0);
/// let checkpoint = trail.checkpoint();
/// trail.record(3, 1);
/// trail.record(5, 4);
///
/// let mut undone = Vec::new();
/// trail.rewind_to(checkpoint, |entry| undone.push(entry.node));
/// assert_eq!(undone, vec![5, 3]);
/// assert_eq!(trail.len(), 1);
/// ```
#[derive(Debug)]
pub struct Trail {
    entries: Vec<TrailEntry>,
}

impl Trail {
    /// Create a new empty trail.
    pub fn new() -> Self {
        Self {
            entries: Vec::with_capacity(MAX_NODES),
        }
    }

    /// The position to rewind to later.
    pub fn checkpoint(&self) -> usize {
        self.entries.len()
    }

    /// Record an activation.
    ///
    /// # Panics
    ///
    /// Panics if the trail exceeds MAX_NODES (indicates a node activated twice on one path).
    pub fn record(&mut self, node: NodeId, prior_weight: u64) {
        if self.entries.len() >= MAX_NODES {
            panic!("Trail overflow: exceeded {} entries", MAX_NODES);
        }
        self.entries.push(TrailEntry { node, prior_weight });
    }

    /// Undo every entry recorded after `checkpoint`, newest first.
    ///
    /// Returns the number of entries undone.
    pub fn rewind_to(&mut self, checkpoint: usize, mut undo: impl FnMut(TrailEntry)) -> usize {
        let mut undone = 0;
        while self.entries.len() > checkpoint {
            if let Some(entry) = self.entries.pop() {
                undo(entry);
                undone += 1;
            }
        }
        undone
    }

    /// Get the current number of entries in the trail.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the trail is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for Trail {
    fn default() -> Self {
        Self::new()
    }
}
