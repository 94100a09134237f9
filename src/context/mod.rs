// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Search context combining MEMO and DYNAMIC state.
//!
//! The SearchContext is the core data structure that combines:
//! - Tier 1 (MEMO): the immutable graph and gate table, borrowed
//! - Tier 2 (DYNAMIC): the activation state, its trail and the statistics
//!
//! The graph and gates are only borrowed, so several contexts can search the
//! same tree independently.

use crate::engine::frontier;
use crate::error::SearchError;
use crate::graph::{GateTable, NodeId, NodeSet, SkillGraph};
use crate::state::{ActivationState, Counters, Statistics};
use crate::trail::Trail;
use log::trace;

/// Search context: the tree being searched plus the mutable search state.
///
/// # Memory Model
///
/// ```text
/// SearchContext {
///     graph: &SkillGraph,        // Tier 1: immutable, shared
///     gates: &GateTable,         // Tier 1: immutable, shared
///     trail: Trail,              // Tier 2: mutable, owned
///     state: ActivationState,    // Tier 2: mutable, owned
///     statistics: Statistics,    // Tier 2: instrumentation
/// }
/// ```
///
/// The state is only changed through [`SearchContext::activate`] and
/// [`SearchContext::rewind_to`], so every change is on the trail.
#[derive(Debug)]
pub struct SearchContext<'a> {
    pub graph: &'a SkillGraph,
    pub gates: &'a GateTable,
    pub trail: Trail,
    state: ActivationState,
    pub statistics: Statistics,
}

impl<'a> SearchContext<'a> {
    pub fn new(graph: &'a SkillGraph, gates: &'a GateTable) -> Self {
        Self {
            graph,
            gates,
            trail: Trail::new(),
            state: ActivationState::new(),
            statistics: Statistics::new(),
        }
    }

    pub fn state(&self) -> &ActivationState {
        &self.state
    }

    /// Position on the trail to rewind to later.
    pub fn checkpoint(&self) -> usize {
        self.trail.checkpoint()
    }

    /// Activate `id` (trail-tracked). Returns the new cumulative weight.
    pub fn activate(&mut self, id: NodeId) -> Result<u64, SearchError> {
        let weight = self.graph.weight(id)?;
        let prior = self.state.activate(id, weight);
        self.trail.record(id, prior);
        self.statistics.increment_counter(Counters::Activations);
        trace!(
            "activate {} -> weight {}",
            self.graph.name(id)?,
            self.state.weight()
        );
        Ok(self.state.weight())
    }

    /// Undo every activation made since `checkpoint`.
    pub fn rewind_to(&mut self, checkpoint: usize) {
        let state = &mut self.state;
        self.trail
            .rewind_to(checkpoint, |entry| state.deactivate(entry.node, entry.prior_weight));
    }

    /// Nodes that may be activated next from the current state.
    pub fn frontier(&self) -> Result<NodeSet, SearchError> {
        frontier::frontier(self.graph, self.gates, &self.state)
    }
}
