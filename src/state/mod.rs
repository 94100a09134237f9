// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Tier 2: DYNAMIC state (mutable, tracked on trail).
//!
//! The activation state is the set of activated nodes plus its cached
//! cumulative weight. During a search it is only changed through
//! [`crate::context::SearchContext`], which records every activation on the
//! trail so it can be undone on backtrack.

pub mod statistics;

pub use statistics::{Counters, Statistics};

use crate::error::SearchError;
use crate::graph::{NodeId, NodeSet, SkillGraph};

/// Activated nodes and their total weight.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivationState {
    members: NodeSet,
    weight: u64,
}

impl ActivationState {
    /// The empty state every search starts from.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a state from an arbitrary member set, computing its weight.
    ///
    /// The set is not required to be connected; use [`Self::is_connected`]
    /// to check.
    pub fn from_members(graph: &SkillGraph, members: NodeSet) -> Result<Self, SearchError> {
        Ok(Self {
            weight: graph.total_weight(&members)?,
            members,
        })
    }

    pub fn members(&self) -> &NodeSet {
        &self.members
    }

    /// Cumulative weight of all members.
    pub fn weight(&self) -> u64 {
        self.weight
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.members.contains(id)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Whether the state contains the root and every other member has an
    /// activated parent.
    pub fn is_connected(&self, graph: &SkillGraph) -> Result<bool, SearchError> {
        if self.members.is_empty() {
            return Ok(true);
        }
        if !self.members.contains(graph.root()) {
            return Ok(false);
        }
        for id in self.members.iter() {
            if id == graph.root() {
                continue;
            }
            let parents = graph.parents(id)?;
            if !parents.iter().any(|&parent| self.members.contains(parent)) {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Add `id` with the given weight. Returns the weight before the change.
    ///
    /// The sum saturates, so an overflowing activation lands past any target
    /// and is pruned as an overshoot.
    pub(crate) fn activate(&mut self, id: NodeId, weight: u64) -> u64 {
        let prior = self.weight;
        let inserted = self.members.insert(id);
        debug_assert!(inserted, "node {} activated twice", id);
        self.weight = self.weight.saturating_add(weight);
        prior
    }

    /// Remove `id` and restore the weight recorded when it was activated.
    pub(crate) fn deactivate(&mut self, id: NodeId, prior_weight: u64) {
        let removed = self.members.remove(id);
        debug_assert!(removed, "node {} deactivated but not active", id);
        self.weight = prior_weight;
    }
}
