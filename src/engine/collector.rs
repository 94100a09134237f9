// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Deduplicating collection of exact-target combinations.

use crate::error::SearchError;
use crate::graph::{NodeId, NodeSet, SkillGraph};
use std::collections::HashSet;

/// One activation state whose weight hit the target exactly.
///
/// Equality and hashing are by member set, so the same subset reached along
/// different exploration orders is one combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Combination(NodeSet);

impl Combination {
    pub fn new(members: NodeSet) -> Self {
        Self(members)
    }

    pub fn members(&self) -> &NodeSet {
        &self.0
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.0.contains(id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Member ids, ascending.
    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.0.iter()
    }

    pub fn weight(&self, graph: &SkillGraph) -> Result<u64, SearchError> {
        graph.total_weight(&self.0)
    }
}

/// Accumulates combinations, absorbing repeated discoveries.
#[derive(Debug, Default)]
pub struct ResultCollector {
    combinations: HashSet<Combination>,
    discoveries: u64,
}

impl ResultCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a snapshot of an exact-target state.
    ///
    /// Returns the new number of combinations when the set grew, `None` when
    /// the snapshot was already known.
    pub fn record(&mut self, members: NodeSet) -> Option<usize> {
        self.discoveries += 1;
        if self.combinations.insert(Combination(members)) {
            Some(self.combinations.len())
        } else {
            None
        }
    }

    /// Number of distinct combinations.
    pub fn len(&self) -> usize {
        self.combinations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.combinations.is_empty()
    }

    /// Number of snapshots recorded, duplicates included.
    pub fn discoveries(&self) -> u64 {
        self.discoveries
    }

    pub fn contains(&self, combination: &Combination) -> bool {
        self.combinations.contains(combination)
    }

    pub fn into_combinations(self) -> HashSet<Combination> {
        self.combinations
    }
}
