// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Tier gates.
//!
//! Tier 1 is always open. Every other tier opens once the *total* weight
//! already committed reaches the tier's threshold; weight spent inside the
//! tier itself, or in any particular tier, is not considered separately.

use crate::error::{GraphError, SearchError};
use std::collections::BTreeMap;

/// The tier that never needs a gate entry.
pub const OPEN_TIER: u32 = 1;

/// Mapping from tier (>= 2) to the cumulative weight that unlocks it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GateTable {
    thresholds: BTreeMap<u32, u64>,
}

impl GateTable {
    /// A table with no gates: only tier 1 nodes can ever be activated.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a table from `(tier, threshold)` pairs.
    ///
    /// Later entries for the same tier replace earlier ones.
    pub fn new(entries: impl IntoIterator<Item = (u32, u64)>) -> Result<Self, GraphError> {
        let mut table = Self::empty();
        for (tier, threshold) in entries {
            table.insert(tier, threshold)?;
        }
        Ok(table)
    }

    /// Set the threshold for `tier`, returning the previous one.
    pub fn insert(&mut self, tier: u32, threshold: u64) -> Result<Option<u64>, GraphError> {
        if tier <= OPEN_TIER {
            return Err(GraphError::InvalidGateTier(tier));
        }
        Ok(self.thresholds.insert(tier, threshold))
    }

    /// The threshold configured for `tier`, if any.
    pub fn threshold(&self, tier: u32) -> Option<u64> {
        self.thresholds.get(&tier).copied()
    }

    /// Iterate over `(tier, threshold)` in ascending tier order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, u64)> + '_ {
        self.thresholds.iter().map(|(&tier, &threshold)| (tier, threshold))
    }

    pub fn len(&self) -> usize {
        self.thresholds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.thresholds.is_empty()
    }

    /// Whether nodes of `tier` may be activated once `cumulative_weight` is committed.
    ///
    /// `node` only labels the error when the tier has no entry.
    pub fn is_tier_open(
        &self,
        cumulative_weight: u64,
        tier: u32,
        node: &str,
    ) -> Result<bool, SearchError> {
        if tier == OPEN_TIER {
            return Ok(true);
        }
        match self.threshold(tier) {
            Some(threshold) => Ok(cumulative_weight >= threshold),
            None => Err(SearchError::UnconfiguredTier {
                tier,
                node: node.to_string(),
            }),
        }
    }
}
