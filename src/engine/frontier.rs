// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Frontier resolution: which nodes may be activated next.
//!
//! A node is on the frontier when it is not active, at least one of its
//! parents is active, and its tier is open at the state's current weight
//! (the weight *before* the node itself would be added). The frontier has to
//! be recomputed after every activation, since the new weight may open tiers.

use crate::error::SearchError;
use crate::graph::{GateTable, NodeSet, SkillGraph};
use crate::state::ActivationState;

/// Compute the frontier of `state`. Never mutates the state.
pub fn frontier(
    graph: &SkillGraph,
    gates: &GateTable,
    state: &ActivationState,
) -> Result<NodeSet, SearchError> {
    let members = state.members();
    let weight = state.weight();
    let mut available = NodeSet::empty();
    let mut rejected = NodeSet::empty();

    for id in members.iter() {
        for &child in graph.children(id)? {
            if members.contains(child) || available.contains(child) || rejected.contains(child) {
                continue;
            }
            let node = graph.node(child)?;
            if gates.is_tier_open(weight, node.tier(), node.name())? {
                available.insert(child);
            } else {
                rejected.insert(child);
            }
        }
    }
    Ok(available)
}
