// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use skill_search::engine::Combination;
use skill_search::graph::{GateTable, NodeSet, SkillGraph};
use skill_search::state::ActivationState;
use std::collections::HashSet;

/// R with three weight-1 children A, B, C, all tier 1.
pub fn star() -> SkillGraph {
    SkillGraph::builder()
        .node("R", 1, 1, ["A", "B", "C"])
        .leaf("A", 1, 1)
        .leaf("B", 1, 1)
        .leaf("C", 1, 1)
        .build()
        .unwrap()
}

/// A chain R -> A1 -> ... -> A7 of weight-1 tier-1 nodes, plus a weight-1
/// tier-2 node T hanging off R, with tier 2 opening at 8 points.
pub fn gated_chain() -> (SkillGraph, GateTable) {
    let mut builder = SkillGraph::builder();
    builder.add_node("R", 1, 1, ["A1", "T"]);
    for i in 1..=7 {
        let children: Vec<String> = if i < 7 {
            vec![format!("A{}", i + 1)]
        } else {
            vec![]
        };
        builder.add_node(format!("A{i}"), 1, 1, children);
    }
    builder.add_node("T", 1, 2, Vec::<String>::new());
    (builder.build().unwrap(), GateTable::new([(2, 8)]).unwrap())
}

/// Small pseudo-random DAG with `size` nodes, weights 1..=3 and tiers 1..=3.
///
/// Node `N0` is the root; every later node gets one or two parents among the
/// nodes before it, so the graph is connected and acyclic. Gates open tier 2
/// at 3 points and tier 3 at 6.
pub fn random_tree(seed: u64, size: usize) -> (SkillGraph, GateTable) {
    let mut rng = Lcg(seed.wrapping_mul(2654435761).wrapping_add(1));
    let mut children: Vec<Vec<String>> = vec![Vec::new(); size];
    for node in 1..size {
        let first = rng.below(node as u64) as usize;
        children[first].push(format!("N{node}"));
        if node > 1 && rng.below(3) == 0 {
            let second = rng.below(node as u64) as usize;
            if second != first {
                children[second].push(format!("N{node}"));
            }
        }
    }

    let mut builder = SkillGraph::builder();
    for (node, kids) in children.into_iter().enumerate() {
        let weight = 1 + rng.below(3);
        let tier = if node == 0 { 1 } else { 1 + rng.below(3) as u32 };
        builder.add_node(format!("N{node}"), weight, tier, kids);
    }
    (builder.build().unwrap(), GateTable::new([(2, 3), (3, 6)]).unwrap())
}

struct Lcg(u64);

impl Lcg {
    fn below(&mut self, bound: u64) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 33) % bound
    }
}

/// Whether the members of `set` can be activated one at a time from the root,
/// each with an activated parent and an open tier at the time.
///
/// Activation only ever raises the weight, so greedily adding whatever is
/// addable finds an order whenever one exists.
pub fn gate_order_exists(graph: &SkillGraph, gates: &GateTable, set: &NodeSet) -> bool {
    let root = graph.root();
    if !set.contains(root) {
        return false;
    }
    let mut active = NodeSet::empty();
    active.insert(root);
    let mut weight = graph.weight(root).unwrap();
    loop {
        let mut progressed = false;
        for id in set.difference(&active).iter() {
            let has_parent = graph
                .parents(id)
                .unwrap()
                .iter()
                .any(|&parent| active.contains(parent));
            let node = graph.node(id).unwrap();
            if has_parent && gates.is_tier_open(weight, node.tier(), node.name()).unwrap() {
                active.insert(id);
                weight += node.weight();
                progressed = true;
            }
        }
        if active == *set {
            return true;
        }
        if !progressed {
            return false;
        }
    }
}

/// Every reachable combination of weight `target`, by checking all subsets.
pub fn brute_force(graph: &SkillGraph, gates: &GateTable, target: u64) -> HashSet<Combination> {
    let count = graph.len();
    assert!(count <= 20, "brute force is exponential");
    let mut result = HashSet::new();
    for mask in 1u32..(1 << count) {
        let set: NodeSet = (0..count as u16).filter(|&id| mask & (1 << id) != 0).collect();
        if graph.total_weight(&set).unwrap() != target {
            continue;
        }
        let state = ActivationState::from_members(graph, set).unwrap();
        if state.is_connected(graph).unwrap() && gate_order_exists(graph, gates, &set) {
            result.insert(Combination::new(set));
        }
    }
    result
}

/// Build a combination from node names.
pub fn combination(graph: &SkillGraph, names: &[&str]) -> Combination {
    Combination::new(graph.node_set(names.iter().copied()).unwrap())
}

/// Combinations from lists of node names.
pub fn combinations(graph: &SkillGraph, names: &[&[&str]]) -> HashSet<Combination> {
    names.iter().map(|members| combination(graph, members)).collect()
}
