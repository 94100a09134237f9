// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Immutable skill tree description (Tier 1: MEMO).
//!
//! A [`SkillGraph`] is built once, validated once, and then only read by the
//! search. Nodes get dense [`NodeId`]s in declaration order; the id is also
//! the node's bit position in a [`NodeSet`].
//!
//! # Example
//!
//! ```
//! use skill_search::graph::SkillGraph;
//!
//! let graph = SkillGraph::builder()
//!     .node("R", 1, 1, ["A", "B"])
//!     .leaf("A", 2, 1)
//!     .leaf("B", 3, 2)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(graph.len(), 3);
//! assert_eq!(graph.name(graph.root()).unwrap(), "R");
//! assert_eq!(graph.weight(graph.node_id("B").unwrap()).unwrap(), 3);
//! ```

pub mod gate;
pub mod node_set;

pub use gate::{GateTable, OPEN_TIER};
pub use node_set::{NodeSet, MAX_NODES, NODESET_LENGTH};

use crate::error::{GraphError, SearchError};
use log::debug;
use std::collections::{BTreeSet, HashMap};

/// Largest total weight a graph may have; every reachable target fits in `i64`.
pub const MAX_TOTAL_WEIGHT: u64 = i64::MAX as u64;

/// Dense node identifier, assigned in declaration order.
pub type NodeId = u16;

/// A single skill: its weight (points), tier and outgoing prerequisite edges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    name: String,
    weight: u64,
    tier: u32,
    children: Vec<NodeId>,
}

impl Node {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn weight(&self) -> u64 {
        self.weight
    }

    pub fn tier(&self) -> u32 {
        self.tier
    }

    /// Children in declaration order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// A validated, acyclic prerequisite graph with a single root.
#[derive(Debug, Clone)]
pub struct SkillGraph {
    nodes: Vec<Node>,
    parents: Vec<Vec<NodeId>>,
    index: HashMap<String, NodeId>,
    root: NodeId,
}

impl SkillGraph {
    pub fn builder() -> SkillGraphBuilder {
        SkillGraphBuilder::new()
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: an empty graph is rejected at construction.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> Result<&Node, SearchError> {
        self.nodes
            .get(id as usize)
            .ok_or_else(|| SearchError::UnknownNode(format!("#{}", id)))
    }

    pub fn weight(&self, id: NodeId) -> Result<u64, SearchError> {
        Ok(self.node(id)?.weight)
    }

    pub fn tier(&self, id: NodeId) -> Result<u32, SearchError> {
        Ok(self.node(id)?.tier)
    }

    pub fn children(&self, id: NodeId) -> Result<&[NodeId], SearchError> {
        Ok(&self.node(id)?.children)
    }

    /// Nodes with an edge into `id`.
    pub fn parents(&self, id: NodeId) -> Result<&[NodeId], SearchError> {
        self.parents
            .get(id as usize)
            .map(Vec::as_slice)
            .ok_or_else(|| SearchError::UnknownNode(format!("#{}", id)))
    }

    pub fn name(&self, id: NodeId) -> Result<&str, SearchError> {
        Ok(&self.node(id)?.name)
    }

    /// Look a node up by name.
    pub fn node_id(&self, name: &str) -> Result<NodeId, SearchError> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| SearchError::UnknownNode(name.to_string()))
    }

    /// Resolve several names into a set.
    pub fn node_set<'a>(
        &self,
        names: impl IntoIterator<Item = &'a str>,
    ) -> Result<NodeSet, SearchError> {
        names.into_iter().map(|name| self.node_id(name)).collect()
    }

    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> {
        0..self.nodes.len() as NodeId
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// The set of every node in the graph.
    pub fn all_nodes(&self) -> NodeSet {
        NodeSet::first(self.nodes.len())
    }

    /// Distinct tiers used by the graph, ascending.
    pub fn tiers(&self) -> BTreeSet<u32> {
        self.nodes.iter().map(|node| node.tier).collect()
    }

    /// Sum of the weights of the members of `set`.
    pub fn total_weight(&self, set: &NodeSet) -> Result<u64, SearchError> {
        set.iter().try_fold(0u64, |total, id| {
            total
                .checked_add(self.weight(id)?)
                .ok_or(SearchError::WeightOverflow)
        })
    }

    /// Sum of the weights of the members of `set` that belong to `tier`.
    ///
    /// Reporting only: gates look at the total weight, never at this.
    pub fn tier_weight(&self, set: &NodeSet, tier: u32) -> Result<u64, SearchError> {
        let mut total: u64 = 0;
        for id in set.iter() {
            let node = self.node(id)?;
            if node.tier == tier {
                total = total
                    .checked_add(node.weight)
                    .ok_or(SearchError::WeightOverflow)?;
            }
        }
        Ok(total)
    }
}

/// Collects node declarations, then validates them into a [`SkillGraph`].
#[derive(Debug, Clone, Default)]
pub struct SkillGraphBuilder {
    declarations: Vec<Declaration>,
    root: Option<String>,
}

#[derive(Debug, Clone)]
struct Declaration {
    name: String,
    weight: u64,
    tier: u32,
    children: Vec<String>,
}

impl SkillGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a node with its children (chaining form).
    pub fn node<I, S>(mut self, name: &str, weight: u64, tier: u32, children: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.add_node(name, weight, tier, children);
        self
    }

    /// Declare a node without children (chaining form).
    pub fn leaf(mut self, name: &str, weight: u64, tier: u32) -> Self {
        self.add_node(name, weight, tier, Vec::<String>::new());
        self
    }

    /// Designate the root explicitly instead of inferring it.
    pub fn root(mut self, name: &str) -> Self {
        self.set_root(name);
        self
    }

    pub fn add_node<I, S>(&mut self, name: impl Into<String>, weight: u64, tier: u32, children: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.declarations.push(Declaration {
            name: name.into(),
            weight,
            tier,
            children: children.into_iter().map(Into::into).collect(),
        });
    }

    pub fn set_root(&mut self, name: impl Into<String>) {
        self.root = Some(name.into());
    }

    /// Validate the declarations and build the graph.
    ///
    /// Checks, in order: size, unique names, positive weights and tiers,
    /// known children, acyclicity, a single root without incoming edges,
    /// and reachability of every node from the root.
    pub fn build(self) -> Result<SkillGraph, GraphError> {
        let count = self.declarations.len();
        if count == 0 {
            return Err(GraphError::Empty);
        }
        if count > MAX_NODES {
            return Err(GraphError::TooManyNodes {
                count,
                max: MAX_NODES,
            });
        }

        let mut index = HashMap::with_capacity(count);
        let mut total_weight: u64 = 0;
        for (id, decl) in self.declarations.iter().enumerate() {
            if index.insert(decl.name.clone(), id as NodeId).is_some() {
                return Err(GraphError::DuplicateNode(decl.name.clone()));
            }
            if decl.weight == 0 {
                return Err(GraphError::ZeroWeight(decl.name.clone()));
            }
            if decl.tier == 0 {
                return Err(GraphError::InvalidTier(decl.name.clone()));
            }
            total_weight = total_weight
                .checked_add(decl.weight)
                .filter(|&total| total <= MAX_TOTAL_WEIGHT)
                .ok_or(GraphError::TotalWeightTooLarge {
                    max: MAX_TOTAL_WEIGHT,
                })?;
        }

        let mut nodes = Vec::with_capacity(count);
        let mut parents = vec![Vec::new(); count];
        for (id, decl) in self.declarations.into_iter().enumerate() {
            let mut children = Vec::with_capacity(decl.children.len());
            for child in &decl.children {
                let child_id = *index.get(child).ok_or_else(|| GraphError::UnknownChild {
                    parent: decl.name.clone(),
                    child: child.clone(),
                })?;
                children.push(child_id);
                parents[child_id as usize].push(id as NodeId);
            }
            nodes.push(Node {
                name: decl.name,
                weight: decl.weight,
                tier: decl.tier,
                children,
            });
        }

        if let Some(id) = find_cycle(&nodes) {
            return Err(GraphError::Cycle(nodes[id as usize].name.clone()));
        }

        let root = match self.root {
            Some(name) => {
                let id = *index.get(&name).ok_or(GraphError::UnknownRoot(name))?;
                if !parents[id as usize].is_empty() {
                    return Err(GraphError::RootHasParents(nodes[id as usize].name.clone()));
                }
                id
            }
            None => {
                let sources: Vec<usize> = (0..count).filter(|&id| parents[id].is_empty()).collect();
                match sources.as_slice() {
                    [only] => *only as NodeId,
                    _ => {
                        // Acyclic and non-empty, so there is at least one source.
                        return Err(GraphError::AmbiguousRoot(
                            sources.iter().map(|&id| nodes[id].name.clone()).collect(),
                        ));
                    }
                }
            }
        };

        let reached = reachable_from(&nodes, root);
        if let Some(missing) = NodeSet::first(count).difference(&reached).iter().next() {
            return Err(GraphError::Unreachable(nodes[missing as usize].name.clone()));
        }

        let graph = SkillGraph {
            nodes,
            parents,
            index,
            root,
        };
        debug!(
            "Built skill graph: {} nodes, root {}, tiers {:?}",
            graph.len(),
            graph.nodes[root as usize].name,
            graph.tiers()
        );
        Ok(graph)
    }
}

/// Depth-first search for a back edge; returns a node on a cycle.
fn find_cycle(nodes: &[Node]) -> Option<NodeId> {
    #[derive(Clone, Copy, PartialEq, Eq)]
    enum Mark {
        New,
        Active,
        Done,
    }

    let mut marks = vec![Mark::New; nodes.len()];
    let mut stack: Vec<(NodeId, usize)> = Vec::new();

    for start in 0..nodes.len() {
        if marks[start] != Mark::New {
            continue;
        }
        marks[start] = Mark::Active;
        stack.push((start as NodeId, 0));

        while let Some(top) = stack.last_mut() {
            let (node, next) = *top;
            match nodes[node as usize].children.get(next) {
                Some(&child) => {
                    top.1 += 1;
                    match marks[child as usize] {
                        Mark::Active => return Some(child),
                        Mark::New => {
                            marks[child as usize] = Mark::Active;
                            stack.push((child, 0));
                        }
                        Mark::Done => {}
                    }
                }
                None => {
                    marks[node as usize] = Mark::Done;
                    stack.pop();
                }
            }
        }
    }
    None
}

fn reachable_from(nodes: &[Node], root: NodeId) -> NodeSet {
    let mut reached = NodeSet::empty();
    let mut pending = vec![root];
    reached.insert(root);
    while let Some(id) = pending.pop() {
        for &child in &nodes[id as usize].children {
            if reached.insert(child) {
                pending.push(child);
            }
        }
    }
    reached
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diamond() -> SkillGraph {
        SkillGraph::builder()
            .node("R", 1, 1, ["A", "B"])
            .node("A", 2, 1, ["D"])
            .node("B", 3, 2, ["D"])
            .leaf("D", 4, 2)
            .build()
            .unwrap()
    }

    #[test]
    fn test_accessors() {
        let graph = diamond();
        assert_eq!(graph.len(), 4);
        assert_eq!(graph.root(), 0);
        let d = graph.node_id("D").unwrap();
        assert_eq!(graph.weight(d), Ok(4));
        assert_eq!(graph.tier(d), Ok(2));
        assert_eq!(graph.name(d), Ok("D"));
        assert_eq!(graph.children(graph.root()).unwrap(), &[1, 2]);
        assert_eq!(graph.parents(d).unwrap(), &[1, 2]);
        assert_eq!(graph.tiers().into_iter().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn test_unknown_node_queries() {
        let graph = diamond();
        assert_eq!(graph.weight(4), Err(SearchError::UnknownNode("#4".to_string())));
        assert!(graph.children(99).is_err());
        assert!(graph.parents(99).is_err());
        assert_eq!(
            graph.node_id("Q"),
            Err(SearchError::UnknownNode("Q".to_string()))
        );
    }

    #[test]
    fn test_weights_of_sets() {
        let graph = diamond();
        let set = graph.node_set(["R", "B", "D"]).unwrap();
        assert_eq!(graph.total_weight(&set), Ok(8));
        assert_eq!(graph.tier_weight(&set, 1), Ok(1));
        assert_eq!(graph.tier_weight(&set, 2), Ok(7));
        assert_eq!(graph.tier_weight(&set, 3), Ok(0));
    }

    #[test]
    fn test_set_weights_are_checked() {
        let graph = SkillGraph {
            nodes: vec![
                Node {
                    name: "R".into(),
                    weight: u64::MAX,
                    tier: 1,
                    children: vec![1],
                },
                Node {
                    name: "A".into(),
                    weight: 1,
                    tier: 1,
                    children: vec![],
                },
            ],
            parents: vec![vec![], vec![0]],
            index: HashMap::new(),
            root: 0,
        };
        assert_eq!(
            graph.total_weight(&graph.all_nodes()),
            Err(SearchError::WeightOverflow)
        );
        assert_eq!(
            graph.tier_weight(&graph.all_nodes(), 1),
            Err(SearchError::WeightOverflow)
        );
    }

    #[test]
    fn test_explicit_root() {
        let graph = SkillGraph::builder()
            .leaf("leaf", 1, 1)
            .node("top", 1, 1, ["leaf"])
            .root("top")
            .build()
            .unwrap();
        assert_eq!(graph.name(graph.root()), Ok("top"));
    }

    #[test]
    fn test_rejects_empty() {
        assert_eq!(SkillGraph::builder().build().unwrap_err(), GraphError::Empty);
    }

    #[test]
    fn test_rejects_too_many_nodes() {
        let mut builder = SkillGraph::builder();
        for i in 0..=MAX_NODES {
            builder.add_node(format!("n{}", i), 1, 1, Vec::<String>::new());
        }
        assert_eq!(
            builder.build().unwrap_err(),
            GraphError::TooManyNodes {
                count: MAX_NODES + 1,
                max: MAX_NODES
            }
        );
    }

    #[test]
    fn test_rejects_bad_declarations() {
        let duplicate = SkillGraph::builder().leaf("A", 1, 1).leaf("A", 1, 1).build();
        assert_eq!(duplicate.unwrap_err(), GraphError::DuplicateNode("A".into()));

        let zero = SkillGraph::builder().leaf("A", 0, 1).build();
        assert_eq!(zero.unwrap_err(), GraphError::ZeroWeight("A".into()));

        let heavy = SkillGraph::builder()
            .node("R", 1, 1, ["X", "Y"])
            .node("X", u64::MAX, 1, ["Z"])
            .leaf("Y", 1, 1)
            .leaf("Z", 1, 1)
            .build();
        assert_eq!(
            heavy.unwrap_err(),
            GraphError::TotalWeightTooLarge {
                max: MAX_TOTAL_WEIGHT
            }
        );

        let at_limit = SkillGraph::builder()
            .node("R", 1, 1, ["X"])
            .leaf("X", MAX_TOTAL_WEIGHT - 1, 1)
            .build()
            .unwrap();
        assert_eq!(at_limit.total_weight(&at_limit.all_nodes()), Ok(MAX_TOTAL_WEIGHT));

        let tier = SkillGraph::builder().leaf("A", 1, 0).build();
        assert_eq!(tier.unwrap_err(), GraphError::InvalidTier("A".into()));

        let child = SkillGraph::builder().node("A", 1, 1, ["B"]).build();
        assert_eq!(
            child.unwrap_err(),
            GraphError::UnknownChild {
                parent: "A".into(),
                child: "B".into()
            }
        );
    }

    #[test]
    fn test_rejects_cycles() {
        let cycle = SkillGraph::builder()
            .node("R", 1, 1, ["A"])
            .node("A", 1, 1, ["B"])
            .node("B", 1, 1, ["A"])
            .build();
        assert_eq!(cycle.unwrap_err(), GraphError::Cycle("A".into()));

        let self_loop = SkillGraph::builder().node("R", 1, 1, ["R"]).build();
        assert_eq!(self_loop.unwrap_err(), GraphError::Cycle("R".into()));
    }

    #[test]
    fn test_root_validation() {
        let two_sources = SkillGraph::builder().leaf("A", 1, 1).leaf("B", 1, 1).build();
        assert_eq!(
            two_sources.unwrap_err(),
            GraphError::AmbiguousRoot(vec!["A".into(), "B".into()])
        );

        let unknown = SkillGraph::builder().leaf("A", 1, 1).root("Z").build();
        assert_eq!(unknown.unwrap_err(), GraphError::UnknownRoot("Z".into()));

        let has_parents = SkillGraph::builder()
            .node("A", 1, 1, ["B"])
            .leaf("B", 1, 1)
            .root("B")
            .build();
        assert_eq!(has_parents.unwrap_err(), GraphError::RootHasParents("B".into()));
    }

    #[test]
    fn test_rejects_unreachable() {
        let graph = SkillGraph::builder()
            .node("R", 1, 1, ["A"])
            .leaf("A", 1, 1)
            .node("X", 1, 1, ["A"])
            .root("R")
            .build();
        assert_eq!(graph.unwrap_err(), GraphError::Unreachable("X".into()));
    }
}
