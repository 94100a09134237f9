// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Backtracking search engine.
//!
//! This module enumerates every connected, gate-respecting set of nodes whose
//! weights sum exactly to a target. The engine coordinates with the trail
//! system to restore the activation state on backtracking.
//!
//! # Architecture
//!
//! The search is a depth-first walk over activation states. Rather than
//! recursing, the engine keeps an explicit stack. Each stack entry tracks:
//! - Which node was activated to create the entry
//! - The frontier candidates computed right after that activation
//! - The next candidate to try
//! - The trail checkpoint taken before the activation
//!
//! Visiting a node works as follows:
//! 1. Activate the node (trail-tracked)
//! 2. If the weight equals the target: record the state, undo, done
//! 3. If the weight exceeds the target: undo, done
//! 4. Otherwise compute the frontier and push an entry for it
//!
//! The main loop takes the top entry's next candidate and visits it. Once an
//! entry has no candidates left it is popped and the trail is rewound to its
//! checkpoint, which undoes the activation that created it.
//!
//! Every activation adds a positive weight, so a path never repeats a node
//! and the stack depth is bounded by the node count.
//!
//! # Example
//!
//! ```
//! use skill_search::engine::SearchEngine;
//! use skill_search::graph::{GateTable, SkillGraph};
//!
//! let graph = SkillGraph::builder()
//!     .node("R", 1, 1, ["A", "B", "C"])
//!     .leaf("A", 1, 1)
//!     .leaf("B", 1, 1)
//!     .leaf("C", 1, 1)
//!     .build()
//!     .unwrap();
//! let gates = GateTable::empty();
//!
//! let mut engine = SearchEngine::new(&graph, &gates);
//! let combinations = engine.enumerate(2).unwrap();
//! assert_eq!(combinations.len(), 3);
//! ```

pub mod collector;
pub mod frontier;
pub mod observer;

pub use collector::{Combination, ResultCollector};
pub use observer::{NoopObserver, ProgressObserver};

use crate::context::SearchContext;
use crate::error::SearchError;
use crate::graph::{GateTable, NodeId, NodeSet, SkillGraph};
use crate::state::{Counters, Statistics};
use log::{debug, info};
use std::collections::HashSet;

/// Stack entry tracking the frontier of one activated node.
#[derive(Debug)]
struct StackEntry {
    /// The node whose activation produced this frontier.
    node: NodeId,

    /// Frontier candidates, ascending by id.
    candidates: Vec<NodeId>,

    /// Index of the next candidate to try.
    next: usize,

    /// Trail checkpoint taken before `node` was activated.
    trail_checkpoint: usize,
}

/// Enumerate every combination of weight `target` with no progress reporting.
pub fn enumerate(
    graph: &SkillGraph,
    gates: &GateTable,
    target: i64,
) -> Result<HashSet<Combination>, SearchError> {
    SearchEngine::new(graph, gates).enumerate(target)
}

/// Search engine over one skill tree.
///
/// The engine borrows the tree; each call to [`SearchEngine::enumerate`]
/// starts from an empty activation state.
pub struct SearchEngine<'a, O = NoopObserver> {
    graph: &'a SkillGraph,
    gates: &'a GateTable,
    observer: O,
    statistics: Statistics,
}

impl<'a> SearchEngine<'a, NoopObserver> {
    pub fn new(graph: &'a SkillGraph, gates: &'a GateTable) -> Self {
        Self {
            graph,
            gates,
            observer: NoopObserver,
            statistics: Statistics::new(),
        }
    }
}

impl<'a, O: ProgressObserver> SearchEngine<'a, O> {
    /// Replace the observer.
    pub fn with_observer<P: ProgressObserver>(self, observer: P) -> SearchEngine<'a, P> {
        SearchEngine {
            graph: self.graph,
            gates: self.gates,
            observer,
            statistics: self.statistics,
        }
    }

    /// Statistics of the most recent search.
    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn into_observer(self) -> O {
        self.observer
    }

    /// Find every set of nodes whose weights sum to exactly `target`.
    ///
    /// Each set contains the root, every other member has an active parent,
    /// and there is an activation order in which each gated node's tier was
    /// open when it was added.
    ///
    /// # Errors
    ///
    /// - [`SearchError::InvalidTarget`] if `target` is negative.
    /// - [`SearchError::UnconfiguredTier`] if a reachable node's tier has no gate.
    ///
    /// Errors abort the search; no partial result is returned.
    pub fn enumerate(&mut self, target: i64) -> Result<HashSet<Combination>, SearchError> {
        let target = u64::try_from(target).map_err(|_| SearchError::InvalidTarget { target })?;
        let root = self.graph.root();
        let mut ctx = SearchContext::new(self.graph, self.gates);
        let mut collector = ResultCollector::new();

        info!(
            "Enumerating combinations of weight {} over {} nodes",
            target,
            self.graph.len()
        );

        if target == 0 {
            // The empty state never counts as a combination.
        } else if target == self.graph.weight(root)? {
            let mut members = NodeSet::empty();
            members.insert(root);
            ctx.statistics.increment_counter(Counters::ExactMatches);
            if let Some(count) = collector.record(members) {
                self.observer.combinations_found(count);
            }
        } else {
            self.run(&mut ctx, &mut collector, root, target)?;
        }

        debug_assert!(ctx.trail.is_empty(), "trail not unwound after search");
        self.statistics = ctx.statistics;
        info!(
            "Found {} combinations ({} discoveries): {}",
            collector.len(),
            collector.discoveries(),
            self.statistics
        );
        self.observer.search_finished(collector.len());
        Ok(collector.into_combinations())
    }

    /// Main loop: visit the root, then drain the stack.
    fn run(
        &mut self,
        ctx: &mut SearchContext<'a>,
        collector: &mut ResultCollector,
        root: NodeId,
        target: u64,
    ) -> Result<(), SearchError> {
        let graph = self.graph;
        let mut stack: Vec<StackEntry> = Vec::with_capacity(graph.len());

        self.visit(ctx, collector, &mut stack, root, target)?;

        loop {
            let depth = stack.len();
            let Some(entry) = stack.last_mut() else {
                return Ok(()); // Search exhausted
            };

            if let Some(&candidate) = entry.candidates.get(entry.next) {
                entry.next += 1;
                let (node, explored, total) = (entry.node, entry.next, entry.candidates.len());
                self.observer
                    .frontier_explored(depth - 1, graph.name(node)?, explored, total);
                self.visit(ctx, collector, &mut stack, candidate, target)?;
            } else {
                // Frontier exhausted: undo the activation that created it
                let checkpoint = entry.trail_checkpoint;
                stack.pop();
                ctx.rewind_to(checkpoint);
            }
        }
    }

    /// Activate `node` and either record, prune, or push its frontier.
    ///
    /// Every path that does not push an entry rewinds before returning, so
    /// the state seen by the next sibling is unchanged.
    fn visit(
        &mut self,
        ctx: &mut SearchContext<'a>,
        collector: &mut ResultCollector,
        stack: &mut Vec<StackEntry>,
        node: NodeId,
        target: u64,
    ) -> Result<(), SearchError> {
        let checkpoint = ctx.checkpoint();
        let weight = ctx.activate(node)?;

        if weight == target {
            ctx.statistics.increment_counter(Counters::ExactMatches);
            match collector.record(*ctx.state().members()) {
                Some(count) => self.observer.combinations_found(count),
                None => ctx.statistics.increment_counter(Counters::DuplicateMatches),
            }
            ctx.rewind_to(checkpoint);
        } else if weight > target {
            ctx.statistics.increment_counter(Counters::Overshoots);
            ctx.rewind_to(checkpoint);
        } else {
            let available = ctx.frontier()?;
            if available.is_empty() {
                ctx.statistics.increment_counter(Counters::DeadEnds);
                ctx.rewind_to(checkpoint);
            } else {
                ctx.statistics.increment_counter(Counters::FrontierExpansions);
                stack.push(StackEntry {
                    node,
                    candidates: available.iter().collect(),
                    next: 0,
                    trail_checkpoint: checkpoint,
                });
                ctx.statistics.record_depth(stack.len());
                if stack.len() == 1 {
                    debug!("Root frontier has {} candidates", available.len());
                }
            }
        }
        Ok(())
    }
}
