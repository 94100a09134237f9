// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Exhaustive enumeration of skill tree point allocations.
//!
//! Given a prerequisite graph of skills, each with a point cost and a tier,
//! and a table of tier gates, the search finds every set of skills a player
//! could hold after spending exactly a target number of points.
//!
//! # Architecture
//!
//! The implementation uses a two-tier memory model:
//!
//! ## Tier 1: MEMO Data (Immutable)
//!
//! Built and validated once, then only read:
//! - [`graph::SkillGraph`] - nodes, weights, tiers, prerequisite edges
//! - [`graph::GateTable`] - the cumulative weight needed to open each tier
//!
//! ## Tier 2: DYNAMIC Data (Mutable)
//!
//! Search state that changes during search, tracked on the trail:
//! - [`trail::Trail`] - records activations for O(1) backtracking
//! - [`state::ActivationState`] - activated nodes and their total weight
//!
//! # Search Algorithm
//!
//! The search starts by activating the root. After each activation:
//!
//! 1. **Exact**: the weight equals the target, record the state and undo
//! 2. **Overshoot**: the weight exceeds the target, undo
//! 3. **Expand**: compute the frontier (inactive children of active nodes
//!    whose tier is open at the current total weight) and try each candidate
//!
//! Results are deduplicated by member set, since the same set is usually
//! reachable through many activation orders.
//!
//! # Example
//!
//! ```
//! use skill_search::config::TreeConfig;
//! use skill_search::engine::enumerate;
//!
//! let tree = TreeConfig::sample().unwrap().build().unwrap();
//! let combinations = enumerate(&tree.graph, &tree.gates, 3).unwrap();
//! assert_eq!(combinations.len(), 6);
//! ```

pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod graph;
pub mod progress;
pub mod render;
pub mod state;
pub mod trail;

// Re-export commonly used types
pub use config::{SkillTree, TreeConfig};
pub use context::SearchContext;
pub use engine::{enumerate, Combination, ProgressObserver, SearchEngine};
pub use error::{ConfigError, GraphError, SearchError};
pub use graph::{GateTable, NodeId, NodeSet, SkillGraph};
pub use trail::Trail;
