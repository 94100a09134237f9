// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Error types for graph construction, tree files and the search itself.
//!
//! Every error is fatal to the operation that raised it: the search is an
//! offline, deterministic computation, so a failed enumeration yields no
//! combinations at all rather than a partial set.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while a search is running (or while querying the graph).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The graph was queried with an id or name outside its node set.
    #[error("Unknown node {0}")]
    UnknownNode(String),

    /// A node's tier has no gate entry and is not tier 1.
    #[error("Tier {tier} of node {node} has no gate threshold configured")]
    UnconfiguredTier { tier: u32, node: String },

    /// A weight sum does not fit in a u64.
    #[error("Weight sum overflows")]
    WeightOverflow,

    /// Targets must be non-negative.
    #[error("Invalid target {target}: the target must not be negative")]
    InvalidTarget { target: i64 },
}

/// Structural problems detected while building a [`crate::graph::SkillGraph`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("The graph has no nodes")]
    Empty,

    #[error("The graph has {count} nodes, at most {max} are supported")]
    TooManyNodes { count: usize, max: usize },

    #[error("Node {0} is declared more than once")]
    DuplicateNode(String),

    #[error("Node {0} has weight 0, weights must be positive")]
    ZeroWeight(String),

    #[error("The weights sum to more than {max}")]
    TotalWeightTooLarge { max: u64 },

    #[error("Node {0} has tier 0, tiers start at 1")]
    InvalidTier(String),

    #[error("Node {parent} lists unknown child {child}")]
    UnknownChild { parent: String, child: String },

    #[error("Prerequisite cycle through node {0}")]
    Cycle(String),

    #[error("Root {0} is not a node of the graph")]
    UnknownRoot(String),

    #[error("Root {0} has incoming edges")]
    RootHasParents(String),

    #[error("Cannot infer the root, candidates are: {}", .0.join(", "))]
    AmbiguousRoot(Vec<String>),

    #[error("Node {0} is not reachable from the root")]
    Unreachable(String),

    #[error("Gate entries are only allowed for tiers 2 and above, got tier {0}")]
    InvalidGateTier(u32),
}

/// Errors raised while loading a tree file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read tree file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid TOML tree definition")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid JSON tree definition")]
    Json(#[from] serde_json::Error),

    #[error("Gate key \"{0}\" is not a tier number")]
    InvalidGateKey(String),

    #[error(transparent)]
    Graph(#[from] GraphError),
}
