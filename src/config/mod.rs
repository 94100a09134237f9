// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Tree definition files.
//!
//! A tree is described in TOML (or JSON with the same shape):
//!
//! ```toml
//! root = "A1"        # optional, inferred when omitted
//! target = 43        # optional default target
//!
//! [gates]
//! 2 = 8
//! 3 = 20
//!
//! [nodes.A1]
//! weight = 1         # alias: points
//! tier = 1           # alias: section
//! children = ["B1", "B2", "B3"]
//! ```
//!
//! Nodes get their ids in declaration order.

use crate::error::ConfigError;
use crate::graph::{GateTable, SkillGraph};
use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// The tree bundled with the crate.
const SAMPLE_TREE: &str = include_str!("../../trees/sample.toml");

/// One node as written in a tree file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NodeConfig {
    #[serde(default = "default_weight", alias = "points")]
    pub weight: u64,

    #[serde(default = "default_tier", alias = "section")]
    pub tier: u32,

    #[serde(default)]
    pub children: Vec<String>,
}

fn default_weight() -> u64 {
    1
}

fn default_tier() -> u32 {
    1
}

/// A whole tree file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TreeConfig {
    #[serde(default)]
    pub root: Option<String>,

    #[serde(default)]
    pub target: Option<i64>,

    /// Tier number (as text) to threshold.
    #[serde(default)]
    pub gates: BTreeMap<String, u64>,

    pub nodes: IndexMap<String, NodeConfig>,
}

/// A validated graph and gate table, ready to search.
#[derive(Debug, Clone)]
pub struct SkillTree {
    pub graph: SkillGraph,
    pub gates: GateTable,
    pub default_target: Option<i64>,
}

impl TreeConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load a tree file; `.json` files are JSON, anything else TOML.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Loading tree definition from {}", path.display());
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&text)
        } else {
            Self::from_toml_str(&text)
        }
    }

    /// The bundled three-tier sample tree.
    pub fn sample() -> Result<Self, ConfigError> {
        Self::from_toml_str(SAMPLE_TREE)
    }

    pub fn graph(&self) -> Result<SkillGraph, ConfigError> {
        let mut builder = SkillGraph::builder();
        for (name, node) in &self.nodes {
            builder.add_node(name.as_str(), node.weight, node.tier, node.children.iter().cloned());
        }
        if let Some(root) = &self.root {
            builder.set_root(root.as_str());
        }
        Ok(builder.build()?)
    }

    pub fn gate_table(&self) -> Result<GateTable, ConfigError> {
        let mut gates = GateTable::empty();
        for (key, &threshold) in &self.gates {
            let tier: u32 = key
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidGateKey(key.clone()))?;
            gates.insert(tier, threshold)?;
        }
        Ok(gates)
    }

    /// Validate the file into a searchable tree.
    pub fn build(&self) -> Result<SkillTree, ConfigError> {
        Ok(SkillTree {
            graph: self.graph()?,
            gates: self.gate_table()?,
            default_target: self.target,
        })
    }
}
