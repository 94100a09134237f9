// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Text and JSON output for combinations.

use crate::engine::Combination;
use crate::error::SearchError;
use crate::graph::{NodeSet, SkillGraph};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

/// Member names of `set`, sorted.
pub fn member_names(graph: &SkillGraph, set: &NodeSet) -> Result<Vec<String>, SearchError> {
    let mut names = set
        .iter()
        .map(|id| graph.name(id).map(str::to_owned))
        .collect::<Result<Vec<_>, _>>()?;
    names.sort();
    Ok(names)
}

/// Weight held in each tier that has any.
pub fn tier_breakdown(graph: &SkillGraph, set: &NodeSet) -> Result<BTreeMap<u32, u64>, SearchError> {
    let mut tiers = BTreeMap::new();
    for id in set.iter() {
        let node = graph.node(id)?;
        *tiers.entry(node.tier()).or_insert(0) += node.weight();
    }
    Ok(tiers)
}

/// One line per combination, e.g. `A1, B2 (tier 1: 2)`.
pub fn combination_line(graph: &SkillGraph, combination: &Combination) -> Result<String, SearchError> {
    let names = member_names(graph, combination.members())?;
    let tiers = tier_breakdown(graph, combination.members())?
        .into_iter()
        .map(|(tier, weight)| format!("tier {tier}: {weight}"))
        .collect::<Vec<_>>();
    Ok(format!("{} ({})", names.join(", "), tiers.join(", ")))
}

/// Sorted member names of every combination, rows in lexicographic order.
pub fn sorted_rows(
    graph: &SkillGraph,
    combinations: &HashSet<Combination>,
) -> Result<Vec<Vec<String>>, SearchError> {
    let mut rows = combinations
        .iter()
        .map(|combination| member_names(graph, combination.members()))
        .collect::<Result<Vec<_>, _>>()?;
    rows.sort();
    Ok(rows)
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    target: i64,
    count: usize,
    combinations: &'a [Vec<String>],
}

/// JSON document with the target, the full `count` and the rows shown.
pub fn to_json(target: i64, count: usize, rows: &[Vec<String>]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonReport {
        target,
        count,
        combinations: rows,
    })
}

/// Output of one enumeration: every combination sorted by member names,
/// with at most `limit` of them kept for printing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    target: i64,
    count: usize,
    rows: Vec<Vec<String>>,
    lines: Vec<String>,
}

impl Report {
    pub fn new(
        graph: &SkillGraph,
        combinations: &HashSet<Combination>,
        target: i64,
        limit: Option<usize>,
    ) -> Result<Self, SearchError> {
        let mut named = combinations
            .iter()
            .map(|combination| -> Result<_, SearchError> {
                Ok((member_names(graph, combination.members())?, combination))
            })
            .collect::<Result<Vec<_>, _>>()?;
        named.sort_by(|a, b| a.0.cmp(&b.0));

        let count = named.len();
        let shown = limit.map_or(count, |limit| limit.min(count));
        let mut rows = Vec::with_capacity(shown);
        let mut lines = Vec::with_capacity(shown);
        for (names, combination) in named.into_iter().take(shown) {
            lines.push(combination_line(graph, combination)?);
            rows.push(names);
        }
        Ok(Self {
            target,
            count,
            rows,
            lines,
        })
    }

    /// Number of combinations found, shown or not.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Member names of the combinations kept for printing.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Text output: a header, one line per kept combination, and a note of
    /// how many were left out.
    pub fn text_lines(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(self.lines.len() + 2);
        out.push(format!(
            "Found {} valid combinations for {} points:",
            self.count, self.target
        ));
        out.extend(self.lines.iter().cloned());
        if self.rows.len() < self.count {
            out.push(format!("... {} more", self.count - self.rows.len()));
        }
        out
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        to_json(self.target, self.count, &self.rows)
    }
}
