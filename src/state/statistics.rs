// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Statistics
//!
//! Statistics are stored in the context and incremented by the engine as it
//! activates nodes, records matches and expands frontiers. They are pure
//! instrumentation: nothing in the search reads them back.

use std::fmt;
use strum::{EnumCount, IntoEnumIterator};
use strum_macros::{AsRefStr, EnumCount as EnumCountMacro, EnumIter};

#[derive(EnumCountMacro, EnumIter, AsRefStr, Debug, Copy, Clone, PartialEq, Eq)]
#[strum(serialize_all = "snake_case")]
#[repr(u8)]
pub enum Counters {
    /// Nodes added to the activation state.
    Activations,
    /// Activations that landed exactly on the target.
    ExactMatches,
    /// Exact matches whose member set had already been recorded.
    DuplicateMatches,
    /// Activations that went past the target.
    Overshoots,
    /// Activations below target whose frontier had candidates.
    FrontierExpansions,
    /// Activations below target with an empty frontier.
    DeadEnds,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Statistics {
    stats: [u64; Counters::COUNT],
    max_depth: usize,
}

impl Statistics {
    pub fn new() -> Self {
        Statistics::default()
    }

    /// Increment the specified counter by 1.
    pub(crate) fn increment_counter(&mut self, counter: Counters) {
        self.stats[counter as usize] += 1;
    }

    /// Note the depth of the explicit search stack.
    pub(crate) fn record_depth(&mut self, depth: usize) {
        self.max_depth = self.max_depth.max(depth);
    }

    /// Get the current value of the specified counter.
    pub fn get(&self, counter: Counters) -> u64 {
        self.stats[counter as usize]
    }

    /// Deepest stack reached.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}

impl fmt::Display for Statistics {
    /// Format as "activations=12 exact_matches=3 ... max_depth=4".
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for counter in Counters::iter() {
            write!(f, "{}={} ", counter.as_ref(), self.get(counter))?;
        }
        write!(f, "max_depth={}", self.max_depth)
    }
}
