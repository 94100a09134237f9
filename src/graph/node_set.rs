// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! NodeSet type for representing sets of skill tree nodes as bitsets.
//!
//! A NodeSet is a compact representation of a set of node IDs using a bitset,
//! where bit i represents the presence of node i. Node IDs are assigned densely
//! when a graph is built, so the set doubles as the deduplication key for
//! combinations: two activation states with the same members have equal bits.
//!
//! # Examples
//!
//! ```
//! use skill_search::graph::NodeSet;
//!
//! let mut set = NodeSet::empty();
//! set.insert(0);
//! set.insert(5);
//!
//! assert_eq!(set.len(), 2);
//! assert!(set.contains(0));
//! assert!(set.contains(5));
//! assert!(!set.contains(3));
//! assert_eq!(format!("{}", set), "{0, 5}");
//! ```

use super::NodeId;
use std::fmt;

/// Number of u64 words in a NodeSet.
pub const NODESET_LENGTH: usize = 4;

/// Largest number of nodes a graph may hold (one bit per node).
pub const MAX_NODES: usize = NODESET_LENGTH * 64;

/// A set of nodes represented as a bitset.
///
/// Uses an array of u64 words to represent up to MAX_NODES node IDs.
/// Bit i (across all words) is set if node i is in the set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct NodeSet([u64; NODESET_LENGTH]);

impl NodeSet {
    /// Create an empty node set.
    pub const fn empty() -> Self {
        Self([0; NODESET_LENGTH])
    }

    /// Create a node set containing nodes `0..count`.
    ///
    /// # Panics
    ///
    /// Panics if `count > MAX_NODES`.
    pub fn first(count: usize) -> Self {
        assert!(count <= MAX_NODES, "Node count out of range: {} > {}", count, MAX_NODES);
        let mut words = [0u64; NODESET_LENGTH];

        let complete_words = count / 64;
        for word in words.iter_mut().take(complete_words) {
            *word = u64::MAX;
        }

        let remaining_bits = count % 64;
        if remaining_bits > 0 {
            words[complete_words] = (1u64 << remaining_bits) - 1;
        }

        Self(words)
    }

    /// Check if the set contains a specific node.
    ///
    /// # Panics
    ///
    /// Panics if `id >= MAX_NODES`.
    pub fn contains(&self, id: NodeId) -> bool {
        let (word_idx, bit_idx) = Self::locate(id);
        (self.0[word_idx] >> bit_idx) & 1 != 0
    }

    /// Insert a node into the set.
    ///
    /// Returns true if the node was not already present.
    pub fn insert(&mut self, id: NodeId) -> bool {
        let (word_idx, bit_idx) = Self::locate(id);
        let mask = 1u64 << bit_idx;
        let absent = self.0[word_idx] & mask == 0;
        self.0[word_idx] |= mask;
        absent
    }

    /// Remove a node from the set.
    ///
    /// Returns true if the node was present.
    pub fn remove(&mut self, id: NodeId) -> bool {
        let (word_idx, bit_idx) = Self::locate(id);
        let mask = 1u64 << bit_idx;
        let present = self.0[word_idx] & mask != 0;
        self.0[word_idx] &= !mask;
        present
    }

    fn locate(id: NodeId) -> (usize, u32) {
        assert!(
            (id as usize) < MAX_NODES,
            "NodeId out of range: {} >= {}",
            id,
            MAX_NODES
        );
        (id as usize / 64, id as u32 % 64)
    }

    /// Get the number of nodes in the set (population count).
    pub fn len(&self) -> usize {
        self.0.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|&w| w == 0)
    }

    /// Get a reference to the underlying bitset words.
    pub fn words(&self) -> &[u64; NODESET_LENGTH] {
        &self.0
    }

    /// Iterate over all node IDs in the set.
    ///
    /// Node IDs are yielded in ascending order (0, 1, 2, ...).
    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        NodeSetIter {
            words: &self.0,
            word_idx: 0,
            current: self.0[0],
        }
    }

    /// Compute the union of two node sets.
    pub fn union(&self, other: &Self) -> Self {
        let mut result = [0u64; NODESET_LENGTH];
        for (i, word) in result.iter_mut().enumerate() {
            *word = self.0[i] | other.0[i];
        }
        Self(result)
    }

    /// Compute the intersection of two node sets.
    pub fn intersection(&self, other: &Self) -> Self {
        let mut result = [0u64; NODESET_LENGTH];
        for (i, word) in result.iter_mut().enumerate() {
            *word = self.0[i] & other.0[i];
        }
        Self(result)
    }

    /// Compute the difference of two node sets (self - other).
    pub fn difference(&self, other: &Self) -> Self {
        let mut result = [0u64; NODESET_LENGTH];
        for (i, word) in result.iter_mut().enumerate() {
            *word = self.0[i] & !other.0[i];
        }
        Self(result)
    }

    /// Check whether every member of `self` is also in `other`.
    pub fn is_subset(&self, other: &Self) -> bool {
        self.difference(other).is_empty()
    }
}

/// Iterator over node IDs in a NodeSet.
///
/// Clears the lowest set bit of a copy of the current word at each step.
struct NodeSetIter<'a> {
    words: &'a [u64; NODESET_LENGTH],
    word_idx: usize,
    current: u64,
}

impl<'a> Iterator for NodeSetIter<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.current != 0 {
                let bit = self.current.trailing_zeros();
                self.current &= self.current - 1;
                return Some((self.word_idx * 64 + bit as usize) as NodeId);
            }
            self.word_idx += 1;
            if self.word_idx >= NODESET_LENGTH {
                return None;
            }
            self.current = self.words[self.word_idx];
        }
    }
}

impl fmt::Display for NodeSet {
    /// Format a node set as "{0, 5, 12, ...}".
    ///
    /// This shows node IDs; use the graph to render names.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        let mut first = true;
        for id in self.iter() {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{}", id)?;
            first = false;
        }
        write!(f, "}}")
    }
}

impl From<&[NodeId]> for NodeSet {
    fn from(ids: &[NodeId]) -> Self {
        ids.iter().copied().collect()
    }
}

impl FromIterator<NodeId> for NodeSet {
    fn from_iter<I: IntoIterator<Item = NodeId>>(iter: I) -> Self {
        let mut set = Self::empty();
        for id in iter {
            set.insert(id);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        let set = NodeSet::empty();
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
        assert_eq!(set.iter().count(), 0);
    }

    #[test]
    fn test_first() {
        let set = NodeSet::first(70);
        assert_eq!(set.len(), 70);
        assert!(set.contains(0));
        assert!(set.contains(63));
        assert!(set.contains(69));
        assert!(!set.contains(70));

        assert_eq!(NodeSet::first(MAX_NODES).len(), MAX_NODES);
        assert!(NodeSet::first(0).is_empty());
    }

    #[test]
    fn test_insert_remove() {
        let mut set = NodeSet::empty();
        assert!(set.insert(3));
        assert!(!set.insert(3)); // already present
        assert!(set.insert(200));
        assert_eq!(set.len(), 2);

        assert!(set.remove(3));
        assert!(!set.remove(3)); // idempotent
        assert!(!set.contains(3));
        assert!(set.contains(200));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_iter_ascending_across_words() {
        let set: NodeSet = [130u16, 2, 64, 63, 255].into_iter().collect();
        let ids: Vec<NodeId> = set.iter().collect();
        assert_eq!(ids, vec![2, 63, 64, 130, 255]);
    }

    #[test]
    fn test_set_operations() {
        let a = NodeSet::from(&[1u16, 2, 3][..]);
        let b = NodeSet::from(&[3u16, 4][..]);

        assert_eq!(a.union(&b).iter().collect::<Vec<_>>(), vec![1, 2, 3, 4]);
        assert_eq!(a.intersection(&b).iter().collect::<Vec<_>>(), vec![3]);
        assert_eq!(a.difference(&b).iter().collect::<Vec<_>>(), vec![1, 2]);
        assert!(NodeSet::from(&[1u16, 3][..]).is_subset(&a));
        assert!(!b.is_subset(&a));
    }

    #[test]
    fn test_equal_members_hash_equal() {
        use std::collections::HashSet;

        let mut seen = HashSet::new();
        seen.insert(NodeSet::from(&[0u16, 4, 9][..]));
        // Same members inserted in a different order.
        assert!(!seen.insert(NodeSet::from(&[9u16, 0, 4][..])));
        assert_eq!(seen.len(), 1);
    }

    #[test]
    fn test_display() {
        let set = NodeSet::from(&[0u16, 5, 12][..]);
        assert_eq!(format!("{}", set), "{0, 5, 12}");
        assert_eq!(format!("{}", NodeSet::empty()), "{}");
    }

    #[test]
    #[should_panic(expected = "NodeId out of range")]
    fn test_out_of_range() {
        let set = NodeSet::empty();
        set.contains(MAX_NODES as NodeId);
    }
}
