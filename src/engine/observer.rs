// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Progress observer hooks.
//!
//! The engine reports to an observer as it records combinations and walks
//! frontiers. Observers only watch: the result never depends on them.

/// Receives progress updates from [`crate::engine::SearchEngine`].
///
/// Every method has an empty default, so an observer only implements the
/// updates it cares about.
pub trait ProgressObserver {
    /// The set of distinct combinations grew to `count`.
    fn combinations_found(&mut self, _count: usize) {}

    /// Candidate `explored` of `total` is about to be tried from the frontier
    /// of the node called `label`, which sits at stack `depth` (root = 0).
    fn frontier_explored(&mut self, _depth: usize, _label: &str, _explored: usize, _total: usize) {}

    /// The search finished with `count` combinations.
    fn search_finished(&mut self, _count: usize) {}
}

/// Observer that ignores every update.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl ProgressObserver for NoopObserver {}

impl<T: ProgressObserver + ?Sized> ProgressObserver for &mut T {
    fn combinations_found(&mut self, count: usize) {
        (**self).combinations_found(count)
    }

    fn frontier_explored(&mut self, depth: usize, label: &str, explored: usize, total: usize) {
        (**self).frontier_explored(depth, label, explored, total)
    }

    fn search_finished(&mut self, count: usize) {
        (**self).search_finished(count)
    }
}
