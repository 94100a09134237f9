// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Terminal progress display for long searches.
//!
//! A spinner counts the distinct combinations found so far, and one bar per
//! shallow stack level shows how far through its frontier the search is.

use crate::engine::ProgressObserver;
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

/// Number of stack levels that get their own bar by default.
pub const DEFAULT_BAR_DEPTH: usize = 2;

const FOUND_TEMPLATE: &str = "{spinner:.green} Total combinations found: {pos}";
const LEVEL_TEMPLATE: &str = "{msg:30} [{bar:40.cyan/blue}] {pos}/{len}";

/// [`ProgressObserver`] drawing indicatif bars on stderr.
pub struct ConsoleProgress {
    multi: MultiProgress,
    found: ProgressBar,
    levels: Vec<ProgressBar>,
    bar_depth: usize,
}

impl ConsoleProgress {
    /// Visible progress with bars for the first `bar_depth` stack levels.
    pub fn new(bar_depth: usize) -> Self {
        let progress = Self::with_target(ProgressDrawTarget::stderr(), bar_depth);
        progress.found.enable_steady_tick(Duration::from_millis(100));
        progress
    }

    /// Progress that tracks counts but draws nothing, with no ticker thread.
    pub fn hidden() -> Self {
        Self::with_target(ProgressDrawTarget::hidden(), DEFAULT_BAR_DEPTH)
    }

    fn with_target(target: ProgressDrawTarget, bar_depth: usize) -> Self {
        let multi = MultiProgress::with_draw_target(target);
        let found = multi.add(ProgressBar::new_spinner());
        found.set_style(
            ProgressStyle::with_template(FOUND_TEMPLATE)
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        Self {
            multi,
            found,
            levels: Vec::with_capacity(bar_depth),
            bar_depth,
        }
    }

    /// Combinations counted so far.
    pub fn found(&self) -> u64 {
        self.found.position()
    }

    fn level(&mut self, depth: usize) -> &ProgressBar {
        while self.levels.len() <= depth {
            let bar = self.multi.add(ProgressBar::new(0));
            bar.set_style(
                ProgressStyle::with_template(LEVEL_TEMPLATE)
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("#>-"),
            );
            self.levels.push(bar);
        }
        &self.levels[depth]
    }
}

impl ProgressObserver for ConsoleProgress {
    fn combinations_found(&mut self, count: usize) {
        self.found.set_position(count as u64);
    }

    fn frontier_explored(&mut self, depth: usize, label: &str, explored: usize, total: usize) {
        if depth >= self.bar_depth {
            return;
        }
        let bar = self.level(depth);
        if explored == 1 || bar.length() != Some(total as u64) {
            bar.set_length(total as u64);
            bar.set_message(format!("Exploring nodes from {label}"));
        }
        bar.set_position(explored as u64);
    }

    fn search_finished(&mut self, count: usize) {
        for bar in self.levels.drain(..) {
            bar.finish_and_clear();
        }
        self.found.set_position(count as u64);
        self.found.finish();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_progress_tracks_counts() {
        let mut progress = ConsoleProgress::hidden();
        assert!(progress.found.is_hidden());
        progress.combinations_found(3);
        assert_eq!(progress.found(), 3);

        progress.frontier_explored(0, "A1", 1, 3);
        progress.frontier_explored(1, "B1", 2, 4);
        progress.frontier_explored(5, "C1", 1, 1);
        assert_eq!(progress.levels.len(), 2);
        assert_eq!(progress.levels[1].position(), 2);
        assert_eq!(progress.levels[1].length(), Some(4));

        progress.search_finished(7);
        assert_eq!(progress.found(), 7);
        assert!(progress.levels.is_empty());
    }
}
