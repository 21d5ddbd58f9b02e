//! Sliding-window request rate tracking.
//!
//! This module keeps a pruned, ordered timestamp history per request source
//! and answers how many requests a source has made within the last window.
//! It is a pure data structure: thresholds and scoring live in the signal
//! checks, not here.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// Per-source sliding-window request counter.
///
/// Histories are kept behind a single mutex, so concurrent calls for the
/// same source are linearized: each call observes a consistent prior state
/// and appends exactly once.
pub struct RateTracker {
    /// Window length in seconds
    window_seconds: f64,
    /// Per-source timestamp history, ascending order
    histories: Mutex<HashMap<String, VecDeque<f64>>>,
}

impl RateTracker {
    /// Create a tracker with the given window length in seconds
    pub fn new(window_seconds: u32) -> Self {
        Self {
            window_seconds: f64::from(window_seconds),
            histories: Mutex::new(HashMap::new()),
        }
    }

    /// Record a request from `source` at `now` and return how many requests
    /// from that source fall within the window, including this one.
    ///
    /// Entries strictly older than the window (`now - t > window`) are
    /// pruned; an entry exactly one window old is retained.
    pub fn record_and_count(&self, source: &str, now: f64) -> usize {
        let mut histories = self.histories.lock().unwrap();
        let history = histories.entry(source.to_string()).or_default();

        while history
            .front()
            .map_or(false, |&t| now - t > self.window_seconds)
        {
            history.pop_front();
        }
        history.push_back(now);
        history.len()
    }

    /// Drop every source whose entire history has fallen out of the window,
    /// returning how many sources were evicted.
    ///
    /// Bounds memory under high source cardinality: a source seen once is
    /// otherwise retained forever, since pruning only runs when that source
    /// makes another request.
    pub fn evict_idle(&self, now: f64) -> usize {
        let mut histories = self.histories.lock().unwrap();
        let before = histories.len();
        histories.retain(|_, history| {
            history
                .back()
                .map_or(false, |&t| now - t <= self.window_seconds)
        });
        before - histories.len()
    }

    /// Number of sources currently holding history
    pub fn tracked_sources(&self) -> usize {
        self.histories.lock().unwrap().len()
    }
}
