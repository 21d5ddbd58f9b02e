//! Core functionality for the WAF decision engine.
//!
//! This module contains the decision pipeline: the sliding-window rate
//! tracker, the signal checks, the scoring engine, and the clock
//! abstraction they share.

pub mod clock;
pub mod engine;
pub mod rate_tracker;
pub mod signals;

pub use clock::{Clock, ManualClock, SystemClock};
pub use engine::ScoringEngine;
pub use rate_tracker::RateTracker;
pub use signals::{Signal, SignalContext, SignalHit};
