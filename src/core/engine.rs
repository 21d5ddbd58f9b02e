//! Scoring engine for the WAF decision pipeline.
//!
//! The engine owns a [`RateTracker`] and an ordered list of signal checks.
//! Analyzing a request records it in the tracker, evaluates every signal
//! unconditionally, sums the contributions, and maps the total to a
//! decision band.

use std::sync::Arc;

use log::debug;

use crate::core::clock::{Clock, SystemClock};
use crate::core::rate_tracker::RateTracker;
use crate::core::signals::{
    PayloadSizeSignal, RequestRateSignal, SensitiveEndpointSignal, Signal, SignalContext,
};
use crate::models::{ConfigError, Decision, Request, Verdict, WafConfig};

/// Multi-signal scoring engine.
///
/// Shared across callers as `Arc<ScoringEngine>`; all interior state lives
/// in the tracker, so `analyze` takes `&self`. Decision logic itself is
/// stateless: the same total score always yields the same decision.
pub struct ScoringEngine {
    tracker: RateTracker,
    signals: Vec<Box<dyn Signal>>,
    clock: Arc<dyn Clock>,
}

impl ScoringEngine {
    /// Create an engine with the built-in signal checks and the system clock.
    ///
    /// Fails if the configuration is invalid; no partial engine is returned.
    pub fn new(config: WafConfig) -> Result<Self, ConfigError> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Create an engine with the built-in signal checks and a caller-supplied
    /// time source.
    pub fn with_clock(config: WafConfig, clock: Arc<dyn Clock>) -> Result<Self, ConfigError> {
        let signals: Vec<Box<dyn Signal>> = vec![
            Box::new(RequestRateSignal::new(config.max_requests)),
            Box::new(PayloadSizeSignal::new(config.max_payload_size)),
            Box::new(SensitiveEndpointSignal::new(
                config.sensitive_endpoints.clone(),
            )),
        ];
        Self::with_signals(config, signals, clock)
    }

    /// Create an engine running a caller-supplied signal list instead of the
    /// built-ins.
    pub fn with_signals(
        config: WafConfig,
        signals: Vec<Box<dyn Signal>>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            tracker: RateTracker::new(config.time_window_seconds),
            signals,
            clock,
        })
    }

    /// Analyze a request: record it, evaluate every signal, and map the
    /// accumulated score to a decision.
    ///
    /// Signals are evaluated unconditionally in list order, so the verdict
    /// reports every applicable reason. An empty `source` is accepted and
    /// tracked under the empty key.
    pub fn analyze(&self, request: &Request) -> Verdict {
        let now = self.clock.now();
        let recent_requests = self.tracker.record_and_count(&request.source, now);
        let ctx = SignalContext { recent_requests };

        let mut score = 0;
        let mut reasons = Vec::new();
        for signal in &self.signals {
            if let Some(hit) = signal.evaluate(request, &ctx) {
                debug!(
                    "signal {} fired for {} -> {}: {}",
                    signal.name(),
                    request.source,
                    request.endpoint,
                    hit.reason
                );
                score += hit.score;
                reasons.push(hit.reason);
            }
        }

        Verdict {
            decision: Decision::from_score(score),
            reasons,
            score,
        }
    }

    /// Drop sources whose history has fallen out of the window, returning
    /// how many were evicted.
    pub fn evict_idle(&self) -> usize {
        self.tracker.evict_idle(self.clock.now())
    }

    /// Number of sources currently holding rate history
    pub fn tracked_sources(&self) -> usize {
        self.tracker.tracked_sources()
    }
}
