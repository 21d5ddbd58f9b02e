//! Signal checks evaluated by the scoring engine.
//!
//! Each signal is one independent heuristic: given a request and a view of
//! the tracker state, it either fires with a reason and score contribution
//! or stays silent. The engine iterates a list of trait objects, so
//! deployments can extend the pipeline without touching the engine itself.

use crate::models::Request;

/// Score contributed by each built-in signal when it fires
pub const SIGNAL_WEIGHT: u32 = 2;

/// Tracker state shared with every signal during one analysis pass.
#[derive(Debug, Clone, Copy)]
pub struct SignalContext {
    /// Requests seen from this source within the sliding window,
    /// including the request under analysis
    pub recent_requests: usize,
}

/// Outcome of a signal that fired
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalHit {
    /// Human-readable reason reported in the verdict
    pub reason: String,
    /// Score contribution
    pub score: u32,
}

impl SignalHit {
    fn new(reason: &str) -> Self {
        Self {
            reason: reason.to_string(),
            score: SIGNAL_WEIGHT,
        }
    }
}

/// One independent heuristic check in the scoring pipeline.
#[cfg_attr(test, mockall::automock)]
pub trait Signal: Send + Sync {
    /// Short identifier used in logs
    fn name(&self) -> &'static str;

    /// Evaluate the signal, returning a hit when it fires
    fn evaluate(&self, request: &Request, ctx: &SignalContext) -> Option<SignalHit>;
}

/// Fires when a source exceeds its request budget for the window.
pub struct RequestRateSignal {
    max_requests: u32,
}

impl RequestRateSignal {
    pub fn new(max_requests: u32) -> Self {
        Self { max_requests }
    }
}

impl Signal for RequestRateSignal {
    fn name(&self) -> &'static str {
        "request_rate"
    }

    fn evaluate(&self, _request: &Request, ctx: &SignalContext) -> Option<SignalHit> {
        if ctx.recent_requests > self.max_requests as usize {
            Some(SignalHit::new("High request rate"))
        } else {
            None
        }
    }
}

/// Fires when the request payload exceeds the size budget.
pub struct PayloadSizeSignal {
    max_payload_size: usize,
}

impl PayloadSizeSignal {
    pub fn new(max_payload_size: usize) -> Self {
        Self { max_payload_size }
    }
}

impl Signal for PayloadSizeSignal {
    fn name(&self) -> &'static str {
        "payload_size"
    }

    fn evaluate(&self, request: &Request, _ctx: &SignalContext) -> Option<SignalHit> {
        if request.payload.len() > self.max_payload_size {
            Some(SignalHit::new("Large payload"))
        } else {
            None
        }
    }
}

/// Fires when the endpoint falls under a sensitive path prefix.
pub struct SensitiveEndpointSignal {
    prefixes: Vec<String>,
}

impl SensitiveEndpointSignal {
    pub fn new(prefixes: Vec<String>) -> Self {
        Self { prefixes }
    }
}

impl Signal for SensitiveEndpointSignal {
    fn name(&self) -> &'static str {
        "sensitive_endpoint"
    }

    fn evaluate(&self, request: &Request, _ctx: &SignalContext) -> Option<SignalHit> {
        if self
            .prefixes
            .iter()
            .any(|prefix| request.endpoint.starts_with(prefix.as_str()))
        {
            Some(SignalHit::new("Sensitive endpoint access"))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet_ctx() -> SignalContext {
        SignalContext { recent_requests: 1 }
    }

    #[test]
    fn test_request_rate_fires_only_above_budget() {
        let signal = RequestRateSignal::new(5);
        let request = Request::new("1.1.1.1", "/login", "user=test");

        assert_eq!(
            signal.evaluate(&request, &SignalContext { recent_requests: 5 }),
            None
        );
        let hit = signal
            .evaluate(&request, &SignalContext { recent_requests: 6 })
            .unwrap();
        assert_eq!(hit.reason, "High request rate");
        assert_eq!(hit.score, SIGNAL_WEIGHT);
    }

    #[test]
    fn test_payload_size_compares_byte_length() {
        let signal = PayloadSizeSignal::new(500);

        let at_budget = Request::new("1.1.1.1", "/upload", "X".repeat(500));
        assert_eq!(signal.evaluate(&at_budget, &quiet_ctx()), None);

        let over_budget = Request::new("1.1.1.1", "/upload", "X".repeat(501));
        let hit = signal.evaluate(&over_budget, &quiet_ctx()).unwrap();
        assert_eq!(hit.reason, "Large payload");
    }

    #[test]
    fn test_sensitive_endpoint_matches_prefixes() {
        let signal = SensitiveEndpointSignal::new(vec![
            "/admin".to_string(),
            "/internal".to_string(),
        ]);

        let admin = Request::new("1.1.1.1", "/admin/users", "");
        assert!(signal.evaluate(&admin, &quiet_ctx()).is_some());

        let internal = Request::new("1.1.1.1", "/internal", "");
        assert!(signal.evaluate(&internal, &quiet_ctx()).is_some());

        let home = Request::new("1.1.1.1", "/home", "");
        assert_eq!(signal.evaluate(&home, &quiet_ctx()), None);
    }

    #[test]
    fn test_sensitive_endpoint_is_prefix_not_substring() {
        let signal = SensitiveEndpointSignal::new(vec!["/admin".to_string()]);

        let nested = Request::new("1.1.1.1", "/api/admin", "");
        assert_eq!(signal.evaluate(&nested, &quiet_ctx()), None);
    }
}
