use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors that can occur while validating engine configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("max_requests must be at least 1, got {0}")]
    InvalidMaxRequests(u32),
    #[error("time_window_seconds must be at least 1, got {0}")]
    InvalidTimeWindow(u32),
    #[error("sensitive endpoint prefixes must not be empty")]
    EmptyEndpointPrefix,
}

/// An inbound request under analysis.
///
/// Constructed by the caller per request; the engine never retains it
/// beyond a single `analyze` call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Request {
    /// Identifier of the request origin (e.g. client IP address)
    pub source: String,
    /// Path being requested
    pub endpoint: String,
    /// Raw request body
    #[serde(default)]
    pub payload: String,
}

impl Request {
    /// Create a new request
    pub fn new(
        source: impl Into<String>,
        endpoint: impl Into<String>,
        payload: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            endpoint: endpoint.into(),
            payload: payload.into(),
        }
    }
}

/// Scoring engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WafConfig {
    /// Maximum requests per source within the sliding window
    pub max_requests: u32,
    /// Sliding window length in seconds
    pub time_window_seconds: u32,
    /// Maximum request payload size in bytes
    pub max_payload_size: usize,
    /// Path prefixes considered sensitive
    pub sensitive_endpoints: Vec<String>,
}

impl Default for WafConfig {
    fn default() -> Self {
        Self {
            max_requests: 5,
            time_window_seconds: 10,
            max_payload_size: 500,
            sensitive_endpoints: vec!["/admin".to_string()],
        }
    }
}

impl WafConfig {
    /// Validate that the configuration is well-formed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_requests < 1 {
            return Err(ConfigError::InvalidMaxRequests(self.max_requests));
        }
        if self.time_window_seconds < 1 {
            return Err(ConfigError::InvalidTimeWindow(self.time_window_seconds));
        }
        if self.sensitive_endpoints.iter().any(|p| p.is_empty()) {
            return Err(ConfigError::EmptyEndpointPrefix);
        }
        Ok(())
    }
}

/// Verdict severity for an analyzed request, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Decision {
    /// Request looks benign
    Allow,
    /// Request is suspicious enough to record
    Log,
    /// Request should be rejected
    Block,
}

impl Decision {
    /// Minimum total score that maps to `Block`
    pub const BLOCK_THRESHOLD: u32 = 4;
    /// Minimum total score that maps to `Log`
    pub const LOG_THRESHOLD: u32 = 2;

    /// Map a total signal score to a decision. Bands are contiguous and
    /// evaluated highest severity first.
    pub fn from_score(score: u32) -> Self {
        match score {
            s if s >= Self::BLOCK_THRESHOLD => Decision::Block,
            s if s >= Self::LOG_THRESHOLD => Decision::Log,
            _ => Decision::Allow,
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Decision::Allow => "ALLOW",
            Decision::Log => "LOG",
            Decision::Block => "BLOCK",
        };
        write!(f, "{}", label)
    }
}

/// Outcome of analyzing one request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    /// Decision mapped from the total score
    pub decision: Decision,
    /// Reasons for every signal that fired, in signal order
    pub reasons: Vec<String>,
    /// Total score accumulated across signals
    pub score: u32,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
}

/// Idle-source eviction configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvictionConfig {
    /// Whether to run the periodic eviction sweep
    pub enabled: bool,
    /// Sweep interval in seconds
    pub interval_seconds: u32,
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,
    /// Scoring engine configuration
    pub waf: WafConfig,
    /// Eviction sweep configuration
    pub eviction: EvictionConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            waf: WafConfig::default(),
            eviction: EvictionConfig {
                enabled: true,
                interval_seconds: 60,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decision_severity_ordering() {
        assert!(Decision::Allow < Decision::Log);
        assert!(Decision::Log < Decision::Block);
    }

    #[test]
    fn test_every_score_maps_to_one_band() {
        for score in 0..=20 {
            let decision = Decision::from_score(score);
            match score {
                0 | 1 => assert_eq!(decision, Decision::Allow),
                2 | 3 => assert_eq!(decision, Decision::Log),
                _ => assert_eq!(decision, Decision::Block),
            }
        }
    }

    #[test]
    fn test_decision_serializes_upper_case() {
        assert_eq!(
            serde_json::to_string(&Decision::Block).unwrap(),
            "\"BLOCK\""
        );
        assert_eq!(serde_json::to_string(&Decision::Allow).unwrap(), "\"ALLOW\"");
        assert_eq!(Decision::Log.to_string(), "LOG");
    }

    #[test]
    fn test_config_validation() {
        assert!(WafConfig::default().validate().is_ok());

        let zero_requests = WafConfig {
            max_requests: 0,
            ..WafConfig::default()
        };
        assert_eq!(
            zero_requests.validate(),
            Err(ConfigError::InvalidMaxRequests(0))
        );

        let zero_window = WafConfig {
            time_window_seconds: 0,
            ..WafConfig::default()
        };
        assert_eq!(zero_window.validate(), Err(ConfigError::InvalidTimeWindow(0)));

        let empty_prefix = WafConfig {
            sensitive_endpoints: vec!["/admin".to_string(), String::new()],
            ..WafConfig::default()
        };
        assert_eq!(
            empty_prefix.validate(),
            Err(ConfigError::EmptyEndpointPrefix)
        );
    }

    #[test]
    fn test_request_payload_defaults_to_empty() {
        let request: Request =
            serde_json::from_str(r#"{"source": "2.2.2.2", "endpoint": "/home"}"#).unwrap();
        assert_eq!(request.payload, "");
    }
}
